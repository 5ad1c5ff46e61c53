pub mod clean;
pub mod extract;
pub mod segment;

use crate::article::ArticleRecord;
use crate::error::ExtractError;
use extract::ArticleParser;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Two-pass pipeline: export text → article blocks → records, in file order.
pub fn parse_export(
    text: &str,
    parser: &dyn ArticleParser,
) -> Vec<Result<ArticleRecord, ExtractError>> {
    let blocks: Vec<String> = segment::split_articles(text).collect();
    parse_blocks(&blocks, parser)
}

#[cfg(feature = "rayon")]
fn parse_blocks(
    blocks: &[String],
    parser: &dyn ArticleParser,
) -> Vec<Result<ArticleRecord, ExtractError>> {
    blocks.par_iter().map(|b| parser.parse(b)).collect()
}

#[cfg(not(feature = "rayon"))]
fn parse_blocks(
    blocks: &[String],
    parser: &dyn ArticleParser,
) -> Vec<Result<ArticleRecord, ExtractError>> {
    blocks.iter().map(|b| parser.parse(b)).collect()
}
