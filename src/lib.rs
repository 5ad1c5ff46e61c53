//! Converts Retriever Mediearkivet TXT exports into structured article records.
//!
//! An export is split into article blocks ([`parser::segment`]), each block is
//! cleaned and parsed into an [`ArticleRecord`] ([`parser::extract`]), and the
//! records are gathered in a [`Collection`] that can be deduplicated, numbered
//! and saved as JSON.

pub mod article;
pub mod collection;
pub mod config;
pub mod error;
pub mod parser;
pub mod progress;

pub use article::ArticleRecord;
pub use collection::{Collection, LoadOptions, LoadReport, SaveOutcome, Source};
pub use error::{CollectionError, ExtractError};
pub use parser::extract::{ArticleParser, DatePolicy, RetrieverParser};
