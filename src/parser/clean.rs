use crate::error::ExtractError;

use super::segment::DELIMITER;

const LEGAL_NOTICE: &str =
    "Artiklar får ej distribueras utanför den egna organisationen utan godkännande från Retriever";

const NOISE: &[&str] = &[DELIMITER, LEGAL_NOTICE];

/// Openings of the permalink notice Retriever appends to web articles.
const LINK_NOTICES: &[&str] = &["Se webartikeln på", "Läs hela artikeln på"];
const LINK_HOST: &str = "ret.nu/";

/// Footer marker: a period directly followed by the copyright sign.
const FOOTER_MARK: &str = ".©";

/// The three text zones of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zones<'a> {
    pub metadata: &'a str,
    pub lead: &'a str,
    pub body: &'a str,
}

/// Drop boilerplate lines, cut the copyright footer and trim.
pub fn remove_noise(article: &str) -> String {
    let kept: Vec<&str> = article
        .split('\n')
        .filter(|line| !is_noise_line(line))
        .collect();
    let mut text = kept.join("\n");
    if let Some(i) = text.find(FOOTER_MARK) {
        // keep the period
        text.truncate(i + 1);
    }
    text.trim().to_string()
}

fn is_noise_line(line: &str) -> bool {
    NOISE.iter().any(|bad| line.contains(bad)) || is_link_notice(line)
}

fn is_link_notice(line: &str) -> bool {
    let line = line.trim();
    LINK_NOTICES.iter().any(|p| line.starts_with(p)) && line.contains(LINK_HOST)
}

/// Split cleaned text on blank lines into metadata, lead and body.
///
/// Two parts means there is no lead; one part means there is neither lead
/// nor body. Parts after the third are ignored.
pub fn split_zones(article: &str) -> Result<Zones<'_>, ExtractError> {
    let parts: Vec<&str> = article.split("\n\n").collect();
    match *parts.as_slice() {
        [] => Err(ExtractError::MalformedArticle),
        [metadata] => Ok(Zones {
            metadata,
            lead: "",
            body: "",
        }),
        [metadata, body] => Ok(Zones {
            metadata,
            lead: "",
            body,
        }),
        [metadata, lead, body, ..] => Ok(Zones {
            metadata,
            lead,
            body,
        }),
    }
}
