pub mod date;
pub mod links;
pub mod metadata;

use crate::article::ArticleRecord;
use crate::error::ExtractError;
use crate::parser::clean;

pub use date::DatePolicy;

/// Anything that turns one article block into a record.
pub trait ArticleParser: Send + Sync {
    /// Name of the export layout, used to refuse merging unrelated collections.
    fn format(&self) -> &str;

    fn parse(&self, content: &str) -> Result<ArticleRecord, ExtractError>;

    /// Like [`ArticleParser::parse`], but absent content is an error while an
    /// empty string still yields an (empty) record.
    fn parse_opt(&self, content: Option<&str>) -> Result<ArticleRecord, ExtractError> {
        content
            .ok_or(ExtractError::EmptyInput)
            .and_then(|c| self.parse(c))
    }
}

/// Parser for the TXT export of Retriever Mediearkivet, with the table of
/// contents included (the export's default settings).
#[derive(Debug, Clone, Copy, Default)]
pub struct RetrieverParser {
    date_policy: DatePolicy,
}

impl RetrieverParser {
    pub fn new(date_policy: DatePolicy) -> Self {
        Self { date_policy }
    }
}

impl ArticleParser for RetrieverParser {
    fn format(&self) -> &str {
        "retriever"
    }

    fn parse(&self, content: &str) -> Result<ArticleRecord, ExtractError> {
        // the permalink notice is stripped as noise, so look before cleaning
        let url = links::find_url(content);
        let cleaned = clean::remove_noise(content);
        let zones = clean::split_zones(&cleaned)?;
        let meta = metadata::parse_metadata(zones.metadata);
        let date = date::resolve_date(meta.date_raw.as_deref(), self.date_policy)?;

        Ok(ArticleRecord {
            id: None,
            title: meta.title,
            section: meta.section,
            newspaper: meta.newspaper,
            date,
            date_raw: meta.date_raw,
            page: meta.page,
            edition: meta.edition,
            url,
            lead: zones.lead.to_string(),
            body: zones.body.to_string(),
            imagetext: meta.imagetext,
        })
    }
}
