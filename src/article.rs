use std::fmt;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// One article parsed out of an export file.
///
/// Text fields are `None` when no metadata line matched their rule, which
/// keeps "not found" apart from "found but empty". Serialization writes
/// absent text fields as empty strings and leaves out `id` and `url` when
/// they are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArticleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(serialize_with = "or_empty")]
    pub title: Option<String>,
    #[serde(serialize_with = "or_empty")]
    pub section: Option<String>,
    #[serde(serialize_with = "or_empty")]
    pub newspaper: Option<String>,
    pub date: Option<NaiveDateTime>,
    #[serde(serialize_with = "or_empty")]
    pub date_raw: Option<String>,
    #[serde(serialize_with = "or_empty")]
    pub page: Option<String>,
    #[serde(serialize_with = "or_empty")]
    pub edition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub lead: String,
    pub body: String,
    #[serde(serialize_with = "or_empty")]
    pub imagetext: Option<String>,
}

/// Every field of a record except its id, borrowed.
///
/// Two records with equal identities are duplicates of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity<'a> {
    title: Option<&'a str>,
    section: Option<&'a str>,
    newspaper: Option<&'a str>,
    date: Option<NaiveDateTime>,
    date_raw: Option<&'a str>,
    page: Option<&'a str>,
    edition: Option<&'a str>,
    url: Option<&'a str>,
    lead: &'a str,
    body: &'a str,
    imagetext: Option<&'a str>,
}

impl ArticleRecord {
    pub fn identity(&self) -> Identity<'_> {
        Identity {
            title: self.title.as_deref(),
            section: self.section.as_deref(),
            newspaper: self.newspaper.as_deref(),
            date: self.date,
            date_raw: self.date_raw.as_deref(),
            page: self.page.as_deref(),
            edition: self.edition.as_deref(),
            url: self.url.as_deref(),
            lead: &self.lead,
            body: &self.body,
            imagetext: self.imagetext.as_deref(),
        }
    }

    pub fn is_duplicate_of(&self, other: &ArticleRecord) -> bool {
        self.identity() == other.identity()
    }

    /// True when a core metadata field is absent or empty, or when the
    /// article has neither lead nor body.
    pub fn is_missing(&self) -> bool {
        let core = [
            &self.title,
            &self.section,
            &self.newspaper,
            &self.page,
            &self.edition,
        ];
        if core.iter().any(|f| f.as_deref().map_or(true, str::is_empty)) {
            return true;
        }
        self.lead.is_empty() && self.body.is_empty()
    }

    /// Characters of article text (lead and body).
    pub fn text_len(&self) -> usize {
        self.lead.chars().count() + self.body.chars().count()
    }

    /// Multi-line overview for terminal output.
    pub fn summary(&self) -> String {
        let show = |f: &Option<String>| f.as_deref().unwrap_or("").to_string();
        let date = self.date.map(|d| d.to_string()).unwrap_or_default();
        format!(
            "    Title:  {}\n\
             Newspaper:  {}\n  \
             Section:  {}\n     \
             Date:  {}\n \
             Date raw:  {}\n     \
             Page:  {}\n  \
             Edition:  {}\n     \
             Lead:  {}\n     \
             Body:  {}\n      \
             URL:  {}",
            show(&self.title),
            show(&self.newspaper),
            show(&self.section),
            date,
            show(&self.date_raw),
            show(&self.page),
            show(&self.edition),
            preview(&self.lead),
            preview(&self.body),
            show(&self.url),
        )
    }
}

impl fmt::Display for ArticleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}> {} ({} chars)",
            self.newspaper.as_deref().unwrap_or(""),
            self.title.as_deref().unwrap_or(""),
            self.text_len()
        )
    }
}

fn preview(text: &str) -> String {
    let len = text.chars().count();
    if len <= 15 {
        return text.to_string();
    }
    let head: String = text
        .chars()
        .take(10)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    format!("{} ... ({} chars)", head, len)
}

fn or_empty<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}
