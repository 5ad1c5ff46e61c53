use std::sync::LazyLock;

use regex::Regex;

// "INRIKES.", "KULTUR.", "SPORT 2."
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-ZÅÄÖ0-9]{2}\.").unwrap());
// "Aftonbladet, 2021-09-29"
static NEWSPAPER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}-\d{1,2}").unwrap());
// "2021-09-29", "2021-09-29 14:22", "2021-09-29 14:22:05"
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}(?:\s*\d{2}:\d{2}(?::\d{2})?)?").unwrap());

const PAGE_PREFIXES: &[&str] = &["Sida"];
const EDITION_PREFIXES: &[&str] = &["Publicerat i", "Publicerat på", "Sänt i"];
const IMAGETEXT_PREFIXES: &[&str] = &["Bildtext:"];

/// Fields found in the metadata zone of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub section: Option<String>,
    pub newspaper: Option<String>,
    pub date_raw: Option<String>,
    pub page: Option<String>,
    pub edition: Option<String>,
    pub imagetext: Option<String>,
}

/// Every field is taken from the first line matching its own rule; the
/// scans are independent, so one line can feed several fields.
pub fn parse_metadata(zone: &str) -> Metadata {
    let lines: Vec<&str> = zone
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    Metadata {
        title: lines.first().map(|l| l.to_string()),
        section: find_section(&lines),
        newspaper: find_newspaper(&lines),
        date_raw: find_date(&lines),
        page: find_prefixed(&lines, PAGE_PREFIXES),
        edition: find_prefixed(&lines, EDITION_PREFIXES),
        imagetext: find_prefixed(&lines, IMAGETEXT_PREFIXES),
    }
}

fn find_section(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find(|l| SECTION_RE.is_match(l))
        .map(|l| l.to_string())
}

fn find_newspaper(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find(|l| NEWSPAPER_RE.is_match(l))
        .map(|l| l.split(',').next().unwrap_or_default().to_string())
}

fn find_date(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find_map(|l| DATE_RE.find(l))
        .map(|m| m.as_str().to_string())
}

fn find_prefixed(lines: &[&str], prefixes: &[&str]) -> Option<String> {
    lines
        .iter()
        .find(|l| prefixes.iter().any(|p| l.starts_with(p)))
        .map(|l| l.to_string())
}
