use std::sync::LazyLock;

use regex::Regex;

// Retriever permalink to the full web article
static PERMALINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://ret\.nu/\S*").unwrap());

/// First Retriever permalink in `content`, up to the next whitespace.
pub fn find_url(content: &str) -> Option<String> {
    PERMALINK_RE.find(content).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permalink_in_notice() {
        let text = "Text\nSe webartikeln på https://ret.nu/Xy12Ab\n";
        assert_eq!(find_url(text).as_deref(), Some("https://ret.nu/Xy12Ab"));
    }

    #[test]
    fn plain_http() {
        assert_eq!(
            find_url("Läs mer: http://ret.nu/abc?x=1 nu").as_deref(),
            Some("http://ret.nu/abc?x=1")
        );
    }

    #[test]
    fn other_hosts_ignored() {
        assert_eq!(find_url("https://www.aftonbladet.se/nyheter/a/1"), None);
    }

    #[test]
    fn no_link() {
        assert_eq!(find_url("Rubrik\n\nText"), None);
    }
}
