use std::iter::Skip;
use std::str::Lines;

/// A run of this many `=` ends an article in the export.
pub const DELIMITER: &str = "===========";

/// Lazily split a whole export file into article blocks.
///
/// Everything before the first pair of consecutive empty lines is the table
/// of contents and is skipped. Each block holds the trimmed lines up to and
/// including its delimiter line, joined with `\n`. Lines left after the last
/// delimiter form one final block, even when they are all blank.
pub fn split_articles(text: &str) -> ArticleTexts<'_> {
    ArticleTexts {
        lines: text.lines().skip(find_start_index(text)),
        done: false,
    }
}

/// Index of the second line of the first pair of empty lines, or 0.
pub fn find_start_index(text: &str) -> usize {
    text.lines()
        .zip(text.lines().skip(1))
        .position(|(prev, line)| prev.is_empty() && line.is_empty())
        .map_or(0, |i| i + 1)
}

/// Iterator over article blocks. Cloning it restarts from the same point.
#[derive(Debug, Clone)]
pub struct ArticleTexts<'a> {
    lines: Skip<Lines<'a>>,
    done: bool,
}

impl Iterator for ArticleTexts<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let mut buffer: Vec<&str> = Vec::new();
        for line in self.lines.by_ref() {
            buffer.push(line.trim());
            if line.contains(DELIMITER) {
                return Some(buffer.join("\n"));
            }
        }
        self.done = true;
        if buffer.is_empty() {
            None
        } else {
            Some(buffer.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::clean::remove_noise;

    const RULE: &str = "==============================";

    #[test]
    fn skips_table_of_contents() {
        let text = format!("Innehåll\n1. Första\n2. Andra\n\n\nFörsta\n{RULE}\nAndra\n{RULE}\n");
        let blocks: Vec<_> = split_articles(&text).collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], format!("\nFörsta\n{RULE}"));
        assert_eq!(blocks[1], format!("Andra\n{RULE}"));
    }

    #[test]
    fn start_index() {
        assert_eq!(find_start_index("a\nb\n\n\nc"), 3);
        assert_eq!(find_start_index("a\n\nb\n\nc"), 0);
        assert_eq!(find_start_index(""), 0);
    }

    #[test]
    fn trailing_content_adds_a_block() {
        let text = format!("\n\na\n{RULE}\nb\n{RULE}\nc");
        assert_eq!(split_articles(&text).count(), 3);
    }

    #[test]
    fn no_trailing_content_no_extra_block() {
        let text = format!("\n\na\n{RULE}\nb\n{RULE}\n");
        assert_eq!(split_articles(&text).count(), 2);
    }

    #[test]
    fn blank_tail_is_still_a_block() {
        let text = format!("\n\na\n{RULE}\n\n");
        let blocks: Vec<_> = split_articles(&text).collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], "");
    }

    #[test]
    fn no_delimiter_yields_everything() {
        let blocks: Vec<_> = split_articles("Rubrik\nText").collect();
        assert_eq!(blocks, vec!["Rubrik\nText".to_string()]);
    }

    #[test]
    fn only_blank_lines() {
        let blocks: Vec<_> = split_articles("\n").collect();
        assert_eq!(find_start_index("\n"), 0);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].trim().is_empty());

        // a blank pair still counts as the end of the contents
        let blocks: Vec<_> = split_articles("\n\n\n").collect();
        assert_eq!(find_start_index("\n\n\n"), 1);
        assert_eq!(blocks, vec!["\n".to_string()]);
        assert_eq!(remove_noise(&blocks[0]), "");
    }

    #[test]
    fn empty_input_has_no_blocks() {
        assert_eq!(split_articles("").count(), 0);
    }

    #[test]
    fn short_rule_is_not_a_delimiter() {
        let blocks: Vec<_> = split_articles("a\n==========\nb").collect();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn lines_are_trimmed_and_crlf_handled() {
        let text = format!("  a  \r\n\tb\r\n{RULE}\r\n");
        let blocks: Vec<_> = split_articles(&text).collect();
        assert_eq!(blocks, vec![format!("a\nb\n{RULE}")]);
    }

    #[test]
    fn restartable() {
        let text = format!("a\n{RULE}\nb");
        let first = split_articles(&text);
        let again = first.clone();
        assert_eq!(first.collect::<Vec<_>>(), again.collect::<Vec<_>>());
    }

    #[test]
    fn sample_export() {
        let text = std::fs::read_to_string("tests/fixtures/sample_export.txt").unwrap();
        let blocks: Vec<_> = split_articles(&text).collect();
        assert_eq!(blocks.len(), 5);
        assert!(blocks[0].contains("Mordet på löparen"));
        assert!(!blocks[0].contains("Innehållsförteckning"));
    }
}
