use std::collections::HashSet;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info, warn};

use crate::article::ArticleRecord;
use crate::error::CollectionError;
use crate::parser;
use crate::parser::extract::{ArticleParser, DatePolicy, RetrieverParser};
use crate::progress::Progress;

/// Where articles come from.
#[derive(Debug, Clone)]
pub enum Source {
    File(PathBuf),
    /// Glob pattern such as `exports/*.txt`.
    Pattern(String),
    Articles(Vec<ArticleRecord>),
}

impl Source {
    /// A command-line argument. An existing path is always a file, even when
    /// its name holds glob metacharacters; otherwise those make it a pattern.
    pub fn from_arg(arg: &str) -> Self {
        let path = Path::new(arg);
        if path.exists() || !arg.contains(['*', '?', '[']) {
            Source::File(path.to_path_buf())
        } else {
            Source::Pattern(arg.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Fail a pattern load on the first unreadable file instead of skipping it.
    pub strict: bool,
}

/// What a load added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub files: usize,
    pub articles: usize,
    /// Article blocks the parser rejected.
    pub failed: usize,
    /// Files skipped because they could not be read.
    pub unreadable: Vec<PathBuf>,
}

impl LoadReport {
    pub fn absorb(&mut self, other: LoadReport) {
        self.files += other.files;
        self.articles += other.articles;
        self.failed += other.failed;
        self.unreadable.extend(other.unreadable);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing was written.
    Empty,
    Written(usize),
}

/// Ordered articles from one or more export files.
pub struct Collection {
    parser: Arc<dyn ArticleParser>,
    articles: Vec<ArticleRecord>,
    files: Vec<PathBuf>,
}

impl Collection {
    pub fn new(parser: Arc<dyn ArticleParser>) -> Self {
        Self {
            parser,
            articles: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Empty collection for Retriever exports.
    pub fn retriever(date_policy: DatePolicy) -> Self {
        Self::new(Arc::new(RetrieverParser::new(date_policy)))
    }

    pub fn from_articles(parser: Arc<dyn ArticleParser>, articles: Vec<ArticleRecord>) -> Self {
        Self {
            parser,
            articles,
            files: Vec::new(),
        }
    }

    pub fn format(&self) -> &str {
        self.parser.format()
    }

    pub fn articles(&self) -> &[ArticleRecord] {
        &self.articles
    }

    /// Files that contributed articles, in load order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArticleRecord> {
        self.articles.iter()
    }

    pub fn missing_count(&self) -> usize {
        self.articles.iter().filter(|a| a.is_missing()).count()
    }

    /// Append articles from `source`. Rejected article blocks are counted in
    /// the report, never fatal.
    pub fn load(&mut self, source: Source, options: &LoadOptions) -> Result<LoadReport, CollectionError> {
        match source {
            Source::File(path) => self.load_file(&path),
            Source::Pattern(pattern) => self.load_pattern(&pattern, options),
            Source::Articles(articles) => {
                let report = LoadReport {
                    articles: articles.len(),
                    ..Default::default()
                };
                self.articles.extend(articles);
                Ok(report)
            }
        }
    }

    pub fn load_file(&mut self, path: &Path) -> Result<LoadReport, CollectionError> {
        info!("Loading {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| CollectionError::io(path, e))?;
        let mut report = LoadReport::default();
        if text.is_empty() {
            info!("No content in {}", path.display());
            return Ok(report);
        }

        for (i, result) in parser::parse_export(&text, self.parser.as_ref())
            .into_iter()
            .enumerate()
        {
            match result {
                Ok(article) => {
                    self.articles.push(article);
                    report.articles += 1;
                }
                Err(e) => {
                    warn!("Could not parse article #{} in {}: {}", i + 1, path.display(), e);
                    report.failed += 1;
                }
            }
        }
        debug!(
            articles = report.articles,
            failed = report.failed,
            "Parsed {}",
            path.display()
        );

        self.files.push(path.to_path_buf());
        report.files = 1;
        Ok(report)
    }

    fn load_pattern(&mut self, pattern: &str, options: &LoadOptions) -> Result<LoadReport, CollectionError> {
        let mut report = LoadReport::default();
        let mut paths = Vec::new();
        for entry in glob::glob(pattern)? {
            match entry {
                Ok(path) if path.is_dir() => {}
                Ok(path) => paths.push(path),
                Err(e) if options.strict => return Err(e.into()),
                Err(e) => {
                    warn!("{e}");
                    report.unreadable.push(e.path().to_path_buf());
                }
            }
        }
        paths.sort();
        if paths.is_empty() {
            warn!("No files match {pattern}");
        }

        for path in paths {
            match self.load_file(&path) {
                Ok(r) => report.absorb(r),
                Err(e) if options.strict => return Err(e),
                Err(e) => {
                    warn!("Skipping: {e}");
                    report.unreadable.push(path);
                }
            }
        }
        Ok(report)
    }

    /// Drop every article equal to an earlier one (ids aside), keeping
    /// first occurrences in order. Returns how many were removed.
    pub fn dedupe(&mut self, progress: &dyn Progress) -> usize {
        let before = self.articles.len();
        info!("Searching for duplicates in {before} articles...");
        if before == 0 {
            return 0;
        }

        progress.start(before);
        let keep: Vec<bool> = {
            let mut seen = HashSet::with_capacity(before);
            self.articles
                .iter()
                .enumerate()
                .map(|(i, a)| {
                    let first = seen.insert(a.identity());
                    progress.advance(i + 1);
                    first
                })
                .collect()
        };
        progress.finish();

        let mut keep = keep.into_iter();
        self.articles.retain(|_| keep.next().unwrap_or(true));

        let removed = before - self.articles.len();
        if removed > 0 {
            info!("Removed {removed} duplicates");
        } else {
            info!("No duplicates found");
        }
        removed
    }

    /// Number articles 1.. in their current order.
    pub fn assign_sequence_ids(&mut self) {
        for (i, article) in self.articles.iter_mut().enumerate() {
            article.id = Some(i as u32 + 1);
        }
    }

    /// This collection's articles followed by `other`'s.
    pub fn merge(&self, other: &Collection) -> Result<Collection, CollectionError> {
        if self.format() != other.format() {
            return Err(CollectionError::TypeMismatch {
                left: self.format().to_string(),
                right: other.format().to_string(),
            });
        }
        Ok(Collection {
            parser: Arc::clone(&self.parser),
            articles: self.articles.iter().chain(&other.articles).cloned().collect(),
            files: self.files.iter().chain(&other.files).cloned().collect(),
        })
    }

    /// Earliest and latest article date. On ties the first article seen wins.
    pub fn date_span(&self) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        self.articles
            .iter()
            .filter_map(|a| a.date)
            .fold((None, None), |(min, max), date| {
                let min = match min {
                    Some(m) if m <= date => m,
                    _ => date,
                };
                let max = match max {
                    Some(m) if m >= date => m,
                    _ => date,
                };
                (Some(min), Some(max))
            })
    }

    /// Write all articles as a JSON array. An empty collection writes nothing.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<SaveOutcome, CollectionError> {
        let path = path.as_ref();
        if self.articles.is_empty() {
            info!("Nothing to save");
            return Ok(SaveOutcome::Empty);
        }

        let file = File::create(path).map_err(|e| CollectionError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        self.articles.serialize(&mut ser)?;
        writer.flush().map_err(|e| CollectionError::io(path, e))?;

        info!("Saved {} articles to {}", self.articles.len(), path.display());
        Ok(SaveOutcome::Written(self.articles.len()))
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.files.as_slice() {
            [file] => write!(f, "Loaded {}", file.display())?,
            files => write!(f, "Loaded {} files", files.len())?,
        }
        write!(f, " ({} articles", self.articles.len())?;
        if let (Some(min), Some(max)) = self.date_span() {
            write!(f, ", from {} to {}", min.date(), max.date())?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("format", &self.format())
            .field("articles", &self.articles.len())
            .field("files", &self.files)
            .finish()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a ArticleRecord;
    type IntoIter = std::slice::Iter<'a, ArticleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.iter()
    }
}

impl IntoIterator for Collection {
    type Item = ArticleRecord;
    type IntoIter = std::vec::IntoIter<ArticleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.into_iter()
    }
}

// ── Tests ──
