use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn one article block into a record.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("article content is absent")]
    EmptyInput,

    #[error("expected metadata, lead or body parts, found none")]
    MalformedArticle,

    #[error("could not parse date {raw:?}: {reason}")]
    DateParse { raw: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("could not enumerate files: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("cannot merge a {left} collection with a {right} collection")]
    TypeMismatch { left: String, right: String },

    #[error("could not serialize articles: {0}")]
    Json(#[from] serde_json::Error),
}

impl CollectionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollectionError::Io {
            path: path.into(),
            source,
        }
    }
}
