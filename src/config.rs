use std::path::Path;

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::parser::extract::DatePolicy;

pub const CONFIG_FILE: &str = "markivet.toml";

/// Runtime settings. Sources, lowest priority first: built-in defaults, an
/// optional `markivet.toml`, `MARKIVET_*` environment variables. CLI flags
/// are applied on top by the binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub verbose: bool,
    /// Abort a multi-file load on the first unreadable file.
    pub strict: bool,
    pub date_policy: DatePolicy,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_file(Path::new(CONFIG_FILE))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("MARKIVET"))
            .build()?
            .try_deserialize()
    }
}
