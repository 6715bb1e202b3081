use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::ExtractMode;
use crate::reader::DEFAULT_CHUNK_SIZE;
use crate::{RunInfoError, RunInfoResult};

pub const DEFAULT_LOG_PATH: &str = "DAQInterface_partition1.log";
pub const DEFAULT_ZONE_LABEL: &str = "CT";

/// Settings for one scan. Missing TOML keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log_path: PathBuf,
    pub chunk_size: usize,
    pub lenient: bool,
    pub zone_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            chunk_size: DEFAULT_CHUNK_SIZE,
            lenient: false,
            zone_label: DEFAULT_ZONE_LABEL.to_string(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_path: Option<PathBuf>,
    pub chunk_size: Option<usize>,
    pub lenient: bool,
    pub zone_label: Option<String>,
}

impl Config {
    pub fn from_toml_str(s: &str) -> RunInfoResult<Config> {
        let cfg: Config = toml::from_str(s).map_err(|e| RunInfoError::Message(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> RunInfoResult<Config> {
        let s = std::fs::read_to_string(path).map_err(|e| RunInfoError::io(path, e))?;
        Config::from_toml_str(&s)
    }

    /// Defaults, then `file` if given, then `overrides`.
    pub fn resolve(file: Option<&Path>, overrides: Overrides) -> RunInfoResult<Config> {
        let mut cfg = match file {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(p) = overrides.log_path {
            cfg.log_path = p;
        }
        if let Some(n) = overrides.chunk_size {
            cfg.chunk_size = n;
        }
        if overrides.lenient {
            cfg.lenient = true;
        }
        if let Some(label) = overrides.zone_label {
            cfg.zone_label = label;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> RunInfoResult<()> {
        if self.chunk_size == 0 {
            return Err(RunInfoError::Config("chunk_size must be greater than zero".into()));
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(RunInfoError::Config("log_path must not be empty".into()));
        }
        Ok(())
    }

    pub fn extract_mode(&self) -> ExtractMode {
        if self.lenient { ExtractMode::Lenient } else { ExtractMode::Strict }
    }
}
