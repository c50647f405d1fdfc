//! calgrid configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Weekday;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};

/// Where the session's events come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Sample,
    File,
    Remote,
    Stdin,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Sample => "sample",
            SourceKind::File => "file",
            SourceKind::Remote => "remote",
            SourceKind::Stdin => "stdin",
        };
        f.write_str(name)
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sample" => Ok(SourceKind::Sample),
            "file" => Ok(SourceKind::File),
            "remote" => Ok(SourceKind::Remote),
            "stdin" => Ok(SourceKind::Stdin),
            other => Err(format!(
                "Unknown source '{other}'. Expected one of: sample, file, remote, stdin"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl From<WeekStart> for Weekday {
    fn from(start: WeekStart) -> Self {
        match start {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

/// Configuration at ~/.config/calgrid/config.toml
///
/// Every key can also be set through `CALGRID_<KEY>` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CalGridConfig {
    #[serde(default)]
    pub source: SourceKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,

    #[serde(default)]
    pub week_start: WeekStart,
}

impl CalGridConfig {
    pub fn config_path() -> CalGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine config directory".into()))?
            .join("calgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, creating a commented default file first if
    /// none exists.
    pub fn load() -> CalGridResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (optional on disk) plus environment overrides.
    pub fn load_from(path: &Path) -> CalGridResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CALGRID"))
            .build()
            .map_err(|e| CalGridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalGridError::Config(e.to_string()))
    }

    /// `events_file` with a leading `~` expanded.
    pub fn events_file_path(&self) -> Option<PathBuf> {
        self.events_file.as_ref().map(|p| {
            PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned())
        })
    }

    pub fn week_start(&self) -> chrono::Weekday {
        self.week_start.into()
    }

    pub fn to_toml(&self) -> CalGridResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalGridError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalGridResult<()> {
        let contents = "\
# calgrid configuration

# Where events come from: sample, file, remote or stdin
# source = \"sample\"

# JSON file used when source = \"file\"
# events_file = \"~/calendar/events.json\"

# Endpoint used when source = \"remote\"
# remote_url = \"https://example.com/events\"

# First column of the month grid: sunday or monday
# week_start = \"sunday\"
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
