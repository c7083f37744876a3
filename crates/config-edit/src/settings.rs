//! Engine settings.
//!
//! Read from a TOML file next to the edit scripts:
//!
//! ```toml
//! log_diagnostics = true
//! log_context = false
//! log_tag_map = false
//! ```
//!
//! Every key is optional; a missing file yields the defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::diagnostics::Channel;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Report rejected edits.
    pub log_faults: bool,
    /// Report successful mutations and no-ops.
    pub log_diagnostics: bool,
    /// Report context pushes, reuse and invalidation.
    pub log_context: bool,
    /// Log the tag registry when a session starts.
    pub log_tag_map: bool,
    /// Skip the remaining edits of a file once one of them faulted.
    pub latch_faults: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_faults: true,
            log_diagnostics: false,
            log_context: false,
            log_tag_map: false,
            latch_faults: true,
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads settings from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Everything on; handy when debugging a script.
    pub fn verbose() -> Self {
        Self {
            log_faults: true,
            log_diagnostics: true,
            log_context: true,
            log_tag_map: true,
            latch_faults: true,
        }
    }

    pub fn channel_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Fault => self.log_faults,
            Channel::Info => self.log_diagnostics,
            Channel::Context => self.log_context,
        }
    }

    /// One-line summary of the switches.
    pub fn summary(&self) -> String {
        let flag = |on: bool| if on { "on" } else { "off" };
        format!(
            "fault logging: {} | diagnostic logging: {} | context logging: {} | tag map logging: {} | fault latching: {}",
            flag(self.log_faults),
            flag(self.log_diagnostics),
            flag(self.log_context),
            flag(self.log_tag_map),
            flag(self.latch_faults),
        )
    }
}
