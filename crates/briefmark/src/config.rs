//! Review configuration.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What happens when input is loaded while a session already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReloadPolicy {
    /// Never replace a running session.
    KeepExisting,
    /// Keep the session for the same input, replace it for a different one.
    #[default]
    ResetOnNewSource,
    /// Replace the session on every load.
    AlwaysReset,
}

impl FromStr for ReloadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "keep" | "keep-existing" => Ok(ReloadPolicy::KeepExisting),
            "new-source" | "reset-on-new-source" => Ok(ReloadPolicy::ResetOnNewSource),
            "always" | "always-reset" => Ok(ReloadPolicy::AlwaysReset),
            _ => Err(format!(
                "Unknown reload policy: {}. Use keep, new-source, or always.",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReloadPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReloadPolicy::KeepExisting => write!(f, "keep"),
            ReloadPolicy::ResetOnNewSource => write!(f, "new-source"),
            ReloadPolicy::AlwaysReset => write!(f, "always"),
        }
    }
}

/// Configuration for a review run.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    /// Directory receiving exports and session snapshots.
    pub output_dir: PathBuf,
    /// Reload behavior for the session slot.
    pub reload_policy: ReloadPolicy,
    /// Save a snapshot after every change.
    pub autosave: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            reload_policy: ReloadPolicy::default(),
            autosave: true,
        }
    }
}

impl ReviewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_reload_policy(mut self, policy: ReloadPolicy) -> Self {
        self.reload_policy = policy;
        self
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }
}
