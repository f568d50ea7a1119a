//! Emitter configuration
//!
//! Configuration is optional: `Emitter::new()` uses [`EmitterConfig::default`].
//! It can also be loaded from YAML, under an `emitter` key:
//!
//! ```yaml
//! emitter:
//!   max_listeners: 25
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{EmitterError, Result};

/// Tunables for an [`crate::Emitter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Listener count per event name above which a leak warning is logged
    ///
    /// `0` disables the warning. Registration is never refused.
    pub max_listeners: usize,
}

impl EmitterConfig {
    /// Default listener threshold per event name
    pub const DEFAULT_MAX_LISTENERS: usize = 10;

    /// Configuration with the leak warning disabled
    pub fn unbounded() -> Self {
        Self { max_listeners: 0 }
    }

    /// Set the leak warning threshold
    pub fn with_max_listeners(mut self, max_listeners: usize) -> Self {
        self.max_listeners = max_listeners;
        self
    }

    /// Load configuration from a YAML file
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML content
    ///
    /// A document without an `emitter` key yields the default configuration.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| EmitterError::Config(format!("Invalid YAML: {}", e)))?;

        match value.get("emitter") {
            Some(section) => Ok(serde_yaml::from_value(section.clone())?),
            None => Ok(Self::default()),
        }
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_listeners: Self::DEFAULT_MAX_LISTENERS,
        }
    }
}
