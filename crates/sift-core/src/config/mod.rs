//! Module: config
//! Responsibility: compilation settings shared by every query of one context.
//! Does not own: where the settings text comes from.

#[cfg(test)]
mod tests;

use crate::{DEFAULT_PAGE_SIZE, member::KeyComparer};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid query config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("default_page_size must be positive")]
    InvalidPageSize,
}

///
/// QueryConfig
///
/// Loaded from TOML; every field may be omitted.
///
/// ```toml
/// key_comparer = "ignore_case"
/// default_page_size = 20
/// ```
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    /// How filter and order keys match member names.
    #[serde(default)]
    pub key_comparer: KeyComparer,

    /// Page size used when a decoded page omits `size`.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl QueryConfig {
    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }

        Ok(())
    }

    #[must_use]
    pub const fn with_key_comparer(mut self, key_comparer: KeyComparer) -> Self {
        self.key_comparer = key_comparer;
        self
    }

    #[must_use]
    pub const fn with_default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            key_comparer: KeyComparer::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
