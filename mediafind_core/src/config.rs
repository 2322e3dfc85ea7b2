//! Finder configuration
//!
//! The library never loads configuration by itself; callers build a
//! [`FinderConfig`] (directly or by deserializing one) and hand it to
//! [`Finder::new`](crate::Finder::new).

use crate::{ExtensionOverrides, Result, error::ValidationError};
use serde::{Deserialize, Serialize};

/// Settings shared by every walk a [`Finder`](crate::Finder) performs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Follow symbolic links while walking
    pub follow_links: bool,
    /// Maximum depth for recursive walks (None = unlimited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Extension fallbacks applied after signature matching fails
    pub overrides: ExtensionOverrides,
}

impl FinderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == Some(0) {
            return Err(
                ValidationError::invalid_parameter("max_depth", "must be at least 1").into(),
            );
        }
        Ok(())
    }
}
