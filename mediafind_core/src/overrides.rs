//! Extension overrides for containers the signature matcher misses
//!
//! Legacy RealMedia containers (`.rm`, `.rmvb`) have no usable entry in the
//! signature database, so they are recognized by suffix instead. The table
//! is consulted only after signature matching fails.

use crate::{MediaKind, error::ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Extensions classified as video when their signature is not recognized
pub const DEFAULT_VIDEO_OVERRIDES: &[&str] = &["rm", "rmvb"];

/// Table of `extension -> kind` fallbacks
///
/// Keys are stored lowercase without a leading dot, so lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, MediaKind>",
    into = "BTreeMap<String, MediaKind>"
)]
pub struct ExtensionOverrides {
    entries: BTreeMap<String, MediaKind>,
}

impl Default for ExtensionOverrides {
    fn default() -> Self {
        let entries = DEFAULT_VIDEO_OVERRIDES
            .iter()
            .map(|ext| (ext.to_string(), MediaKind::Video))
            .collect();
        Self { entries }
    }
}

impl ExtensionOverrides {
    /// Create an empty table (no fallbacks at all)
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace an override
    pub fn insert(&mut self, extension: &str, kind: MediaKind) -> Result<(), ValidationError> {
        let key = normalize_extension(extension)?;
        self.entries.insert(key, kind);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, extension: &str, kind: MediaKind) -> Result<Self, ValidationError> {
        self.insert(extension, kind)?;
        Ok(self)
    }

    /// Remove an override, returning the kind it mapped to
    pub fn remove(&mut self, extension: &str) -> Option<MediaKind> {
        let key = normalize_extension(extension).ok()?;
        self.entries.remove(&key)
    }

    /// Kind mapped to the path's extension, if any
    pub fn lookup(&self, path: &Path) -> Option<MediaKind> {
        let ext = path.extension()?.to_str()?;
        self.entries.get(&ext.to_lowercase()).copied()
    }

    /// Whether the path's extension maps to `kind`
    pub fn matches(&self, path: &Path, kind: MediaKind) -> bool {
        self.lookup(path) == Some(kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MediaKind)> {
        self.entries.iter().map(|(ext, kind)| (ext.as_str(), *kind))
    }
}

impl TryFrom<BTreeMap<String, MediaKind>> for ExtensionOverrides {
    type Error = ValidationError;

    fn try_from(raw: BTreeMap<String, MediaKind>) -> Result<Self, Self::Error> {
        let mut overrides = Self::empty();
        for (ext, kind) in raw {
            overrides.insert(&ext, kind)?;
        }
        Ok(overrides)
    }
}

impl From<ExtensionOverrides> for BTreeMap<String, MediaKind> {
    fn from(overrides: ExtensionOverrides) -> Self {
        overrides.entries
    }
}

/// Lowercase an extension and strip one leading dot
fn normalize_extension(extension: &str) -> Result<String, ValidationError> {
    let trimmed = extension.trim();
    let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);

    if bare.is_empty() {
        return Err(ValidationError::invalid_extension(
            extension,
            "extension must not be empty",
        ));
    }
    if bare.contains(['.', '/', '\\']) {
        return Err(ValidationError::invalid_extension(
            extension,
            "extension must be a single suffix without separators",
        ));
    }

    Ok(bare.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_realmedia() {
        let overrides = ExtensionOverrides::default();
        assert_eq!(overrides.len(), 2);
        assert!(overrides.matches(Path::new("movie.rm"), MediaKind::Video));
        assert!(overrides.matches(Path::new("movie.rmvb"), MediaKind::Video));
        assert!(!overrides.matches(Path::new("movie.rmvb"), MediaKind::Audio));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let overrides = ExtensionOverrides::default();
        assert_eq!(
            overrides.lookup(Path::new("/tmp/MOVIE.RMVB")),
            Some(MediaKind::Video)
        );
        assert_eq!(overrides.lookup(Path::new("/tmp/Movie.Rm")), Some(MediaKind::Video));
    }

    #[test]
    fn test_lookup_requires_an_extension() {
        let overrides = ExtensionOverrides::default();
        assert_eq!(overrides.lookup(Path::new("rmvb")), None);
        assert_eq!(overrides.lookup(Path::new(".rm")), None);
        assert_eq!(overrides.lookup(Path::new("clip.rm.txt")), None);
    }

    #[test]
    fn test_insert_normalizes_keys() {
        let overrides = ExtensionOverrides::empty()
            .with(".MKA", MediaKind::Audio)
            .unwrap();
        assert!(overrides.matches(Path::new("track.mka"), MediaKind::Audio));
        assert_eq!(overrides.iter().collect::<Vec<_>>(), vec![("mka", MediaKind::Audio)]);
    }

    #[test]
    fn test_insert_rejects_bad_extensions() {
        let mut overrides = ExtensionOverrides::empty();
        assert!(overrides.insert("", MediaKind::Video).is_err());
        assert!(overrides.insert(".", MediaKind::Video).is_err());
        assert!(overrides.insert("tar.gz", MediaKind::Video).is_err());
        assert!(overrides.insert("a/b", MediaKind::Video).is_err());
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_remove_override() {
        let mut overrides = ExtensionOverrides::default();
        assert_eq!(overrides.remove(".RM"), Some(MediaKind::Video));
        assert!(!overrides.matches(Path::new("a.rm"), MediaKind::Video));
        assert!(overrides.matches(Path::new("a.rmvb"), MediaKind::Video));
    }

    #[test]
    fn test_deserialize_normalizes_and_validates() {
        let overrides: ExtensionOverrides =
            serde_json::from_str(r#"{".RA": "audio", "rmvb": "video"}"#).unwrap();
        assert!(overrides.matches(Path::new("song.ra"), MediaKind::Audio));

        let bad = serde_json::from_str::<ExtensionOverrides>(r#"{"": "audio"}"#);
        assert!(bad.is_err());
    }
}
