//! Media kinds a file can be classified as

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category selector used when sniffing a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[serde(alias = "Audio", alias = "AUDIO")]
    Audio,
    #[serde(alias = "images", alias = "Image", alias = "IMAGE")]
    Image,
    #[serde(alias = "videos", alias = "Video", alias = "VIDEO")]
    Video,
}

impl MediaKind {
    /// All kinds, in declaration order
    pub const ALL: [MediaKind; 3] = [MediaKind::Audio, MediaKind::Image, MediaKind::Video];

    /// Lowercase name used in config files and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "audio" => Ok(MediaKind::Audio),
            "image" | "images" => Ok(MediaKind::Image),
            "video" | "videos" => Ok(MediaKind::Video),
            _ => Err(ValidationError::invalid_media_kind(s)),
        }
    }
}
