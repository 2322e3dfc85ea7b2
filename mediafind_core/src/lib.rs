//! mediafind Core Library
//!
//! Finds audio, image, and video files under a directory tree by sniffing
//! their leading bytes instead of trusting file extensions, and enumerates
//! files and folders with the same walker.
//!
//! The free functions below use a default [`Finder`]: no symlink following,
//! unlimited depth, and the built-in RealMedia extension fallback. Build a
//! [`Finder`] from a [`FinderConfig`] to change any of that.
//!
//! ```no_run
//! let videos = mediafind_core::find_all_videos("/srv/media");
//! let covers = mediafind_core::find_images_in_root("/srv/media/album")?;
//! # Ok::<(), mediafind_core::Error>(())
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod finder;
pub mod media_kind;
pub mod overrides;
pub mod walker;

use std::path::{Path, PathBuf};

// Re-export main types
pub use classifier::{
    Classifier, MediaClassifier, SIGNATURE_PREFIX_LEN, read_signature_prefix, signature_kind,
};
pub use config::FinderConfig;
pub use error::{Error, IoError, IoErrorKind, Result, ValidationError};
pub use finder::Finder;
pub use media_kind::MediaKind;
pub use overrides::{DEFAULT_VIDEO_OVERRIDES, ExtensionOverrides};
pub use walker::{WalkDiagnostic, WalkOptions, WalkReport, walk};

/// Classify one file with the default classifier
pub fn classify(path: impl AsRef<Path>, kind: MediaKind) -> bool {
    Classifier::default().classify(path.as_ref(), kind)
}

/// Every directory below `root`, at any depth; `root` itself excluded
pub fn list_all_folders(root: impl AsRef<Path>) -> Vec<PathBuf> {
    default_finder().list_all_folders(root.as_ref())
}

/// Immediate subdirectories of `root`
pub fn list_immediate_folders(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    default_finder().list_immediate_folders(root.as_ref())
}

/// Every file below `root`, preceded by `root` exactly as given
pub fn list_all_files(root: impl AsRef<Path>) -> Vec<PathBuf> {
    default_finder().list_all_files(root.as_ref())
}

/// Audio files below `root`, at any depth
pub fn find_all_audio(root: impl AsRef<Path>) -> Vec<PathBuf> {
    default_finder().find_all(root.as_ref(), MediaKind::Audio)
}

/// Image files below `root`, at any depth
pub fn find_all_images(root: impl AsRef<Path>) -> Vec<PathBuf> {
    default_finder().find_all(root.as_ref(), MediaKind::Image)
}

/// Video files below `root`, at any depth
pub fn find_all_videos(root: impl AsRef<Path>) -> Vec<PathBuf> {
    default_finder().find_all(root.as_ref(), MediaKind::Video)
}

/// Audio files directly inside `root`
pub fn find_audio_in_root(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    default_finder().find_in_root(root.as_ref(), MediaKind::Audio)
}

/// Image files directly inside `root`
pub fn find_images_in_root(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    default_finder().find_in_root(root.as_ref(), MediaKind::Image)
}

/// Video files directly inside `root`
pub fn find_videos_in_root(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    default_finder().find_in_root(root.as_ref(), MediaKind::Video)
}

fn default_finder() -> Finder {
    Finder::default()
}
