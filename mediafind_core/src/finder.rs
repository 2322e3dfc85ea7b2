//! High level discovery API
//!
//! [`Finder`] pairs a classifier with walk defaults and exposes the named
//! traversal shapes. Recursive shapes never fail: anything unreadable is
//! left out. Single-level shapes fail when the root cannot be listed.

use std::path::{Path, PathBuf};

use crate::{
    Classifier, FinderConfig, MediaKind, Result,
    classifier::MediaClassifier,
    walker::{self, WalkOptions, WalkReport},
};

/// Media and directory finder
#[derive(Debug, Clone)]
pub struct Finder<C = Classifier> {
    classifier: C,
    follow_links: bool,
    max_depth: Option<usize>,
}

impl Default for Finder {
    fn default() -> Self {
        Self::with_classifier(Classifier::default())
    }
}

impl Finder<Classifier> {
    /// Create a finder from configuration
    pub fn new(config: FinderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier: Classifier::new(config.overrides),
            follow_links: config.follow_links,
            max_depth: config.max_depth,
        })
    }
}

impl<C: MediaClassifier> Finder<C> {
    /// Create a finder around a custom classifier with default walk settings
    pub fn with_classifier(classifier: C) -> Self {
        Self {
            classifier,
            follow_links: false,
            max_depth: None,
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Walk options pre-filled with this finder's settings
    pub fn options(&self) -> WalkOptions {
        WalkOptions::new()
            .with_follow_links(self.follow_links)
            .with_max_depth(self.max_depth)
    }

    /// Run a walk with explicit options
    pub fn walk(&self, root: &Path, options: &WalkOptions) -> Result<WalkReport> {
        walker::walk(&self.classifier, root, options)
    }

    /// Every directory below root, at any depth; root excluded
    pub fn list_all_folders(&self, root: &Path) -> Vec<PathBuf> {
        self.walk_lenient(root, self.options().with_dirs(true).with_files(false))
    }

    /// Immediate subdirectories of root
    pub fn list_immediate_folders(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let options = self
            .options()
            .with_recursive(false)
            .with_dirs(true)
            .with_files(false);
        Ok(self.walk(root, &options)?.paths)
    }

    /// Every file below root, led by `root` exactly as given
    pub fn list_all_files(&self, root: &Path) -> Vec<PathBuf> {
        self.walk_lenient(root, self.options().with_root_marker(true))
    }

    /// Files of `kind` below root, at any depth
    pub fn find_all(&self, root: &Path, kind: MediaKind) -> Vec<PathBuf> {
        self.walk_lenient(root, self.options().with_kind(Some(kind)))
    }

    /// Files of `kind` among root's immediate children
    pub fn find_in_root(&self, root: &Path, kind: MediaKind) -> Result<Vec<PathBuf>> {
        let options = self.options().with_recursive(false).with_kind(Some(kind));
        Ok(self.walk(root, &options)?.paths)
    }

    fn walk_lenient(&self, root: &Path, options: WalkOptions) -> Vec<PathBuf> {
        match self.walk(root, &options) {
            Ok(report) => report.paths,
            Err(e) => {
                log::warn!("Walk of {} failed: {e}", root.display());
                Vec::new()
            }
        }
    }
}
