//! Temporary directory tree builder

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::Fixture;

/// A temporary directory populated through a builder-style API
///
/// The directory is removed when the tree is dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Root of the tree
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a relative entry
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Create a directory (and its parents)
    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.path(relative)).expect("failed to create dir");
        self
    }

    /// Write a file with raw content, creating parent directories
    pub fn file(self, relative: &str, content: &[u8]) -> Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, content).expect("failed to write file");
        self
    }

    /// Write a file with fixture content
    pub fn fixture(self, relative: &str, fixture: Fixture) -> Self {
        self.file(relative, fixture.bytes())
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_nested_entries() {
        let tree = TestTree::new()
            .dir("a/c")
            .fixture("b/d/track.wav", Fixture::Wav)
            .file("top.txt", b"hello");

        assert!(tree.path("a/c").is_dir());
        assert!(tree.path("b/d").is_dir());
        assert_eq!(fs::read(tree.path("b/d/track.wav")).unwrap(), Fixture::Wav.bytes());
        assert_eq!(fs::read(tree.path("top.txt")).unwrap(), b"hello");
    }

    #[test]
    fn test_tree_is_removed_on_drop() {
        let tree = TestTree::new().file("x", b"1");
        let root = tree.root().to_path_buf();
        drop(tree);
        assert!(!root.exists());
    }
}
