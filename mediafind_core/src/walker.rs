//! Directory walker shared by every traversal shape
//!
//! One walk routine covers recursive and single-level listing of folders,
//! files, and classified media. Per-entry failures never abort a walk; they
//! are logged and recorded in [`WalkReport::skipped`]. Only a single-level
//! walk whose root cannot be read fails outright.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::{
    MediaKind, Result,
    classifier::MediaClassifier,
    error::{Error, IoError, ValidationError},
};

/// Options for a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// Descend into subdirectories (otherwise immediate children only)
    pub recursive: bool,
    /// Collect directories (root itself is never collected)
    pub include_dirs: bool,
    /// Collect non-directory entries
    pub include_files: bool,
    /// Only collect files classified as this kind
    pub kind: Option<MediaKind>,
    /// Follow symbolic links while walking
    pub follow_links: bool,
    /// Maximum depth for recursive walks (None = unlimited)
    pub max_depth: Option<usize>,
    /// Put the root path, exactly as given, first in the results
    pub root_marker: bool,
    /// Visit entries of each directory in file name order
    pub sorted: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            include_dirs: false,
            include_files: true,
            kind: None,
            follow_links: false,
            max_depth: None,
            root_marker: false,
            sorted: false,
        }
    }
}

impl WalkOptions {
    /// Create new options with default settings (recursive, files only)
    pub fn new() -> Self {
        Self::default()
    }

    /// Recursive listing of every non-directory entry
    pub fn files() -> Self {
        Self::default()
    }

    /// Recursive listing of every directory below root
    pub fn folders() -> Self {
        Self::default().with_dirs(true).with_files(false)
    }

    /// Recursive listing of files classified as `kind`
    pub fn media(kind: MediaKind) -> Self {
        Self::default().with_kind(Some(kind))
    }

    /// Set recursive processing
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set whether directories are collected
    pub fn with_dirs(mut self, include: bool) -> Self {
        self.include_dirs = include;
        self
    }

    /// Set whether files are collected
    pub fn with_files(mut self, include: bool) -> Self {
        self.include_files = include;
        self
    }

    /// Set the media kind filter
    pub fn with_kind(mut self, kind: Option<MediaKind>) -> Self {
        self.kind = kind;
        self
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum depth for recursive walks
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set whether the literal root path leads the results
    pub fn with_root_marker(mut self, marker: bool) -> Self {
        self.root_marker = marker;
        self
    }

    /// Set whether each directory is visited in file name order
    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == Some(0) {
            return Err(ValidationError::invalid_parameter(
                "max_depth",
                "must be at least 1 (use a single-level walk for immediate children)",
            )
            .into());
        }
        Ok(())
    }

    fn effective_max_depth(&self) -> Option<usize> {
        if self.recursive { self.max_depth } else { Some(1) }
    }
}

/// An entry the walk skipped because of an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkDiagnostic {
    /// Path the error is associated with, when known
    pub path: Option<PathBuf>,
    /// Depth below root at which the error occurred
    pub depth: usize,
    pub message: String,
}

impl WalkDiagnostic {
    fn from_walk_error(err: &walkdir::Error) -> Self {
        Self {
            path: err.path().map(Path::to_path_buf),
            depth: err.depth(),
            message: err.to_string(),
        }
    }
}

/// Outcome of a walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkReport {
    /// Collected paths, in traversal order
    pub paths: Vec<PathBuf>,
    /// Entries swallowed along the way
    pub skipped: Vec<WalkDiagnostic>,
}

impl WalkReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Walk `root` and collect the entries selected by `options`
///
/// Files are passed to `classifier` only when a kind filter is set.
pub fn walk<C>(classifier: &C, root: &Path, options: &WalkOptions) -> Result<WalkReport>
where
    C: MediaClassifier + ?Sized,
{
    options.validate()?;

    let mut report = WalkReport::default();
    if options.root_marker {
        report.paths.push(root.to_path_buf());
    }

    let abs_root = match std::path::absolute(root) {
        Ok(path) => path,
        Err(e) if options.recursive => {
            log::warn!("Cannot resolve walk root {:?}: {e}", root);
            report.skipped.push(WalkDiagnostic {
                path: Some(root.to_path_buf()),
                depth: 0,
                message: e.to_string(),
            });
            return Ok(report);
        }
        Err(e) => return Err(root_error(root, e)),
    };

    if !options.recursive {
        let metadata = fs::metadata(&abs_root).map_err(|e| root_error(&abs_root, e))?;
        if !metadata.is_dir() {
            return Err(IoError::not_a_directory(&abs_root).into());
        }
    }

    let mut walker = WalkDir::new(&abs_root).follow_links(options.follow_links);
    if let Some(depth) = options.effective_max_depth() {
        walker = walker.max_depth(depth);
    }
    if options.sorted {
        walker = walker.sort_by_file_name();
    }

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                if !options.recursive && err.depth() == 0 {
                    return Err(walk_root_error(&abs_root, err));
                }
                // Log walk errors but continue
                log::warn!("Walk error: {err}");
                report.skipped.push(WalkDiagnostic::from_walk_error(&err));
                continue;
            }
        };

        let is_dir = entry.file_type().is_dir();
        if is_dir && entry.depth() == 0 {
            continue;
        }

        let selected = if is_dir {
            options.include_dirs && options.kind.is_none()
        } else if options.include_files {
            match options.kind {
                Some(kind) => classifier.classify(entry.path(), kind),
                None => true,
            }
        } else {
            false
        };

        if selected {
            report.paths.push(entry.into_path());
        }
    }

    log::debug!(
        "Walked {} ({}): {} collected, {} skipped",
        abs_root.display(),
        if options.recursive { "recursive" } else { "single-level" },
        report.paths.len(),
        report.skipped.len()
    );

    Ok(report)
}

fn root_error(root: &Path, source: std::io::Error) -> Error {
    match source.kind() {
        std::io::ErrorKind::NotFound => IoError::file_not_found(root).into(),
        std::io::ErrorKind::PermissionDenied => IoError::permission_denied(root, source).into(),
        _ => IoError::from_std(source).with_path(root).into(),
    }
}

fn walk_root_error(root: &Path, err: walkdir::Error) -> Error {
    let message = err.to_string();
    match err.into_io_error() {
        Some(source) => root_error(root, source),
        None => IoError::from_std(std::io::Error::other(message))
            .with_path(root)
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Classifier;
    use mediafind_test_utils::{TestTree, fixtures::Fixture};
    use std::cell::Cell;
    use std::collections::HashSet;

    fn create_test_tree() -> TestTree {
        TestTree::new()
            .fixture("song.wav", Fixture::Wav)
            .fixture("cover.png", Fixture::Png)
            .fixture("notes.txt", Fixture::Text)
            .fixture("albums/one/track.flac", Fixture::Flac)
            .fixture("albums/one/clip.mp4", Fixture::Mp4)
            .dir("albums/empty")
    }

    fn names(report: &WalkReport) -> HashSet<String> {
        report
            .paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    /// Counts classification calls and accepts everything
    struct CountingClassifier {
        calls: Cell<usize>,
    }

    impl MediaClassifier for CountingClassifier {
        fn classify(&self, _path: &Path, _kind: MediaKind) -> bool {
            self.calls.set(self.calls.get() + 1);
            true
        }
    }

    #[test]
    fn test_recursive_files() {
        let tree = create_test_tree();
        let report = walk(&Classifier::default(), tree.root(), &WalkOptions::files()).unwrap();

        assert!(report.is_clean());
        assert_eq!(
            names(&report),
            HashSet::from(
                ["song.wav", "cover.png", "notes.txt", "track.flac", "clip.mp4"]
                    .map(String::from)
            )
        );
        assert!(report.paths.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn test_recursive_folders_exclude_root() {
        let tree = create_test_tree();
        let report = walk(&Classifier::default(), tree.root(), &WalkOptions::folders()).unwrap();

        let expected: HashSet<PathBuf> = ["albums", "albums/one", "albums/empty"]
            .iter()
            .map(|p| tree.path(p))
            .collect();
        assert_eq!(report.paths.iter().cloned().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn test_single_level_is_not_recursive() {
        let tree = create_test_tree();
        let options = WalkOptions::media(MediaKind::Audio).with_recursive(false);
        let report = walk(&Classifier::default(), tree.root(), &options).unwrap();

        assert_eq!(report.paths, vec![tree.path("song.wav")]);
    }

    #[test]
    fn test_kind_filter_only_classifies_files() {
        let tree = create_test_tree();
        let counter = CountingClassifier {
            calls: Cell::new(0),
        };
        let options = WalkOptions::media(MediaKind::Video).with_dirs(true);
        let report = walk(&counter, tree.root(), &options).unwrap();

        assert_eq!(counter.calls.get(), 5);
        assert!(report.paths.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_unfiltered_walk_never_classifies() {
        let tree = create_test_tree();
        let counter = CountingClassifier {
            calls: Cell::new(0),
        };
        walk(&counter, tree.root(), &WalkOptions::files()).unwrap();
        assert_eq!(counter.calls.get(), 0);
    }

    #[test]
    fn test_max_depth_bounds_recursion() {
        let tree = create_test_tree();
        let options = WalkOptions::files().with_max_depth(Some(1));
        let report = walk(&Classifier::default(), tree.root(), &options).unwrap();

        assert_eq!(report.paths.len(), 3);
        assert!(!names(&report).contains("track.flac"));
    }

    #[test]
    fn test_zero_max_depth_is_rejected() {
        let tree = create_test_tree();
        let options = WalkOptions::files().with_max_depth(Some(0));
        let err = walk(&Classifier::default(), tree.root(), &options).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_missing_root_recursive_is_recorded_not_raised() {
        let tree = TestTree::new();
        let missing = tree.path("nope");
        let report = walk(&Classifier::default(), &missing, &WalkOptions::files()).unwrap();

        assert!(report.paths.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].depth, 0);
        assert_eq!(report.skipped[0].path.as_deref(), Some(missing.as_path()));
    }

    #[test]
    fn test_missing_root_single_level_fails() {
        let tree = TestTree::new();
        let options = WalkOptions::folders().with_recursive(false);
        let err = walk(&Classifier::default(), &tree.path("nope"), &options).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_file_root_single_level_fails() {
        let tree = create_test_tree();
        let options = WalkOptions::files().with_recursive(false);
        let err = walk(&Classifier::default(), &tree.path("song.wav"), &options).unwrap_err();

        match err {
            Error::Io(io) => assert_eq!(io.kind, crate::IoErrorKind::NotADirectory),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_file_root_recursive_yields_the_file() {
        let tree = create_test_tree();
        let song = tree.path("song.wav");
        let report = walk(
            &Classifier::default(),
            &song,
            &WalkOptions::media(MediaKind::Audio),
        )
        .unwrap();
        assert_eq!(report.paths, vec![song]);
    }

    #[test]
    fn test_root_marker_is_literal_and_first() {
        let tree = create_test_tree();
        let options = WalkOptions::files().with_root_marker(true);
        let report = walk(&Classifier::default(), tree.root(), &options).unwrap();

        assert_eq!(report.paths[0], tree.root());
        assert_eq!(report.paths.len(), 6);
    }

    #[test]
    fn test_relative_root_yields_absolute_paths() {
        let report = walk(
            &Classifier::default(),
            Path::new("src"),
            &WalkOptions::files().with_recursive(false),
        )
        .unwrap();

        assert!(!report.paths.is_empty());
        assert!(report.paths.iter().all(|p| p.is_absolute()));
        assert!(report.paths.iter().any(|p| p.ends_with("src/lib.rs")));
    }

    #[test]
    fn test_sorted_walk_is_ordered() {
        let tree = TestTree::new()
            .file("c.txt", b"c")
            .file("a.txt", b"a")
            .file("b.txt", b"b");
        let options = WalkOptions::files().with_sorted(true);
        let report = walk(&Classifier::default(), tree.root(), &options).unwrap();

        let ordered: Vec<_> = report
            .paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(ordered, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_skipped_silently() {
        let tree = create_test_tree();
        std::os::unix::fs::symlink(tree.path("gone.wav"), tree.path("dangling.wav")).unwrap();

        let report = walk(
            &Classifier::default(),
            tree.root(),
            &WalkOptions::media(MediaKind::Audio),
        )
        .unwrap();
        assert_eq!(
            names(&report),
            HashSet::from(["song.wav", "track.flac"].map(String::from))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_mid_walk_is_recorded_and_walk_continues() {
        let tree = TestTree::new()
            .fixture("a/a_first.wav", Fixture::Wav)
            .fixture("a/z_last.wav", Fixture::Wav)
            .fixture("top.wav", Fixture::Wav);
        std::os::unix::fs::symlink("..", tree.path("a/loop")).unwrap();

        let options = WalkOptions::media(MediaKind::Audio)
            .with_follow_links(true)
            .with_sorted(true);
        let report = walk(&Classifier::default(), tree.root(), &options).unwrap();

        assert_eq!(
            names(&report),
            HashSet::from(["a_first.wav", "z_last.wav", "top.wav"].map(String::from))
        );
        assert_eq!(report.skipped.len(), 1);
        let loop_error = &report.skipped[0];
        assert_eq!(loop_error.depth, 2);
        assert_eq!(loop_error.path.as_deref(), Some(tree.path("a/loop").as_path()));
        assert!(!report.is_clean());
    }
}
