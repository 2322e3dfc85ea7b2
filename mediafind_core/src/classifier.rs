//! Signature-based media classification
//!
//! A file is classified from the first [`SIGNATURE_PREFIX_LEN`] bytes of its
//! content. The extension override table is only consulted when the
//! signature does not already report the requested kind.
//!
//! MP4, Matroska/WebM and ASF headers usually describe their streams past the
//! prefix. When the signature database cannot resolve such a header to a
//! media kind, the container itself is taken as video.

use crate::{ExtensionOverrides, MediaKind};
use file_format::{FileFormat, Kind};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes inspected when sniffing a file
pub const SIGNATURE_PREFIX_LEN: usize = 261;

/// Decides whether a file belongs to a media kind
///
/// This is the seam the walker classifies through, so alternative
/// classifiers can be plugged into [`Finder`](crate::Finder).
pub trait MediaClassifier {
    /// Whether the file at `path` is of `kind`
    ///
    /// Never fails: unreadable files are simply not a match.
    fn classify(&self, path: &Path, kind: MediaKind) -> bool;
}

/// Read up to [`SIGNATURE_PREFIX_LEN`] bytes from the start of a file
///
/// Short files yield what they contain. The handle is closed before return.
pub fn read_signature_prefix(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut prefix = Vec::with_capacity(SIGNATURE_PREFIX_LEN);
    file.take(SIGNATURE_PREFIX_LEN as u64)
        .read_to_end(&mut prefix)?;
    Ok(prefix)
}

/// EBML magic opening every Matroska and WebM file
const EBML_MAGIC: &[u8] = b"\x1A\x45\xDF\xA3";

/// ASF header object GUID opening every WMV and WMA file
const ASF_HEADER_GUID: &[u8] =
    b"\x30\x26\xB2\x75\x8E\x66\xCF\x11\xA6\xD9\x00\xAA\x00\x62\xCE\x6C";

/// EBML DocType values of the Matroska family
const MATROSKA_DOC_TYPES: [&[u8]; 2] = [b"matroska", b"webm"];

/// EBML DocType element ID
const DOC_TYPE_ELEMENT_ID: [u8; 2] = [0x42, 0x82];

/// Media kind reported by the signature database for a byte prefix
pub fn signature_kind(prefix: &[u8]) -> Option<MediaKind> {
    let format = FileFormat::from_bytes(prefix);
    match format.kind() {
        Kind::Audio => Some(MediaKind::Audio),
        Kind::Image => Some(MediaKind::Image),
        Kind::Video => Some(MediaKind::Video),
        _ => container_kind(format, prefix),
    }
}

/// Video containers whose stream list did not fit in the prefix
fn container_kind(format: FileFormat, prefix: &[u8]) -> Option<MediaKind> {
    let is_video = match format {
        FileFormat::Mpeg4Part14 => true,
        _ if prefix.starts_with(EBML_MAGIC) => has_matroska_doc_type(prefix),
        _ => prefix.starts_with(ASF_HEADER_GUID),
    };
    is_video.then_some(MediaKind::Video)
}

fn has_matroska_doc_type(prefix: &[u8]) -> bool {
    MATROSKA_DOC_TYPES.iter().any(|doc_type| {
        let mut element = DOC_TYPE_ELEMENT_ID.to_vec();
        element.push(0x80 | doc_type.len() as u8);
        element.extend_from_slice(doc_type);
        prefix.windows(element.len()).any(|window| window == element)
    })
}

/// Default classifier: signature sniffing plus extension overrides
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    overrides: ExtensionOverrides,
}

impl Classifier {
    /// Create a classifier using the given override table
    pub fn new(overrides: ExtensionOverrides) -> Self {
        Self { overrides }
    }

    /// Create a classifier that relies on signatures alone
    pub fn signatures_only() -> Self {
        Self::new(ExtensionOverrides::empty())
    }

    pub fn overrides(&self) -> &ExtensionOverrides {
        &self.overrides
    }

    /// Classify an in-memory prefix; `path` supplies the extension only
    pub fn classify_bytes(&self, prefix: &[u8], path: &Path, kind: MediaKind) -> bool {
        if signature_kind(prefix) == Some(kind) {
            return true;
        }
        self.overrides.matches(path, kind)
    }

    /// Kind reported by the file's signature alone
    pub fn sniff(&self, path: &Path) -> Option<MediaKind> {
        let prefix = self.prefix_of(path)?;
        signature_kind(&prefix)
    }

    /// Kind of the file by signature, falling back to the override table
    pub fn detect(&self, path: &Path) -> Option<MediaKind> {
        let prefix = self.prefix_of(path)?;
        signature_kind(&prefix).or_else(|| self.overrides.lookup(path))
    }

    fn prefix_of(&self, path: &Path) -> Option<Vec<u8>> {
        match read_signature_prefix(path) {
            Ok(prefix) => Some(prefix),
            Err(e) => {
                log::debug!("Cannot sniff {}: {e}", path.display());
                None
            }
        }
    }
}

impl MediaClassifier for Classifier {
    fn classify(&self, path: &Path, kind: MediaKind) -> bool {
        match self.prefix_of(path) {
            Some(prefix) => self.classify_bytes(&prefix, path, kind),
            None => false,
        }
    }
}

impl<C: MediaClassifier + ?Sized> MediaClassifier for &C {
    fn classify(&self, path: &Path, kind: MediaKind) -> bool {
        (**self).classify(path, kind)
    }
}
