//! Minimal file contents carrying real media signatures

/// Canonical 44-byte PCM WAV header with an empty data chunk
pub const WAV: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt \x10\x00\x00\x00\x01\x00\x01\x00D\xac\x00\x00\x88X\x01\x00\x02\x00\x10\x00data\x00\x00\x00\x00";

/// FLAC stream marker followed by a STREAMINFO block header
pub const FLAC: &[u8] = b"fLaC\x80\x00\x00\x22\x10\x00\x10\x00\x00\x00\x00\x00\x00\x00\x0a\xc4\x40\xf0";

/// 1x1 transparent PNG
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\x00\x00\x00\x01\x00\x00\x00\x01\x08\x06\x00\x00\x00\x1f\x15\xc4\x89\x00\x00\x00\nIDATx\x9cc\x00\x01\x00\x00\x05\x00\x01\r\n-\xb4\x00\x00\x00\x00IEND\xaeB`\x82";

/// JPEG start-of-image plus a JFIF APP0 segment
pub const JPEG: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF\x00\x01\x01\x00\x00\x01\x00\x01\x00\x00\xff\xd9";

/// MP4 `ftyp` box with the `mp42` brand followed by an empty `mdat`
pub const MP4: &[u8] = b"\x00\x00\x00\x18ftypmp42\x00\x00\x00\x00mp42isom\x00\x00\x00\x08mdat";

/// WebM EBML header (DocType `webm`) followed by an unknown-size Segment
pub const WEBM: &[u8] = b"\x1A\x45\xDF\xA3\x9F\x42\x86\x81\x01\x42\xF7\x81\x01\x42\xF2\x81\
    \x04\x42\xF3\x81\x08\x42\x82\x84\x77\x65\x62\x6D\x42\x87\x81\x02\
    \x42\x85\x81\x02\x18\x53\x80\x67\x01\xFF\xFF\xFF\xFF\xFF\xFF\xFF";

/// Matroska file start as muxers write it: EBML header with DocType
/// `matroska`, Segment, SeekHead, and a Void element reserving space ahead
/// of the Tracks element
pub const MKV: &[u8] = b"\x1A\x45\xDF\xA3\xA3\x42\x86\x81\x01\x42\xF7\x81\x01\x42\xF2\x81\
    \x04\x42\xF3\x81\x08\x42\x82\x88\x6D\x61\x74\x72\x6F\x73\x6B\x61\
    \x42\x87\x81\x04\x42\x85\x81\x02\x18\x53\x80\x67\x01\xFF\xFF\xFF\
    \xFF\xFF\xFF\xFF\x11\x4D\x9B\x74\x9D\x4D\xBB\x8B\x53\xAB\x84\x15\
    \x49\xA9\x66\x53\xAC\x81\x40\x4D\xBB\x8C\x53\xAB\x84\x16\x54\xAE\
    \x6B\x53\xAC\x82\x10\x00\xEC\x40\x80\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00";

/// ASF header announcing six objects, cut off after a video Stream
/// Properties object the way a 261-byte prefix cuts real WMV headers
pub const WMV: &[u8] = b"\x30\x26\xB2\x75\x8E\x66\xCF\x11\xA6\xD9\x00\xAA\x00\x62\xCE\x6C\
    \x00\x10\x00\x00\x00\x00\x00\x00\x06\x00\x00\x00\x01\x02\xA1\xDC\
    \xAB\x8C\x47\xA9\xCF\x11\x8E\xE4\x00\xC0\x0C\x20\x53\x65\x68\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x91\x07\xDC\xB7\xB7\xA9\xCF\x11\x8E\xE6\
    \x00\xC0\x0C\x20\x53\x65\x85\x00\x00\x00\x00\x00\x00\x00\xC0\xEF\
    \x19\xBC\x4D\x5B\xCF\x11\xA8\xFD\x00\x80\x5F\x5C\x44\x2B\x00\x57\
    \xFB\x20\x55\x5B\xCF\x11\xA8\xFD\x00\x80\x5F\x5C\x44\x2B\x00\x00\
    \x00\x00\x00\x00\x00\x00\x37\x00\x00\x00\x00\x00\x00\x00\x01\x00\
    \x00\x00\x00\x00";

/// Plain ASCII text with no recognizable signature
pub const TEXT: &[u8] = b"this is a text file";

/// Content of a given media category for building trees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    Wav,
    Flac,
    Png,
    Jpeg,
    Mp4,
    Webm,
    Mkv,
    Wmv,
    Text,
}

impl Fixture {
    pub fn bytes(self) -> &'static [u8] {
        match self {
            Fixture::Wav => WAV,
            Fixture::Flac => FLAC,
            Fixture::Png => PNG,
            Fixture::Jpeg => JPEG,
            Fixture::Mp4 => MP4,
            Fixture::Webm => WEBM,
            Fixture::Mkv => MKV,
            Fixture::Wmv => WMV,
            Fixture::Text => TEXT,
        }
    }
}
