// Binary format: header layout, parsing and validation

use crate::FsaError;
use crate::arc::NO_ARCS;

/// Header magic constants (little-endian).
const COOKIE1: u32 = 0x5741_5346; // "FSAW"
const COOKIE2: u32 = 0x0005_E11A;

/// Current format version.
pub const FORMAT_VERSION: u8 = 1;

/// Size of the binary header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Parsed automaton header.
///
/// The header occupies the first 16 bytes of a dictionary blob:
/// - bytes 0..4: cookie1 (magic number)
/// - bytes 4..8: cookie2 (magic number)
/// - byte 8: format version
/// - bytes 9..12: reserved (must be zero)
/// - bytes 12..16: offset of the root state's first arc, or `NO_ARCS` for
///   an automaton that accepts nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsaHeader {
    pub version: u8,
    pub root: u32,
}

impl FsaHeader {
    pub fn new(root: u32) -> Self {
        Self {
            version: FORMAT_VERSION,
            root,
        }
    }

    /// Whether the automaton accepts no words at all.
    pub fn is_empty(&self) -> bool {
        self.root == NO_ARCS
    }

    /// Serialize the header into its 16-byte form.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[..4].copy_from_slice(&COOKIE1.to_le_bytes());
        buf[4..8].copy_from_slice(&COOKIE2.to_le_bytes());
        buf[8] = self.version;
        buf[12..16].copy_from_slice(&self.root.to_le_bytes());
        buf
    }
}

/// Parses and validates the 16-byte header.
///
/// Byte-swap detection is not attempted: blobs are always written
/// little-endian.
pub fn parse_header(data: &[u8]) -> Result<FsaHeader, FsaError> {
    if data.len() < HEADER_SIZE {
        return Err(FsaError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    let cookie1 = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let cookie2 = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);

    if cookie1 != COOKIE1 || cookie2 != COOKIE2 {
        return Err(FsaError::InvalidMagic);
    }

    let version = data[8];
    if version != FORMAT_VERSION {
        return Err(FsaError::UnsupportedVersion(version));
    }

    let root = u32::from_le_bytes([data[12], data[13], data[14], data[15]]);

    Ok(FsaHeader { version, root })
}
