//! Footer record at the tail of a carrier file
//!
//! A carrier file is laid out as:
//!
//! ```text
//! [ base bytes ][ payload (length bytes) ][ footer (24 bytes) ]
//! ```
//!
//! The footer is fixed-size and little-endian:
//!
//! | Offset | Size | Field    |
//! |--------|------|----------|
//! | 0      | 16   | magic    |
//! | 16     | 4    | length   |
//! | 20     | 4    | checksum |
//!
//! The checksum is CRC-32 (IEEE) over the payload bytes.

use binrw::{BinRead, BinWrite};
use std::io::{Cursor, Read, Seek, SeekFrom};
use tracing::debug;

use crate::error::{EmbedError, Result};

/// Footer magic: ASCII signature padded with NULs to 16 bytes
pub const FOOTER_MAGIC: [u8; 16] = *b"KUBESNAKECFGv1\0\0";

/// Size of the encoded footer in bytes
pub const FOOTER_SIZE: usize = 16 + 4 + 4;

/// Largest payload that may be embedded or loaded (256 KiB)
pub const MAX_PAYLOAD_SIZE: usize = 256 << 10;

/// Footer describing the payload that precedes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct Footer {
    /// Signature, [`FOOTER_MAGIC`] for a recognized footer
    pub magic: [u8; 16],
    /// Payload length in bytes
    pub length: u32,
    /// CRC-32 (IEEE) of the payload
    pub checksum: u32,
}

impl Footer {
    /// Create a footer with the standard magic
    pub fn new(length: u32, checksum: u32) -> Self {
        Self {
            magic: FOOTER_MAGIC,
            length,
            checksum,
        }
    }

    /// Whether the magic matches [`FOOTER_MAGIC`]
    pub fn has_valid_magic(&self) -> bool {
        self.magic == FOOTER_MAGIC
    }

    /// Encode to the fixed 24-byte layout
    pub fn to_bytes(&self) -> Result<[u8; FOOTER_SIZE]> {
        let mut buf = [0u8; FOOTER_SIZE];
        self.write(&mut Cursor::new(&mut buf[..]))
            .map_err(EmbedError::Footer)?;
        Ok(buf)
    }

    /// Decode from the fixed 24-byte layout
    ///
    /// No validation is done here; see [`scan_footer`] for magic matching.
    pub fn from_bytes(buf: &[u8; FOOTER_SIZE]) -> Result<Self> {
        Self::read(&mut Cursor::new(&buf[..])).map_err(EmbedError::Footer)
    }
}

/// CRC-32 (IEEE) of `data`
pub fn checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Look for a footer at the end of a stream of `file_size` bytes.
///
/// Returns `Ok(None)` when the stream is too small to hold a footer or the
/// last 24 bytes do not carry the magic. Seek and read failures are errors.
pub fn scan_footer<R: Read + Seek>(reader: &mut R, file_size: u64) -> Result<Option<Footer>> {
    let footer_size = FOOTER_SIZE as u64;
    if file_size < footer_size {
        return Ok(None);
    }

    reader
        .seek(SeekFrom::Start(file_size - footer_size))
        .map_err(EmbedError::io("seek footer"))?;

    let mut buf = [0u8; FOOTER_SIZE];
    reader
        .read_exact(&mut buf)
        .map_err(EmbedError::io("read footer"))?;
    let footer = Footer::from_bytes(&buf)?;

    if !footer.has_valid_magic() {
        debug!("no footer magic in last {} bytes", FOOTER_SIZE);
        return Ok(None);
    }

    Ok(Some(footer))
}
