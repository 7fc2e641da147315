//! Recover the embedded payload from a carrier file
//!
//! "No payload" is a normal result (`Ok(None)`): the file is smaller than a
//! footer, the footer magic does not match, or the footer records a zero
//! length. Damage to a footer that does carry the magic is always an error.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

use crate::config::Config;
use crate::error::{EmbedError, Result};
use crate::footer::{FOOTER_SIZE, MAX_PAYLOAD_SIZE, checksum, scan_footer};
use crate::self_path::resolve_self_path;

/// Read the payload from a stream of `file_size` bytes.
pub fn read_payload<R: Read + Seek>(reader: &mut R, file_size: u64) -> Result<Option<Vec<u8>>> {
    let Some(footer) = scan_footer(reader, file_size)? else {
        return Ok(None);
    };

    if footer.length == 0 {
        debug!("footer records an empty payload");
        return Ok(None);
    }

    if footer.length as usize > MAX_PAYLOAD_SIZE {
        return Err(EmbedError::PayloadTooLarge {
            length: u64::from(footer.length),
            max: MAX_PAYLOAD_SIZE,
        });
    }

    let payload_offset = file_size
        .checked_sub(FOOTER_SIZE as u64 + u64::from(footer.length))
        .ok_or(EmbedError::OffsetUnderflow {
            length: footer.length,
            file_size,
        })?;

    reader
        .seek(SeekFrom::Start(payload_offset))
        .map_err(EmbedError::io("seek embedded config"))?;

    let mut payload = vec![0u8; footer.length as usize];
    reader
        .read_exact(&mut payload)
        .map_err(EmbedError::io("read embedded config"))?;

    let actual = checksum(&payload);
    if actual != footer.checksum {
        return Err(EmbedError::ChecksumMismatch {
            expected: footer.checksum,
            actual,
        });
    }

    debug!(
        "read {} byte payload at offset {payload_offset}",
        payload.len()
    );
    Ok(Some(payload))
}

/// Load the payload embedded in the file at `path`.
pub fn load_payload(path: impl AsRef<Path>) -> Result<Option<Vec<u8>>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(EmbedError::open(path))?;
    let size = file
        .metadata()
        .map_err(EmbedError::io("stat executable"))?
        .len();

    read_payload(&mut file, size)
}

/// Load the payload embedded in the running executable.
pub fn load_payload_from_self() -> Result<Option<Vec<u8>>> {
    load_payload(resolve_self_path()?)
}

/// Read and strictly parse a standalone JSON config file.
pub fn load_config_from_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let raw = std::fs::read(path).map_err(|source| EmbedError::ReadConfigFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Config::from_json_slice(&raw)?)
}

/// Load and parse the configuration embedded in the file at `path`.
pub fn load_embedded_config(path: impl AsRef<Path>) -> Result<Option<Config>> {
    match load_payload(path)? {
        Some(raw) => Ok(Some(Config::from_json_slice(&raw)?)),
        None => Ok(None),
    }
}

/// Load and parse the configuration embedded in the running executable.
pub fn load_embedded_config_from_self() -> Result<Option<Config>> {
    load_embedded_config(resolve_self_path()?)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::footer::Footer;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn carrier(base: &[u8], payload: &[u8], footer: Footer) -> Vec<u8> {
        let mut data = base.to_vec();
        data.extend_from_slice(payload);
        data.extend_from_slice(&footer.to_bytes().unwrap());
        data
    }

    fn read(data: &[u8]) -> Result<Option<Vec<u8>>> {
        read_payload(&mut Cursor::new(data), data.len() as u64)
    }

    #[test]
    fn test_read_valid_payload() {
        let payload = br#"{"a":"b"}"#;
        let data = carrier(
            b"BIN",
            payload,
            Footer::new(payload.len() as u32, checksum(payload)),
        );

        assert_eq!(read(&data).unwrap().as_deref(), Some(&payload[..]));
    }

    #[test]
    fn test_no_footer() {
        assert!(read(b"HELLO").unwrap().is_none());
        assert!(read(&[0x55; 100]).unwrap().is_none());
    }

    #[test]
    fn test_zero_length_is_absent() {
        let data = carrier(b"BINARY", b"", Footer::new(0, 0));
        assert!(read(&data).unwrap().is_none());

        // A zero length wins even when the checksum field is junk.
        let data = carrier(b"BINARY", b"", Footer::new(0, 0xFFFF_FFFF));
        assert!(read(&data).unwrap().is_none());
    }

    #[test]
    fn test_length_above_maximum() {
        let data = carrier(b"BIN", b"", Footer::new(MAX_PAYLOAD_SIZE as u32 + 1, 0));
        let err = read(&data).unwrap_err();
        assert!(matches!(err, EmbedError::PayloadTooLarge { .. }));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_offset_underflow() {
        let data = Footer::new(1234, checksum(b"x")).to_bytes().unwrap();
        let err = read(&data).unwrap_err();
        assert!(matches!(
            err,
            EmbedError::OffsetUnderflow {
                length: 1234,
                file_size: 24
            }
        ));
    }

    #[test]
    fn test_checksum_mismatch() {
        let payload = b"config";
        let mut data = carrier(
            b"BIN",
            payload,
            Footer::new(payload.len() as u32, checksum(payload)),
        );
        let last_payload_byte = data.len() - FOOTER_SIZE - 1;
        data[last_payload_byte] ^= 0xFF;

        let err = read(&data).unwrap_err();
        assert!(matches!(err, EmbedError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_load_payload_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_payload(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, EmbedError::Open { .. }));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            "{\n  \"e2e\": { \"beaconUrl\": \"http://example\" }\n}\n",
        )
        .unwrap();

        let config = load_config_from_file(&path).unwrap();
        assert_eq!(
            config.e2e_beacon_url().map(url::Url::as_str),
            Some("http://example/")
        );
    }

    #[test]
    fn test_load_config_from_file_rejects_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"e2e":{"beaconUrl":"http://example"},"extra":true}"#).unwrap();

        assert!(load_config_from_file(&path).is_err());
    }

    #[test]
    fn test_load_config_from_file_rejects_trailing_tokens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"e2e":{"beaconUrl":"http://example"}} {"another":1}"#,
        )
        .unwrap();

        assert!(load_config_from_file(&path).is_err());
    }

    #[test]
    fn test_load_embedded_config_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fakebin");
        std::fs::write(&path, b"HELLO").unwrap();

        assert!(load_embedded_config(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_embedded_config_from_self_does_not_error() {
        // The test binary carries no payload; this only checks the path is safe.
        load_embedded_config_from_self().unwrap();
    }
}
