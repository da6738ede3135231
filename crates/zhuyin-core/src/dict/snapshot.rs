//! Compiled snapshot (ZYDX) holding a parsed dictionary and tone table.
//!
//! Layout: `ZYDX` magic, version byte, 3 reserved bytes, CRC32 of the
//! payload (u32 LE), then the bincode payload.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DictError, PolyphonicDictionary, ToneTable};

pub(crate) const MAGIC: &[u8; 4] = b"ZYDX";
pub(crate) const VERSION: u8 = 1;
pub(crate) const HEADER_SIZE: usize = 12;

/// Check the magic bytes without decoding anything else.
pub fn is_snapshot(bytes: &[u8]) -> bool {
    bytes.len() >= MAGIC.len() && &bytes[..MAGIC.len()] == MAGIC
}

/// Dictionary and tone table, pre-parsed for fast startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledTables {
    pub dictionary: PolyphonicDictionary,
    pub tones: ToneTable,
}

impl CompiledTables {
    pub fn new(dictionary: PolyphonicDictionary, tones: ToneTable) -> Self {
        Self { dictionary, tones }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let payload = bincode::serialize(self).map_err(DictError::Serialize)?;
        let crc = crc32fast::hash(&payload);

        let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&[0u8; 3]); // reserved
        buf.extend_from_slice(&crc.to_le_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        if data.len() < 5 {
            return Err(DictError::InvalidHeader);
        }
        if !is_snapshot(data) {
            return Err(DictError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(DictError::UnsupportedVersion(data[4]));
        }
        if data.len() < HEADER_SIZE {
            return Err(DictError::InvalidHeader);
        }

        let expected = u32::from_le_bytes([data[8], data[9], data[10], data[11]]);
        let payload = &data[HEADER_SIZE..];
        let actual = crc32fast::hash(payload);
        if actual != expected {
            return Err(DictError::ChecksumMismatch { expected, actual });
        }

        let tables: Self = bincode::deserialize(payload).map_err(DictError::Deserialize)?;
        debug!(
            entries = tables.dictionary.len(),
            tones = tables.tones.len(),
            "loaded compiled tables"
        );
        Ok(tables)
    }

    pub fn open(path: &Path) -> Result<Self, DictError> {
        Self::from_bytes(&fs::read(path)?)
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        let bytes = self.to_bytes()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
