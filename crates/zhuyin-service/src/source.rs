//! Where the dictionary and tone table come from, and how they are read.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};
use zhuyin_core::dict::{is_snapshot, CompiledTables, DictError};
use zhuyin_core::settings::Settings;
use zhuyin_core::{PolyphonicDictionary, ToneTable};

/// Upper bound for a downloaded resource.
const MAX_RESOURCE_BYTES: u64 = 64 * 1024 * 1024;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("HTTP error: {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("IO error: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0} is not valid UTF-8")]
    NotUtf8(String),

    #[error(transparent)]
    Dict(#[from] DictError),

    #[error("failed to spawn loader thread: {0}")]
    Spawn(io::Error),

    #[error("loader thread panicked")]
    Panicked,
}

/// A local file or an `http(s)://` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    Path(PathBuf),
    Url(String),
}

impl ResourceLocation {
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            ResourceLocation::Url(s.to_string())
        } else {
            ResourceLocation::Path(PathBuf::from(s))
        }
    }

    /// Read the whole resource. `timeout` bounds HTTP requests only.
    pub fn read(&self, timeout: Duration) -> Result<Vec<u8>, LoadError> {
        match self {
            ResourceLocation::Path(path) => fs::read(path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            }),
            ResourceLocation::Url(url) => fetch(url, timeout),
        }
    }

    /// Read the resource and write it to `dest`.
    pub fn download(&self, dest: &Path, timeout: Duration) -> Result<usize, LoadError> {
        let bytes = self.read(timeout)?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| LoadError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(dest, &bytes).map_err(|source| LoadError::Io {
            path: dest.to_path_buf(),
            source,
        })?;
        Ok(bytes.len())
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLocation::Path(path) => write!(f, "{}", path.display()),
            ResourceLocation::Url(url) => f.write_str(url),
        }
    }
}

fn fetch(url: &str, timeout: Duration) -> Result<Vec<u8>, LoadError> {
    let http_err = |e: ureq::Error| LoadError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    };
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build();
    let agent = ureq::Agent::new_with_config(config);

    debug!(url, timeout_secs = timeout.as_secs(), "fetching resource");
    let mut body = agent.get(url).call().map_err(http_err)?.into_body();
    let bytes = body
        .with_config()
        .limit(MAX_RESOURCE_BYTES)
        .read_to_vec()
        .map_err(http_err)?;
    debug!(url, bytes = bytes.len(), "fetched resource");
    Ok(bytes)
}

fn utf8(bytes: &[u8], location: &ResourceLocation) -> Result<String, LoadError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| LoadError::NotUtf8(location.to_string()))
}

/// The dictionary and tone table locations for one service.
#[derive(Debug, Clone)]
pub struct Resources {
    /// JSON dictionary or compiled snapshot.
    pub dictionary: ResourceLocation,
    /// Tone table; unused when `dictionary` is a snapshot.
    pub tones: Option<ResourceLocation>,
    pub timeout: Duration,
}

impl Resources {
    pub fn new(dictionary: ResourceLocation, tones: Option<ResourceLocation>) -> Self {
        Self {
            dictionary,
            tones,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            dictionary: ResourceLocation::parse(&settings.resources.dictionary),
            tones: Some(ResourceLocation::parse(&settings.resources.tones)),
            timeout: Duration::from_secs(settings.fetch.timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read and parse both resources.
    pub fn load(&self) -> Result<CompiledTables, LoadError> {
        let bytes = self.dictionary.read(self.timeout)?;
        if is_snapshot(&bytes) {
            debug!(source = %self.dictionary, "dictionary is a compiled snapshot");
            return Ok(CompiledTables::from_bytes(&bytes)?);
        }

        let dictionary = PolyphonicDictionary::from_json_str(&utf8(&bytes, &self.dictionary)?)?;
        let tones = match &self.tones {
            Some(location) => {
                let bytes = location.read(self.timeout)?;
                ToneTable::from_json_str(&utf8(&bytes, location)?)?
            }
            None => {
                warn!("no tone table configured; sandhi falls back to default readings");
                ToneTable::default()
            }
        };
        Ok(CompiledTables::new(dictionary, tones))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_location() {
        assert_eq!(
            ResourceLocation::parse("https://example.com/poyin_db.json"),
            ResourceLocation::Url("https://example.com/poyin_db.json".to_string())
        );
        assert_eq!(
            ResourceLocation::parse("data/poyin_db.json"),
            ResourceLocation::Path(PathBuf::from("data/poyin_db.json"))
        );
        // Other schemes are treated as paths.
        assert!(matches!(
            ResourceLocation::parse("ftp://example.com/x"),
            ResourceLocation::Path(_)
        ));
    }

    #[test]
    fn from_settings() {
        let s = zhuyin_core::settings::parse_settings_toml(zhuyin_core::settings::default_toml())
            .unwrap();
        let r = Resources::from_settings(&s);
        assert_eq!(
            r.dictionary,
            ResourceLocation::Path(PathBuf::from("data/poyin_db.json"))
        );
        assert_eq!(r.timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let loc = ResourceLocation::Path(dir.path().join("missing.json"));
        let err = loc.read(DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn non_utf8_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = Resources::new(ResourceLocation::Path(path), None)
            .load()
            .unwrap_err();
        assert!(matches!(err, LoadError::NotUtf8(_)));
    }

    #[test]
    fn download_copies_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.json");
        fs::write(&src, "{}").unwrap();
        let dest = dir.path().join("nested").join("dest.json");
        let n = ResourceLocation::Path(src)
            .download(&dest, DEFAULT_TIMEOUT)
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(fs::read_to_string(dest).unwrap(), "{}");
    }
}
