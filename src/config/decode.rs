//! Decoding of TOML configuration documents.

use crate::config::inputs::{Config, CONFIG_KEYS, CONNECTION_KEYS};
use std::io::Read;
use std::path::Path;

/// Configuration document could not be decoded.
///
/// The underlying I/O or TOML error is available as `cause()`.
#[derive(Debug, Fail)]
pub(crate) enum DecodeError {
    #[fail(display = "failed to read config file '{}'", path)]
    Read {
        path: String,
        #[cause]
        source: std::io::Error,
    },
    #[fail(display = "failed to parse config file '{}'", path)]
    Parse {
        path: String,
        #[cause]
        source: toml::de::Error,
    },
}

/// A decoded configuration document.
#[derive(Debug)]
pub(crate) struct Document {
    pub(crate) config: Config,
    /// Keys present in the document but not understood, as dotted paths.
    pub(crate) unknown_keys: Vec<String>,
}

/// Read and decode the configuration document at `path`.
///
/// Fields not present in the document keep their zero value.
pub(crate) fn decode_file(path: &Path) -> Result<Document, DecodeError> {
    let read_err = |source| DecodeError::Read {
        path: path.display().to_string(),
        source,
    };

    let fp = std::fs::File::open(path).map_err(read_err)?;
    let mut bufrd = std::io::BufReader::new(fp);
    let mut content = vec![];
    bufrd.read_to_end(&mut content).map_err(read_err)?;

    decode_slice(&content).map_err(|source| DecodeError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Decode an in-memory configuration document.
pub(crate) fn decode_slice(content: &[u8]) -> Result<Document, toml::de::Error> {
    let config = toml::from_slice(content)?;
    let raw: toml::Value = toml::from_slice(content)?;
    let unknown_keys = unknown_keys(&raw);
    Ok(Document {
        config,
        unknown_keys,
    })
}

/// Collect top-level and `[connection]` keys that decoding skipped.
fn unknown_keys(raw: &toml::Value) -> Vec<String> {
    let mut unknown = vec![];
    let table = match raw.as_table() {
        Some(t) => t,
        None => return unknown,
    };

    for (key, value) in table {
        if !CONFIG_KEYS.contains(&key.as_str()) {
            unknown.push(key.clone());
            continue;
        }
        if key.eq_ignore_ascii_case("connection") {
            if let Some(conn) = value.as_table() {
                let skipped = conn
                    .keys()
                    .filter(|k| !CONNECTION_KEYS.contains(&k.as_str()))
                    .map(|k| format!("{}.{}", key, k));
                unknown.extend(skipped);
            }
        }
    }

    unknown
}
