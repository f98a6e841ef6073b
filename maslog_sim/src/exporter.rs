//! JSON exporter for generated log streams.
//!
//! Writes the record array consumed by the log viewer, and reads one back.

use crate::record::LogRecord;
use maslog_env::GenResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default destination, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "logs.json";

/// Writes any serializable value as one JSON document.
///
/// The document is encoded in memory, written to a sibling temp file and
/// renamed over `path`, so readers never observe a partial file.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path, pretty: bool) -> GenResult<()> {
    let json = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };

    let tmp = temp_sibling(path);
    let replace = || -> io::Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(&json)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, path)
    };

    // Nothing may be left beside `path` once the write has failed.
    if let Err(e) = replace() {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}

/// Writes the records as a JSON array, in the order given.
pub fn write_records(records: &[LogRecord], path: impl AsRef<Path>, pretty: bool) -> GenResult<()> {
    write_json(records, path.as_ref(), pretty)
}

/// Reads any JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> GenResult<T> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Reads a record array previously written by [`write_records`].
pub fn load_records(path: impl AsRef<Path>) -> GenResult<Vec<LogRecord>> {
    read_json(path.as_ref())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_OUTPUT.into());
    name.push(".tmp");
    path.with_file_name(name)
}
