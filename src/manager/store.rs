//! Library file (music_manager_data.json) reader and writer
//!
//! The whole library lives in one pretty-printed JSON document that is
//! rewritten in full on every save. There is no atomic rename, so a crash
//! mid-write can leave a truncated file behind.

use crate::error::{Error, Result};
use crate::model::{PlaylistRecord, SongRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

/// On-disk shape of the library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryDocument {
    pub songs: Vec<SongRecord>,
    pub playlists: Vec<PlaylistRecord>,
}

/// Read the library document at `path`
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_document(path: &Path) -> Result<Option<LibraryDocument>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|source| {
            if source.is_io() {
                Error::Read {
                    path: path.to_path_buf(),
                    source: source.into(),
                }
            } else {
                Error::Document {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
}

/// Overwrite `path` with the given document
pub fn write_document(path: &Path, document: &LibraryDocument) -> Result<()> {
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, document)
        .map_err(|e| write_error(e.into()))?;
    writer.flush().map_err(write_error)?;

    Ok(())
}
