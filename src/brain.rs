//! Persistent per-note preference store.
//!
//! Preferences are keyed by root-relative note id and saved as a
//! bincode-encoded, gzip-compressed map at `<root>/.brain/brain.bin.gz`.
//! Loading is lenient (a missing or corrupt brain file yields an empty
//! store); saving is strict and surfaces every failure.

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const COLOR_SCHEME_KEY: &str = "color_scheme";

/// Open set of named preferences for one note. Absent keys are simply unset.
pub type PreferenceRecord = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum BrainError {
    #[error("failed to read brain file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("brain file {path} is corrupt: {source}")]
    Decode {
        path: PathBuf,
        source: bincode::Error,
    },
    #[error("failed to encode brain data: {0}")]
    Encode(bincode::Error),
    #[error("failed to create brain directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write brain file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// In-memory note-id to preference mapping plus its on-disk location.
///
/// One `Brain` is constructed at startup and handed to whichever command
/// needs it; every mutating caller saves immediately afterwards.
#[derive(Debug)]
pub struct Brain {
    path: PathBuf,
    entries: BTreeMap<String, PreferenceRecord>,
}

impl Brain {
    pub fn brain_path(root: &Path) -> PathBuf {
        root.join(".brain").join("brain.bin.gz")
    }

    /// Load the brain file under `root`, falling back to an empty store.
    ///
    /// Metadata loss is non-fatal to note usability, so any read or decode
    /// failure is logged and absorbed here rather than propagated.
    pub fn load(root: &Path) -> Self {
        let path = Self::brain_path(root);
        let entries = match read_brain_file(&path) {
            Ok(entries) => entries,
            Err(BrainError::Read { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                BTreeMap::new()
            }
            Err(err) => {
                log::warn!("ignoring unusable brain file: {err}");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn get(&self, id: &str) -> Option<&PreferenceRecord> {
        self.entries.get(id)
    }

    /// Set one preference field, creating the note's record if absent.
    pub fn set(&mut self, id: &str, key: &str, value: &str) {
        self.entries
            .entry(id.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the whole mapping back to disk, creating `.brain` first.
    pub fn save(&self) -> Result<(), BrainError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| {
                BrainError::CreateDir { path: dir.to_path_buf(), source }
            })?;
        }
        let encoded =
            bincode::serialize(&self.entries).map_err(BrainError::Encode)?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&encoded).map_err(|source| BrainError::Write {
            path: self.path.clone(),
            source,
        })?;
        let compressed =
            encoder.finish().map_err(|source| BrainError::Write {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, compressed).map_err(|source| {
            BrainError::Write { path: self.path.clone(), source }
        })
    }
}

fn read_brain_file(
    path: &Path,
) -> Result<BTreeMap<String, PreferenceRecord>, BrainError> {
    let raw = fs::read(path).map_err(|source| BrainError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut decoder = GzDecoder::new(&raw[..]);
    let mut buf = Vec::new();
    decoder.read_to_end(&mut buf).map_err(|source| BrainError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    bincode::deserialize(&buf).map_err(|source| BrainError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
