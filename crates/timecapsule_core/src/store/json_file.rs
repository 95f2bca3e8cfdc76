//! JSON flat-file capsule store.
//!
//! # Responsibility
//! - Persist the whole capsule collection as one pretty-printed JSON array.
//! - Keep replacement atomic via a sibling temp file and rename.
//!
//! # Invariants
//! - The persisted document is always a bare array of capsule objects; no
//!   version field or wrapper object is ever written.
//! - Every operation performs fresh I/O; no state is cached between calls.

use super::{CapsuleStore, StoreError, StoreResult};
use crate::model::capsule::Capsule;
use log::{error, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed store holding the serialized capsule collection.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over the given backing file path.
    ///
    /// The file is not touched here; a missing file simply reads as an
    /// empty collection until the first save creates it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CapsuleStore for JsonFileStore {
    fn load_all(&self) -> StoreResult<Vec<Capsule>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=store_load module=store status=ok source=absent count=0 path={}",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error error_code=read_failed path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(err.into());
            }
        };

        // A present-but-blank file reads as empty; Corrupt is reserved for
        // non-blank content that fails to decode.
        if text.trim().is_empty() {
            info!(
                "event=store_load module=store status=ok source=blank count=0 path={}",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<Capsule>>(&text) {
            Ok(capsules) => {
                info!(
                    "event=store_load module=store status=ok source=file count={} path={}",
                    capsules.len(),
                    self.path.display()
                );
                Ok(capsules)
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error error_code=decode_failed path={} error={}",
                    self.path.display(),
                    err
                );
                Err(StoreError::Corrupt(err))
            }
        }
    }

    fn save_all(&self, capsules: &[Capsule]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(capsules).map_err(StoreError::Corrupt)?;

        // Write-to-temp-then-rename so a crash mid-write never leaves a
        // half-written document at the target path.
        let temp = self.temp_path();
        if let Err(err) = fs::write(&temp, json) {
            error!(
                "event=store_save module=store status=error error_code=write_failed path={} error={}",
                temp.display(),
                err
            );
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&temp, &self.path) {
            error!(
                "event=store_save module=store status=error error_code=rename_failed path={} error={}",
                self.path.display(),
                err
            );
            let _ = fs::remove_file(&temp);
            return Err(err.into());
        }

        info!(
            "event=store_save module=store status=ok count={} path={}",
            capsules.len(),
            self.path.display()
        );
        Ok(())
    }
}
