//! JSON snapshot file backing the in-memory entity store.
//!
//! The snapshot is read once on connect and replaced atomically on close: the
//! new contents go to a hidden staging file in the same directory, which is
//! then renamed over the target so readers never observe a partial write.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::EntityStoreError;
use crate::domain::{Exercise, User};

/// Persisted contents of the store, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct Snapshot {
    #[serde(default)]
    pub(super) users: Vec<User>,
    #[serde(default)]
    pub(super) exercises: Vec<Exercise>,
}

/// Location of a snapshot on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub(super) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }

    fn split(&self) -> Result<(&Path, &OsStr), EntityStoreError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            EntityStoreError::connection(format!(
                "snapshot path {} does not name a file",
                self.path.display()
            ))
        })?;
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Ok((parent, file_name))
    }

    /// Read the snapshot, yielding an empty one when the file does not exist.
    pub(super) fn load(&self) -> Result<Snapshot, EntityStoreError> {
        let (parent, file_name) = self.split()?;
        let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
            Ok(dir) => dir,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(Snapshot::default());
            }
            Err(error) => return Err(self.io_error(&error)),
        };
        let contents = match dir.read_to_string(file_name) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(Snapshot::default());
            }
            Err(error) => return Err(self.io_error(&error)),
        };
        serde_json::from_str(&contents).map_err(|error| {
            EntityStoreError::connection(format!(
                "snapshot {} is not valid: {error}",
                self.path.display()
            ))
        })
    }

    /// Replace the snapshot on disk with `snapshot`.
    pub(super) fn save(&self, snapshot: &Snapshot) -> Result<(), EntityStoreError> {
        let (parent, file_name) = self.split()?;
        let contents = serde_json::to_vec_pretty(snapshot).map_err(|error| {
            EntityStoreError::query(format!("failed to encode snapshot: {error}"))
        })?;

        Dir::create_ambient_dir_all(parent, ambient_authority())
            .map_err(|error| self.io_error(&error))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|error| self.io_error(&error))?;

        let staging_name = format!(
            ".{}.tmp-{}",
            file_name.to_string_lossy(),
            Uuid::new_v4().simple()
        );
        if let Err(error) = dir
            .write(&staging_name, &contents)
            .and_then(|()| replace_file(&dir, &staging_name, file_name))
        {
            let _cleanup_result = dir.remove_file(&staging_name);
            return Err(self.io_error(&error));
        }
        Ok(())
    }

    fn io_error(&self, error: &io::Error) -> EntityStoreError {
        EntityStoreError::query(format!("snapshot {}: {error}", self.path.display()))
    }
}

#[cfg(windows)]
fn replace_file(dir: &Dir, from: &str, to: &OsStr) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(to) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(error),
    }
    dir.rename(from, dir, to)
}

#[cfg(not(windows))]
fn replace_file(dir: &Dir, from: &str, to: &OsStr) -> io::Result<()> {
    dir.rename(from, dir, to)
}
