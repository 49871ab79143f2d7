//! Filesystem implementation of the `UnitStore` port.
//!
//! Writes go to a temporary file in the target directory and are renamed
//! into place, so the service manager never reads a half-written unit.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::ports::UnitStore;
use crate::domain::error::WriteError;
use crate::domain::unit::UNIT_FILE_MODE;

/// Unit definitions stored as plain files under one directory.
pub struct FsUnitStore {
    root: PathBuf,
}

impl FsUnitStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl UnitStore for FsUnitStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, WriteError> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(WriteError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<(), WriteError> {
        let write_err = |source| WriteError::Write {
            path: path.to_path_buf(),
            source,
        };
        let dir = path.parent().unwrap_or(&self.root);
        let mut temp = tempfile::Builder::new()
            .prefix(".portfleet-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(write_err)?;
        temp.write_all(content).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(UNIT_FILE_MODE))
                .map_err(write_err)?;
        }

        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(path).map_err(|e| write_err(e.error))?;
        debug!(path = %path.display(), bytes = content.len(), "unit definition persisted");
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<bool, WriteError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(WriteError::Remove {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
