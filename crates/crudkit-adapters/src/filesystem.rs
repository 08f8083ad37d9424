//! [`Filesystem`] backed by `std::fs`.

use std::fs;
use std::io;
use std::path::Path;

use crudkit_core::{
    application::{ApplicationError, ports::Filesystem},
    error::CrudkitResult,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

/// Attach the path and the attempted operation to an I/O failure.
trait AtPath<T> {
    fn at(self, path: &Path, action: &str) -> CrudkitResult<T>;
}

impl<T> AtPath<T> for io::Result<T> {
    fn at(self, path: &Path, action: &str) -> CrudkitResult<T> {
        self.map_err(|e| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("cannot {action}: {e}"),
            }
            .into()
        })
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> CrudkitResult<()> {
        fs::create_dir_all(path).at(path, "create directory")
    }

    fn write_file(&self, path: &Path, content: &str) -> CrudkitResult<()> {
        fs::write(path, content).at(path, "write file")
    }

    fn read_to_string(&self, path: &Path) -> CrudkitResult<String> {
        fs::read_to_string(path).at(path, "read file")
    }

    #[cfg(unix)]
    fn set_permissions(&self, path: &Path, executable: bool) -> CrudkitResult<()> {
        use std::os::unix::fs::PermissionsExt;

        if !executable {
            return Ok(());
        }
        let mut perms = fs::metadata(path).at(path, "read metadata")?.permissions();
        perms.set_mode(perms.mode() | 0o111);
        fs::set_permissions(path, perms).at(path, "set permissions")
    }

    #[cfg(not(unix))]
    fn set_permissions(&self, _path: &Path, _executable: bool) -> CrudkitResult<()> {
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> CrudkitResult<()> {
        fs::remove_file(path).at(path, "remove file")
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> CrudkitResult<()> {
        fs::remove_dir_all(path).at(path, "remove directory")
    }
}
