//! In-crate fakes for service tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::{
    ApplicationError,
    ports::{Environment, Filesystem},
};
use crate::error::CrudkitResult;

#[derive(Default)]
pub(crate) struct FakeFilesystem {
    files: Mutex<HashMap<PathBuf, String>>,
    dirs: Mutex<HashSet<PathBuf>>,
    failing: Mutex<HashSet<PathBuf>>,
}

impl FakeFilesystem {
    pub(crate) fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
        self
    }

    /// Writes and removals of `path` fail from now on.
    pub(crate) fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.failing.lock().unwrap().insert(path.into());
    }

    pub(crate) fn read(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    fn check(&self, path: &Path) -> CrudkitResult<()> {
        if self.failing.lock().unwrap().contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "injected failure".into(),
            }
            .into());
        }
        Ok(())
    }
}

impl Filesystem for FakeFilesystem {
    fn create_dir_all(&self, path: &Path) -> CrudkitResult<()> {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> CrudkitResult<()> {
        self.check(path)?;
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> CrudkitResult<String> {
        self.read(path).ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }

    fn set_permissions(&self, _path: &Path, _executable: bool) -> CrudkitResult<()> {
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> CrudkitResult<()> {
        self.check(path)?;
        self.files.lock().unwrap().remove(path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.dirs.lock().unwrap().contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> CrudkitResult<()> {
        self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
        self.dirs.lock().unwrap().retain(|p| !p.starts_with(path));
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeEnvironment(HashMap<String, String>);

impl FakeEnvironment {
    pub(crate) fn with(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }
}

impl Environment for FakeEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}
