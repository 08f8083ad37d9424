use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{entities::common::Permissions, error::DomainError};

/// What the renderer produced for one project: every directory and file,
/// relative to `root`, with placeholders already substituted.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    root: PathBuf,
    entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: String, perms: Permissions) {
        self.entries.push(FsEntry::File(FileToWrite {
            path: path.into(),
            content,
            permissions: perms,
        }));
    }

    pub fn add_directory(&mut self, path: impl Into<PathBuf>, perms: Permissions) {
        self.entries.push(FsEntry::Directory(DirectoryToCreate {
            path: path.into(),
            permissions: perms,
        }));
    }

    /// Non-empty, relative entries only, no path listed twice.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Project structure is empty".into(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.entries.len());
        self.entries.iter().map(FsEntry::path).try_for_each(|path| {
            let shown = || path.display().to_string();
            if path.is_absolute() {
                Err(DomainError::AbsolutePathNotAllowed { path: shown() })
            } else if !seen.insert(path) {
                Err(DomainError::DuplicatePath { path: shown() })
            } else {
                Ok(())
            }
        })
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            FsEntry::Directory(_) => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            FsEntry::File(_) => None,
        })
    }

    /// Look up a rendered file by its relative path.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&FileToWrite> {
        let path = path.as_ref();
        self.files().find(|f| f.path == path)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &Path {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: PathBuf,
    pub content: String,
    pub permissions: Permissions,
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: PathBuf,
    pub permissions: Permissions,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure(files: &[&str]) -> ProjectStructure {
        let mut s = ProjectStructure::new("/tmp/svc");
        for f in files {
            s.add_file(*f, String::new(), Permissions::read_write());
        }
        s
    }

    #[test]
    fn splits_files_and_directories() {
        let mut s = structure(&["src/main.rs"]);
        s.add_directory("src", Permissions::read_write());

        assert_eq!(s.entry_count(), 2);
        assert_eq!(s.files().count(), 1);
        assert_eq!(s.directories().count(), 1);
        assert!(s.file("src/main.rs").is_some());
        assert!(s.file("src/lib.rs").is_none());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rejects_duplicates() {
        assert!(matches!(
            structure(&["main.rs", "main.rs"]).validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn rejects_empty() {
        assert!(structure(&[]).validate().is_err());
    }

    #[test]
    fn rejects_absolute_entries() {
        assert!(matches!(
            structure(&["/etc/hosts"]).validate(),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }
}
