use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::DomainError;

/// Path of a template node below the project root.
///
/// Never absolute, never climbs out through `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        check_relative(&path)?;
        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

fn check_relative(path: &Path) -> Result<(), DomainError> {
    let climbs = path.components().any(|c| c == Component::ParentDir);
    if path.has_root() || climbs {
        return Err(DomainError::AbsolutePathNotAllowed {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// File mode of a generated file. Everything is read-write; scripts also
/// get the executable bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    executable: bool,
}

impl Permissions {
    pub const fn read_write() -> Self {
        Self { executable: false }
    }

    pub const fn executable() -> Self {
        Self { executable: true }
    }

    pub const fn executable_flag(&self) -> bool {
        self.executable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_rooted_and_climbing_paths() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
        assert!(RelativePath::try_new("../outside").is_err());
        assert!(RelativePath::try_new("src/../../x").is_err());
    }

    #[test]
    fn displays_as_the_plain_path() {
        let path = RelativePath::try_new("src/api/router.rs").unwrap();
        assert_eq!(path.to_string(), "src/api/router.rs");
        assert_eq!(AsRef::<Path>::as_ref(&path), Path::new("src/api/router.rs"));
    }

    #[test]
    fn only_scripts_are_executable() {
        assert!(!Permissions::default().executable_flag());
        assert!(!Permissions::read_write().executable_flag());
        assert!(Permissions::executable().executable_flag());
    }
}
