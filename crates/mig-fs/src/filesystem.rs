//! File system trait

use std::io;
use std::path::{Path, PathBuf};

/// Everything tree operations need from the file system.
///
/// Borrowed for the duration of a single operation; callers own the lifecycle.
pub trait FileSystem: Send + Sync {
    /// All files under `dir`, recursively
    fn find_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Remove `path` and, for a directory, its whole subtree
    fn delete_recursively(&self, path: &Path) -> io::Result<()>;

    /// Write `content` to `path`, creating parent directories
    fn write(&self, content: &str, path: &Path) -> io::Result<()>;

    fn set_executable(&self, path: &Path) -> io::Result<()>;
}

/// The real, local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn find_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_dir() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn delete_recursively(&self, path: &Path) -> io::Result<()> {
        // Already gone, e.g. removed together with a parent directory
        let metadata = match std::fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };

        if metadata.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        }
    }

    fn write(&self, content: &str, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    }

    #[cfg(unix)]
    fn set_executable(&self, path: &Path) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = std::fs::metadata(path)?.permissions();
        permissions.set_mode(permissions.mode() | 0o111);
        std::fs::set_permissions(path, permissions)
    }

    #[cfg(not(unix))]
    fn set_executable(&self, path: &Path) -> io::Result<()> {
        std::fs::metadata(path).map(|_| ())
    }
}
