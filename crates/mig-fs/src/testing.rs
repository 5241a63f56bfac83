//! In-memory file system for unit tests

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::FileSystem;

#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
    executable: Mutex<BTreeSet<PathBuf>>,
    fail_delete: Option<PathBuf>,
    fail_chmod: bool,
    foreign: Vec<PathBuf>,
}

impl MemoryFileSystem {
    pub fn with_files(paths: &[&str]) -> Self {
        let files = paths
            .iter()
            .map(|p| (PathBuf::from(p), String::new()))
            .collect();
        Self {
            files: Mutex::new(files),
            ..Default::default()
        }
    }

    pub fn failing_delete(mut self, path: &str) -> Self {
        self.fail_delete = Some(PathBuf::from(path));
        self
    }

    pub fn failing_chmod(mut self) -> Self {
        self.fail_chmod = true;
        self
    }

    /// Report a file outside any directory asked about
    pub fn leaking(mut self, path: &str) -> Self {
        self.foreign.push(PathBuf::from(path));
        self
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    pub fn is_executable(&self, path: &str) -> bool {
        self.executable.lock().unwrap().contains(Path::new(path))
    }
}

impl FileSystem for MemoryFileSystem {
    fn find_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut found: Vec<PathBuf> = self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.starts_with(dir))
            .cloned()
            .collect();
        found.extend(self.foreign.iter().cloned());
        Ok(found)
    }

    fn delete_recursively(&self, path: &Path) -> io::Result<()> {
        if self.fail_delete.as_deref() == Some(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn write(&self, content: &str, path: &Path) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_executable(&self, path: &Path) -> io::Result<()> {
        if self.fail_chmod {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "chmod denied"));
        }
        self.executable.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }
}
