//! Working directory access
//!
//! All paths handed in and out are relative to the workspace root. Anything
//! inside the reserved store directory is invisible to every operation here.

use crate::artifacts::objects::tree::EntryKind;
use crate::errors::{IoResultExt, Result, StoreError};
use bytes::Bytes;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    store_dir_name: String,
}

impl Workspace {
    pub fn new(path: Box<Path>, store_dir_name: impl Into<String>) -> Self {
        Workspace {
            path,
            store_dir_name: store_dir_name.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `path` lies inside the reserved store directory
    ///
    /// This is a structural check on the first path component below the
    /// workspace root, so `notes.twig` or `docs/.twig` are not ignored.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let relative_path = path.strip_prefix(&self.path).unwrap_or(path);

        match relative_path.components().next() {
            Some(Component::Normal(name)) => name == OsStr::new(&self.store_dir_name),
            _ => false,
        }
    }

    /// Regular files and directories directly under `dir`, sorted by name
    ///
    /// Symlinks and other special files are skipped.
    pub fn list_dir(&self, dir: &Path) -> Result<Vec<(String, EntryKind)>> {
        let dir_path = self.path.join(dir);

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&dir_path).at_path(&dir_path)? {
            let entry = entry.at_path(&dir_path)?;
            let entry_path = entry.path();

            if self.is_ignored(&entry_path) {
                continue;
            }

            let file_type = entry.file_type().at_path(&entry_path)?;
            let kind = if file_type.is_file() {
                EntryKind::Blob
            } else if file_type.is_dir() {
                EntryKind::Tree
            } else {
                continue;
            };

            let name = entry
                .file_name()
                .into_string()
                .map_err(|_| StoreError::InvalidPath {
                    path: entry_path.clone(),
                    reason: "file name is not valid UTF-8".to_string(),
                })?;

            entries.push((name, kind));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(entries)
    }

    /// Every regular file below the root, relative and sorted
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        WalkDir::new(&self.path)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry.path()))
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry)),
                Ok(_) => None,
                Err(e) => Some(Err(e)),
            })
            .map(|entry| Ok(self.relative(entry?.path())))
            .collect()
    }

    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path).at_path(&file_path)?;

        Ok(content.into())
    }

    /// Write `data` to `file_path`, creating parent directories as needed
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> Result<()> {
        if self.is_ignored(file_path) {
            return Err(StoreError::InvalidPath {
                path: file_path.to_path_buf(),
                reason: "path is inside the store directory".to_string(),
            });
        }

        let path = self.path.join(file_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).at_path(parent)?;
        }

        // never write through a symlink left behind by `empty`
        match std::fs::symlink_metadata(&path) {
            Ok(metadata) if metadata.file_type().is_symlink() => {
                std::fs::remove_file(&path).at_path(&path)?;
            }
            // a directory left where a file now belongs
            Ok(metadata) if metadata.is_dir() => {
                std::fs::remove_dir_all(&path).at_path(&path)?;
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).at_path(&path),
        }

        std::fs::write(&path, data).at_path(&path)
    }

    /// Remove every file outside the store directory, then every directory
    /// that ends up empty
    ///
    /// Directories that still hold something (symlinks, unreadable leftovers)
    /// stay in place and are reported with a warning.
    pub fn empty(&self) -> Result<()> {
        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .contents_first(true)
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry.path()));

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type();

            if file_type.is_file() {
                std::fs::remove_file(path).at_path(path)?;
            } else if file_type.is_dir() {
                match std::fs::remove_dir(path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::DirectoryNotEmpty => {
                        warn!(path = %self.relative(path).display(), "left non-empty directory in place");
                    }
                    Err(e) => return Err(e).at_path(path),
                }
            }
        }

        Ok(())
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
