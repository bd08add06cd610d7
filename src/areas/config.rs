//! Store configuration
//!
//! A [`StoreConfig`] names the working directory, the reserved store directory
//! inside it, and the branch a fresh store starts on. It is an owned value
//! handed to [`Repository::open`](crate::areas::repository::Repository::open),
//! so several independent stores can live in one process.

use derive_new::new;
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_DIR: &str = ".twig";
pub const DEFAULT_BRANCH: &str = "master";

pub const STORE_DIR_ENV: &str = "TWIG_DIR";
pub const DEFAULT_BRANCH_ENV: &str = "TWIG_DEFAULT_BRANCH";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StoreConfig {
    /// Root of the working directory that gets snapshotted
    #[new(into)]
    work_dir: PathBuf,
    /// Name of the reserved directory holding objects and refs
    #[new(value = "DEFAULT_STORE_DIR.to_string()")]
    store_dir_name: String,
    #[new(value = "DEFAULT_BRANCH.to_string()")]
    default_branch: String,
}

impl StoreConfig {
    /// Build a config for `work_dir`, overriding defaults from the environment
    ///
    /// Reads `TWIG_DIR` (store directory name) and `TWIG_DEFAULT_BRANCH`.
    /// Empty values are ignored.
    pub fn load_from_env(work_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(work_dir);

        if let Some(store_dir_name) = read_env(STORE_DIR_ENV) {
            config.store_dir_name = store_dir_name;
        }
        if let Some(default_branch) = read_env(DEFAULT_BRANCH_ENV) {
            config.default_branch = default_branch;
        }

        config
    }

    pub fn with_store_dir_name(mut self, store_dir_name: impl Into<String>) -> Self {
        self.store_dir_name = store_dir_name.into();
        self
    }

    pub fn with_default_branch(mut self, default_branch: impl Into<String>) -> Self {
        self.default_branch = default_branch.into();
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn store_dir_name(&self) -> &str {
        &self.store_dir_name
    }

    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    pub fn store_path(&self) -> PathBuf {
        self.work_dir.join(&self.store_dir_name)
    }

    pub fn objects_path(&self) -> PathBuf {
        self.store_path().join("objects")
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
