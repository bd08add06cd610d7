use crate::common::file::{FileSpec, snapshot_files, write_file};
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};
use twig::areas::config::StoreConfig;
use twig::areas::repository::Repository;

pub const STORE_DIR: &str = ".twig";

/// A temporary working directory with an initialized store
pub struct Sandbox {
    pub dir: TempDir,
    pub repository: Repository,
}

impl Sandbox {
    pub fn path(&self) -> &Path {
        self.repository.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.path().join(STORE_DIR)
    }

    pub fn write(&self, path: &str, content: &str) {
        write_file(self.path(), &FileSpec::new(PathBuf::from(path), content.to_string()));
    }

    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path))
            .unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
    }

    pub fn remove(&self, path: &str) {
        std::fs::remove_file(self.path().join(path))
            .unwrap_or_else(|e| panic!("Failed to remove {path}: {e}"));
    }

    pub fn exists(&self, path: &str) -> bool {
        self.path().join(path).exists()
    }

    pub fn files(&self) -> Vec<FileSpec> {
        snapshot_files(self.path(), STORE_DIR)
    }

    /// Write `files` and commit them, returning the commit id
    pub fn commit_files(&self, files: &[(&str, &str)], message: &str) -> twig::artifacts::objects::object_id::ObjectId {
        for (path, content) in files {
            self.write(path, content);
        }

        self.repository.commit(message).unwrap()
    }
}

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn sandbox(repository_dir: TempDir) -> Sandbox {
    let config = StoreConfig::new(repository_dir.path()).with_store_dir_name(STORE_DIR);
    let repository = Repository::open(config).expect("Failed to open repository");
    repository.init().expect("Failed to initialize store");

    Sandbox {
        dir: repository_dir,
        repository,
    }
}
