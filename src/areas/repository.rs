use crate::areas::config::StoreConfig;
use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::{IoResultExt, Result};
use std::path::Path;

/// Handle on one store and the working directory it snapshots
///
/// Every operation goes through a `Repository`; nothing reads process-wide
/// state, so independent stores can be opened side by side.
#[derive(Debug)]
pub struct Repository {
    config: StoreConfig,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the store described by `config`
    ///
    /// The working directory is created when missing; the store directory is
    /// only created by [`Repository::init`].
    pub fn open(config: StoreConfig) -> Result<Self> {
        let work_dir = config.work_dir();
        if !work_dir.exists() {
            std::fs::create_dir_all(work_dir).at_path(work_dir)?;
        }
        let path = work_dir.canonicalize().at_path(work_dir)?;

        let config = StoreConfig::new(path.clone())
            .with_store_dir_name(config.store_dir_name())
            .with_default_branch(config.default_branch());

        let database = Database::new(config.objects_path().into_boxed_path());
        let workspace = Workspace::new(path.into_boxed_path(), config.store_dir_name());
        let refs = Refs::new(config.store_path().into_boxed_path());

        Ok(Repository {
            config,
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        self.config.work_dir()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn is_initialized(&self) -> bool {
        self.database.objects_path().is_dir() && self.refs.head_path().is_file()
    }
}
