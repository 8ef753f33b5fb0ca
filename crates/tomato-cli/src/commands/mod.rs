use std::path::{Path, PathBuf};

use tomato_core::error::Result;
use tomato_core::{Config, VaultStore};

pub mod config;
pub mod count;
pub mod panel;

/// Settings shared by every command.
pub struct Context {
    pub config: Config,
    /// Explicit config file; `None` means the default location.
    pub config_path: Option<PathBuf>,
    pub vault: PathBuf,
}

impl Context {
    pub fn load(
        config_path: Option<PathBuf>,
        vault: Option<PathBuf>,
    ) -> Result<Self> {
        let config = match &config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        let vault = config.vault_dir(vault.as_deref());
        tracing::debug!(vault = %vault.display(), "using vault");
        Ok(Self {
            config,
            config_path,
            vault,
        })
    }

    pub fn store(&self) -> VaultStore {
        VaultStore::new(&self.vault)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        match self.config_path.as_deref() {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        Ok(())
    }

    pub fn vault(&self) -> &Path {
        &self.vault
    }
}
