//! Durable key-value preference stores.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ConfigLoader;
use crate::constants::theme::PREFERENCES_FILE;
use crate::types::{BlogError, Result};

/// String key-value store surviving across sessions
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// TOML file of string values (`theme = "dark"`)
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the global config directory
    pub fn open_default() -> Result<Self> {
        Self::default_path().map(Self::new).ok_or_else(|| {
            BlogError::Preferences("Cannot determine global config directory".to_string())
        })
    }

    pub fn default_path() -> Option<PathBuf> {
        ConfigLoader::global_dir().map(|dir| dir.join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> BlogError {
        BlogError::Preferences(format!("Cannot {} {}: {}", action, self.path.display(), e))
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error("read", e))?;
        toml::from_str(&content).map_err(|e| {
            BlogError::Preferences(format!("Invalid {}: {}", self.path.display(), e))
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error("create", e))?;
        }
        let content =
            toml::to_string(&values).map_err(|e| BlogError::Preferences(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| self.io_error("write", e))?;

        debug!("Stored preference {} = {} in {}", key, value, self.path.display());
        Ok(())
    }
}

/// In-process store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
