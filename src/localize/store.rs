//! Persistence of the selected display language.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Language;

/// Storage for the user's language choice across restarts.
///
/// The stored value is read once by the caller and then passed explicitly
/// to catalog lookups.
pub trait LanguageStore {
    /// Read the stored language, `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<Language>>;

    /// Persist a language choice.
    fn save(&mut self, lang: Language) -> Result<()>;
}

/// The on-disk form of a language preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPreference {
    /// Selected language
    pub language: Language,
    /// When the choice was saved
    pub updated_at: DateTime<Utc>,
}

/// Language preference stored as a small JSON file.
#[derive(Debug, Clone)]
pub struct FileLanguageStore {
    path: PathBuf,
}

impl FileLanguageStore {
    /// Create a store backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full stored preference, including its timestamp.
    pub fn load_preference(&self) -> Result<Option<StoredPreference>> {
        let source = match fs::read_to_string(&self.path) {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&source).map(Some).map_err(|e| {
            Error::Preferences(format!("{}: {}", self.path.display(), e))
        })
    }
}

impl LanguageStore for FileLanguageStore {
    fn load(&self) -> Result<Option<Language>> {
        Ok(self.load_preference()?.map(|p| p.language))
    }

    fn save(&mut self, lang: Language) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let preference = StoredPreference {
            language: lang,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&preference)
            .map_err(|e| Error::Preferences(e.to_string()))?;
        fs::write(&self.path, json)?;
        log::debug!("Saved language {} to {}", lang, self.path.display());
        Ok(())
    }
}

/// In-memory language preference, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryLanguageStore {
    language: Option<Language>,
}

impl MemoryLanguageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LanguageStore for MemoryLanguageStore {
    fn load(&self) -> Result<Option<Language>> {
        Ok(self.language)
    }

    fn save(&mut self, lang: Language) -> Result<()> {
        self.language = Some(lang);
        Ok(())
    }
}
