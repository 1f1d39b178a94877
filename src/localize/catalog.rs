//! Localized string catalog with explicit-language lookup.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::detect::decode_file;
use crate::error::{Error, Result};
use crate::model::Extraction;
use crate::parser::{MarkupParser, ParseOptions};

use super::strings_file::parse_strings;
use super::Language;

/// File name of the table inside each `<bundle>.lproj` directory.
pub const STRINGS_FILE_NAME: &str = "Localizable.strings";

/// Localized strings for every supported language.
///
/// Lookups always take the language as an argument; the catalog keeps no
/// notion of a current language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a `.lproj` directory tree or a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::load_dir(path)
        } else {
            Self::load_json(path)
        }
    }

    /// Load `<bundle>.lproj/Localizable.strings` tables from a directory.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut catalog = Self::new();

        for lang in Language::ALL {
            let file = dir
                .join(format!("{}.lproj", lang.bundle_name()))
                .join(STRINGS_FILE_NAME);
            if !file.is_file() {
                log::debug!("No strings table for {} at {}", lang, file.display());
                continue;
            }

            let source = decode_file(&file)?;
            let table = parse_strings(&source).map_err(|e| match e {
                Error::Catalog(message) => {
                    Error::Catalog(format!("{}: {}", file.display(), message))
                }
                other => other,
            })?;
            log::debug!("Loaded {} strings for {}", table.len(), lang);
            catalog.tables.insert(lang, table);
        }

        if catalog.tables.is_empty() {
            return Err(Error::Catalog(format!(
                "no *.lproj/{} tables found in {}",
                STRINGS_FILE_NAME,
                dir.display()
            )));
        }

        Ok(catalog)
    }

    /// Load a JSON catalog: `{ "<language>": { "<key>": "<value>" } }`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Parse a JSON catalog from a string.
    pub fn from_json(source: &str) -> Result<Self> {
        let raw: HashMap<String, HashMap<String, String>> = serde_json::from_str(source)
            .map_err(|e| Error::Catalog(format!("invalid JSON catalog: {}", e)))?;

        let mut catalog = Self::new();
        for (name, table) in raw {
            let lang: Language = name.parse()?;
            if catalog.tables.insert(lang, table).is_some() {
                return Err(Error::Catalog(format!(
                    "language {} appears more than once in JSON catalog",
                    lang
                )));
            }
        }
        Ok(catalog)
    }

    /// Add or replace a single entry.
    pub fn insert(&mut self, lang: Language, key: impl Into<String>, value: impl Into<String>) {
        self.tables
            .entry(lang)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Add an entry, builder style.
    pub fn with_entry(
        mut self,
        lang: Language,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert(lang, key, value);
        self
    }

    /// Languages that have a table, in declaration order.
    pub fn languages(&self) -> Vec<Language> {
        let mut langs: Vec<Language> = self.tables.keys().copied().collect();
        langs.sort();
        langs
    }

    /// All keys across every language, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let keys: BTreeSet<&str> = self
            .tables
            .values()
            .flat_map(|t| t.keys().map(String::as_str))
            .collect();
        keys.into_iter().collect()
    }

    /// Exact lookup without fallback.
    pub fn get(&self, key: &str, lang: Language) -> Option<&str> {
        self.tables.get(&lang)?.get(key).map(String::as_str)
    }

    /// Resolve a key: the requested language, then English, then the key itself.
    pub fn lookup<'a>(&'a self, key: &'a str, lang: Option<Language>) -> &'a str {
        lang.and_then(|l| self.get(key, l))
            .or_else(|| self.get(key, Language::FALLBACK))
            .unwrap_or_else(|| {
                log::debug!("No localization for key {:?}, using the key", key);
                key
            })
    }

    /// Look up a key and extract its marks.
    pub fn extract(
        &self,
        key: &str,
        lang: Option<Language>,
        options: &ParseOptions,
    ) -> Result<Extraction> {
        MarkupParser::with_options(options.clone()).parse(self.lookup(key, lang))
    }

    /// Extract every key in parallel, sorted by key.
    pub fn extract_all(
        &self,
        lang: Option<Language>,
        options: &ParseOptions,
    ) -> Vec<(String, Result<Extraction>)> {
        let parser = MarkupParser::with_options(options.clone());
        self.keys()
            .into_par_iter()
            .map(|key| (key.to_string(), parser.parse(self.lookup(key, lang))))
            .collect()
    }

    /// Number of entries across all languages.
    pub fn len(&self) -> usize {
        self.tables.values().map(HashMap::len).sum()
    }

    /// Check if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
