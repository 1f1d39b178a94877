//! Localization collaborators: languages, string catalogs and the stored
//! language preference.
//!
//! The active language is always passed explicitly. A caller reads it from a
//! [`LanguageStore`] once and hands it to [`Catalog::lookup`] or
//! [`Catalog::extract`].

mod catalog;
mod language;
mod store;
pub mod strings_file;

pub use catalog::{Catalog, STRINGS_FILE_NAME};
pub use language::Language;
pub use store::{FileLanguageStore, LanguageStore, MemoryLanguageStore, StoredPreference};
