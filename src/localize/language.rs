//! Supported display languages.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A language the app can be displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    /// English
    #[serde(rename = "en")]
    En,
    /// Simplified Chinese
    #[serde(rename = "zh_Hans")]
    ZhHans,
    /// Traditional Chinese
    #[serde(rename = "zh_Hant")]
    ZhHant,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 3] = [Language::En, Language::ZhHans, Language::ZhHant];

    /// Language used when nothing else resolves.
    pub const FALLBACK: Language = Language::En;

    /// Identifier code (`en`, `zh_Hans`, `zh_Hant`).
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::ZhHans => "zh_Hans",
            Language::ZhHant => "zh_Hant",
        }
    }

    /// Resource bundle name (`en`, `zh-Hans`, `zh-Hant`).
    pub fn bundle_name(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::ZhHans => "zh-Hans",
            Language::ZhHant => "zh-Hant",
        }
    }

    /// Name of the language in the language itself.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::ZhHans => "中文简体",
            Language::ZhHant => "中文繁体",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    /// Accepts the code or the bundle name, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace('-', "_");
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}
