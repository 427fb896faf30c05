//! Supported languages and the persisted language preference.
//!
//! The page is bilingual: Arabic (the default, right-to-left) and English.
//! Every translatable element carries one text attribute per language
//! (`data-ar`, `data-en`). Attribute names are looked up through
//! [`Language::attribute`] rather than assembled from the language code, so
//! adding a language is a compile error everywhere it must be handled.
//!
//! ## Persistence
//!
//! The active language survives reloads through a [`LanguageStore`]. The
//! browser build wraps `localStorage`; tests use [`MemoryStore`]. Stored
//! values are untrusted: anything outside the supported set resolves to the
//! default language (see [`Language::resolve`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unsupported language code: {0:?}")]
pub struct UnknownLanguage(pub String);

/// A supported page language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl Language {
    /// Every supported language, in toggle order.
    pub const ALL: [Language; 2] = [Language::Ar, Language::En];

    /// ISO 639-1 code, as stored and as written to `<html lang>`.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }

    /// Name of the per-language text attribute on translatable elements.
    pub fn attribute(self) -> &'static str {
        match self {
            Language::Ar => "data-ar",
            Language::En => "data-en",
        }
    }

    /// Text direction for `<html dir>`.
    pub fn dir(self) -> &'static str {
        match self {
            Language::Ar => "rtl",
            _ => "ltr",
        }
    }

    /// The language the toggle switches to.
    pub fn other(self) -> Language {
        match self {
            Language::Ar => Language::En,
            Language::En => Language::Ar,
        }
    }

    /// Resolve an untrusted stored value, falling back to `default` when it is
    /// absent or not a supported code.
    pub fn resolve(raw: Option<&str>, default: Language) -> Language {
        raw.and_then(|code| code.parse().ok()).unwrap_or(default)
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Durable storage for the language preference.
pub trait LanguageStore {
    /// The last persisted language, or the store's default.
    fn get(&self) -> Language;

    /// Persist `lang`. Storage failures are logged, never raised.
    fn set(&mut self, lang: Language);
}

/// In-memory store that also remembers the raw value, so tests can seed it
/// with garbage and inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    default: Language,
    writes: usize,
}

impl MemoryStore {
    pub fn new(default: Language) -> Self {
        Self {
            raw: None,
            default,
            writes: 0,
        }
    }

    /// A store that already holds `raw`, as if written by an earlier visit.
    pub fn with_raw(raw: &str, default: Language) -> Self {
        Self {
            raw: Some(raw.to_string()),
            default,
            writes: 0,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl LanguageStore for MemoryStore {
    fn get(&self) -> Language {
        Language::resolve(self.raw.as_deref(), self.default)
    }

    fn set(&mut self, lang: Language) {
        self.raw = Some(lang.code().to_string());
        self.writes += 1;
    }
}
