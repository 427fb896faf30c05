//! `localStorage`-backed language preference.
//!
//! Storage can be missing (privacy modes, sandboxed iframes) or throw on
//! access. Reads then yield the default language and writes are dropped with
//! a warning; the page keeps working for the session either way.

use crate::language::{Language, LanguageStore};
use web_sys::Storage;

pub struct LocalStorageStore {
    storage: Option<Storage>,
    key: String,
    default: Language,
}

impl LocalStorageStore {
    pub fn new(storage: Option<Storage>, key: &str, default: Language) -> Self {
        if storage.is_none() {
            log::warn!("localStorage unavailable, language choice will not persist");
        }
        Self {
            storage,
            key: key.to_string(),
            default,
        }
    }
}

impl LanguageStore for LocalStorageStore {
    fn get(&self) -> Language {
        let raw = self
            .storage
            .as_ref()
            .and_then(|s| s.get_item(&self.key).ok().flatten());
        Language::resolve(raw.as_deref(), self.default)
    }

    fn set(&mut self, lang: Language) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = storage.set_item(&self.key, lang.code()) {
            log::warn!("persisting language failed: {e:?}");
        }
    }
}
