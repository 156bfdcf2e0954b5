//! Locale selection and cache invalidation on language change.

pub mod watcher;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FolioError, Result};
use crate::gateway::DataGateway;
use crate::storage::{ClientStorage, LANG_KEY};

pub use watcher::LocaleWatcher;

/// Supported site languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Chinese (default and fallback).
    #[default]
    Zh,
    /// English.
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Zh, Locale::En];

    /// Language code sent as the `lang` query parameter.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    /// Native display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Locale::Zh => "中文",
            Locale::En => "English",
        }
    }

    /// Parse a language code, accepting region-tagged forms like `en-US`.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "zh" => Some(Locale::Zh),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::from_code(s).ok_or_else(|| {
            FolioError::Validation(format!(
                "Unsupported locale '{}' (expected one of: zh, en)",
                s.trim()
            ))
        })
    }
}

/// Reads and writes the persisted locale.
#[derive(Clone)]
pub struct LocaleStore {
    storage: Arc<ClientStorage>,
}

impl LocaleStore {
    pub fn new(storage: Arc<ClientStorage>) -> Self {
        Self { storage }
    }

    /// Current locale; missing or unknown codes fall back to the default.
    pub fn current(&self) -> Locale {
        self.storage
            .get(LANG_KEY)
            .and_then(|code| Locale::from_code(&code))
            .unwrap_or_default()
    }

    pub fn set(&self, locale: Locale) -> Result<()> {
        self.storage.set(LANG_KEY, locale.code())
    }

    /// Backing storage file, `None` for in-memory stores.
    pub fn storage_path(&self) -> Option<&Path> {
        self.storage.path()
    }
}

/// Changes the active locale and clears every cached record.
pub struct LocaleSwitcher {
    store: LocaleStore,
    gateway: Arc<DataGateway>,
}

impl LocaleSwitcher {
    pub fn new(store: LocaleStore, gateway: Arc<DataGateway>) -> Self {
        Self { store, gateway }
    }

    pub fn current(&self) -> Locale {
        self.store.current()
    }

    /// Persist `locale`, then invalidate the whole gateway cache.
    ///
    /// Re-selecting the active locale still clears the cache.
    pub fn change(&self, locale: Locale) -> Result<()> {
        let previous = self.store.current();
        self.store.set(locale)?;
        self.gateway.invalidate(None);
        info!(from = %previous, to = %locale, "Locale changed, cleared API cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_codes() {
        assert_eq!(Locale::Zh.code(), "zh");
        assert_eq!(Locale::En.code(), "en");
        assert_eq!(Locale::default(), Locale::Zh);
        assert_eq!(Locale::En.to_string(), "en");
    }

    #[test]
    fn test_locale_from_code_accepts_region_tags() {
        assert_eq!(Locale::from_code("en-US"), Some(Locale::En));
        assert_eq!(Locale::from_code("zh_CN"), Some(Locale::Zh));
        assert_eq!(Locale::from_code(" EN "), Some(Locale::En));
        assert_eq!(Locale::from_code("fr"), None);
        assert_eq!(Locale::from_code(""), None);
    }

    #[test]
    fn test_locale_from_str_error() {
        let err = "de".parse::<Locale>().unwrap_err();
        assert!(matches!(err, FolioError::Validation(ref m) if m.contains("'de'")));
    }

    #[test]
    fn test_locale_serde() {
        let json = serde_json::to_string(&Locale::En).unwrap();
        assert_eq!(json, r#""en""#);
        let back: Locale = serde_json::from_str(r#""zh""#).unwrap();
        assert_eq!(back, Locale::Zh);
    }

    #[test]
    fn test_store_defaults_and_unknown_codes() {
        let storage = Arc::new(ClientStorage::in_memory());
        let store = LocaleStore::new(Arc::clone(&storage));
        assert_eq!(store.current(), Locale::Zh);

        storage.set(LANG_KEY, "klingon").unwrap();
        assert_eq!(store.current(), Locale::Zh);

        store.set(Locale::En).unwrap();
        assert_eq!(store.current(), Locale::En);
        assert_eq!(storage.get(LANG_KEY).as_deref(), Some("en"));
    }
}
