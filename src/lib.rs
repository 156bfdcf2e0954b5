//! folio: data gateway for a personal portfolio site.
//!
//! Fetches portfolio records (personal info, about, experience, education,
//! projects, social links, contact details) from a JSON API, de-duplicating
//! concurrent requests, memoizing results until the locale changes, and
//! falling back to static fixtures when the API is unreachable.
//!
//! ```no_run
//! use std::sync::Arc;
//! use folio::{ClientStorage, Config, DataGateway};
//!
//! # async fn run() -> folio::Result<()> {
//! let config = Config::load()?;
//! let storage = Arc::new(ClientStorage::open(config.storage.resolved_path()));
//! let gateway = DataGateway::from_config(&config, storage)?;
//! for project in gateway.featured_projects().await? {
//!     println!("{}", project.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod experience;
pub mod fixtures;
pub mod gateway;
pub mod i18n;
pub mod models;
pub mod storage;

pub use cache::{CacheStats, RequestCache, SharedValue};
pub use config::Config;
pub use error::{FolioError, Result};
pub use experience::ExperienceTabs;
pub use gateway::{ApiTransport, DataGateway, HttpTransport, OfflineTransport, Resource};
pub use i18n::{Locale, LocaleStore, LocaleSwitcher, LocaleWatcher};
pub use storage::ClientStorage;
