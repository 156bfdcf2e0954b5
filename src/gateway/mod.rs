//! Data gateway: the single access point for portfolio records.
//!
//! Reads go through a [`RequestCache`], so concurrent requests for the same
//! record share one fetch and successful results are memoized until
//! invalidated (on locale change, or explicitly). A read whose transport
//! fails is answered with a static fixture after a short simulated delay,
//! unless fixture fallback is disabled in [`FixtureConfig`].
//!
//! Submissions (contact form, newsletter) are never cached.

pub mod envelope;
pub mod resource;
pub mod transport;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, RequestCache, SharedValue};
use crate::config::{Config, FixtureConfig};
use crate::error::{FolioError, Result};
use crate::fixtures::{
    self, CONTACT_FAILURE_MESSAGE, CONTACT_SUCCESS_MESSAGE, NEWSLETTER_SUCCESS_MESSAGE,
};
use crate::i18n::LocaleStore;
use crate::models::{
    is_plausible_email, AboutInfo, ContactForm, ContactInfo, Education, Experience, PersonalInfo,
    Project, Receipt, SocialLink,
};
use crate::storage::{ClientStorage, TOKEN_KEY};

pub use envelope::unwrap_envelope;
pub use resource::Resource;
pub use transport::{ApiTransport, HttpTransport, OfflineTransport, RequestContext};

const CONTACT_PATH: &str = "/contact";
const NEWSLETTER_PATH: &str = "/newsletter/subscribe";
const CONTACT_FIXTURE_DELAY: Duration = Duration::from_millis(1000);
const NEWSLETTER_FIXTURE_DELAY: Duration = Duration::from_millis(800);

/// Single access point for portfolio records and submissions.
///
/// Construct once per session and share it (`Arc<DataGateway>`).
pub struct DataGateway {
    transport: Arc<dyn ApiTransport>,
    storage: Arc<ClientStorage>,
    locale: LocaleStore,
    fixtures: FixtureConfig,
    cache: RequestCache,
}

impl DataGateway {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        storage: Arc<ClientStorage>,
        fixtures: FixtureConfig,
    ) -> Self {
        Self {
            transport,
            locale: LocaleStore::new(Arc::clone(&storage)),
            storage,
            fixtures,
            cache: RequestCache::new(),
        }
    }

    /// Build an HTTP-backed gateway from configuration.
    pub fn from_config(config: &Config, storage: Arc<ClientStorage>) -> Result<Self> {
        let transport = HttpTransport::from_config(&config.api)?;
        Ok(Self::new(
            Arc::new(transport),
            storage,
            config.fixtures.clone(),
        ))
    }

    /// Resolve `key` through the request cache.
    ///
    /// Joins an in-flight fetch for `key`, else returns the cached value,
    /// else calls `fetch` once. Failures reach every joined caller and are
    /// not cached.
    pub async fn resolve<F, Fut>(&self, key: &str, fetch: F) -> Result<SharedValue>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.cache.resolve(key, fetch).await
    }

    /// Resolve a well-known resource, falling back to its fixture on transport failure.
    pub async fn resolve_resource(&self, resource: Resource) -> Result<SharedValue> {
        self.resolve(resource.key(), || self.resource_fetch(resource))
            .await
    }

    /// Drop cached and in-flight state for `key`, or for everything.
    pub fn invalidate(&self, key: Option<&str>) {
        self.cache.invalidate(key);
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn transport_type(&self) -> &str {
        self.transport.transport_type()
    }

    /// Current locale and bearer token, read from client storage.
    pub fn request_context(&self) -> RequestContext {
        RequestContext {
            locale: self.locale.current(),
            token: self.storage.get(TOKEN_KEY),
        }
    }

    // ========================================================================
    // Typed reads
    // ========================================================================

    pub async fn personal_info(&self) -> Result<PersonalInfo> {
        self.typed(Resource::PersonalInfo).await
    }

    pub async fn about_info(&self) -> Result<AboutInfo> {
        self.typed(Resource::AboutInfo).await
    }

    pub async fn experiences(&self) -> Result<Vec<Experience>> {
        self.typed(Resource::Experiences).await
    }

    pub async fn education(&self) -> Result<Vec<Education>> {
        self.typed(Resource::Education).await
    }

    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.typed(Resource::Projects).await
    }

    pub async fn featured_projects(&self) -> Result<Vec<Project>> {
        self.typed(Resource::FeaturedProjects).await
    }

    pub async fn social_links(&self) -> Result<Vec<SocialLink>> {
        self.typed(Resource::SocialLinks).await
    }

    pub async fn contact_info(&self) -> Result<ContactInfo> {
        self.typed(Resource::ContactInfo).await
    }

    // ========================================================================
    // Submissions
    // ========================================================================

    /// Send the contact form.
    ///
    /// When the API is unreachable and fixture fallback is on, the outcome
    /// is simulated: success with probability `simulated_success_rate`,
    /// otherwise a `Submission` error. This is demo behavior, not a
    /// delivery guarantee.
    pub async fn submit_contact_form(&self, form: &ContactForm) -> Result<Receipt> {
        form.validate()?;
        let body = serde_json::to_value(form)?;

        match self.post(CONTACT_PATH, &body).await {
            Ok(value) => decode_receipt(CONTACT_PATH, &value),
            Err(FolioError::Transport(reason)) if self.fixtures.enabled => {
                warn!(reason = %reason, "Contact submission failed, simulating outcome");
                tokio::time::sleep(self.fixtures.delay_or(CONTACT_FIXTURE_DELAY)).await;
                debug!(name = %form.name, email = %form.email, subject = %form.subject, "Contact form captured");
                if fastrand::f64() < self.fixtures.simulated_success_rate {
                    Ok(Receipt {
                        message: CONTACT_SUCCESS_MESSAGE.to_string(),
                    })
                } else {
                    Err(FolioError::Submission(CONTACT_FAILURE_MESSAGE.to_string()))
                }
            }
            Err(FolioError::Transport(reason)) => {
                warn!(reason = %reason, "Contact submission failed");
                Err(FolioError::Submission(CONTACT_FAILURE_MESSAGE.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Subscribe `email` to the newsletter. Simulated failures always succeed.
    pub async fn subscribe_newsletter(&self, email: &str) -> Result<Receipt> {
        let email = email.trim();
        if !is_plausible_email(email) {
            return Err(FolioError::Validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        let body = serde_json::json!({ "email": email });

        match self.post(NEWSLETTER_PATH, &body).await {
            Ok(value) => decode_receipt(NEWSLETTER_PATH, &value),
            Err(FolioError::Transport(reason)) if self.fixtures.enabled => {
                warn!(reason = %reason, "Newsletter subscription failed, simulating success");
                tokio::time::sleep(self.fixtures.delay_or(NEWSLETTER_FIXTURE_DELAY)).await;
                info!(email, "Newsletter subscription captured");
                Ok(Receipt {
                    message: NEWSLETTER_SUCCESS_MESSAGE.to_string(),
                })
            }
            Err(FolioError::Transport(reason)) => Err(FolioError::Submission(format!(
                "Failed to subscribe: {}",
                reason
            ))),
            Err(e) => Err(e),
        }
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    /// Build the fetch future for `resource`. Context is captured now, at request time.
    fn resource_fetch(
        &self,
        resource: Resource,
    ) -> impl Future<Output = Result<Value>> + Send + 'static {
        let transport = Arc::clone(&self.transport);
        let ctx = self.request_context();
        let fixtures = self.fixtures.clone();

        async move {
            let fetched = transport
                .get(resource.path(), &ctx)
                .await
                .and_then(unwrap_envelope);
            match fetched {
                Ok(value) => Ok(value),
                Err(FolioError::Transport(reason)) if fixtures.enabled => {
                    warn!(
                        key = resource.key(),
                        reason = %reason,
                        "API call failed, serving fixture"
                    );
                    tokio::time::sleep(fixtures.delay_or(resource.fixture_delay())).await;
                    fixtures::fixture(resource)
                }
                Err(e) => Err(e),
            }
        }
    }

    async fn typed<T: DeserializeOwned>(&self, resource: Resource) -> Result<T> {
        let value = self.resolve_resource(resource).await?;
        decode(resource.key(), &value)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let ctx = self.request_context();
        self.transport
            .post(path, body, &ctx)
            .await
            .and_then(unwrap_envelope)
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T> {
    T::deserialize(value)
        .map_err(|e| FolioError::Decode(format!("'{}' payload has unexpected shape: {}", key, e)))
}

/// A submission reply without a usable `message` is a failed submission.
fn decode_receipt(path: &str, value: &Value) -> Result<Receipt> {
    Receipt::deserialize(value)
        .map_err(|e| FolioError::Submission(format!("Unexpected reply from {}: {}", path, e)))
}
