use super::gate::IntervalGate;
use crate::error::ProbeError;
use crate::model::{Availability, ExtensionId};
use async_trait::async_trait;
use reqwest::{header::LOCATION, redirect, StatusCode};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_STORE_URL: &str = "https://chrome.google.com";

/// Listing URLs the store redirects to when an extension is published.
pub const DEFAULT_DETAIL_PREFIXES: &[&str] = &[
    "https://chrome.google.com/webstore/detail/",
    "https://chromewebstore.google.com/detail/",
];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_PROBE_DELAY: Duration = Duration::from_millis(50);

/// Checks listings on the Chrome Web Store with anonymous HEAD requests.
///
/// A published extension answers `301` to its canonical
/// `<prefix><slug>/<id>` page, a removed one answers `404`. Anything else is
/// inconclusive.
pub struct WebStoreProber {
    client: reqwest::Client,
    base_url: String,
    detail_prefixes: Vec<String>,
    gate: IntervalGate,
}

impl WebStoreProber {
    pub fn new() -> Result<Self, ProbeError> {
        Self::builder().build()
    }

    pub fn builder() -> WebStoreProberBuilder {
        WebStoreProberBuilder::default()
    }

    pub fn detail_url(&self, id: &ExtensionId) -> String {
        format!("{}/webstore/detail/{}", self.base_url, id)
    }

    /// True if `location` is `<prefix><slug>/<id>` for exactly `id`, with a
    /// single non-empty slug segment.
    pub fn is_listing_location(&self, id: &ExtensionId, location: &str) -> bool {
        self.detail_prefixes.iter().any(|prefix| {
            location
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.rsplit_once('/'))
                .is_some_and(|(slug, tail)| {
                    tail == id.as_str() && !slug.is_empty() && !slug.contains('/')
                })
        })
    }

    async fn request(&self, id: &ExtensionId) -> Result<Availability, ProbeError> {
        let response = self.client.head(self.detail_url(id)).send().await?;
        let status = response.status();

        match status {
            StatusCode::MOVED_PERMANENTLY => {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                if location
                    .as_deref()
                    .is_some_and(|loc| self.is_listing_location(id, loc))
                {
                    Ok(Availability::Available)
                } else {
                    Err(ProbeError::RedirectMismatch(location))
                }
            }
            StatusCode::NOT_FOUND => Ok(Availability::Unavailable),
            other => Err(ProbeError::UnexpectedStatus(other.as_u16())),
        }
    }
}

#[async_trait]
impl super::AvailabilityProber for WebStoreProber {
    fn name(&self) -> &'static str {
        "Chrome Web Store"
    }

    async fn probe(&self, id: &ExtensionId) -> Result<Availability, ProbeError> {
        self.gate.wait().await;
        let result = self.request(id).await;
        self.gate.complete();

        debug!(%id, ?result, "store probe");
        result
    }
}

pub struct WebStoreProberBuilder {
    base_url: String,
    detail_prefixes: Vec<String>,
    timeout: Duration,
    delay: Duration,
}

impl Default for WebStoreProberBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STORE_URL.to_string(),
            detail_prefixes: DEFAULT_DETAIL_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout: DEFAULT_TIMEOUT,
            delay: DEFAULT_PROBE_DELAY,
        }
    }
}

impl WebStoreProberBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn detail_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.detail_prefixes = prefixes;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pause between consecutive requests.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn build(self) -> Result<WebStoreProber, ProbeError> {
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(self.timeout)
            .build()
            .map_err(ProbeError::Transport)?;

        Ok(WebStoreProber {
            client,
            base_url: self.base_url,
            detail_prefixes: self.detail_prefixes,
            gate: IntervalGate::new(self.delay),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::AvailabilityProber;

    const ID: &str = "cjpalhdlnbpafiamejdnhcphjbkeiagm";

    fn id() -> ExtensionId {
        ExtensionId::parse(ID).unwrap()
    }

    #[test]
    fn test_detail_url() {
        let prober = WebStoreProber::new().unwrap();
        assert_eq!(
            prober.detail_url(&id()),
            format!("https://chrome.google.com/webstore/detail/{}", ID)
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let prober = WebStoreProber::builder()
            .base_url("http://127.0.0.1:8080/")
            .build()
            .unwrap();
        assert_eq!(
            prober.detail_url(&id()),
            format!("http://127.0.0.1:8080/webstore/detail/{}", ID)
        );
    }

    #[test]
    fn test_listing_location_matches() {
        let prober = WebStoreProber::new().unwrap();
        assert!(prober.is_listing_location(
            &id(),
            &format!("https://chrome.google.com/webstore/detail/ublock-origin/{}", ID)
        ));
        assert!(prober.is_listing_location(
            &id(),
            &format!("https://chromewebstore.google.com/detail/ublock-origin/{}", ID)
        ));
    }

    #[test]
    fn test_listing_location_rejects_other_targets() {
        let prober = WebStoreProber::new().unwrap();
        // No slug
        assert!(!prober.is_listing_location(
            &id(),
            &format!("https://chrome.google.com/webstore/detail/{}", ID)
        ));
        // Different id
        assert!(!prober.is_listing_location(
            &id(),
            &format!("https://chrome.google.com/webstore/detail/x/{}", "a".repeat(32))
        ));
        // Id as a prefix of the last segment
        assert!(!prober.is_listing_location(
            &id(),
            &format!("https://chrome.google.com/webstore/detail/x/{}extra", ID)
        ));
        // Extra path segments
        assert!(!prober.is_listing_location(
            &id(),
            &format!("https://chromewebstore.google.com/detail/a/b/{}", ID)
        ));
        // Empty slug
        assert!(!prober.is_listing_location(
            &id(),
            &format!("https://chromewebstore.google.com/detail//{}", ID)
        ));
        // Store front page
        assert!(!prober.is_listing_location(&id(), "https://chrome.google.com/webstore/"));
        // Lookalike host
        assert!(!prober.is_listing_location(
            &id(),
            &format!("https://chrome.google.com.evil.test/webstore/detail/x/{}", ID)
        ));
    }

    #[test]
    fn test_prober_name() {
        let prober = WebStoreProber::new().unwrap();
        assert_eq!(prober.name(), "Chrome Web Store");
    }
}
