//! Store availability probing.
//!
//! An [`AvailabilityProber`] answers whether an extension is still listed.
//! A probe that cannot decide returns an error, which callers turn into
//! [`Availability::Indeterminate`] with [`Availability::from_probe`].

mod gate;
mod store;

pub use gate::IntervalGate;
pub use store::{
    WebStoreProber, WebStoreProberBuilder, DEFAULT_DETAIL_PREFIXES, DEFAULT_PROBE_DELAY,
    DEFAULT_STORE_URL, DEFAULT_TIMEOUT,
};

use crate::error::ProbeError;
use crate::model::{Availability, ExtensionId};
use async_trait::async_trait;
use tracing::warn;

#[async_trait]
pub trait AvailabilityProber: Send + Sync {
    fn name(&self) -> &'static str;

    /// Checks one extension.
    ///
    /// # Errors
    ///
    /// Returns an error when no conclusive answer was obtained (timeout,
    /// transport failure, unexpected response).
    async fn probe(&self, id: &ExtensionId) -> Result<Availability, ProbeError>;
}

/// Prober used when availability checks are turned off.
pub struct OfflineProber;

#[async_trait]
impl AvailabilityProber for OfflineProber {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn probe(&self, _id: &ExtensionId) -> Result<Availability, ProbeError> {
        Err(ProbeError::Skipped)
    }
}

impl Availability {
    /// Collapses a probe outcome. Failures become `Indeterminate`, never
    /// `Unavailable`.
    pub fn from_probe(id: &ExtensionId, result: Result<Availability, ProbeError>) -> Self {
        match result {
            Ok(availability) => availability,
            Err(ProbeError::Skipped) => Availability::Indeterminate,
            Err(err) => {
                warn!(%id, "store availability unknown: {}", err);
                Availability::Indeterminate
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> ExtensionId {
        ExtensionId::parse("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap()
    }

    #[test]
    fn test_from_probe() {
        assert_eq!(
            Availability::from_probe(&id(), Ok(Availability::Unavailable)),
            Availability::Unavailable
        );
        assert_eq!(
            Availability::from_probe(&id(), Err(ProbeError::Timeout)),
            Availability::Indeterminate
        );
        assert_eq!(
            Availability::from_probe(&id(), Err(ProbeError::UnexpectedStatus(500))),
            Availability::Indeterminate
        );
    }

    #[tokio::test]
    async fn test_offline_prober_is_indeterminate() {
        let result = OfflineProber.probe(&id()).await;
        assert!(matches!(result, Err(ProbeError::Skipped)));
        assert_eq!(
            Availability::from_probe(&id(), result),
            Availability::Indeterminate
        );
    }
}
