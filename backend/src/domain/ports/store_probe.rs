//! Readiness probe for the backing store.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failure reported by a store probe.
    pub enum StoreProbeError {
        /// The store did not answer.
        Unreachable { message: String } => "store unreachable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreProbe: Send + Sync {
    /// Issue a trivial round trip to the store.
    async fn ping(&self) -> Result<(), StoreProbeError>;
}

/// Probe that always succeeds, for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStoreProbe;

#[async_trait]
impl StoreProbe for FixtureStoreProbe {
    async fn ping(&self) -> Result<(), StoreProbeError> {
        Ok(())
    }
}
