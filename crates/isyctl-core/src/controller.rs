// ── Controller facade ──
//
// Ties one REST client to one registry. This is the surface a front end
// talks to: resolve a name, then drive the returned entity.

use std::sync::Arc;

use tracing::info;

use isyctl_api::RestClient;

use crate::config::{ConnectionDescriptor, SeedRecord};
use crate::discovery::{self, DiscoveryReport};
use crate::entity::Entity;
use crate::error::CoreError;
use crate::model::EntityRecord;
use crate::registry::Registry;

/// Entry point for consumers.
///
/// Cheaply cloneable; clones share the registry.
#[derive(Debug, Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

#[derive(Debug)]
struct ControllerInner {
    client: RestClient,
    registry: Registry,
}

impl Controller {
    /// Build the client from `descriptor` and seed the registry. Does not
    /// contact the controller.
    pub fn new(descriptor: &ConnectionDescriptor, seed: &[SeedRecord]) -> Result<Self, CoreError> {
        let client = RestClient::new(
            descriptor.base_url.clone(),
            descriptor.username.clone(),
            descriptor.password.clone(),
            &descriptor.transport(),
        )?;
        Ok(Self::with_client(client, seed))
    }

    /// Wrap an existing client (tests, custom transports).
    pub fn with_client(client: RestClient, seed: &[SeedRecord]) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                client,
                registry: Registry::new(seed),
            }),
        }
    }

    pub fn client(&self) -> &RestClient {
        &self.inner.client
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Resolve free text to an entity handle.
    pub fn resolve(&self, name: &str) -> Result<Entity, CoreError> {
        self.inner.registry.resolve(name, &self.inner.client)
    }

    /// Register one entity manually.
    pub fn add(
        &self,
        name: &str,
        address: &str,
        dimmable: bool,
    ) -> Result<Arc<EntityRecord>, CoreError> {
        let record = self.inner.registry.add(name, address, dimmable)?;
        info!(%record, "registered");
        Ok(record)
    }

    /// Pull the controller topology and register everything new.
    pub async fn discover(&self) -> Result<DiscoveryReport, CoreError> {
        let report = discovery::discover(&self.inner.client, &self.inner.registry).await?;
        info!(
            added = report.added.len(),
            skipped = report.skipped,
            total = self.inner.registry.len(),
            "discovery complete"
        );
        Ok(report)
    }
}
