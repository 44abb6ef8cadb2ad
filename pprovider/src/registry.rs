//! Priority-ranked provider registry used to assemble the active adapter list.
//!
//! ```rust
//! use pprovider::ProviderRegistry;
//!
//! let registry = ProviderRegistry::new();
//! assert!(registry.is_empty());
//! assert!(registry.active().is_empty());
//! ```

use std::sync::Arc;

use crate::{ModelProvider, ProviderId};

#[derive(Default)]
pub struct ProviderRegistry {
    entries: Vec<RegistryEntry>,
}

struct RegistryEntry {
    rank: u32,
    provider: Arc<dyn ModelProvider>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` at `rank` (lower ranks are tried first). A provider
    /// already registered under the same id is replaced.
    pub fn register<P>(&mut self, rank: u32, provider: P)
    where
        P: ModelProvider + 'static,
    {
        self.register_shared(rank, Arc::new(provider));
    }

    pub fn register_shared(&mut self, rank: u32, provider: Arc<dyn ModelProvider>) {
        let id = provider.id();
        self.entries.retain(|entry| entry.provider.id() != id);
        self.entries.push(RegistryEntry { rank, provider });
        // stable: equal ranks keep registration order
        self.entries.sort_by_key(|entry| entry.rank);
    }

    pub fn get(&self, provider_id: ProviderId) -> Option<Arc<dyn ModelProvider>> {
        self.entries
            .iter()
            .find(|entry| entry.provider.id() == provider_id)
            .map(|entry| Arc::clone(&entry.provider))
    }

    pub fn remove(&mut self, provider_id: ProviderId) -> Option<Arc<dyn ModelProvider>> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.provider.id() == provider_id)?;
        Some(self.entries.remove(index).provider)
    }

    pub fn contains(&self, provider_id: ProviderId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.provider.id() == provider_id)
    }

    /// Providers in priority order.
    pub fn active(&self) -> Vec<Arc<dyn ModelProvider>> {
        self.entries
            .iter()
            .map(|entry| Arc::clone(&entry.provider))
            .collect()
    }

    pub fn ids(&self) -> Vec<ProviderId> {
        self.entries.iter().map(|entry| entry.provider.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
