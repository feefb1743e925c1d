//! Provisioning policy for source providers.
//!
//! Providers are bound to one repository and one branch. The pool decides
//! whether a provider is built for every lookup or reused across requests.

use moka::future::Cache;
use std::sync::Arc;
use tracing::debug;
use vortex_core::{Label, Result};

use crate::provider::{ProviderFactory, ProviderSettings, SourceProvider};
use crate::reference::{SourceReference, SourceRole};

/// When providers are constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProvisioningPolicy {
    /// Build a fresh provider for every acquisition.
    #[default]
    PerRequest,
    /// Reuse providers keyed by repository and branch, evicting the least
    /// recently used beyond `max_capacity`.
    Cached {
        /// Maximum number of providers kept alive.
        max_capacity: u64,
    },
}

impl ProvisioningPolicy {
    /// Maps a capacity setting to a policy; zero disables caching.
    #[must_use]
    pub const fn from_capacity(max_capacity: u64) -> Self {
        if max_capacity == 0 {
            Self::PerRequest
        } else {
            Self::Cached { max_capacity }
        }
    }
}

/// Cache key of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderKey {
    /// Repository role.
    pub role: SourceRole,
    /// Repository URI.
    pub uri: String,
    /// Branch the provider is bound to.
    pub branch: Label,
}

impl ProviderKey {
    /// Builds the key for `reference` at `branch`.
    #[must_use]
    pub fn new(reference: &SourceReference, branch: &Label) -> Self {
        Self {
            role: reference.role(),
            uri: reference.uri().to_string(),
            branch: branch.clone(),
        }
    }
}

/// Hands out providers according to a [`ProvisioningPolicy`].
///
/// Safe to share between concurrent requests.
pub struct ProviderPool {
    factory: Arc<dyn ProviderFactory>,
    policy: ProvisioningPolicy,
    cache: Option<Cache<ProviderKey, Arc<dyn SourceProvider>>>,
}

impl ProviderPool {
    /// Creates a pool over `factory`.
    #[must_use]
    pub fn new(factory: Arc<dyn ProviderFactory>, policy: ProvisioningPolicy) -> Self {
        let cache = match policy {
            ProvisioningPolicy::PerRequest => None,
            ProvisioningPolicy::Cached { max_capacity } => {
                Some(Cache::builder().max_capacity(max_capacity).build())
            }
        };

        Self {
            factory,
            policy,
            cache,
        }
    }

    /// The active policy.
    #[must_use]
    pub const fn policy(&self) -> ProvisioningPolicy {
        self.policy
    }

    /// Returns a provider for `reference` bound to `branch`.
    ///
    /// Failed constructions are never cached.
    ///
    /// # Errors
    ///
    /// Propagates the factory's error.
    pub async fn acquire(
        &self,
        reference: &SourceReference,
        branch: &Label,
    ) -> Result<Arc<dyn SourceProvider>> {
        let settings = ProviderSettings::for_branch(reference, branch);

        let Some(cache) = &self.cache else {
            return self.factory.create(settings);
        };

        let key = ProviderKey::new(reference, branch);
        if let Some(provider) = cache.get(&key).await {
            debug!(role = %key.role, branch = %key.branch, "Reusing cached provider");
            return Ok(provider);
        }

        let provider = self.factory.create(settings)?;
        cache.insert(key, Arc::clone(&provider)).await;
        Ok(provider)
    }

    /// Drops every cached provider.
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }
}

impl std::fmt::Debug for ProviderPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderPool")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
