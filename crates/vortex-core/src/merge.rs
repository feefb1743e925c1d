//! Merging of environments resolved from different repositories.
//!
//! Precedence is encoded purely by property source order: the merge
//! concatenates and never drops or rewrites duplicate keys. Consumers
//! resolve a key by taking the first source that defines it.

use crate::config::Environment;
use crate::types::{Application, Profile};

/// Precedence rule for combining two environments into one.
pub trait MergePolicy: Send + Sync {
    /// Combines `primary` and `secondary` into a new environment for the
    /// requested application and profile.
    fn merge(
        &self,
        primary: Environment,
        secondary: Environment,
        application: &Application,
        profile: &Profile,
    ) -> Environment;
}

/// Extension sources override core sources.
///
/// The merged environment takes label, version and state from the
/// primary (extension) side and lists the primary's property sources
/// ahead of the secondary's, each side keeping its internal order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionFirst;

impl MergePolicy for ExtensionFirst {
    fn merge(
        &self,
        primary: Environment,
        secondary: Environment,
        application: &Application,
        profile: &Profile,
    ) -> Environment {
        let label = primary.label().cloned();
        let version = primary.version().map(str::to_owned);
        let state = primary.state().map(str::to_owned);

        let mut merged = Environment::new(application.clone(), vec![profile.clone()]);
        merged.set_metadata(label, version, state);
        merged.extend_property_sources(primary.into_property_sources());
        merged.extend_property_sources(secondary.into_property_sources());
        merged
    }
}
