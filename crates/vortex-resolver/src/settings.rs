//! Resolver settings.
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! settings file, then environment variables. Variables keep the names
//! used by existing config-server deployments.

use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::Path;
use vortex_core::{Result, VortexError};
use vortex_sources::{
    Credentials, ProvisioningPolicy, SourceReference, SourceReferences, SourceRole,
};

/// Default extension (game-specific properties) repository.
pub const DEFAULT_EXTENSION_URI: &str = "https://github.com/AndreyRamanovsky/game-specific-properties";

/// Default core properties repository.
pub const DEFAULT_CORE_URI: &str = "https://github.com/AndreyRamanovsky/core-properties";

/// Environment variables and the settings keys they override.
const ENV_OVERRIDES: [(&str, &str); 7] = [
    ("extension.uri", "SPRING_CLOUD_CONFIG_SERVER_GIT_URI"),
    ("extension.username", "SPRING_CLOUD_CONFIG_SERVER_GIT_USERNAME"),
    ("extension.password", "SPRING_CLOUD_CONFIG_SERVER_GIT_PASSWORD"),
    ("core.uri", "SPRING_CLOUD_CONFIG_SERVER_PHOENIX_CORE_GIT_URI"),
    ("core.username", "SPRING_CLOUD_CONFIG_SERVER_PHOENIX_CORE_GIT_USERNAME"),
    ("core.password", "SPRING_CLOUD_CONFIG_SERVER_PHOENIX_CORE_GIT_PASSWORD"),
    ("provider_cache_capacity", "VORTEX_PROVIDER_CACHE_CAPACITY"),
];

/// Location and credentials of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositorySettings {
    /// Repository URI.
    pub uri: String,
    /// User name; empty or absent means anonymous access.
    #[serde(default)]
    pub username: Option<String>,
    /// Password or token.
    #[serde(default)]
    pub password: Option<String>,
}

impl RepositorySettings {
    fn reference(&self, role: SourceRole) -> SourceReference {
        SourceReference::new(role, self.uri.clone()).with_credentials(Credentials::from_parts(
            self.username.clone(),
            self.password.clone(),
        ))
    }
}

/// Settings of the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Extension repository.
    pub extension: RepositorySettings,
    /// Core repository.
    pub core: RepositorySettings,
    /// Number of providers kept alive; zero builds one per lookup.
    #[serde(default)]
    pub provider_cache_capacity: u64,
}

impl Settings {
    /// Loads settings from the process environment only.
    ///
    /// # Errors
    ///
    /// Returns [`VortexError::Configuration`] if a value cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::load(None, |name| std::env::var(name).ok())
    }

    /// Loads settings from defaults, an optional file and a variable lookup.
    ///
    /// Blank variables are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`VortexError::Configuration`] if the file cannot be read or a
    /// value cannot be parsed.
    pub fn load(file: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Self::build(file, lookup).map_err(|e| VortexError::Configuration(e.to_string()))
    }

    fn build(
        file: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("extension.uri", DEFAULT_EXTENSION_URI)?
            .set_default("core.uri", DEFAULT_CORE_URI)?
            .set_default("provider_cache_capacity", 0_i64)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        for (key, variable) in ENV_OVERRIDES {
            let value = lookup(variable).filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// The two repository references.
    #[must_use]
    pub fn source_references(&self) -> SourceReferences {
        SourceReferences {
            extension: self.extension.reference(SourceRole::Extension),
            core: self.core.reference(SourceRole::Core),
        }
    }

    /// Provider provisioning policy derived from the cache capacity.
    #[must_use]
    pub const fn provisioning_policy(&self) -> ProvisioningPolicy {
        ProvisioningPolicy::from_capacity(self.provider_cache_capacity)
    }
}
