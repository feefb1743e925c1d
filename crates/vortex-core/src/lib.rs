//! Vortex Core - Domain types and traits
//!
//! This crate provides the foundational types for the Vortex Config server.
//!
//! # Key Types
//!
//! - [`Environment`]: Resolved configuration for an application/profile/label
//! - [`PropertySource`]: Configuration from a single source
//! - [`Application`], [`Profile`], [`Label`]: Identifiers for configuration
//! - [`LabelSpec`], [`BranchPair`]: Parsed form of the request label
//! - [`MergePolicy`]: Precedence rule for combining two environments
//! - [`VortexError`]: Main error type
//! - [`Result`]: Type alias for `Result<T, VortexError>`

mod config;
mod error;
mod label;
pub mod merge;
mod types;
mod value;

// Re-export public types
pub use config::{Environment, EnvironmentBuilder, PropertySource, PropertySourceBuilder};
pub use error::{Result, VortexError};
pub use label::{BranchPair, DEFAULT_BRANCH, LabelSpec};
pub use merge::{ExtensionFirst, MergePolicy};
pub use types::{Application, Label, Profile};
pub use value::ConfigValue;

/// Returns the crate version.
#[must_use]
pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_defined() {
        assert!(!version().is_empty());
    }

    #[test]
    fn version_is_semver() {
        let v = version();
        assert_eq!(v.split('.').count(), 3, "Version should be semver");
    }
}
