//! Vortex Sources - Source provider port
//!
//! A source provider materializes an [`Environment`](vortex_core::Environment)
//! from one version-controlled configuration repository at a given branch.
//! This crate defines that capability, the references to the repositories,
//! the search paths used inside them and the policy deciding when providers
//! are constructed.

mod memory;
mod pool;
mod provider;
mod reference;
mod search_path;

pub use memory::{MemoryProvider, MemoryProviderFactory};
pub use pool::{ProviderKey, ProviderPool, ProvisioningPolicy};
pub use provider::{ProviderFactory, ProviderSettings, SourceProvider};
pub use reference::{Credentials, SourceReference, SourceReferences, SourceRole};
pub use search_path::{DEFAULT_SEARCH_PATHS, SearchPath};
