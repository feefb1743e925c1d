//! Vortex Resolver - Environment resolution engine
//!
//! Answers `(application, profile, label)` requests from two configuration
//! repositories: an extension repository holding game-specific properties
//! and a core repository holding shared defaults. The label selects one
//! repository branch or a `extension:core` branch pair; pairs are merged
//! with extension properties taking precedence.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vortex_core::PropertySource;
//! use vortex_resolver::{EnvironmentResolver, Settings};
//! use vortex_sources::MemoryProviderFactory;
//!
//! let settings = Settings::load(None, |_| None).unwrap();
//! let factory = MemoryProviderFactory::new().with_branch(
//!     settings.extension.uri.clone(),
//!     "main",
//!     vec![PropertySource::builder("shared/application.yml").property("a", "1").build()],
//! );
//! let resolver = EnvironmentResolver::from_settings(&settings, Arc::new(factory));
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let env = runtime.block_on(resolver.resolve("phoenix-web", "prod", None));
//! assert_eq!(env.property_sources().len(), 1);
//! ```

mod resolver;
pub mod settings;
pub mod telemetry;

pub use resolver::{EnvironmentResolver, Resolution, ResolutionOutcome};
pub use settings::{RepositorySettings, Settings};
