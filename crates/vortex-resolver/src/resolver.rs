//! Environment resolution across the extension and core repositories.
//!
//! The request label selects what is queried:
//!
//! - absent: the extension repository at `main`
//! - `<branch>`: the extension repository at that branch
//! - `<extension>:<core>`: both repositories, merged with extension first
//!
//! Resolution never fails towards the caller. Any error is logged and
//! answered with the fallback chain: both repositories at `main:main`,
//! then core alone at `main`, then an empty environment.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use vortex_core::{
    Application, BranchPair, DEFAULT_BRANCH, Environment, ExtensionFirst, Label, LabelSpec,
    MergePolicy, Profile, Result, VortexError,
};
use vortex_sources::{ProviderFactory, ProviderPool, SourceReferences, SourceRole};

use crate::settings::Settings;
use crate::telemetry;

/// How a resolution was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The request was served as asked.
    Resolved,
    /// Served by merging both repositories at `main:main`.
    FallbackComposite,
    /// Served by the core repository alone at `main`.
    FallbackCore,
    /// Nothing could be read; an empty environment was returned.
    DegradedEmpty,
}

impl ResolutionOutcome {
    /// Metric label of the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resolved => "resolved",
            Self::FallbackComposite => "fallback_composite",
            Self::FallbackCore => "fallback_core",
            Self::DegradedEmpty => "degraded_empty",
        }
    }

    /// Returns true unless the request was served as asked.
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        !matches!(self, Self::Resolved)
    }
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`EnvironmentResolver::resolve_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The environment handed to the caller.
    pub environment: Environment,
    /// How it was obtained.
    pub outcome: ResolutionOutcome,
}

impl Resolution {
    const fn new(environment: Environment, outcome: ResolutionOutcome) -> Self {
        Self {
            environment,
            outcome,
        }
    }
}

/// Resolves environments from the extension and core repositories.
///
/// Holds no per-request state; a single instance can serve concurrent
/// requests.
pub struct EnvironmentResolver {
    sources: SourceReferences,
    pool: ProviderPool,
    merge_policy: Arc<dyn MergePolicy>,
}

impl EnvironmentResolver {
    /// Creates a resolver over the given repositories and provider pool.
    #[must_use]
    pub fn new(sources: SourceReferences, pool: ProviderPool) -> Self {
        Self {
            sources,
            pool,
            merge_policy: Arc::new(ExtensionFirst),
        }
    }

    /// Creates a resolver from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &Settings, factory: Arc<dyn ProviderFactory>) -> Self {
        Self::new(
            settings.source_references(),
            ProviderPool::new(factory, settings.provisioning_policy()),
        )
    }

    /// Replaces the merge policy used for branch pairs.
    #[must_use]
    pub fn with_merge_policy(mut self, policy: impl MergePolicy + 'static) -> Self {
        self.merge_policy = Arc::new(policy);
        self
    }

    /// The configured repositories.
    #[must_use]
    pub const fn sources(&self) -> &SourceReferences {
        &self.sources
    }

    /// Resolves the environment for a request. Never fails.
    pub async fn resolve(
        &self,
        application: &str,
        profile: &str,
        label: Option<&str>,
    ) -> Environment {
        self.resolve_detailed(application, profile, label)
            .await
            .environment
    }

    /// Resolves the environment for a request and reports how it was served.
    #[instrument(name = "resolve", skip(self))]
    pub async fn resolve_detailed(
        &self,
        application: &str,
        profile: &str,
        label: Option<&str>,
    ) -> Resolution {
        let application = Application::new(application);
        let profile = Profile::new(profile);

        match self.try_resolve(&application, &profile, label).await {
            Ok(environment) => {
                telemetry::record_outcome(ResolutionOutcome::Resolved);
                Resolution::new(environment, ResolutionOutcome::Resolved)
            }
            Err(err) => {
                telemetry::record_error(&err);
                if err.is_invalid_label() {
                    warn!(
                        application = %application,
                        profile = %profile,
                        label = ?label,
                        error = %err,
                        "Rejected label, falling back to main:main"
                    );
                } else {
                    error!(
                        application = %application,
                        profile = %profile,
                        label = ?label,
                        error = %err,
                        "Error finding environment, falling back to main:main"
                    );
                }
                self.fallback(&application, &profile).await
            }
        }
    }

    /// Resolves a request without the fallback chain.
    ///
    /// # Errors
    ///
    /// Returns [`VortexError::InvalidLabel`] for a malformed branch pair,
    /// [`VortexError::CompositeFailed`] when one side of a branch pair
    /// fails, or the provider's error for single-repository lookups.
    pub async fn try_resolve(
        &self,
        application: &Application,
        profile: &Profile,
        label: Option<&str>,
    ) -> Result<Environment> {
        let spec = LabelSpec::parse(label)?;
        debug!(spec = %spec, "Classified label");

        match spec {
            LabelSpec::Default => {
                let branch = Label::new(DEFAULT_BRANCH);
                self.find(SourceRole::Extension, application, profile, &branch)
                    .await
            }
            LabelSpec::Branch(branch) => {
                self.find(SourceRole::Extension, application, profile, &branch)
                    .await
            }
            LabelSpec::BranchPair(pair) => self.resolve_pair(application, profile, &pair).await,
        }
    }

    /// Queries both repositories concurrently and merges the results.
    ///
    /// Both lookups are awaited; there is no partial merge.
    ///
    /// # Errors
    ///
    /// Returns [`VortexError::CompositeFailed`] for the first failing side.
    pub async fn resolve_pair(
        &self,
        application: &Application,
        profile: &Profile,
        pair: &BranchPair,
    ) -> Result<Environment> {
        let (extension, core) = tokio::join!(
            self.find(SourceRole::Extension, application, profile, pair.extension()),
            self.find(SourceRole::Core, application, profile, pair.core()),
        );

        match (extension, core) {
            (Ok(extension), Ok(core)) => {
                debug!(
                    extension_sources = extension.property_sources().len(),
                    core_sources = core.property_sources().len(),
                    "Merging environments"
                );
                Ok(self.merge_policy.merge(extension, core, application, profile))
            }
            (Err(err), Ok(_)) => Err(VortexError::composite_failed(
                SourceRole::Extension.as_str(),
                pair.extension().as_str(),
                err,
            )),
            (Ok(_), Err(err)) => Err(VortexError::composite_failed(
                SourceRole::Core.as_str(),
                pair.core().as_str(),
                err,
            )),
            (Err(extension_err), Err(core_err)) => {
                error!(
                    core_branch = %pair.core(),
                    error = %core_err,
                    "Core lookup failed as well"
                );
                Err(VortexError::composite_failed(
                    SourceRole::Extension.as_str(),
                    pair.extension().as_str(),
                    extension_err,
                ))
            }
        }
    }

    async fn find(
        &self,
        role: SourceRole,
        application: &Application,
        profile: &Profile,
        branch: &Label,
    ) -> Result<Environment> {
        let reference = self.sources.get(role);
        let provider = self.pool.acquire(reference, branch).await?;
        provider.find(application, profile, branch).await
    }

    async fn fallback(&self, application: &Application, profile: &Profile) -> Resolution {
        let main = BranchPair::main();

        match self.resolve_pair(application, profile, &main).await {
            Ok(environment) => {
                info!(application = %application, profile = %profile, "Served main:main fallback");
                telemetry::record_outcome(ResolutionOutcome::FallbackComposite);
                return Resolution::new(environment, ResolutionOutcome::FallbackComposite);
            }
            Err(err) => {
                telemetry::record_error(&err);
                error!(
                    application = %application,
                    profile = %profile,
                    error = %err,
                    "Failed to create main:main composite, trying core only"
                );
            }
        }

        match self
            .find(SourceRole::Core, application, profile, main.core())
            .await
        {
            Ok(environment) => {
                warn!(application = %application, profile = %profile, "Serving core properties only");
                telemetry::record_outcome(ResolutionOutcome::FallbackCore);
                return Resolution::new(environment, ResolutionOutcome::FallbackCore);
            }
            Err(err) => {
                telemetry::record_error(&err);
                error!(
                    application = %application,
                    profile = %profile,
                    error = %err,
                    "Core repository unavailable, returning empty environment"
                );
            }
        }

        telemetry::record_outcome(ResolutionOutcome::DegradedEmpty);
        Resolution::new(
            Environment::empty(application, profile, &Label::new(DEFAULT_BRANCH)),
            ResolutionOutcome::DegradedEmpty,
        )
    }
}

impl fmt::Debug for EnvironmentResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentResolver")
            .field("sources", &self.sources)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
