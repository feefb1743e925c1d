//! In-memory source provider.
//!
//! Serves pre-built property sources per repository and branch. Useful for
//! embedding fixed configuration and for exercising resolvers without
//! network access. Failures can be injected per branch or per repository.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use vortex_core::{
    Application, Environment, Label, Profile, PropertySource, Result, VortexError,
};

use crate::provider::{ProviderFactory, ProviderSettings, SourceProvider};
use crate::reference::SourceRole;

type BranchKey = (String, Label);

#[derive(Debug, Clone)]
struct Fixture {
    version: String,
    sources: Vec<PropertySource>,
}

#[derive(Debug, Default)]
struct MemoryState {
    branches: RwLock<HashMap<BranchKey, Fixture>>,
    failing: RwLock<HashSet<BranchKey>>,
    unreachable: RwLock<HashSet<String>>,
    lookups: Mutex<Vec<(SourceRole, Label)>>,
    created: AtomicUsize,
    revisions: AtomicUsize,
}

/// Factory producing [`MemoryProvider`]s over shared fixtures.
#[derive(Debug, Default, Clone)]
pub struct MemoryProviderFactory {
    state: Arc<MemoryState>,
}

impl MemoryProviderFactory {
    /// Creates a factory with no branches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a branch and returns the factory.
    #[must_use]
    pub fn with_branch(
        self,
        uri: impl Into<String>,
        branch: impl Into<Label>,
        sources: Vec<PropertySource>,
    ) -> Self {
        self.insert_branch(uri, branch, sources);
        self
    }

    /// Adds or replaces a branch. Each call produces a new revision.
    pub fn insert_branch(
        &self,
        uri: impl Into<String>,
        branch: impl Into<Label>,
        sources: Vec<PropertySource>,
    ) {
        let revision = self.state.revisions.fetch_add(1, Ordering::Relaxed) + 1;
        self.state.branches.write().insert(
            (uri.into(), branch.into()),
            Fixture {
                version: format!("r{revision}"),
                sources,
            },
        );
    }

    /// Makes lookups of `branch` in `uri` fail.
    pub fn fail_branch(&self, uri: impl Into<String>, branch: impl Into<Label>) {
        self.state.failing.write().insert((uri.into(), branch.into()));
    }

    /// Marks a repository as unreachable: providers for it cannot be built.
    pub fn set_unreachable(&self, uri: impl Into<String>, unreachable: bool) {
        let uri = uri.into();
        let mut set = self.state.unreachable.write();
        if unreachable {
            set.insert(uri);
        } else {
            set.remove(&uri);
        }
    }

    /// Number of providers built so far.
    #[must_use]
    pub fn created(&self) -> usize {
        self.state.created.load(Ordering::Relaxed)
    }

    /// Every lookup performed so far, in call order.
    #[must_use]
    pub fn lookups(&self) -> Vec<(SourceRole, Label)> {
        self.state.lookups.lock().clone()
    }
}

impl ProviderFactory for MemoryProviderFactory {
    fn create(&self, settings: ProviderSettings) -> Result<Arc<dyn SourceProvider>> {
        if settings.clone_on_start && self.state.unreachable.read().contains(&settings.uri) {
            return Err(VortexError::source_error(
                settings.uri,
                "repository unreachable",
            ));
        }

        self.state.created.fetch_add(1, Ordering::Relaxed);
        Ok(Arc::new(MemoryProvider {
            state: Arc::clone(&self.state),
            settings,
        }))
    }
}

/// Provider reading from a [`MemoryProviderFactory`]'s fixtures.
#[derive(Debug)]
pub struct MemoryProvider {
    state: Arc<MemoryState>,
    settings: ProviderSettings,
}

#[async_trait]
impl SourceProvider for MemoryProvider {
    async fn find(
        &self,
        application: &Application,
        profile: &Profile,
        label: &Label,
    ) -> Result<Environment> {
        let uri = &self.settings.uri;
        self.state
            .lookups
            .lock()
            .push((self.settings.role, label.clone()));

        if self.state.unreachable.read().contains(uri) {
            return Err(VortexError::source_error(uri.as_str(), "repository unreachable"));
        }

        let key = (uri.clone(), label.clone());
        if self.state.failing.read().contains(&key) {
            return Err(VortexError::source_error(
                uri.as_str(),
                format!("failed to fetch branch '{label}'"),
            ));
        }

        let fixture = self.state.branches.read().get(&key).cloned().ok_or_else(|| {
            VortexError::source_error(uri.as_str(), format!("no such branch '{label}'"))
        })?;

        Profile::split(profile.as_str())
            .into_iter()
            .fold(Environment::builder().application(application.clone()), |b, p| {
                b.profile(p)
            })
            .label(label.clone())
            .version(fixture.version)
            .property_sources(fixture.sources)
            .build()
    }

    fn settings(&self) -> &ProviderSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::SourceReference;
    use pretty_assertions::assert_eq;

    const URI: &str = "https://example.com/ext.git";

    fn provider(factory: &MemoryProviderFactory, branch: &str) -> Arc<dyn SourceProvider> {
        let reference = SourceReference::new(SourceRole::Extension, URI);
        factory
            .create(ProviderSettings::for_branch(&reference, &Label::new(branch)))
            .unwrap()
    }

    fn shared() -> PropertySource {
        PropertySource::builder("ext/shared/application.yml")
            .property("test-properties.shared", "Shared properties")
            .build()
    }

    #[tokio::test]
    async fn test_find_serves_branch_fixture() {
        let factory = MemoryProviderFactory::new().with_branch(URI, "main", vec![shared()]);

        let env = provider(&factory, "main")
            .find(&Application::new("phoenix-web"), &Profile::new("prod,eu"), &Label::new("main"))
            .await
            .unwrap();

        assert_eq!(env.application().as_str(), "phoenix-web");
        assert_eq!(env.profiles(), &[Profile::new("prod"), Profile::new("eu")]);
        assert_eq!(env.label(), Some(&Label::new("main")));
        assert_eq!(env.version(), Some("r1"));
        assert_eq!(env.property_sources(), &[shared()]);
        assert_eq!(factory.lookups(), vec![(SourceRole::Extension, Label::new("main"))]);
    }

    #[tokio::test]
    async fn test_missing_branch_is_source_error() {
        let factory = MemoryProviderFactory::new();

        let err = provider(&factory, "main")
            .find(&Application::new("a"), &Profile::new("p"), &Label::new("nope"))
            .await
            .unwrap_err();

        assert!(err.is_source_error());
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn test_failing_branch() {
        let factory = MemoryProviderFactory::new().with_branch(URI, "main", vec![shared()]);
        factory.fail_branch(URI, "main");

        let result = provider(&factory, "main")
            .find(&Application::new("a"), &Profile::new("p"), &Label::new("main"))
            .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_unreachable_repository_cannot_be_built() {
        let factory = MemoryProviderFactory::new();
        factory.set_unreachable(URI, true);
        let reference = SourceReference::new(SourceRole::Extension, URI);

        let result = factory.create(ProviderSettings::for_branch(&reference, &Label::new("main")));

        assert!(result.is_err());
        assert_eq!(factory.created(), 0);

        factory.set_unreachable(URI, false);
        assert!(factory.create(ProviderSettings::for_branch(&reference, &Label::new("main"))).is_ok());
    }
}
