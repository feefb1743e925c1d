//! The source provider capability.

use async_trait::async_trait;
use std::sync::Arc;
use vortex_core::{Application, Environment, Label, Profile, Result};

use crate::reference::{Credentials, SourceReference, SourceRole};
use crate::search_path::SearchPath;

/// Construction parameters of a provider bound to one repository and branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Role of the repository.
    pub role: SourceRole,
    /// Repository URI.
    pub uri: String,
    /// Credentials for the repository, if any.
    pub credentials: Option<Credentials>,
    /// Directories searched for configuration files, in lookup order.
    pub search_paths: Vec<SearchPath>,
    /// Branch used when a lookup does not name one.
    pub default_label: Label,
    /// Materialize the repository when the provider is built rather than on first lookup.
    pub clone_on_start: bool,
}

impl ProviderSettings {
    /// Settings for a provider reading `reference` at `branch`, using the
    /// default search paths.
    #[must_use]
    pub fn for_branch(reference: &SourceReference, branch: &Label) -> Self {
        Self {
            role: reference.role(),
            uri: reference.uri().to_string(),
            credentials: reference.credentials().cloned(),
            search_paths: SearchPath::defaults(),
            default_label: branch.clone(),
            clone_on_start: true,
        }
    }
}

/// Materializes environments from one version-controlled repository.
///
/// Implementations perform blocking or network I/O and may fail for any
/// lookup; callers treat every call as fallible.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Resolves the environment for `application` and `profile` at `label`.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be reached, the branch does
    /// not exist, or a file cannot be read.
    async fn find(
        &self,
        application: &Application,
        profile: &Profile,
        label: &Label,
    ) -> Result<Environment>;

    /// The settings this provider was built with.
    fn settings(&self) -> &ProviderSettings;
}

/// Builds providers from settings.
pub trait ProviderFactory: Send + Sync {
    /// Creates a provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be constructed, for example
    /// when an eager clone fails.
    fn create(&self, settings: ProviderSettings) -> Result<Arc<dyn SourceProvider>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_for_branch() {
        let reference = SourceReference::new(SourceRole::Core, "https://example.com/core.git")
            .with_credentials(Credentials::from_parts(Some("bot".into()), Some("t".into())));

        let settings = ProviderSettings::for_branch(&reference, &Label::new("rel-2"));

        assert_eq!(settings.role, SourceRole::Core);
        assert_eq!(settings.uri, "https://example.com/core.git");
        assert_eq!(settings.default_label, Label::new("rel-2"));
        assert_eq!(settings.search_paths, SearchPath::defaults());
        assert!(settings.clone_on_start);
        assert!(settings.credentials.is_some());
    }
}
