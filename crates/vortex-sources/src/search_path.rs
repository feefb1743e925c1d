//! Locations of configuration files inside a repository.

use glob::{MatchOptions, Pattern};
use vortex_core::Application;

/// Placeholder replaced by the requested application name.
const APPLICATION_PLACEHOLDER: &str = "{application}";

/// Search path templates used by every provider, in lookup order.
pub const DEFAULT_SEARCH_PATHS: [&str; 6] = [
    "shared",
    "shared/environments",
    "shared/static",
    "services/platforms/*/{application}",
    "services/{application}",
    "{application}",
];

/// A directory template inside a configuration repository.
///
/// Templates may contain `{application}` and `*`, where `*` stands for
/// exactly one path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchPath(String);

impl SearchPath {
    /// Creates a search path from a template.
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// The fixed default list, in lookup order.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        DEFAULT_SEARCH_PATHS.iter().copied().map(Self::new).collect()
    }

    /// Returns the raw template.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitutes the application name into the template.
    #[must_use]
    pub fn expand(&self, application: &Application) -> String {
        self.0.replace(APPLICATION_PLACEHOLDER, application.as_str())
    }

    /// Returns true if this template contains a wildcard segment.
    #[must_use]
    pub fn is_pattern(&self) -> bool {
        self.0.contains('*')
    }

    /// Checks whether a repository-relative directory matches this template
    /// for the given application.
    #[must_use]
    pub fn matches(&self, application: &Application, candidate: &str) -> bool {
        let escaped = Pattern::escape(application.as_str());
        let expanded = self.0.replace(APPLICATION_PLACEHOLDER, &escaped);
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };

        Pattern::new(&expanded)
            .map(|pattern| pattern.matches_with(candidate.trim_end_matches('/'), options))
            .unwrap_or(false)
    }
}

impl From<&str> for SearchPath {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}
