//! Identifier types for configuration requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the application requesting configuration.
///
/// # Example
///
/// ```
/// use vortex_core::Application;
///
/// let app = Application::new("phoenix-web");
/// assert_eq!(app.as_str(), "phoenix-web");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Application(String);

impl Application {
    /// Creates a new application identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the application name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Application {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Application {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Profile under which an application runs (`prod`, `dev`, ...).
///
/// A request may carry several comma-separated profiles; the raw request
/// string is kept as-is and [`Profile::split`] yields the individual parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(String);

impl Profile {
    /// Name of the profile used when none is requested.
    pub const DEFAULT: &'static str = "default";

    /// Creates a new profile.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the `default` profile.
    #[must_use]
    pub fn default_profile() -> Self {
        Self::new(Self::DEFAULT)
    }

    /// Returns the profile name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits a comma-separated profile request into individual profiles.
    ///
    /// Blank entries are skipped. An entirely blank request yields the
    /// `default` profile.
    #[must_use]
    pub fn split(raw: &str) -> Vec<Self> {
        let profiles: Vec<Self> = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(Self::new)
            .collect();

        if profiles.is_empty() {
            vec![Self::default_profile()]
        } else {
            profiles
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Profile {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Profile {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A branch (or tag) name in a configuration repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Creates a new label.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the label name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_display() {
        let app = Application::new("payment-service");
        assert_eq!(format!("{app}"), "payment-service");
    }

    #[test]
    fn test_profile_split() {
        let profiles = Profile::split("prod, eu ,,canary");
        let names: Vec<&str> = profiles.iter().map(Profile::as_str).collect();
        assert_eq!(names, vec!["prod", "eu", "canary"]);
    }

    #[test]
    fn test_profile_split_blank_is_default() {
        assert_eq!(Profile::split("  "), vec![Profile::default_profile()]);
    }

    #[test]
    fn test_label_serializes_as_plain_string() {
        let json = serde_json::to_string(&Label::new("main")).unwrap();
        assert_eq!(json, "\"main\"");
    }
}
