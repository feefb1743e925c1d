//! Configuration structures for Vortex Config.

use crate::error::{Result, VortexError};
use crate::types::{Application, Label, Profile};
use crate::value::ConfigValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A collection of configuration properties from a specific source.
///
/// `PropertySource` represents configuration loaded from a single file
/// of a repository. Multiple sources are combined to form an [`Environment`].
///
/// # Example
///
/// ```
/// use vortex_core::PropertySource;
///
/// let source = PropertySource::builder("shared/application.yml")
///     .property("server.port", "8080")
///     .build();
/// assert_eq!(source.get("server.port").and_then(|v| v.as_str()), Some("8080"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySource {
    /// Name of the source (typically repository URI plus file path)
    name: String,
    /// Key-value properties from this source, in file order
    #[serde(rename = "source", default)]
    properties: IndexMap<String, ConfigValue>,
}

impl PropertySource {
    /// Creates a new `PropertySource` with the given name and properties.
    pub fn new(name: impl Into<String>, properties: IndexMap<String, ConfigValue>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// Starts building a property source with the given name.
    pub fn builder(name: impl Into<String>) -> PropertySourceBuilder {
        PropertySourceBuilder {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }

    /// Returns the name of this property source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a reference to the properties map.
    #[must_use]
    pub const fn properties(&self) -> &IndexMap<String, ConfigValue> {
        &self.properties
    }

    /// Gets a property value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.properties.get(key)
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if there are no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Builder for [`PropertySource`].
#[derive(Debug)]
pub struct PropertySourceBuilder {
    name: String,
    properties: IndexMap<String, ConfigValue>,
}

impl PropertySourceBuilder {
    /// Adds a property. A repeated key keeps its first position and takes the new value.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Builds the property source.
    #[must_use]
    pub fn build(self) -> PropertySource {
        PropertySource::new(self.name, self.properties)
    }
}

/// Resolved configuration for one application/profile/label triple.
///
/// Property sources are ordered by precedence: the first source that
/// defines a key wins. Serializes with the field names config-server
/// clients expect (`name`, `profiles`, `label`, `version`, `state`,
/// `propertySources`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Application this configuration belongs to
    #[serde(rename = "name")]
    application: Application,
    /// Active profiles
    profiles: Vec<Profile>,
    /// Branch the configuration was read from
    label: Option<Label>,
    /// Commit or revision identifier reported by the source
    version: Option<String>,
    /// Source-specific state marker
    state: Option<String>,
    /// Ordered list of property sources (first wins)
    #[serde(default)]
    property_sources: Vec<PropertySource>,
}

impl Environment {
    /// Creates an environment with no property sources.
    pub fn new(application: impl Into<Application>, profiles: Vec<Profile>) -> Self {
        Self {
            application: application.into(),
            profiles,
            label: None,
            version: None,
            state: None,
            property_sources: Vec::new(),
        }
    }

    /// Returns a builder for constructing an `Environment`.
    #[must_use]
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::default()
    }

    /// Builds the degraded result returned when nothing could be resolved.
    #[must_use]
    pub fn empty(application: &Application, profile: &Profile, label: &Label) -> Self {
        Self {
            label: Some(label.clone()),
            ..Self::new(application.clone(), vec![profile.clone()])
        }
    }

    /// Returns the application identifier.
    #[must_use]
    pub const fn application(&self) -> &Application {
        &self.application
    }

    /// Returns the active profiles.
    #[must_use]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Returns the configuration label, if set.
    #[must_use]
    pub const fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Returns the source revision, if reported.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the source state marker, if reported.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Returns the property sources.
    #[must_use]
    pub fn property_sources(&self) -> &[PropertySource] {
        &self.property_sources
    }

    /// Consumes the environment, returning its property sources.
    #[must_use]
    pub fn into_property_sources(self) -> Vec<PropertySource> {
        self.property_sources
    }

    pub(crate) fn set_metadata(
        &mut self,
        label: Option<Label>,
        version: Option<String>,
        state: Option<String>,
    ) {
        self.label = label;
        self.version = version;
        self.state = state;
    }

    pub(crate) fn extend_property_sources(&mut self, sources: Vec<PropertySource>) {
        self.property_sources.extend(sources);
    }

    /// Gets a property value, searching through sources in order.
    ///
    /// Returns the value from the first `PropertySource` that contains
    /// the key, or None if not found in any source.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&ConfigValue> {
        self.property_sources
            .iter()
            .find_map(|source| source.get(key))
    }

    /// Returns all unique property keys across all sources.
    #[must_use]
    pub fn property_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .property_sources
            .iter()
            .flat_map(|s| s.properties().keys().map(String::as_str))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}

/// Builder for [`Environment`].
#[derive(Debug, Default)]
pub struct EnvironmentBuilder {
    application: Option<Application>,
    profiles: Vec<Profile>,
    label: Option<Label>,
    version: Option<String>,
    state: Option<String>,
    property_sources: Vec<PropertySource>,
}

impl EnvironmentBuilder {
    /// Sets the application identifier.
    #[must_use]
    pub fn application(mut self, app: impl Into<Application>) -> Self {
        self.application = Some(app.into());
        self
    }

    /// Adds a profile.
    #[must_use]
    pub fn profile(mut self, profile: impl Into<Profile>) -> Self {
        self.profiles.push(profile.into());
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the state marker.
    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Adds a property source after the ones already added.
    #[must_use]
    pub fn property_source(mut self, source: PropertySource) -> Self {
        self.property_sources.push(source);
        self
    }

    /// Appends several property sources, keeping their order.
    #[must_use]
    pub fn property_sources(mut self, sources: impl IntoIterator<Item = PropertySource>) -> Self {
        self.property_sources.extend(sources);
        self
    }

    /// Builds the `Environment`.
    ///
    /// # Errors
    ///
    /// Returns [`VortexError::InvalidApplication`] if no application was set.
    pub fn build(self) -> Result<Environment> {
        let application = self
            .application
            .ok_or_else(|| VortexError::invalid_application("", "application must be set"))?;

        Ok(Environment {
            application,
            profiles: if self.profiles.is_empty() {
                vec![Profile::default_profile()]
            } else {
                self.profiles
            },
            label: self.label,
            version: self.version,
            state: self.state,
            property_sources: self.property_sources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn source(name: &str, pairs: &[(&str, &str)]) -> PropertySource {
        pairs
            .iter()
            .fold(PropertySource::builder(name), |b, (k, v)| b.property(*k, *v))
            .build()
    }

    #[test]
    fn test_property_source_creation() {
        let source = source("test.yml", &[("key", "value")]);

        assert_eq!(source.name(), "test.yml");
        assert_eq!(source.get("key"), Some(&ConfigValue::from("value")));
        assert_eq!(source.get("missing"), None);
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_environment_builder() {
        let env = Environment::builder()
            .application("myapp")
            .profile("prod")
            .label("v1.0")
            .version("abc123")
            .build()
            .unwrap();

        assert_eq!(env.application().as_str(), "myapp");
        assert_eq!(env.profiles().len(), 1);
        assert_eq!(env.label(), Some(&Label::new("v1.0")));
        assert_eq!(env.version(), Some("abc123"));
        assert_eq!(env.state(), None);
    }

    #[test]
    fn test_builder_without_application_fails() {
        let err = Environment::builder().profile("prod").build().unwrap_err();
        assert!(matches!(err, VortexError::InvalidApplication { .. }));
    }

    #[test]
    fn test_builder_defaults_profile() {
        let env = Environment::builder().application("myapp").build().unwrap();
        assert_eq!(env.profiles(), &[Profile::default_profile()]);
    }

    #[test]
    fn test_property_lookup_precedence() {
        let env = Environment::builder()
            .application("test")
            .property_source(source("high-priority", &[("key", "from-source1")]))
            .property_source(source("low-priority", &[("key", "from-source2"), ("other", "x")]))
            .build()
            .unwrap();

        // First source wins
        assert_eq!(env.get_property("key"), Some(&ConfigValue::from("from-source1")));
        assert_eq!(env.get_property("other"), Some(&ConfigValue::from("x")));
        assert_eq!(env.property_keys(), vec!["key", "other"]);
    }

    #[test]
    fn test_empty_environment() {
        let env = Environment::empty(
            &Application::new("phoenix-web"),
            &Profile::new("prod"),
            &Label::new("main"),
        );

        assert!(env.property_sources().is_empty());
        assert_eq!(env.label().map(Label::as_str), Some("main"));
        assert_eq!(env.profiles(), &[Profile::new("prod")]);
    }

    #[test]
    fn test_serializes_with_client_field_names() {
        let env = Environment::builder()
            .application("myapp")
            .profile("production")
            .label("main")
            .property_source(source("shared/application.yml", &[("a", "1")]))
            .build()
            .unwrap();

        let json = serde_json::to_value(&env).unwrap();

        assert_eq!(json["name"], "myapp");
        assert_eq!(json["profiles"][0], "production");
        assert_eq!(json["propertySources"][0]["name"], "shared/application.yml");
        assert_eq!(json["propertySources"][0]["source"]["a"], "1");
        assert!(json["version"].is_null());
    }
}
