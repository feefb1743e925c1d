//! References to the configuration repositories.

use std::fmt;

/// Which of the two repositories a reference points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceRole {
    /// Game/extension properties. Authoritative on key collisions.
    Extension,
    /// Shared core properties.
    Core,
}

impl SourceRole {
    /// Lower-case role name, as used in logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Extension => "extension",
            Self::Core => "core",
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name.
    pub username: String,
    /// Password or access token.
    pub password: String,
}

impl Credentials {
    /// Builds credentials, returning `None` for anonymous access (empty username).
    #[must_use]
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        let username = username.filter(|u| !u.trim().is_empty())?;
        Some(Self {
            username,
            password: password.unwrap_or_default(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A configured repository. Immutable for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    role: SourceRole,
    uri: String,
    credentials: Option<Credentials>,
}

impl SourceReference {
    /// Creates an anonymous reference.
    pub fn new(role: SourceRole, uri: impl Into<String>) -> Self {
        Self {
            role,
            uri: uri.into(),
            credentials: None,
        }
    }

    /// Attaches credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Role of the repository.
    #[must_use]
    pub const fn role(&self) -> SourceRole {
        self.role
    }

    /// Repository URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Credentials, if any.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

/// The two named references every resolver works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReferences {
    /// Extension repository.
    pub extension: SourceReference,
    /// Core repository.
    pub core: SourceReference,
}

impl SourceReferences {
    /// Returns the reference for a role.
    #[must_use]
    pub const fn get(&self, role: SourceRole) -> &SourceReference {
        match role {
            SourceRole::Extension => &self.extension,
            SourceRole::Core => &self.core,
        }
    }
}
