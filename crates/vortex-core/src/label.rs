//! Parsing of the request label.
//!
//! Wire format: absent | `<branch>` | `<extensionBranch>:<coreBranch>`.

use crate::error::{Result, VortexError};
use crate::types::Label;
use std::fmt;

/// Branch resolved when the caller does not name one.
pub const DEFAULT_BRANCH: &str = "main";

const SEPARATOR: char = ':';

/// Two independent branches, one per backing repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchPair {
    extension: Label,
    core: Label,
}

impl BranchPair {
    /// Creates a branch pair.
    pub fn new(extension: impl Into<Label>, core: impl Into<Label>) -> Self {
        Self {
            extension: extension.into(),
            core: core.into(),
        }
    }

    /// The `main:main` pair used for fallback resolution.
    #[must_use]
    pub fn main() -> Self {
        Self::new(DEFAULT_BRANCH, DEFAULT_BRANCH)
    }

    /// Branch of the extension repository.
    #[must_use]
    pub const fn extension(&self) -> &Label {
        &self.extension
    }

    /// Branch of the core repository.
    #[must_use]
    pub const fn core(&self) -> &Label {
        &self.core
    }
}

impl fmt::Display for BranchPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.extension, self.core)
    }
}

/// A request label, classified once at the entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSpec {
    /// No label: the extension repository's default branch.
    Default,
    /// A single branch of the extension repository.
    Branch(Label),
    /// One branch per repository.
    BranchPair(BranchPair),
}

impl LabelSpec {
    /// Classifies a raw request label.
    ///
    /// A blank label is treated like an absent one. A label without `:` is
    /// kept verbatim. A label with `:` must split into exactly two parts,
    /// each non-empty after trimming.
    ///
    /// # Errors
    ///
    /// Returns [`VortexError::InvalidLabel`] for a malformed branch pair.
    ///
    /// # Example
    ///
    /// ```
    /// use vortex_core::{BranchPair, LabelSpec};
    ///
    /// let spec = LabelSpec::parse(Some("feat-a : rel-2")).unwrap();
    /// assert_eq!(spec, LabelSpec::BranchPair(BranchPair::new("feat-a", "rel-2")));
    /// assert!(LabelSpec::parse(Some("a:b:c")).is_err());
    /// ```
    pub fn parse(label: Option<&str>) -> Result<Self> {
        let Some(raw) = label else {
            return Ok(Self::Default);
        };

        if raw.trim().is_empty() {
            return Ok(Self::Default);
        }

        if !raw.contains(SEPARATOR) {
            return Ok(Self::Branch(Label::new(raw)));
        }

        let parts: Vec<&str> = raw.split(SEPARATOR).map(str::trim).collect();
        let [extension, core] = parts.as_slice() else {
            return Err(VortexError::invalid_label(
                raw,
                format!(
                    "expected 'extension-branch{SEPARATOR}core-branch', found {} parts",
                    parts.len()
                ),
            ));
        };

        if extension.is_empty() || core.is_empty() {
            return Err(VortexError::invalid_label(
                raw,
                format!("branch names cannot be empty (extension='{extension}', core='{core}')"),
            ));
        }

        Ok(Self::BranchPair(BranchPair::new(*extension, *core)))
    }
}

impl fmt::Display for LabelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str(DEFAULT_BRANCH),
            Self::Branch(label) => write!(f, "{label}"),
            Self::BranchPair(pair) => write!(f, "{pair}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_absent_and_blank_labels_are_default() {
        assert_eq!(LabelSpec::parse(None).unwrap(), LabelSpec::Default);
        assert_eq!(LabelSpec::parse(Some("")).unwrap(), LabelSpec::Default);
        assert_eq!(LabelSpec::parse(Some("   ")).unwrap(), LabelSpec::Default);
    }

    #[test]
    fn test_plain_label_is_single_branch() {
        assert_eq!(
            LabelSpec::parse(Some("feature-x")).unwrap(),
            LabelSpec::Branch(Label::new("feature-x"))
        );
    }

    #[test]
    fn test_pair_is_trimmed() {
        let spec = LabelSpec::parse(Some(" feat-a :\trel-2 ")).unwrap();
        assert_eq!(spec, LabelSpec::BranchPair(BranchPair::new("feat-a", "rel-2")));
    }

    #[test]
    fn test_empty_side_is_invalid() {
        for label in ["feat-a:", ":rel-2", ":", " : "] {
            let err = LabelSpec::parse(Some(label)).unwrap_err();
            assert!(err.is_invalid_label(), "{label} should be invalid");
        }
    }

    #[test]
    fn test_more_than_one_separator_is_invalid() {
        let err = LabelSpec::parse(Some("a:b:c")).unwrap_err();
        assert!(err.to_string().contains("3 parts"));
    }

    #[test]
    fn test_display_round_trips_wire_format() {
        assert_eq!(BranchPair::main().to_string(), "main:main");
        assert_eq!(LabelSpec::Default.to_string(), "main");
    }
}
