//! Kind and version identifiers
//!
//! A [`KindVersion`] selects one concrete schema: the kind name plus the
//! version name it is expressed in. [`ApiVersion`] names a version on its own
//! and is what conversion targets and encode overrides are expressed in.
//!
//! ## Equality
//!
//! Two `KindVersion`s are equal iff both the version and the kind match
//! exactly. No normalization (case folding, aliasing) is applied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A version name such as `"v1"` or `"v2beta1"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Create a version identifier
    pub fn new(version: impl Into<String>) -> Self {
        ApiVersion(version.into())
    }

    /// Get the version name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pair this version with a kind name
    pub fn with_kind(&self, kind: impl Into<String>) -> KindVersion {
        KindVersion {
            version: self.0.clone(),
            kind: kind.into(),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApiVersion {
    fn from(s: &str) -> Self {
        ApiVersion::new(s)
    }
}

impl From<String> for ApiVersion {
    fn from(s: String) -> Self {
        ApiVersion(s)
    }
}

/// Identifier pair selecting a concrete schema
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KindVersion {
    /// Version name
    pub version: String,
    /// Kind name
    pub kind: String,
}

impl KindVersion {
    /// Create a kind/version pair
    pub fn new(version: impl Into<String>, kind: impl Into<String>) -> Self {
        KindVersion {
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// The version half of the pair
    pub fn api_version(&self) -> ApiVersion {
        ApiVersion::new(self.version.clone())
    }

    /// Whether this pair is expressed in `version`
    pub fn is_version(&self, version: &ApiVersion) -> bool {
        self.version == version.as_str()
    }
}

impl fmt::Display for KindVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.version, self.kind)
    }
}

/// Kind and unversioned status reported together for one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKind {
    /// The object's kind/version
    pub kind: KindVersion,
    /// True if the object's schema is identical across all versions
    pub unversioned: bool,
}
