//! Undecoded objects
//!
//! An [`Envelope`] carries the raw bytes produced by an encoder together with
//! whatever kind/version metadata could be recovered from them. The byte
//! format is owned entirely by the encoder/decoder pair; nothing here looks
//! inside `raw`.

use crate::kind::KindVersion;
use serde::{Deserialize, Serialize};

/// Best-effort kind/version metadata of an envelope
///
/// Serializes as `{"apiVersion": "...", "kind": "..."}` with absent fields
/// omitted, so wire formats that carry this header can parse it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeMeta {
    /// Version name, if known
    #[serde(rename = "apiVersion", default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Kind name, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl TypeMeta {
    /// Metadata naming `kind`
    pub fn from_kind_version(kind: &KindVersion) -> Self {
        TypeMeta {
            api_version: Some(kind.version.clone()),
            kind: Some(kind.kind.clone()),
        }
    }

    /// The kind/version pair, when both halves are known
    pub fn kind_version(&self) -> Option<KindVersion> {
        match (&self.api_version, &self.kind) {
            (Some(version), Some(kind)) => Some(KindVersion::new(version.clone(), kind.clone())),
            _ => None,
        }
    }

    /// Overwrite both halves with `kind`
    pub fn set_kind_version(&mut self, kind: &KindVersion) {
        self.api_version = Some(kind.version.clone());
        self.kind = Some(kind.kind.clone());
    }

    /// True when neither half is known
    pub fn is_empty(&self) -> bool {
        self.api_version.is_none() && self.kind.is_none()
    }
}

/// Raw undecoded bytes plus optional metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Kind/version metadata recovered from `raw`, if any
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    /// Encoded object
    pub raw: Vec<u8>,
    /// Media type of `raw`, when the encoder advertised one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Transfer encoding applied to `raw` (e.g. compression), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,
}

impl Envelope {
    /// Envelope holding `raw` with no metadata
    pub fn from_raw(raw: Vec<u8>) -> Self {
        Envelope {
            raw,
            ..Default::default()
        }
    }

    /// Set the media type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// The kind/version pair, when fully known
    pub fn kind_version(&self) -> Option<KindVersion> {
        self.type_meta.kind_version()
    }
}
