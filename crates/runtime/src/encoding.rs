//! Version-aware encoding
//!
//! [`VersioningEncoder`] is an [`Encoder`] that converts an object to the
//! version the caller asked for before handing it to a wire format
//! ([`Serializer`]).
//!
//! Target selection for an object of kind `K`:
//! 1. unversioned objects are serialized as they are;
//! 2. otherwise the first override `o` whose `o.with_kind(K)` the type source
//!    recognizes;
//! 3. otherwise the encoder's default version.
//!
//! Objects already at the target version are not converted.

use std::fmt;
use std::sync::Arc;

use polycodec_core::{
    ApiVersion, ConversionRoutine, Encoder, Object, ResolvedKind, Result, TypeSource,
};
use tracing::debug;

use crate::convert::VersionConverter;
use crate::resolver::KindResolver;

/// Wire format used by [`VersioningEncoder`]
pub trait Serializer: Send + Sync {
    /// Serialize `obj` as it is
    ///
    /// # Errors
    ///
    /// Returns an error if the wire format does not support the object.
    fn serialize(&self, obj: &dyn Object) -> Result<Vec<u8>>;

    /// Media type of the produced bytes, if any
    fn content_type(&self) -> Option<&str> {
        None
    }
}

impl<T: Serializer + ?Sized> Serializer for Arc<T> {
    fn serialize(&self, obj: &dyn Object) -> Result<Vec<u8>> {
        (**self).serialize(obj)
    }

    fn content_type(&self) -> Option<&str> {
        (**self).content_type()
    }
}

/// Encoder converting objects to a requested version before serializing
pub struct VersioningEncoder {
    resolver: KindResolver<Arc<dyn TypeSource>>,
    converter: VersionConverter<Arc<dyn ConversionRoutine>>,
    serializer: Arc<dyn Serializer>,
    default_version: ApiVersion,
}

impl VersioningEncoder {
    /// Encoder writing `default_version` unless an override applies
    pub fn new(
        types: Arc<dyn TypeSource>,
        routine: Arc<dyn ConversionRoutine>,
        serializer: Arc<dyn Serializer>,
        default_version: ApiVersion,
    ) -> Self {
        VersioningEncoder {
            resolver: KindResolver::new(types),
            converter: VersionConverter::new(routine),
            serializer,
            default_version,
        }
    }

    /// The version used when no override applies
    pub fn default_version(&self) -> &ApiVersion {
        &self.default_version
    }

    /// Version `obj` will be written in, or `None` to write it unchanged
    ///
    /// # Errors
    ///
    /// Propagates kind resolution failures.
    pub fn target_version(
        &self,
        obj: &dyn Object,
        overrides: &[ApiVersion],
    ) -> Result<Option<ApiVersion>> {
        let resolved = self.resolver.resolve(obj)?;
        Ok(self.select_target(&resolved, overrides))
    }

    fn select_target(&self, resolved: &ResolvedKind, overrides: &[ApiVersion]) -> Option<ApiVersion> {
        if resolved.unversioned {
            return None;
        }
        let types = self.resolver.source();
        let target = overrides
            .iter()
            .find(|version| types.recognizes(&version.with_kind(resolved.kind.kind.clone())))
            .unwrap_or(&self.default_version);
        if resolved.kind.is_version(target) {
            None
        } else {
            Some(target.clone())
        }
    }

    /// Encode an object the caller is done with
    ///
    /// Same as [`Encoder::encode`], but converts with
    /// [`VersionConverter::convert_unsafe`], so no copy is made.
    ///
    /// # Errors
    ///
    /// Propagates resolution, conversion and serialization failures.
    pub fn encode_owned(&self, obj: Box<dyn Object>, overrides: &[ApiVersion]) -> Result<Vec<u8>> {
        match self.target_version(&*obj, overrides)? {
            None => self.serializer.serialize(&*obj),
            Some(target) => {
                debug!(
                    target: "polycodec::encode",
                    type_name = obj.type_name(),
                    target_version = %target,
                    "Converting owned object before encoding"
                );
                let converted = self.converter.convert_unsafe(obj, &target)?;
                self.serializer.serialize(&*converted)
            }
        }
    }
}

impl Encoder for VersioningEncoder {
    fn encode(&self, obj: &dyn Object, overrides: &[ApiVersion]) -> Result<Vec<u8>> {
        match self.target_version(obj, overrides)? {
            None => self.serializer.serialize(obj),
            Some(target) => {
                debug!(
                    target: "polycodec::encode",
                    type_name = obj.type_name(),
                    target_version = %target,
                    "Converting object before encoding"
                );
                let converted = self.converter.convert_safe(obj, &target)?;
                self.serializer.serialize(&*converted)
            }
        }
    }

    fn content_type(&self) -> Option<&str> {
        self.serializer.content_type()
    }
}

impl fmt::Debug for VersioningEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersioningEncoder")
            .field("default_version", &self.default_version)
            .field("content_type", &self.serializer.content_type())
            .finish()
    }
}
