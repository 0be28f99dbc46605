//! Capability traits supplied by collaborators
//!
//! The runtime never knows the full set of kinds, versions, or wire formats.
//! It dispatches through these traits, held in ordered lists of trait
//! objects:
//!
//! - [`TypeSource`]: identifies an object's kind/version (a schema registry)
//! - [`Typer`]: consolidated kind + unversioned query
//! - [`ConversionRoutine`]: converts an object to another version
//! - [`Encoder`] / [`Decoder`]: turn objects into bytes and back
//!
//! All traits require `Send + Sync` so implementations can be shared behind
//! `Arc`.

use std::sync::Arc;

use crate::envelope::TypeMeta;
use crate::error::Result;
use crate::kind::{ApiVersion, KindVersion, ResolvedKind};
use crate::object::Object;

/// A source able to identify objects' kinds
pub trait TypeSource: Send + Sync {
    /// The kind/version of `obj`
    ///
    /// # Errors
    ///
    /// Returns an error (usually [`crate::Error::TypeNotRegistered`]) if the
    /// source does not know the object's type.
    fn kind_of(&self, obj: &dyn Object) -> Result<KindVersion>;

    /// Every kind/version `obj` may be identified as
    ///
    /// A source may report several candidates for aliased schemas. The first
    /// entry is the preferred one.
    ///
    /// # Errors
    ///
    /// Returns an error if the source does not know the object's type.
    fn kinds_of(&self, obj: &dyn Object) -> Result<Vec<KindVersion>>;

    /// Whether this source has a schema for `kind`
    fn recognizes(&self, kind: &KindVersion) -> bool;

    /// Whether `obj`'s schema is version-independent
    ///
    /// `None` means the source cannot tell, which is different from
    /// `Some(false)`.
    fn is_unversioned(&self, obj: &dyn Object) -> Option<bool>;
}

/// Kind and unversioned status in one query
pub trait Typer: Send + Sync {
    /// Resolve `obj`
    ///
    /// # Errors
    ///
    /// Returns an error if the kind cannot be determined or the underlying
    /// source is inconsistent.
    fn object_kind(&self, obj: &dyn Object) -> Result<ResolvedKind>;
}

/// Scheme-level conversion between versions of the same kind
pub trait ConversionRoutine: Send + Sync {
    /// Convert `obj` to `target`, leaving `obj` untouched
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ConversionFailure`] if there is no conversion
    /// path or the object does not fit the source schema.
    fn convert_to_version(&self, obj: &dyn Object, target: &ApiVersion) -> Result<Box<dyn Object>>;

    /// Convert `obj` to `target`, reusing its storage where possible
    ///
    /// The result may share storage with `obj`. The default copies.
    ///
    /// # Errors
    ///
    /// Same as [`ConversionRoutine::convert_to_version`]. The input is
    /// dropped on failure.
    fn convert_to_version_aliased(
        &self,
        obj: Box<dyn Object>,
        target: &ApiVersion,
    ) -> Result<Box<dyn Object>> {
        self.convert_to_version(&*obj, target)
    }
}

/// Turns an object into bytes
pub trait Encoder: Send + Sync {
    /// Encode `obj`, preferring the given versions
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be encoded.
    fn encode(&self, obj: &dyn Object, overrides: &[ApiVersion]) -> Result<Vec<u8>>;

    /// Media type of the produced bytes, if the encoder advertises one
    fn content_type(&self) -> Option<&str> {
        None
    }
}

/// Turns bytes back into objects
pub trait Decoder: Send + Sync {
    /// Fully decode `data` into a typed object
    ///
    /// # Errors
    ///
    /// Must return an error for which
    /// [`is_not_registered`](crate::Error::is_not_registered) is true when the
    /// bytes name a kind this decoder does not own. Any other error is treated
    /// as a real decode failure.
    fn decode(&self, data: &[u8]) -> Result<Box<dyn Object>>;

    /// Recover only the kind/version metadata of `data` into `meta`
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be found. `meta` may have been
    /// partially written in that case.
    fn decode_metadata_into(&self, data: &[u8], meta: &mut TypeMeta) -> Result<()>;
}

impl<T: TypeSource + ?Sized> TypeSource for Arc<T> {
    fn kind_of(&self, obj: &dyn Object) -> Result<KindVersion> {
        (**self).kind_of(obj)
    }

    fn kinds_of(&self, obj: &dyn Object) -> Result<Vec<KindVersion>> {
        (**self).kinds_of(obj)
    }

    fn recognizes(&self, kind: &KindVersion) -> bool {
        (**self).recognizes(kind)
    }

    fn is_unversioned(&self, obj: &dyn Object) -> Option<bool> {
        (**self).is_unversioned(obj)
    }
}

impl<T: Typer + ?Sized> Typer for Arc<T> {
    fn object_kind(&self, obj: &dyn Object) -> Result<ResolvedKind> {
        (**self).object_kind(obj)
    }
}

impl<T: ConversionRoutine + ?Sized> ConversionRoutine for Arc<T> {
    fn convert_to_version(&self, obj: &dyn Object, target: &ApiVersion) -> Result<Box<dyn Object>> {
        (**self).convert_to_version(obj, target)
    }

    fn convert_to_version_aliased(
        &self,
        obj: Box<dyn Object>,
        target: &ApiVersion,
    ) -> Result<Box<dyn Object>> {
        (**self).convert_to_version_aliased(obj, target)
    }
}

impl<T: Encoder + ?Sized> Encoder for Arc<T> {
    fn encode(&self, obj: &dyn Object, overrides: &[ApiVersion]) -> Result<Vec<u8>> {
        (**self).encode(obj, overrides)
    }

    fn content_type(&self) -> Option<&str> {
        (**self).content_type()
    }
}

impl<T: Decoder + ?Sized> Decoder for Arc<T> {
    fn decode(&self, data: &[u8]) -> Result<Box<dyn Object>> {
        (**self).decode(data)
    }

    fn decode_metadata_into(&self, data: &[u8], meta: &mut TypeMeta) -> Result<()> {
        (**self).decode_metadata_into(data, meta)
    }
}
