//! Version conversion
//!
//! [`VersionConverter`] dispatches to a [`ConversionRoutine`] in one of two
//! explicitly named modes:
//!
//! - [`convert_safe`](VersionConverter::convert_safe) borrows the input and
//!   returns an independent object. The input stays valid and unmodified.
//! - [`convert_unsafe`](VersionConverter::convert_unsafe) takes ownership of
//!   the input and may hand back an object that shares its storage. Moving
//!   the input keeps the caller from using the original binding again, but
//!   any handle to storage behind shared ownership (`Arc`, etc.) taken before
//!   the call observes writes to the result. Only use it on paths where the
//!   converted object is serialized and dropped.
//!
//! Conversion failures are deterministic and are never retried.

use polycodec_core::{ApiVersion, ConversionRoutine, Object, Result};
use tracing::trace;

/// Converts objects to a target version through a conversion routine
#[derive(Debug, Clone)]
pub struct VersionConverter<R> {
    routine: R,
}

impl<R: ConversionRoutine> VersionConverter<R> {
    /// Convert through `routine`
    pub fn new(routine: R) -> Self {
        VersionConverter { routine }
    }

    /// The underlying routine
    pub fn routine(&self) -> &R {
        &self.routine
    }

    /// Copying conversion of `obj` to `target`
    ///
    /// # Errors
    ///
    /// Propagates the routine's failure unchanged.
    pub fn convert_safe(&self, obj: &dyn Object, target: &ApiVersion) -> Result<Box<dyn Object>> {
        trace!(
            target: "polycodec::convert",
            type_name = obj.type_name(),
            target_version = %target,
            "Converting (copy)"
        );
        self.routine.convert_to_version(obj, target)
    }

    /// Aliasing conversion of `obj` to `target`
    ///
    /// The returned object may share storage with `obj`. Callers must not
    /// mutate or reuse any other handle to that storage afterwards. The input
    /// is dropped if conversion fails.
    ///
    /// # Errors
    ///
    /// Propagates the routine's failure unchanged.
    pub fn convert_unsafe(
        &self,
        obj: Box<dyn Object>,
        target: &ApiVersion,
    ) -> Result<Box<dyn Object>> {
        trace!(
            target: "polycodec::convert",
            type_name = obj.type_name(),
            target_version = %target,
            "Converting (aliased)"
        );
        self.routine.convert_to_version_aliased(obj, target)
    }
}
