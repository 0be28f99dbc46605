//! Core types and traits for polycodec
//!
//! This crate defines the foundational types used throughout the system:
//! - Object: opaque handle to a runtime-typed value, with downcasting
//! - Envelope / TypeMeta: undecoded bytes plus best-effort kind metadata
//! - KindVersion / ApiVersion: schema identifiers
//! - Error: error type hierarchy, including batch aggregation
//! - Traits: collaborator capabilities (TypeSource, Typer, ConversionRoutine,
//!   Encoder, Decoder)
//! - Field access: named field lookup used by conversion routines

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod envelope;
pub mod error;
pub mod field;
pub mod kind;
pub mod object;
pub mod traits;

pub use envelope::{Envelope, TypeMeta};
pub use error::{AggregateError, Error, Result};
pub use field::{field_ptr, field_ref, set_zero_value, FieldAccessor};
pub use kind::{ApiVersion, KindVersion, ResolvedKind};
pub use object::Object;
pub use traits::{ConversionRoutine, Decoder, Encoder, TypeSource, Typer};
