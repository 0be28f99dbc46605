//! Polycodec - encoding and decoding of opaquely-typed, versioned objects
//!
//! Polycodec moves heterogeneous lists of runtime-typed objects across a wire
//! boundary. Each object has a kind and a version that are only known at
//! runtime, through pluggable type sources.
//!
//! # Quick Start
//!
//! ```ignore
//! use polycodec::{decode_list, encode_list, FederatedTyper, VersioningEncoder};
//!
//! // Encode in place: every item becomes an Envelope
//! encode_list(&encoder, &mut objects, &[])?;
//!
//! // Decode in place: envelopes become objects where a decoder can read them
//! let errors = decode_list(&mut objects, &decoders);
//! ```
//!
//! # Architecture
//!
//! - `polycodec-core`: the object model ([`Object`], [`Envelope`]), kind
//!   identifiers and the capability traits type sources, converters,
//!   encoders and decoders implement.
//! - `polycodec-runtime`: federation of type sources, kind resolution,
//!   version conversion, the versioning encoder and the list codec.
//!
//! Wire formats themselves live outside this crate; plug them in through
//! [`Encoder`], [`Decoder`] and [`Serializer`].

pub use polycodec_core::*;
pub use polycodec_runtime::*;
