//! Runtime layer for polycodec
//!
//! This crate implements the codec/registry layer on top of the
//! capability traits from `polycodec-core`:
//! - KindResolver: kind + unversioned status from one type source
//! - FederatedTyper: ordered federation of type sources
//! - VersionConverter: copying and aliasing version conversion
//! - VersioningEncoder: encoder converting to a requested version first
//! - ListCodec: batch encode/decode of object lists with per-item errors
//! - CodecConfig: `polycodec.toml` configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod convert;
pub mod encoding;
pub mod federated;
pub mod list;
pub mod resolver;

pub use config::{CodecConfig, PassthroughLog, CONFIG_FILE_NAME};
pub use convert::VersionConverter;
pub use encoding::{Serializer, VersioningEncoder};
pub use federated::FederatedTyper;
pub use list::{decode_list, decode_list_with_report, encode_list, DecodeReport, ListCodec};
pub use resolver::KindResolver;
