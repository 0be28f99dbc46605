//! Error types for polycodec
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Single-object operations (kind resolution, version conversion) return an
//! [`Error`] immediately. Batch operations collect one error per failing
//! position and hand them back together, see [`AggregateError`].

use crate::kind::{ApiVersion, KindVersion};
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for polycodec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for polycodec
#[derive(Debug, Error)]
pub enum Error {
    /// A type source reported a kind for an object but could not say whether
    /// the object is unversioned
    #[error(
        "type source returned a kind for {type_name}, but then reported it was not in the scheme with is_unversioned"
    )]
    TyperContractViolation {
        /// Concrete type of the offending object
        type_name: &'static str,
    },

    /// No schema is registered for this kind/version
    ///
    /// Decoders return this when the bytes name a kind they do not own.
    #[error("no kind is registered for {kind}")]
    KindNotRegistered {
        /// The kind/version that was looked up
        kind: KindVersion,
    },

    /// No schema is registered for this concrete type
    #[error("no kind is registered for the type {type_name}")]
    TypeNotRegistered {
        /// Concrete type that was looked up
        type_name: &'static str,
    },

    /// No conversion path, or a structural mismatch, between two versions
    #[error("Conversion error: cannot convert {from} to version {target}: {reason}")]
    ConversionFailure {
        /// Description of the source (kind/version or type)
        from: String,
        /// Requested target version
        target: ApiVersion,
        /// Why the conversion failed
        reason: String,
    },

    /// Encoding the item at `position` of a list failed
    #[error("Encode error at position {position} ({type_name}): {source}")]
    EncodeFailure {
        /// Index of the failing item
        position: usize,
        /// Concrete type of the failing item
        type_name: &'static str,
        /// Underlying encoder error
        source: Box<Error>,
    },

    /// Decoding the envelope at `position` of a list failed
    #[error("Decode error at position {position}: {source}")]
    DecodeFailure {
        /// Index of the failing item
        position: usize,
        /// Underlying decoder error
        source: Box<Error>,
    },

    /// Serialization/deserialization error raised by a wire format
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A named field is missing or has an incompatible type
    #[error("Field error: {0}")]
    FieldAccess(String),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Config(String),

    /// I/O error (reading configuration files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Several errors collected by a batch operation
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl Error {
    /// Contract violation by a type source for an object of `type_name`
    pub fn typer_contract_violation(type_name: &'static str) -> Self {
        Error::TyperContractViolation { type_name }
    }

    /// `kind` is not registered with the component that was asked
    pub fn kind_not_registered(kind: KindVersion) -> Self {
        Error::KindNotRegistered { kind }
    }

    /// `type_name` is not registered with the component that was asked
    pub fn type_not_registered(type_name: &'static str) -> Self {
        Error::TypeNotRegistered { type_name }
    }

    /// Conversion of `from` to `target` failed
    pub fn conversion(
        from: impl Into<String>,
        target: &ApiVersion,
        reason: impl Into<String>,
    ) -> Self {
        Error::ConversionFailure {
            from: from.into(),
            target: target.clone(),
            reason: reason.into(),
        }
    }

    /// Wire format error
    pub fn serialization(msg: impl fmt::Display) -> Self {
        Error::Serialization(msg.to_string())
    }

    /// Field lookup error
    pub fn field_access(msg: impl Into<String>) -> Self {
        Error::FieldAccess(msg.into())
    }

    /// Configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Tag an encoder error with the list position it happened at
    pub fn at_encode_position(self, position: usize, type_name: &'static str) -> Self {
        Error::EncodeFailure {
            position,
            type_name,
            source: Box::new(self),
        }
    }

    /// Tag a decoder error with the list position it happened at
    pub fn at_decode_position(self, position: usize) -> Self {
        Error::DecodeFailure {
            position,
            source: Box::new(self),
        }
    }

    /// True for the "not registered" family of errors
    ///
    /// Decoder chains treat these as "try the next decoder" rather than as
    /// failures.
    pub fn is_not_registered(&self) -> bool {
        matches!(
            self,
            Error::KindNotRegistered { .. } | Error::TypeNotRegistered { .. }
        )
    }

    /// List position this error is tagged with, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::EncodeFailure { position, .. } | Error::DecodeFailure { position, .. } => {
                Some(*position)
            }
            _ => None,
        }
    }
}

/// Ordered collection of errors returned by a batch operation
///
/// One entry per failing position, in position order.
#[derive(Debug)]
pub struct AggregateError(Vec<Error>);

impl AggregateError {
    /// `Ok(())` when `errors` is empty, otherwise the aggregate
    pub fn from_errors(errors: Vec<Error>) -> std::result::Result<(), AggregateError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AggregateError(errors))
        }
    }

    /// The collected errors
    pub fn errors(&self) -> &[Error] {
        &self.0
    }

    /// Number of collected errors
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for an aggregate built by [`AggregateError::from_errors`]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Positions tagged on the collected errors
    pub fn positions(&self) -> Vec<usize> {
        self.0.iter().filter_map(Error::position).collect()
    }

    /// Take the collected errors
    pub fn into_errors(self) -> Vec<Error> {
        self.0
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [only] = self.0.as_slice() {
            return write!(f, "{}", only);
        }
        f.write_str("[")?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", err)?;
        }
        f.write_str("]")
    }
}

impl std::error::Error for AggregateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_contract_violation() {
        let err = Error::typer_contract_violation("app::Pod");
        let msg = err.to_string();
        assert!(msg.contains("app::Pod"));
        assert!(msg.contains("is_unversioned"));
    }

    #[test]
    fn test_error_display_kind_not_registered() {
        let err = Error::kind_not_registered(KindVersion::new("v1", "Pod"));
        assert_eq!(err.to_string(), "no kind is registered for v1, Kind=Pod");
    }

    #[test]
    fn test_error_display_conversion() {
        let err = Error::conversion("v1, Kind=Pod", &ApiVersion::new("v3"), "no path");
        let msg = err.to_string();
        assert!(msg.contains("Conversion error"));
        assert!(msg.contains("v1, Kind=Pod"));
        assert!(msg.contains("v3"));
        assert!(msg.contains("no path"));
    }

    #[test]
    fn test_is_not_registered() {
        assert!(Error::kind_not_registered(KindVersion::new("v1", "Pod")).is_not_registered());
        assert!(Error::type_not_registered("u8").is_not_registered());
        assert!(!Error::serialization("bad json").is_not_registered());
        assert!(!Error::typer_contract_violation("u8").is_not_registered());
    }

    #[test]
    fn test_position_tagging() {
        let err = Error::serialization("boom").at_encode_position(3, "app::Pod");
        assert_eq!(err.position(), Some(3));
        assert!(err.to_string().contains("position 3"));
        assert!(err.to_string().contains("boom"));

        let err = Error::serialization("boom").at_decode_position(7);
        assert_eq!(err.position(), Some(7));
        assert_eq!(Error::config("x").position(), None);
    }

    #[test]
    fn test_aggregate_empty_is_ok() {
        assert!(AggregateError::from_errors(Vec::new()).is_ok());
    }

    #[test]
    fn test_aggregate_single_displays_as_itself() {
        let agg = AggregateError::from_errors(vec![Error::config("only")]).unwrap_err();
        assert_eq!(agg.to_string(), Error::config("only").to_string());
        assert_eq!(agg.len(), 1);
    }

    #[test]
    fn test_aggregate_multiple_preserves_order() {
        let agg = AggregateError::from_errors(vec![
            Error::serialization("a").at_encode_position(0, "A"),
            Error::serialization("b").at_encode_position(2, "B"),
        ])
        .unwrap_err();
        assert_eq!(agg.positions(), vec![0, 2]);
        let msg = agg.to_string();
        assert!(msg.starts_with('['));
        assert!(msg.find("position 0").unwrap() < msg.find("position 2").unwrap());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_aggregate() {
        let agg = AggregateError::from_errors(vec![Error::config("x")]).unwrap_err();
        let err: Error = agg.into();
        assert!(matches!(err, Error::Aggregate(_)));
    }
}
