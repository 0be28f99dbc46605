//! Batch encoding and decoding of object lists
//!
//! Lists are heterogeneous and fixed-length: every operation here works on a
//! `&mut [Box<dyn Object>]` in place, one position at a time, in index order.
//! A failure at one position is recorded and processing moves on; errors are
//! reported in position order once the whole list has been visited.
//!
//! ## Decoding policy
//!
//! Only [`Envelope`] positions are decoded. For each one:
//!
//! 1. **Full decode**: decoders are tried in order. The first success
//!    replaces the envelope. A "not registered" answer moves on to the next
//!    decoder; any other error is recorded for the position and ends its
//!    processing.
//! 2. **Metadata fallback**: only if every decoder answered "not registered".
//!    Decoders are asked in order to recover just the kind/version into the
//!    envelope; the first success wins. If none succeeds the envelope is left
//!    exactly as it was and no error is recorded.
//!
//! Envelopes nobody can read are passed through opaque; see
//! [`DecodeReport::passed_through`].

use std::fmt;
use std::sync::Arc;

use polycodec_core::{
    AggregateError, ApiVersion, Decoder, Encoder, Envelope, Error, Object, TypeMeta,
};
use tracing::{debug, trace, warn};

use crate::config::{CodecConfig, PassthroughLog};

/// Outcome of decoding a list
#[derive(Debug, Default)]
pub struct DecodeReport {
    /// Errors, one per failing position, in position order
    pub errors: Vec<Error>,
    /// Positions replaced by a fully decoded object
    pub decoded: Vec<usize>,
    /// Positions left as envelopes with recovered kind/version metadata
    pub metadata_only: Vec<usize>,
    /// Positions left untouched because no decoder could read them
    pub passed_through: Vec<usize>,
}

impl DecodeReport {
    /// True if no position failed
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// What happened to one envelope
enum ItemOutcome {
    Decoded(Box<dyn Object>),
    Metadata(TypeMeta),
    PassedThrough,
}

/// Encodes and decodes lists with a fixed decoder chain
#[derive(Clone)]
pub struct ListCodec {
    decoders: Vec<Arc<dyn Decoder>>,
    config: CodecConfig,
}

impl ListCodec {
    /// Codec trying `decoders` in order, with default configuration
    pub fn new(decoders: Vec<Arc<dyn Decoder>>) -> Self {
        Self::with_config(decoders, CodecConfig::default())
    }

    /// Codec trying `decoders` in order
    pub fn with_config(decoders: Vec<Arc<dyn Decoder>>, config: CodecConfig) -> Self {
        ListCodec { decoders, config }
    }

    /// The decoder chain
    pub fn decoders(&self) -> &[Arc<dyn Decoder>] {
        &self.decoders
    }

    /// The active configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Replace every encodable position with an [`Envelope`]
    ///
    /// # Errors
    ///
    /// Returns one [`Error::EncodeFailure`] per position the encoder
    /// rejected, in position order. Those positions keep their object; all
    /// others are still encoded.
    pub fn encode(
        &self,
        encoder: &dyn Encoder,
        objects: &mut [Box<dyn Object>],
        overrides: &[ApiVersion],
    ) -> Result<(), AggregateError> {
        let mut errs = Vec::new();
        for (position, slot) in objects.iter_mut().enumerate() {
            let data = match encoder.encode(&**slot, overrides) {
                Ok(data) => data,
                Err(e) => {
                    debug!(
                        target: "polycodec::list",
                        position,
                        type_name = slot.type_name(),
                        error = %e,
                        "Failed to encode list item"
                    );
                    errs.push(e.at_encode_position(position, slot.type_name()));
                    continue;
                }
            };
            let mut envelope = Envelope::from_raw(data);
            envelope.content_type = encoder.content_type().map(str::to_string);
            *slot = Box::new(envelope);
        }
        AggregateError::from_errors(errs)
    }

    /// Decode every envelope in place, returning the errors
    pub fn decode(&self, objects: &mut [Box<dyn Object>]) -> Vec<Error> {
        self.decode_with_report(objects).errors
    }

    /// Decode every envelope in place, reporting what happened to each
    pub fn decode_with_report(&self, objects: &mut [Box<dyn Object>]) -> DecodeReport {
        let mut report = DecodeReport::default();
        for (position, slot) in objects.iter_mut().enumerate() {
            let Some(envelope) = slot.as_envelope_mut() else {
                continue;
            };
            match self.decode_item(envelope) {
                Ok(ItemOutcome::Decoded(obj)) => {
                    *slot = obj;
                    report.decoded.push(position);
                }
                Ok(ItemOutcome::Metadata(meta)) => {
                    trace!(
                        target: "polycodec::list",
                        position,
                        kind = ?meta.kind,
                        api_version = ?meta.api_version,
                        "Recovered metadata for undecodable item"
                    );
                    envelope.type_meta = meta;
                    report.metadata_only.push(position);
                }
                Ok(ItemOutcome::PassedThrough) => {
                    self.log_passthrough(position, envelope);
                    report.passed_through.push(position);
                }
                Err(e) => {
                    debug!(
                        target: "polycodec::list",
                        position,
                        error = %e,
                        "Failed to decode list item"
                    );
                    report.errors.push(e.at_decode_position(position));
                }
            }
        }
        report
    }

    fn decode_item(&self, envelope: &Envelope) -> Result<ItemOutcome, Error> {
        for (index, decoder) in self.decoders.iter().enumerate() {
            match decoder.decode(&envelope.raw) {
                Ok(obj) => return Ok(ItemOutcome::Decoded(obj)),
                Err(e) if e.is_not_registered() => {
                    trace!(
                        target: "polycodec::list",
                        decoder = index,
                        error = %e,
                        "Decoder does not own item kind"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        if !self.config.metadata_fallback {
            return Ok(ItemOutcome::PassedThrough);
        }
        for decoder in &self.decoders {
            let mut meta = envelope.type_meta.clone();
            if decoder.decode_metadata_into(&envelope.raw, &mut meta).is_ok() {
                return Ok(ItemOutcome::Metadata(meta));
            }
        }
        Ok(ItemOutcome::PassedThrough)
    }

    fn log_passthrough(&self, position: usize, envelope: &Envelope) {
        match self.config.passthrough_log() {
            PassthroughLog::Off => {}
            PassthroughLog::Debug => debug!(
                target: "polycodec::list",
                position,
                bytes = envelope.raw.len(),
                "No decoder recognized item, passing it through"
            ),
            PassthroughLog::Warn => warn!(
                target: "polycodec::list",
                position,
                bytes = envelope.raw.len(),
                "No decoder recognized item, passing it through"
            ),
        }
    }
}

impl fmt::Debug for ListCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListCodec")
            .field("decoders", &self.decoders.len())
            .field("config", &self.config)
            .finish()
    }
}

/// Replace every encodable position of `objects` with an [`Envelope`]
///
/// See [`ListCodec::encode`].
///
/// # Errors
///
/// Returns one error per position the encoder rejected.
pub fn encode_list(
    encoder: &dyn Encoder,
    objects: &mut [Box<dyn Object>],
    overrides: &[ApiVersion],
) -> Result<(), AggregateError> {
    ListCodec::new(Vec::new()).encode(encoder, objects, overrides)
}

/// Decode every envelope of `objects` in place, trying `decoders` in order
///
/// Returns the errors, one per failing position, in position order.
pub fn decode_list(objects: &mut [Box<dyn Object>], decoders: &[Arc<dyn Decoder>]) -> Vec<Error> {
    decode_list_with_report(objects, decoders).errors
}

/// [`decode_list`] with the full per-position report
pub fn decode_list_with_report(
    objects: &mut [Box<dyn Object>],
    decoders: &[Arc<dyn Decoder>],
) -> DecodeReport {
    ListCodec::new(decoders.to_vec()).decode_with_report(objects)
}
