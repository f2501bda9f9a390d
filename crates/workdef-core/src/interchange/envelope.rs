// crates/workdef-core/src/interchange/envelope.rs
// ============================================================================
// Module: Workdef Interchange Envelope
// Description: Versioned, obfuscated text wrapper for def payloads.
// Purpose: Carry def payloads safely across application instances and
// versions, rejecting what cannot be understood.
// Dependencies: crate::{interfaces, runtime}, base64, rand, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`DefEnvelope`] wraps a serialized def payload with a schema version tag
//! and a process-unique payload identifier, then encodes the whole document
//! into an opaque printable token suitable for clipboard-style transport.
//!
//! The encoding is reversible obfuscation, not security: a recognizability
//! prefix followed by base64 of the JSON document. Reading distinguishes
//! three failure situations deliberately: input that was never this format
//! ([`EnvelopeReadError::Malformed`]), input in this format but damaged
//! ([`EnvelopeReadError::Corrupt`]), and input from an unknown schema
//! revision, which is routine and reported as absence rather than an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::interfaces::DecodeError;
use crate::interfaces::DefDecoder;
use crate::runtime::builder::Built;

// ============================================================================
// SECTION: Encoding Prefix
// ============================================================================

/// Prefix marking a text token as an obfuscated envelope.
///
/// Presence of this prefix is what separates "never our format" from "our
/// format but corrupted" on read.
pub const OBFUSCATION_PREFIX: &str = "01";

// ============================================================================
// SECTION: Content Versions
// ============================================================================

/// Schema revisions of the envelope payload understood by this crate.
///
/// # Invariants
/// - Tags are stable and monotonically assigned per schema revision.
/// - [`ContentVersion::LATEST`] always resolves to a concrete revision; the
///   serialized form never contains a "latest" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentVersion {
    /// First payload schema revision.
    V1,
}

impl ContentVersion {
    /// The most recent schema revision this crate writes.
    pub const LATEST: Self = Self::V1;

    /// Returns the stable wire tag for this revision.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }

    /// Parses a wire tag, returning `None` for unknown revisions.
    ///
    /// Unknown tags are an expected, recoverable situation (older client,
    /// newer payload); callers treat absence as routine.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "v1" => Some(Self::V1),
            _ => None,
        }
    }
}

impl fmt::Display for ContentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tag().fmt(f)
    }
}

// ============================================================================
// SECTION: Payload Identifiers
// ============================================================================

/// Process-unique token distinguishing otherwise-identical payloads.
///
/// # Invariants
/// - Generated identifiers are 32 lowercase hex digits (128 random bits).
/// - The identifier survives round trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadId(String);

impl PayloadId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{:032x}", rand::random::<u128>()))
    }

    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PayloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Def Envelope
// ============================================================================

/// Versioned transport wrapper around a serialized def payload.
///
/// # Invariants
/// - `payload` is generic structured data, not a fixed schema, so def
///   evolution does not break the envelope format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefEnvelope {
    /// Schema revision of the payload.
    version: ContentVersion,
    /// Process-unique payload identifier.
    payload_id: PayloadId,
    /// Serialized def payload.
    payload: Value,
}

impl DefEnvelope {
    /// Wraps a payload at the latest schema revision.
    #[must_use]
    pub fn new(payload_id: PayloadId, payload: Value) -> Self {
        Self::with_version(ContentVersion::LATEST, payload_id, payload)
    }

    /// Wraps a payload at an explicit schema revision.
    #[must_use]
    pub const fn with_version(
        version: ContentVersion,
        payload_id: PayloadId,
        payload: Value,
    ) -> Self {
        Self {
            version,
            payload_id,
            payload,
        }
    }

    /// Returns the schema revision of the payload.
    #[must_use]
    pub const fn version(&self) -> ContentVersion {
        self.version
    }

    /// Returns the payload identifier.
    #[must_use]
    pub const fn payload_id(&self) -> &PayloadId {
        &self.payload_id
    }

    /// Returns the serialized def payload.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }
}

// ============================================================================
// SECTION: Envelope Document
// ============================================================================

/// On-wire JSON document carried inside the obfuscated token.
#[derive(Debug, Serialize, Deserialize)]
struct EnvelopeDoc {
    /// Wire tag of the payload schema revision.
    version: String,
    /// Process-unique payload identifier.
    payload_id: PayloadId,
    /// Serialized def payload.
    payload: Value,
}

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Encodes an envelope into an opaque printable token.
///
/// The token is the obfuscation prefix followed by base64 of the envelope
/// JSON document; it contains no control characters and is safe for
/// clipboard-style transport.
///
/// # Errors
///
/// Returns [`EnvelopeWriteError::NullPayload`] for a null payload and
/// [`EnvelopeWriteError::Encode`] when the document cannot be rendered.
pub fn write_envelope(envelope: &DefEnvelope) -> Result<String, EnvelopeWriteError> {
    if envelope.payload().is_null() {
        return Err(EnvelopeWriteError::NullPayload);
    }
    let doc = EnvelopeDoc {
        version: envelope.version().tag().to_string(),
        payload_id: envelope.payload_id().clone(),
        payload: envelope.payload().clone(),
    };
    let bytes =
        serde_json::to_vec(&doc).map_err(|error| EnvelopeWriteError::Encode(error.to_string()))?;
    Ok(format!("{OBFUSCATION_PREFIX}{}", STANDARD.encode(bytes)))
}

/// Decodes a text token back into an envelope.
///
/// Only tokens carrying the obfuscation prefix are recognized; they are
/// base64-decoded and parsed as an envelope document. A structurally valid
/// document with an unknown version tag yields `Ok(None)` — version mismatch
/// is routine, not an error.
///
/// # Errors
///
/// Returns [`EnvelopeReadError::Malformed`] when the input was never this
/// format (empty, or missing the obfuscation prefix) and
/// [`EnvelopeReadError::Corrupt`] when the input carries the prefix but its
/// decoded content is not a valid document.
pub fn read_envelope(text: &str) -> Result<Option<DefEnvelope>, EnvelopeReadError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EnvelopeReadError::Malformed(
            "empty interchange text".to_string(),
        ));
    }

    let Some(encoded) = trimmed.strip_prefix(OBFUSCATION_PREFIX) else {
        return Err(EnvelopeReadError::Malformed(
            "missing envelope prefix".to_string(),
        ));
    };
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|error| EnvelopeReadError::Corrupt(error.to_string()))?;
    let document: Value = serde_json::from_slice(&bytes)
        .map_err(|error| EnvelopeReadError::Corrupt(error.to_string()))?;

    let doc: EnvelopeDoc = serde_json::from_value(document)
        .map_err(|error| EnvelopeReadError::Corrupt(error.to_string()))?;

    let Some(version) = ContentVersion::parse(&doc.version) else {
        return Ok(None);
    };

    Ok(Some(DefEnvelope::with_version(
        version,
        doc.payload_id,
        doc.payload,
    )))
}

/// Reads an envelope and hands its payload to the matching def decoder.
///
/// Returns `Ok(None)` when the envelope carries an unknown schema revision,
/// mirroring [`read_envelope`].
///
/// # Errors
///
/// Returns [`ReadDefError::Envelope`] when the text is not a readable
/// envelope and [`ReadDefError::Decode`] when the decoder rejects the
/// payload.
pub fn read_def<C: DefDecoder>(
    text: &str,
    decoder: &C,
) -> Result<Option<Built<C::Def>>, ReadDefError> {
    let Some(envelope) = read_envelope(text)? else {
        return Ok(None);
    };
    let built = decoder.decode(envelope.version(), envelope.payload())?;
    Ok(Some(built))
}

// ============================================================================
// SECTION: Envelope Errors
// ============================================================================

/// Envelope encoding errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum EnvelopeWriteError {
    /// The payload was null; an envelope never carries an empty def.
    #[error("cannot encode an envelope with a null def payload")]
    NullPayload,
    /// The envelope document could not be rendered.
    #[error("failed to encode envelope document: {0}")]
    Encode(String),
}

/// Envelope decoding errors.
///
/// # Invariants
/// - `Malformed` means the input was never this format; `Corrupt` means the
///   input was this format but damaged. Callers rely on the distinction.
#[derive(Debug, Error)]
pub enum EnvelopeReadError {
    /// The input is not an interchange envelope at all.
    #[error("input is not a def interchange envelope: {0}")]
    Malformed(String),
    /// The input carries the obfuscation prefix but cannot be decoded.
    #[error("envelope content is corrupt: {0}")]
    Corrupt(String),
}

/// Combined errors for reading an envelope and decoding its def payload.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ReadDefError {
    /// The envelope itself could not be read.
    #[error(transparent)]
    Envelope(#[from] EnvelopeReadError),
    /// The payload could not be decoded into a def.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
