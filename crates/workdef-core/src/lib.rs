// crates/workdef-core/src/lib.rs
// ============================================================================
// Module: Workdef Core Library
// Description: Public API surface for resilient def construction and interchange.
// Purpose: Expose core types, build runtime, interchange, and interfaces.
// Dependencies: crate::{core, interchange, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Workdef core builds, validates, and transports structured workflow
//! definition objects ("defs") that may originate from partially corrupt or
//! legacy-incompatible serialized data. Field providers resolve individually
//! and their failures aggregate into a tree mirroring the def graph; builds
//! complete fail-soft by default or fail-fast on request; completed payloads
//! travel in a versioned, obfuscated text envelope that rejects what it
//! cannot understand and treats unknown versions as routine absence.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interchange;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::*;

pub use interchange::ContentVersion;
pub use interchange::DefEnvelope;
pub use interchange::EnvelopeReadError;
pub use interchange::EnvelopeWriteError;
pub use interchange::OBFUSCATION_PREFIX;
pub use interchange::PayloadId;
pub use interchange::ReadDefError;
pub use interchange::read_def;
pub use interchange::read_envelope;
pub use interchange::write_envelope;
pub use interfaces::DecodeError;
pub use interfaces::DefBuilder;
pub use interfaces::DefDecoder;
pub use runtime::BuildMode;
pub use runtime::BuildSession;
pub use runtime::Built;
pub use runtime::StrictBuildError;
