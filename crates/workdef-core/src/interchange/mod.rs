// crates/workdef-core/src/interchange/mod.rs
// ============================================================================
// Module: Workdef Interchange
// Description: Versioned envelope layer for def payload transport.
// Purpose: Encode and decode def payloads for cross-instance interchange.
// Dependencies: crate::{interfaces, runtime}, base64, rand, serde_json
// ============================================================================

//! ## Overview
//! The interchange layer wraps completed def payloads in a versioned,
//! obfuscated text envelope and reads them back with strict rejection of
//! anything it cannot understand. Unknown schema revisions decode to
//! absence, never to an error.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod envelope;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use envelope::ContentVersion;
pub use envelope::DefEnvelope;
pub use envelope::EnvelopeReadError;
pub use envelope::EnvelopeWriteError;
pub use envelope::OBFUSCATION_PREFIX;
pub use envelope::PayloadId;
pub use envelope::ReadDefError;
pub use envelope::read_def;
pub use envelope::read_envelope;
pub use envelope::write_envelope;
