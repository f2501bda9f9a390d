// crates/workdef-core/src/interfaces/mod.rs
// ============================================================================
// Module: Workdef Interfaces
// Description: Collaborator seams for def types and payload decoders.
// Purpose: Define the contract surfaces consumers implement around the core.
// Dependencies: crate::{interchange, runtime}, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the resilient construction core integrates with the
//! concrete def catalog without embedding any of it. A def type implements
//! [`DefBuilder`] on its builder so parents can nest it; a transport consumer
//! implements [`DefDecoder`] to turn a decoded envelope payload back into a
//! def graph, typically through a lenient build.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::interchange::envelope::ContentVersion;
use crate::runtime::builder::Built;
use crate::runtime::builder::StrictBuildError;

// ============================================================================
// SECTION: Def Builder
// ============================================================================

/// Builder surface a def type exposes for nesting and completion.
pub trait DefBuilder {
    /// Def type this builder assembles.
    type Def;

    /// Resolves every slot and completes the build.
    ///
    /// # Errors
    ///
    /// Returns [`StrictBuildError`] only when the builder was switched to
    /// strict mode and load errors were recorded.
    fn build(self) -> Result<Built<Self::Def>, StrictBuildError>;
}

// ============================================================================
// SECTION: Def Decoder
// ============================================================================

/// Payload decode errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload could not be decoded into the target def.
    #[error("def payload decode error: {0}")]
    Payload(String),
}

/// Per-version decoder turning envelope payloads back into defs.
///
/// Implementations commonly run a lenient build so hand-edited or
/// cross-version payloads still yield a usable def plus diagnostics.
pub trait DefDecoder {
    /// Def type this decoder produces.
    type Def;

    /// Decodes a payload at a recognized schema revision.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the payload cannot be decoded at all;
    /// per-field failures belong in the returned [`Built`] diagnostics
    /// instead.
    fn decode(
        &self,
        version: ContentVersion,
        payload: &Value,
    ) -> Result<Built<Self::Def>, DecodeError>;
}
