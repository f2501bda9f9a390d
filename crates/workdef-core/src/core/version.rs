// crates/workdef-core/src/core/version.rs
// ============================================================================
// Module: Workdef Item Versions
// Description: Closed-set version references for stored workflow items.
// Purpose: Provide validated, exhaustively matchable version variants with
// stable wire identifiers.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! An [`ItemVersion`] names which revision of a stored item a def refers to:
//! the unversioned working copy, the latest recorded version, or a specific
//! numbered version. The set is closed; callers extract variant data through
//! Rust's exhaustive `match` or through [`ItemVersion::fold`], so adding a
//! variant later is a compile-visible change at every extraction site.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Wire Identifiers
// ============================================================================

/// Wire identifier for the current-state variant.
const CURRENT_STATE_IDENTIFIER: &str = "current-state";

/// Wire identifier for the most-recent variant.
const MOST_RECENT_IDENTIFIER: &str = "most-recent";

// ============================================================================
// SECTION: Item Version
// ============================================================================

/// Reference to a version of a stored item.
///
/// # Invariants
/// - `SpecificVersion` numbers are non-negative by construction; use
///   [`ItemVersion::specific`] to validate signed input.
/// - The serialized form is exactly [`ItemVersion::identifier`] and is stable
///   across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ItemVersion {
    /// The unversioned working copy of the item.
    CurrentState,
    /// The most recently recorded version, left unpinned.
    MostRecent,
    /// A specific recorded version number.
    SpecificVersion(u64),
}

impl ItemVersion {
    /// Returns the current-state reference.
    #[must_use]
    pub const fn current_state() -> Self {
        Self::CurrentState
    }

    /// Returns the most-recent reference.
    #[must_use]
    pub const fn most_recent() -> Self {
        Self::MostRecent
    }

    /// Creates a reference to a specific version number.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Negative`] when `number` is negative; the
    /// message names the rejected number.
    pub fn specific(number: i64) -> Result<Self, VersionError> {
        match u64::try_from(number) {
            Ok(number) => Ok(Self::SpecificVersion(number)),
            Err(_) => Err(VersionError::Negative(number)),
        }
    }

    /// Returns the stable string identifier used in serialized form.
    #[must_use]
    pub fn identifier(&self) -> String {
        match self {
            Self::CurrentState => CURRENT_STATE_IDENTIFIER.to_string(),
            Self::MostRecent => MOST_RECENT_IDENTIFIER.to_string(),
            Self::SpecificVersion(number) => number.to_string(),
        }
    }

    /// Parses a stable string identifier back into a version reference.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Negative`] for numeric identifiers below zero
    /// and [`VersionError::Identifier`] for any other unrecognized text.
    pub fn parse_identifier(identifier: &str) -> Result<Self, VersionError> {
        match identifier {
            CURRENT_STATE_IDENTIFIER => Ok(Self::CurrentState),
            MOST_RECENT_IDENTIFIER => Ok(Self::MostRecent),
            other => match other.parse::<u64>() {
                Ok(number) => Ok(Self::SpecificVersion(number)),
                // Signed parse only to tell "negative" apart from "garbage".
                Err(_) => match other.parse::<i64>() {
                    Ok(number) => Err(VersionError::Negative(number)),
                    Err(_) => Err(VersionError::Identifier(other.to_string())),
                },
            },
        }
    }

    /// Reports whether the reference points at a recorded version.
    ///
    /// Only [`ItemVersion::CurrentState`] is unversioned.
    #[must_use]
    pub const fn is_versioned(&self) -> bool {
        !matches!(self, Self::CurrentState)
    }

    /// Returns the pinned version number, if the reference carries one.
    #[must_use]
    pub const fn version(&self) -> Option<u64> {
        match self {
            Self::SpecificVersion(number) => Some(*number),
            Self::CurrentState | Self::MostRecent => None,
        }
    }

    /// Returns the variant kind tag for narrowing diagnostics.
    #[must_use]
    pub const fn kind(&self) -> ItemVersionKind {
        match self {
            Self::CurrentState => ItemVersionKind::CurrentState,
            Self::MostRecent => ItemVersionKind::MostRecent,
            Self::SpecificVersion(_) => ItemVersionKind::SpecificVersion,
        }
    }

    /// Narrows the reference to an expected variant kind.
    ///
    /// This is an ergonomic helper for call sites that already know which
    /// variant they hold; it introduces no new mechanism over [`Self::kind`].
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Cast`] naming the expected and actual kinds
    /// when the reference is a different variant.
    pub fn cast(self, kind: ItemVersionKind) -> Result<Self, VersionError> {
        if self.kind() == kind {
            Ok(self)
        } else {
            Err(VersionError::Cast {
                expected: kind,
                actual: self.kind(),
            })
        }
    }

    /// Applies exactly one of three total handlers and returns its result.
    ///
    /// This is the sanctioned extraction operation: every variant must be
    /// handled, so no call site can silently skip one.
    pub fn fold<R>(
        &self,
        on_current_state: impl FnOnce() -> R,
        on_most_recent: impl FnOnce() -> R,
        on_specific: impl FnOnce(u64) -> R,
    ) -> R {
        match self {
            Self::CurrentState => on_current_state(),
            Self::MostRecent => on_most_recent(),
            Self::SpecificVersion(number) => on_specific(*number),
        }
    }
}

impl fmt::Display for ItemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.identifier().fmt(f)
    }
}

impl From<ItemVersion> for String {
    fn from(value: ItemVersion) -> Self {
        value.identifier()
    }
}

impl TryFrom<String> for ItemVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_identifier(&value)
    }
}

// ============================================================================
// SECTION: Version Kinds
// ============================================================================

/// Variant kind tag for [`ItemVersion`] narrowing.
///
/// # Invariants
/// - Kinds correspond one-to-one with [`ItemVersion`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemVersionKind {
    /// The current-state variant.
    CurrentState,
    /// The most-recent variant.
    MostRecent,
    /// The specific-version variant.
    SpecificVersion,
}

impl fmt::Display for ItemVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CurrentState => CURRENT_STATE_IDENTIFIER,
            Self::MostRecent => MOST_RECENT_IDENTIFIER,
            Self::SpecificVersion => "specific-version",
        };
        label.fmt(f)
    }
}

// ============================================================================
// SECTION: Version Errors
// ============================================================================

/// Version reference construction and narrowing errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// A specific version number was negative.
    #[error("version number must be non-negative, got {0}")]
    Negative(i64),
    /// A serialized identifier was not a recognized version reference.
    #[error("unrecognized version identifier: {0}")]
    Identifier(String),
    /// A narrowing cast targeted a different variant.
    #[error("expected {expected} version reference, got {actual}")]
    Cast {
        /// Kind the caller asked for.
        expected: ItemVersionKind,
        /// Kind the reference actually holds.
        actual: ItemVersionKind,
    },
}
