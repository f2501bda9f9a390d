// crates/workdef-core/src/runtime/builder.rs
// ============================================================================
// Module: Workdef Resilient Builder Runtime
// Description: Slot resolution, tree merging, and strict/lenient completion.
// Purpose: Assemble immutable defs from fallible field providers with full
// failure diagnostics.
// Dependencies: crate::core::{load, slot}, thiserror
// ============================================================================

//! ## Overview
//! A concrete def builder owns one typed [`FieldSlot`] per declared field and
//! a [`BuildSession`]. `build` resolves every slot exactly once in declaration
//! order, builds nested defs depth-first and merges their trees under the
//! owning field name, then finishes according to the session's [`BuildMode`].
//!
//! Lenient builds always produce a def (supplied values or fallbacks) plus
//! the merged [`LoadErrorTree`]. Strict builds reject instead when the merged
//! tree holds any error, surfacing the first one as the failure cause while
//! keeping the whole tree for logging.
//!
//! The filling/resolving/built life cycle is enforced by ownership: setters
//! borrow the builder mutably, `build` consumes it, and
//! [`BuildSession::finish`] consumes the session, so reusing a spent builder
//! or registering a slot after `build` is a compile-time error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::load::LoadError;
use crate::core::load::LoadErrorTree;
use crate::core::slot::FieldSlot;

// ============================================================================
// SECTION: Build Mode
// ============================================================================

/// Strictness policy applied when a build session finishes.
///
/// # Invariants
/// - `Lenient` is the default everywhere a mode is not stated explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Fail-soft: always produce a def, carrying the error tree alongside.
    #[default]
    Lenient,
    /// Fail-fast: reject the def when any load error was recorded.
    Strict,
}

// ============================================================================
// SECTION: Build Session
// ============================================================================

/// Single-use orchestrator for one def build.
///
/// # Invariants
/// - Slots resolve at most once; [`BuildSession::resolve`] consumes the slot.
/// - Resolution order is the caller's call order and affects only which
///   error appears first in diagnostics.
/// - The session is spent by [`BuildSession::finish`]; ownership prevents
///   reuse.
#[derive(Debug, Default)]
pub struct BuildSession {
    /// Strictness applied at finish time.
    mode: BuildMode,
    /// Error tree accumulated while resolving slots and merging children.
    tree: LoadErrorTree,
}

impl BuildSession {
    /// Creates a session with an explicit mode.
    #[must_use]
    pub fn new(mode: BuildMode) -> Self {
        Self {
            mode,
            tree: LoadErrorTree::new(),
        }
    }

    /// Creates a lenient (fail-soft) session.
    #[must_use]
    pub fn lenient() -> Self {
        Self::new(BuildMode::Lenient)
    }

    /// Creates a strict (fail-fast) session.
    #[must_use]
    pub fn strict() -> Self {
        Self::new(BuildMode::Strict)
    }

    /// Returns the strictness applied at finish time.
    #[must_use]
    pub const fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Switches the session to strict mode.
    pub fn set_strict(&mut self) {
        self.mode = BuildMode::Strict;
    }

    /// Resolves one slot, recording any failure, and returns the effective
    /// value.
    ///
    /// A failed provider never aborts sibling resolution; the fallback value
    /// flows into the def and the failure lands in the tree.
    pub fn resolve<T>(&mut self, slot: FieldSlot<T>) -> T {
        let resolved = slot.resolve();
        if let Some(error) = resolved.error {
            self.tree.add_local(error);
        }
        resolved.value
    }

    /// Absorbs a nested builder's result, merging its tree under `field`.
    ///
    /// Children are always built leniently; strictness is evaluated once, at
    /// the root session's [`BuildSession::finish`], over the fully merged
    /// tree.
    pub fn resolve_child<D>(&mut self, field: &str, child: Built<D>) -> D {
        let (def, tree) = child.into_parts();
        if tree.has_errors() {
            self.tree.add_child(field, tree);
        }
        def
    }

    /// Completes the build according to the session mode.
    ///
    /// # Errors
    ///
    /// Returns [`StrictBuildError`] when the session is strict and the merged
    /// tree recorded any error; the first error in diagnostic order becomes
    /// the failure cause and the full tree rides along for logging.
    pub fn finish<D>(self, def: D) -> Result<Built<D>, StrictBuildError> {
        if self.mode == BuildMode::Strict {
            let first = self.tree.first().cloned();
            if let Some(first) = first {
                return Err(StrictBuildError {
                    first,
                    tree: self.tree,
                });
            }
        }
        Ok(Built {
            def,
            errors: self.tree,
        })
    }
}

// ============================================================================
// SECTION: Build Result
// ============================================================================

/// A completed def together with its load-error diagnostics.
///
/// # Invariants
/// - After a strict build, `errors` is guaranteed empty.
/// - The def holds no back-reference to its builder or tree.
#[derive(Debug)]
pub struct Built<D> {
    /// The assembled immutable def.
    def: D,
    /// Merged error tree mirroring the def's field nesting.
    errors: LoadErrorTree,
}

impl<D> Built<D> {
    /// Wraps an already-assembled def with an explicit error tree.
    ///
    /// Intended for decoders and tests that assemble diagnostics out of band.
    #[must_use]
    pub fn new(def: D, errors: LoadErrorTree) -> Self {
        Self { def, errors }
    }

    /// Returns the assembled def.
    #[must_use]
    pub fn def(&self) -> &D {
        &self.def
    }

    /// Returns the merged error tree.
    #[must_use]
    pub fn errors(&self) -> &LoadErrorTree {
        &self.errors
    }

    /// Reports whether any field failed to load anywhere in the def graph.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }

    /// Returns the recorded failure for one field path, if any.
    ///
    /// Optional-field failures are reported here too; they simply do not
    /// block lenient construction.
    #[must_use]
    pub fn supply_error(&self, path: &str) -> Option<&LoadError> {
        self.errors.find(path)
    }

    /// Splits the result into the def and its error tree.
    #[must_use]
    pub fn into_parts(self) -> (D, LoadErrorTree) {
        (self.def, self.errors)
    }

    /// Discards diagnostics and returns just the def.
    #[must_use]
    pub fn into_def(self) -> D {
        self.def
    }
}

// ============================================================================
// SECTION: Strict Rejection
// ============================================================================

/// Fatal rejection raised by a strict build with recorded load errors.
///
/// # Invariants
/// - `first` is the first error in diagnostic order; its preserved cause is
///   reachable through the `source` chain.
/// - `tree` is the complete merged tree, so logging can show every failure
///   even though only this one rejection escapes.
#[derive(Debug, Error)]
#[error("def construction rejected: {first}")]
pub struct StrictBuildError {
    /// First recorded load error, surfaced as the rejection cause.
    #[source]
    first: LoadError,
    /// Complete merged error tree for diagnostics.
    tree: LoadErrorTree,
}

impl StrictBuildError {
    /// Returns the first recorded load error.
    #[must_use]
    pub fn first(&self) -> &LoadError {
        &self.first
    }

    /// Returns the complete merged error tree.
    #[must_use]
    pub fn tree(&self) -> &LoadErrorTree {
        &self.tree
    }
}
