// crates/workdef-core/src/core/load.rs
// ============================================================================
// Module: Workdef Load Errors
// Description: Captured field-construction failures and their aggregation tree.
// Purpose: Pinpoint load failures per field and per nested def without losing
// the original cause.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A [`LoadError`] records one field-construction failure: the dot-separated
//! path from the root def to the failing field, a human-readable message, and
//! the original cause. A [`LoadErrorTree`] aggregates those failures in a
//! shape that mirrors the def's field nesting, so diagnostics compose when
//! nested builders are merged into their parents.
//!
//! Causes are shared (`Arc`) rather than boxed so errors stay clonable after
//! aggregation; strict builds surface the first error while the full tree is
//! retained for logging.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use thiserror::Error as ThisError;

// ============================================================================
// SECTION: Cause Aliases
// ============================================================================

/// Arbitrary failure produced by a field provider.
pub type SupplyCause = Box<dyn Error + Send + Sync + 'static>;

/// Shared form of a supply cause, kept clonable inside recorded errors.
type SharedCause = Arc<dyn Error + Send + Sync + 'static>;

// ============================================================================
// SECTION: Required-Field Cause
// ============================================================================

/// Synthetic cause recorded when a required field receives no provider.
///
/// # Invariants
/// - `field` names the declared field, not the composed path.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("field `{field}` is required but no value was supplied")]
pub struct RequiredFieldError {
    /// Declared name of the missing field.
    pub field: String,
}

// ============================================================================
// SECTION: Load Error
// ============================================================================

/// A single captured field-construction failure.
///
/// # Invariants
/// - `path` is the dot-separated field path from the current root def; it is
///   extended on the left each time the owning tree is merged into a parent.
/// - `cause` is the original failure object, preserved for inspection and
///   reachable through [`Error::source`].
#[derive(Debug, Clone)]
pub struct LoadError {
    /// Dot-separated field path from the root def to the failing field.
    path: String,
    /// Human-readable failure message.
    message: String,
    /// Original failure, never swallowed.
    cause: SharedCause,
}

impl LoadError {
    /// Records a failure with an explicit message and cause.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>, cause: SupplyCause) -> Self {
        Self {
            path: field.into(),
            message: message.into(),
            cause: Arc::from(cause),
        }
    }

    /// Records a provider failure, using the cause's own message.
    #[must_use]
    pub fn supplied(field: impl Into<String>, cause: SupplyCause) -> Self {
        let message = cause.to_string();
        Self::new(field, message, cause)
    }

    /// Records the synthetic failure for a required field with no provider.
    #[must_use]
    pub fn required(field: impl Into<String>) -> Self {
        let field = field.into();
        let cause = RequiredFieldError {
            field: field.clone(),
        };
        Self {
            path: field,
            message: "field is required but no value was supplied".to_string(),
            cause: Arc::new(cause),
        }
    }

    /// Returns the dot-separated field path from the current root def.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the preserved original cause.
    #[must_use]
    pub fn cause(&self) -> &(dyn Error + 'static) {
        self.cause.as_ref()
    }

    /// Reports whether this failure is the synthetic required-field kind.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.cause
            .as_ref()
            .downcast_ref::<RequiredFieldError>()
            .is_some()
    }

    /// Extends the path on the left with a parent field segment.
    fn push_prefix(&mut self, segment: &str) {
        self.path = format!("{segment}.{}", self.path);
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not load field `{}`: {}", self.path, self.message)
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

// ============================================================================
// SECTION: Load Error Tree
// ============================================================================

/// Recursive aggregation of load errors mirroring a def's field nesting.
///
/// # Invariants
/// - Purely additive during a build; immutable once the build returns it.
/// - Child order is merge order and affects only diagnostic display, never
///   [`LoadErrorTree::has_errors`].
/// - Error-presence is computed by descent on every call, so it can never go
///   stale.
#[derive(Debug, Clone, Default)]
pub struct LoadErrorTree {
    /// Errors for fields owned directly by this node's def.
    local: Vec<LoadError>,
    /// Subtrees for fields whose values were built by nested builders.
    children: Vec<(String, LoadErrorTree)>,
}

impl LoadErrorTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for a field owned directly by this node's def.
    pub fn add_local(&mut self, error: LoadError) {
        self.local.push(error);
    }

    /// Merges a nested builder's tree under a field path segment.
    ///
    /// Every error in the merged subtree has its path extended with
    /// `field`, so paths compose (for example
    /// `jobManager.settings.factoryId`).
    pub fn add_child(&mut self, field: &str, mut child: Self) {
        child.push_prefix(field);
        self.children.push((field.to_string(), child));
    }

    /// Extends every descendant error path with a parent field segment.
    fn push_prefix(&mut self, segment: &str) {
        for error in &mut self.local {
            error.push_prefix(segment);
        }
        for (_, child) in &mut self.children {
            child.push_prefix(segment);
        }
    }

    /// Reports whether this node or any descendant recorded an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.local.is_empty() || self.children.iter().any(|(_, child)| child.has_errors())
    }

    /// Returns the errors recorded directly on this node.
    #[must_use]
    pub fn local(&self) -> &[LoadError] {
        &self.local
    }

    /// Returns the subtree merged under a child field name, if present.
    #[must_use]
    pub fn child(&self, field: &str) -> Option<&Self> {
        self.children
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, child)| child)
    }

    /// Returns the child subtrees in merge order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.children
            .iter()
            .map(|(name, child)| (name.as_str(), child))
    }

    /// Flattens the tree into an order-stable error sequence.
    ///
    /// Local errors come first in record order, followed by each child
    /// subtree in merge order. Paths on the returned errors are already
    /// fully composed.
    #[must_use]
    pub fn collect_all(&self) -> Vec<&LoadError> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    /// Appends this node's errors depth-first into `out`.
    fn collect_into<'a>(&'a self, out: &mut Vec<&'a LoadError>) {
        out.extend(self.local.iter());
        for (_, child) in &self.children {
            child.collect_into(out);
        }
    }

    /// Returns the first error in diagnostic order, if any.
    #[must_use]
    pub fn first(&self) -> Option<&LoadError> {
        self.local
            .first()
            .or_else(|| self.children.iter().find_map(|(_, child)| child.first()))
    }

    /// Looks up an error by its fully composed dot-separated path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&LoadError> {
        let mut found = None;
        self.visit_find(path, &mut found);
        found
    }

    /// Depth-first search helper for [`Self::find`].
    fn visit_find<'a>(&'a self, path: &str, found: &mut Option<&'a LoadError>) {
        if found.is_some() {
            return;
        }
        if let Some(error) = self.local.iter().find(|error| error.path() == path) {
            *found = Some(error);
            return;
        }
        for (_, child) in &self.children {
            child.visit_find(path, found);
        }
    }
}
