// crates/workdef-core/src/core/slot.rs
// ============================================================================
// Module: Workdef Field Slots
// Description: Deferred, failure-tolerant value acquisition for def fields.
// Purpose: Capture provider failures at build time instead of letting them
// escape field setters.
// Dependencies: crate::core::load
// ============================================================================

//! ## Overview
//! A [`FieldSlot`] holds the value-acquisition logic for one declared field of
//! a def: its name, fixed required-ness, a fallback value, and an optional
//! deferred provider. Registering a provider never invokes it; resolution
//! happens once, during the owning builder's build, and converts any provider
//! failure into a recorded [`LoadError`] plus the fallback value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::core::load::LoadError;
use crate::core::load::SupplyCause;

// ============================================================================
// SECTION: Provider Aliases
// ============================================================================

/// Outcome of one field provider invocation.
pub type SupplyResult<T> = Result<T, SupplyCause>;

/// Stored zero-argument provider for a field value.
type Provider<T> = Box<dyn FnOnce() -> SupplyResult<T>>;

// ============================================================================
// SECTION: Field Slot
// ============================================================================

/// Deferred holder for one def field's value-acquisition logic.
///
/// # Invariants
/// - Required-ness is fixed at declaration and never changes.
/// - The provider is invoked at most once; resolution consumes the slot.
/// - Provider failures never escape registration; they surface only as
///   recorded [`LoadError`] values during resolution.
pub struct FieldSlot<T> {
    /// Declared field name, used as a path segment in diagnostics.
    field: String,
    /// Whether the owning def declared this field required.
    required: bool,
    /// Value used when the provider fails or is absent.
    fallback: T,
    /// Deferred provider, absent until registered.
    provider: Option<Provider<T>>,
}

impl<T> FieldSlot<T> {
    /// Declares a required field slot with its fallback value.
    #[must_use]
    pub fn required(field: impl Into<String>, fallback: T) -> Self {
        Self {
            field: field.into(),
            required: true,
            fallback,
            provider: None,
        }
    }

    /// Declares an optional field slot with its fallback value.
    #[must_use]
    pub fn optional(field: impl Into<String>, fallback: T) -> Self {
        Self {
            field: field.into(),
            required: false,
            fallback,
            provider: None,
        }
    }

    /// Registers a deferred provider without invoking it.
    ///
    /// A later registration replaces an earlier one; only the last provider
    /// runs at resolution time.
    pub fn supply(&mut self, provider: impl FnOnce() -> SupplyResult<T> + 'static) {
        self.provider = Some(Box::new(provider));
    }

    /// Registers an already-acquired value as the provider.
    pub fn supply_value(&mut self, value: T)
    where
        T: 'static,
    {
        self.provider = Some(Box::new(move || Ok(value)));
    }

    /// Returns the declared field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Reports whether the field was declared required.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Runs the provider once and captures its outcome.
    ///
    /// Provider success yields the supplied value. Provider failure yields
    /// the fallback plus a [`LoadError`] wrapping the cause. An absent
    /// provider yields the fallback, with a synthetic required-field error
    /// when the field was declared required and no error otherwise.
    pub(crate) fn resolve(self) -> ResolvedSlot<T> {
        match self.provider {
            Some(provider) => match provider() {
                Ok(value) => ResolvedSlot { value, error: None },
                Err(cause) => ResolvedSlot {
                    value: self.fallback,
                    error: Some(LoadError::supplied(self.field, cause)),
                },
            },
            None if self.required => ResolvedSlot {
                value: self.fallback,
                error: Some(LoadError::required(self.field)),
            },
            None => ResolvedSlot {
                value: self.fallback,
                error: None,
            },
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FieldSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSlot")
            .field("field", &self.field)
            .field("required", &self.required)
            .field("fallback", &self.fallback)
            .field("supplied", &self.provider.is_some())
            .finish()
    }
}

// ============================================================================
// SECTION: Resolved Slot
// ============================================================================

/// Outcome of resolving one field slot.
///
/// # Invariants
/// - `error` is present exactly when the value fell back due to a provider
///   failure or a missing required provider.
#[derive(Debug)]
pub(crate) struct ResolvedSlot<T> {
    /// Effective field value, supplied or fallback.
    pub(crate) value: T,
    /// Recorded failure, if the supplied value could not be used.
    pub(crate) error: Option<LoadError>,
}
