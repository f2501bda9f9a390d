// crates/workdef-core/src/core/mod.rs
// ============================================================================
// Module: Workdef Core Types
// Description: Canonical def-construction data model.
// Purpose: Provide version references, field slots, and load-error structures.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types define the data model of resilient def construction: closed-set
//! version references, deferred field slots, and the load-error tree that
//! mirrors a def's field nesting.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod load;
pub mod slot;
pub mod version;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use load::LoadError;
pub use load::LoadErrorTree;
pub use load::RequiredFieldError;
pub use load::SupplyCause;
pub use slot::FieldSlot;
pub use slot::SupplyResult;
pub use version::ItemVersion;
pub use version::ItemVersionKind;
pub use version::VersionError;
