// crates/workdef-core/src/runtime/mod.rs
// ============================================================================
// Module: Workdef Runtime
// Description: Build orchestration for resilient def construction.
// Purpose: Resolve slots, merge nested trees, and complete builds by mode.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Runtime modules implement the build phase: slot resolution in declaration
//! order, depth-first child merging, and lenient or strict completion. All
//! def builders go through [`builder::BuildSession`] so failure collection
//! behaves identically everywhere.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod builder;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builder::BuildMode;
pub use builder::BuildSession;
pub use builder::Built;
pub use builder::StrictBuildError;
