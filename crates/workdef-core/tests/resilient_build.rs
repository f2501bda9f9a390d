// crates/workdef-core/tests/resilient_build.rs
// ============================================================================
// Module: Resilient Build Tests
// Description: Lenient and strict def construction over fallible providers.
// Purpose: Verify failure collection, fallback values, and strict rejection.
// ============================================================================

//! ## Overview
//! Exercises the build runtime with a nested sample def: execution settings
//! inside a job manager. Providers fail individually; builds collect every
//! failure without aborting siblings.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::error::Error;

use workdef_core::BuildSession;
use workdef_core::Built;
use workdef_core::DefBuilder;
use workdef_core::FieldSlot;
use workdef_core::StrictBuildError;
use workdef_core::SupplyResult;

/// Execution settings def used as the nested sample.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SettingsDef {
    factory_id: String,
    retries: u64,
}

/// Builder for [`SettingsDef`]: one required and one optional field.
struct SettingsDefBuilder {
    session: BuildSession,
    factory_id: FieldSlot<String>,
    retries: FieldSlot<u64>,
}

impl SettingsDefBuilder {
    fn new() -> Self {
        Self {
            session: BuildSession::lenient(),
            factory_id: FieldSlot::required("factoryId", String::new()),
            retries: FieldSlot::optional("retries", 3),
        }
    }

    fn strict(mut self) -> Self {
        self.session.set_strict();
        self
    }

    fn set_factory_id(&mut self, provider: impl FnOnce() -> SupplyResult<String> + 'static) {
        self.factory_id.supply(provider);
    }

    fn set_retries(&mut self, provider: impl FnOnce() -> SupplyResult<u64> + 'static) {
        self.retries.supply(provider);
    }
}

impl DefBuilder for SettingsDefBuilder {
    type Def = SettingsDef;

    fn build(self) -> Result<Built<SettingsDef>, StrictBuildError> {
        let Self {
            mut session,
            factory_id,
            retries,
        } = self;
        let factory_id = session.resolve(factory_id);
        let retries = session.resolve(retries);
        session.finish(SettingsDef {
            factory_id,
            retries,
        })
    }
}

/// Job manager def owning a nested settings def.
#[derive(Debug, Clone, PartialEq, Eq)]
struct JobManagerDef {
    name: String,
    settings: SettingsDef,
}

/// Builder for [`JobManagerDef`] nesting a settings child builder.
struct JobManagerDefBuilder {
    session: BuildSession,
    name: FieldSlot<String>,
    settings: SettingsDefBuilder,
}

impl JobManagerDefBuilder {
    fn new() -> Self {
        Self {
            session: BuildSession::lenient(),
            name: FieldSlot::required("name", "unnamed".to_string()),
            settings: SettingsDefBuilder::new(),
        }
    }

    fn set_name(&mut self, provider: impl FnOnce() -> SupplyResult<String> + 'static) {
        self.name.supply(provider);
    }

    fn settings_mut(&mut self) -> &mut SettingsDefBuilder {
        &mut self.settings
    }
}

impl DefBuilder for JobManagerDefBuilder {
    type Def = JobManagerDef;

    fn build(self) -> Result<Built<JobManagerDef>, StrictBuildError> {
        let Self {
            mut session,
            name,
            settings,
        } = self;
        let name = session.resolve(name);
        let settings = session.resolve_child("settings", settings.build()?);
        session.finish(JobManagerDef { name, settings })
    }
}

#[test]
fn lenient_build_with_nothing_set_reports_required_field() {
    let built = SettingsDefBuilder::new().build().unwrap();

    assert!(built.has_errors());
    let error = built.supply_error("factoryId").unwrap();
    assert!(error.is_required());
    assert_eq!(error.path(), "factoryId");

    // The optional field contributes neither an error nor a tree entry.
    assert!(built.supply_error("retries").is_none());
    assert_eq!(
        built.def(),
        &SettingsDef {
            factory_id: String::new(),
            retries: 3,
        }
    );
}

#[test]
fn clean_build_has_no_errors() {
    let mut builder = SettingsDefBuilder::new();
    builder.set_factory_id(|| Ok("org.example.streaming".to_string()));
    builder.set_retries(|| Ok(5));

    let built = builder.build().unwrap();
    assert!(!built.has_errors());
    assert!(built.errors().collect_all().is_empty());
    assert_eq!(built.def().factory_id, "org.example.streaming");
    assert_eq!(built.def().retries, 5);
}

#[test]
fn provider_failure_falls_back_and_records_cause() {
    let mut builder = SettingsDefBuilder::new();
    builder.set_factory_id(|| Err(std::io::Error::other("backing store unavailable").into()));

    let built = builder.build().unwrap();
    let error = built.supply_error("factoryId").unwrap();
    assert!(!error.is_required());
    assert!(error.cause().to_string().contains("backing store unavailable"));
    assert_eq!(built.def().factory_id, "");
}

#[test]
fn optional_failure_is_recorded_but_does_not_block_lenient_build() {
    let mut builder = SettingsDefBuilder::new();
    builder.set_factory_id(|| Ok("org.example.streaming".to_string()));
    builder.set_retries(|| Err("retry count out of range".into()));

    let built = builder.build().unwrap();
    assert!(built.has_errors());
    let error = built.supply_error("retries").unwrap();
    assert!(!error.is_required());
    assert_eq!(built.def().retries, 3);
}

#[test]
fn strict_build_rejects_with_first_cause_in_chain() {
    let mut builder = SettingsDefBuilder::new().strict();
    builder.set_factory_id(|| Err(std::io::Error::other("settings file truncated").into()));

    let rejection = builder.build().unwrap_err();
    assert_eq!(rejection.first().path(), "factoryId");

    // Walk the source chain down to the original provider failure.
    let mut chain = Vec::new();
    let mut current: Option<&dyn Error> = Some(&rejection);
    while let Some(error) = current {
        chain.push(error.to_string());
        current = error.source();
    }
    assert!(chain.iter().any(|entry| entry.contains("settings file truncated")));
}

#[test]
fn strict_build_rejects_on_optional_failure_too() {
    let mut builder = SettingsDefBuilder::new().strict();
    builder.set_factory_id(|| Ok("org.example.streaming".to_string()));
    builder.set_retries(|| Err("retry count out of range".into()));

    let rejection = builder.build().unwrap_err();
    assert_eq!(rejection.first().path(), "retries");
    // The full tree still carries everything that was recorded.
    assert_eq!(rejection.tree().collect_all().len(), 1);
}

#[test]
fn strict_build_with_clean_slots_returns_empty_tree() {
    let mut builder = SettingsDefBuilder::new().strict();
    builder.set_factory_id(|| Ok("org.example.streaming".to_string()));

    let built = builder.build().unwrap();
    assert!(!built.has_errors());
}

#[test]
fn nested_child_errors_compose_paths() {
    let mut builder = JobManagerDefBuilder::new();
    builder.set_name(|| Ok("background jobs".to_string()));
    builder.settings_mut().set_retries(|| Ok(7));
    // Leave the nested required factoryId unsupplied.

    let built = builder.build().unwrap();
    assert!(built.has_errors());
    let error = built.supply_error("settings.factoryId").unwrap();
    assert!(error.is_required());
    assert_eq!(error.path(), "settings.factoryId");
    assert_eq!(built.def().name, "background jobs");
    assert_eq!(built.def().settings.retries, 7);
}

#[test]
fn paths_compose_across_three_levels() {
    let job_manager = JobManagerDefBuilder::new().build().unwrap();

    let mut root = BuildSession::lenient();
    let def = root.resolve_child("jobManager", job_manager);
    let built = root.finish(def).unwrap();

    let error = built.supply_error("jobManager.settings.factoryId").unwrap();
    assert_eq!(error.path(), "jobManager.settings.factoryId");
    assert!(built.supply_error("jobManager.name").is_some());
}

#[test]
fn child_tree_is_reachable_under_its_field_name() {
    let built = JobManagerDefBuilder::new().build().unwrap();

    let child = built.errors().child("settings").unwrap();
    assert!(child.has_errors());
    assert_eq!(child.local().len(), 1);

    // Diagnostic order: this node's own errors first, then children.
    let all = built.errors().collect_all();
    assert_eq!(all[0].path(), "name");
    assert_eq!(all[1].path(), "settings.factoryId");
}
