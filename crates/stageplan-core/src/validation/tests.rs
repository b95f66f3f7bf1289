use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use super::*;
use crate::assembly::NumberedInput;
use crate::document::{DocumentMeta, DocumentNotes};
use crate::error::WarningCode;
use crate::format::MetaLine;
use crate::model::{Group, InputChannel, MonitoringSetup, MusicianSetupPreset};
use crate::stageplan::StageplanModel;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
}

fn make_vm(keys: &[&str]) -> DocumentViewModel {
    DocumentViewModel {
        meta: DocumentMeta {
            project_id: "p".to_string(),
            band_name: "Band".to_string(),
            purpose: Purpose::Generic,
            event_date: None,
            event_venue: None,
            document_date: date(),
            title: None,
            meta_line: MetaLine::Plain {
                value: "Stage plan (datum aktualizace: 7. 3. 2026)".to_string(),
            },
        },
        inputs: keys
            .iter()
            .enumerate()
            .map(|(i, key)| NumberedInput {
                ch: i as u32 + 1,
                key: key.to_string(),
                label: key.to_string(),
                group: Some(Group::Vocs),
                note: None,
            })
            .collect(),
        input_rows: Vec::new(),
        monitors: Vec::new(),
        monitor_table_rows: Vec::new(),
        notes: DocumentNotes::default(),
        stageplan: StageplanModel::default(),
        warnings: Vec::new(),
    }
}

fn numbered_keys(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("in_{}", i)).collect()
}

fn setup(inputs: usize, monitor_ref: &str) -> MusicianSetupPreset {
    MusicianSetupPreset {
        inputs: (0..inputs)
            .map(|i| InputChannel::new(format!("in_{}", i), "Input", Group::Guitar))
            .collect(),
        monitoring: MonitoringSetup::new(monitor_ref),
    }
}

// ========================================================================
// Document Tests
// ========================================================================

#[test]
fn test_valid_document() {
    let result = validate_document(&make_vm(&["voc_lead", "tb_guitar"]));
    assert!(result.is_ok());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_empty_document() {
    let result = validate_document(&make_vm(&[]));
    assert!(!result.is_ok());
    assert_eq!(result.errors[0].code, ErrorCode::NoInputs);
    assert_eq!(
        result.errors[0].message,
        "No inputs generated. Check band.defaultLineup and musician.presets mapping."
    );
}

#[test]
fn test_input_limit() {
    let keys = numbered_keys(32);
    let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    assert!(validate_document(&make_vm(&refs)).is_ok());

    let keys = numbered_keys(33);
    let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    let result = validate_document(&make_vm(&refs));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, ErrorCode::TooManyInputs);
    assert_eq!(result.errors[0].message, "Too many inputs: 33 (max 32)");
}

#[test]
fn test_duplicate_key() {
    let result = validate_document(&make_vm(&["voc_lead", "voc_back", "voc_lead"]));
    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert_eq!(error.code, ErrorCode::DuplicateInputKey);
    assert_eq!(error.message, "Duplicate input key: \"voc_lead\"");
    assert_eq!(error.path.as_deref(), Some("inputs[2].key"));
}

#[test]
fn test_budget_profiles() {
    let keys = numbered_keys(30);
    let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    let vm = make_vm(&refs);
    assert!(!validate_document_with_budget(&vm, &DocumentBudget::strict()).is_ok());
    assert!(validate_document_with_budget(&vm, &DocumentBudget::festival()).is_ok());
}

// ========================================================================
// Project Tests
// ========================================================================

#[test]
fn test_generic_project() {
    let project = Project::generic("tour", "the-band", date());
    assert!(validate_project(&project).is_ok());
}

#[test]
fn test_blank_project_fields() {
    let project = Project::generic(" ", "", date());
    let result = validate_project(&project);
    let paths: Vec<Option<&str>> = result.errors.iter().map(|e| e.path.as_deref()).collect();
    assert_eq!(paths, vec![Some("id"), Some("bandRef")]);
    assert!(result
        .errors
        .iter()
        .all(|e| e.code == ErrorCode::MissingProjectField));
}

#[test]
fn test_event_details() {
    let mut project = Project::generic("gig", "the-band", date());
    project.purpose = Purpose::Event;
    let result = validate_project(&project);
    assert_eq!(result.errors.len(), 2);
    assert!(result
        .errors
        .iter()
        .all(|e| e.code == ErrorCode::MissingEventDetails));

    project.event_date = Some(date());
    project.event_venue = Some("Sono Centrum".to_string());
    assert!(validate_project(&project).is_ok());
}

// ========================================================================
// Setup Tests
// ========================================================================

#[test]
fn test_setups_within_budget() {
    let drums = setup(10, "wedge");
    let guitar = setup(4, "iem_stereo_wireless");
    let result = validate_effective_setups(
        &[(Group::Drums, &drums), (Group::Guitar, &guitar)],
        &DocumentBudget::default(),
    );
    assert!(result.is_ok());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_setup_input_budget() {
    let drums = setup(20, "wedge");
    let keys = setup(11, "wedge");
    let result = validate_effective_setups(
        &[(Group::Drums, &drums), (Group::Keys, &keys)],
        &DocumentBudget::default(),
    );
    assert_eq!(result.errors[0].code, ErrorCode::SetupInputBudgetExceeded);
    assert_eq!(
        result.errors[0].message,
        "Total input channels exceed limit: 31/30."
    );
}

#[test]
fn test_monitor_mix_limit_is_a_warning() {
    let iem = setup(1, "iem_stereo_wireless");
    let slots: Vec<(Group, &MusicianSetupPreset)> = (0..7).map(|_| (Group::Vocs, &iem)).collect();
    let result = validate_effective_setups(&slots, &DocumentBudget::default());
    assert!(result.is_ok());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].code, WarningCode::MonitorMixLimitExceeded);
    assert_eq!(
        result.warnings[0].message,
        "Total required monitor mixes (aux sends) exceed the configured limit (7 > 6)."
    );
}

#[test]
fn test_group_order() {
    let a = setup(1, "wedge");
    let result = validate_effective_setups(
        &[(Group::Keys, &a), (Group::Bass, &a)],
        &DocumentBudget::default(),
    );
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, ErrorCode::GroupOrderViolation);
    assert_eq!(
        result.errors[0].message,
        "Group order must stay fixed: drums, bass, guitar, keys, vocs, talkback."
    );
}

#[test]
fn test_required_monitor_mixes() {
    assert_eq!(required_monitor_mix_count(&setup(0, "wedge")), 0);
    assert_eq!(required_monitor_mix_count(&setup(0, "iem_mono_wired")), 1);
}
