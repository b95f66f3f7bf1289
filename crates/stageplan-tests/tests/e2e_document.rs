//! End-to-End Document Tests
//!
//! Tests verify the full pipeline over the five-piece band fixture:
//! - Channel numbering with odd-start stereo pairs and spare channels
//! - Printable rows, monitor table and notes
//! - Stage-plan boxes, headers and power badges
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p stageplan-tests --test e2e_document
//! ```

use pretty_assertions::assert_eq;

use stageplan_core::format::MetaLine;
use stageplan_core::{
    build_document, DocumentViewModel, Group, LineupValue, MemoryLibrary, StageplanError,
};
use stageplan_tests::fixtures::{event_project, full_band_library, generic_project};

fn build() -> DocumentViewModel {
    build_document(&generic_project(), &full_band_library()).expect("document should build")
}

fn channel_list(vm: &DocumentViewModel) -> Vec<(u32, &str, &str)> {
    vm.inputs
        .iter()
        .map(|i| (i.ch, i.key.as_str(), i.label.as_str()))
        .collect()
}

fn stageplan_box<'a>(vm: &'a DocumentViewModel, slot: &str) -> &'a stageplan_core::stageplan::StageplanBox {
    vm.stageplan
        .boxes
        .iter()
        .find(|b| b.slot == slot)
        .unwrap_or_else(|| panic!("missing box {slot}"))
}

// ============================================================================
// Input List
// ============================================================================

#[test]
fn test_full_band_channel_list() {
    let vm = build();
    assert_eq!(
        channel_list(&vm),
        vec![
            (1, "dr_kick_in", "Kick IN"),
            (2, "dr_snare_top", "Snare top"),
            (3, "dr_hihat", "Hi-hat"),
            (4, "dr_tom_1", "Tom 1"),
            (5, "dr_floor_tom", "Floor tom"),
            (6, "dr_oh_l", "OH L"),
            (7, "dr_oh_r", "OH R"),
            (8, "el_bass_xlr_amp", "Bass XLR"),
            (9, "el_bass_mic", "Bass mic"),
            (10, "spare_ch_10", "---"),
            (11, "el_guitar_l", "Electric guitar L"),
            (12, "el_guitar_r", "Electric guitar R"),
            (13, "ac_guitar", "Acoustic guitar"),
            (14, "spare_ch_14", "---"),
            (15, "keys_l", "Keys"),
            (16, "keys_r", "Keys"),
            (17, "voc_back_guitar", "Back vocal - guitar"),
            (18, "voc_lead_1", "Lead vocal 1"),
            (19, "voc_lead_2", "Lead vocal 2"),
            (20, "tb_drums", "Talkback - Drums"),
        ]
    );
    assert_eq!(vm.inputs[19].group, Some(Group::Talkback));
}

#[test]
fn test_input_rows_merge_stereo_pairs() {
    let vm = build();
    let rows: Vec<(&str, &str)> = vm
        .input_rows
        .iter()
        .map(|r| (r.no.as_str(), r.label.as_str()))
        .collect();

    assert!(rows.contains(&("11+12", "Electric guitar")));
    assert!(rows.contains(&("15+16", "Keys")));
    // Overheads keep one row per channel.
    assert!(rows.contains(&("6", "OH L")));
    assert!(rows.contains(&("7", "OH R")));
    assert_eq!(rows.len(), 18);
}

#[test]
fn test_keys_are_unique() {
    let vm = build();
    let mut keys: Vec<&str> = vm.inputs.iter().map(|i| i.key.as_str()).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), vm.inputs.len());
}

#[test]
fn test_musician_in_two_slots_contributes_once() {
    let mut project = generic_project();
    project
        .lineup
        .insert("vocs".to_string(), LineupValue::ids(["eliska", "pavel"]));
    let vm = build_document(&project, &full_band_library()).unwrap();

    assert_eq!(
        channel_list(&vm),
        vec![
            (1, "dr_kick_in", "Kick IN"),
            (2, "dr_snare_top", "Snare top"),
            (3, "dr_hihat", "Hi-hat"),
            (4, "dr_tom_1", "Tom 1"),
            (5, "dr_floor_tom", "Floor tom"),
            (6, "dr_oh_l", "OH L"),
            (7, "dr_oh_r", "OH R"),
            (8, "el_bass_xlr_amp", "Bass XLR"),
            (9, "el_bass_mic", "Bass mic"),
            (10, "spare_ch_10", "---"),
            (11, "el_guitar_l", "Electric guitar L"),
            (12, "el_guitar_r", "Electric guitar R"),
            (13, "ac_guitar", "Acoustic guitar"),
            (14, "spare_ch_14", "---"),
            (15, "keys_l", "Keys"),
            (16, "keys_r", "Keys"),
            (17, "voc_back_guitar", "Back vocal - guitar"),
            (18, "voc_lead", "Lead vocal"),
            (19, "tb_drums", "Talkback - Drums"),
        ]
    );
    assert!(vm.inputs[..7].iter().all(|i| i.group == Some(Group::Drums)));
    assert_eq!(vm.monitors.iter().filter(|m| m.musician_id == "pavel").count(), 1);
    assert!(vm.warnings.is_empty());
}

// ============================================================================
// Monitors and Notes
// ============================================================================

#[test]
fn test_monitor_table() {
    let vm = build();
    let rows: Vec<(usize, &str, &str)> = vm
        .monitor_table_rows
        .iter()
        .map(|r| (r.no, r.output.as_str(), r.note.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "Guitar", "Wedge"),
            (2, "Lead vocal 1", "IEM STEREO wireless"),
            (3, "Lead vocal 2", "Wedge"),
            (4, "Keys", "IEM STEREO wireless"),
            (5, "Bass", "IEM STEREO wireless"),
            (6, "Drums", "Wedge + Additional wedge monitor 1x"),
        ]
    );
}

#[test]
fn test_notes_keep_wedge_lines() {
    let vm = build();
    assert_eq!(vm.notes.inputs.len(), 1);
    assert_eq!(vm.notes.monitors.len(), 1);
    assert_eq!(vm.notes.monitors[0].id, "wedges");
    assert!(vm.warnings.is_empty());
}

#[test]
fn test_meta_lines() {
    let vm = build();
    assert_eq!(
        vm.meta.meta_line,
        MetaLine::Plain {
            value: "Tour 2026 (datum aktualizace: 20. 2. 2026)".to_string()
        }
    );

    let vm = build_document(&event_project(), &full_band_library()).unwrap();
    assert_eq!(
        vm.meta.meta_line,
        MetaLine::Labeled {
            label: "Datum akce a místo konání:".to_string(),
            value: "7. 3. 2026, Sono Centrum (datum aktualizace: 20. 2. 2026)".to_string(),
        }
    );
}

// ============================================================================
// Stage Plan
// ============================================================================

#[test]
fn test_stageplan_boxes() {
    let vm = build();

    let drums = stageplan_box(&vm, "drums");
    assert_eq!(drums.header, "DRUMS – PAVEL (band leader)");
    assert_eq!(drums.input_bullets, vec!["Drums (1–7)"]);
    assert_eq!(
        drums.monitor_bullets,
        vec!["Wedge (6)", "+ Additional wedge monitor 1x"]
    );
    assert_eq!(drums.extra_bullets, vec!["Drum riser 3x2"]);

    let guitar = stageplan_box(&vm, "guitar");
    assert_eq!(guitar.header, "GUITAR – ONDRA");
    assert_eq!(
        guitar.input_bullets,
        vec![
            "Electric guitar (11+12)",
            "Acoustic guitar (13)",
            "Back vocal - guitar (17)",
        ]
    );

    assert_eq!(stageplan_box(&vm, "keys").input_bullets, vec!["Keys (15+16)"]);
    assert_eq!(
        stageplan_box(&vm, "bass").input_bullets,
        vec!["Bass XLR (8)", "Bass mic (9)"]
    );

    let lead_2 = stageplan_box(&vm, "lead_voc_2");
    assert_eq!(lead_2.header, "LEAD VOC – PETRA");
    assert_eq!(lead_2.input_bullets, vec!["Lead vocal 2 (19)"]);
    assert_eq!(lead_2.monitor_bullets, vec!["Wedge (3)"]);
}

#[test]
fn test_power_badges() {
    let vm = build();
    let badge = |slot: &str| {
        stageplan_box(&vm, slot)
            .power
            .as_ref()
            .map(|p| p.power_badge_text.clone())
    };
    assert_eq!(badge("drums").as_deref(), Some("3x 230 V"));
    assert_eq!(badge("bass").as_deref(), Some("2x 230 V"));
    assert_eq!(badge("keys"), None);
}

#[test]
fn test_stageplan_inputs_skip_spares() {
    let vm = build();
    assert_eq!(vm.stageplan.inputs.len(), 18);
    assert!(vm.stageplan.inputs.iter().all(|i| !i.key.starts_with("spare_ch_")));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_band_leader_is_fatal() {
    let mut library = full_band_library();
    let mut band = stageplan_core::Library::band(&library, "the-band")
        .unwrap()
        .clone();
    band.band_leader = "  ".to_string();
    library.insert_band(band);

    let err = build_document(&generic_project(), &library).unwrap_err();
    assert!(matches!(err, StageplanError::MissingBandLeader { band_id } if band_id == "the-band"));
}

#[test]
fn test_unknown_preset_is_fatal() {
    let json = stageplan_tests::fixtures::FULL_BAND_LIBRARY
        .replace(r#""ref": "keys_stereo""#, r#""ref": "keys_missing""#);
    let library = MemoryLibrary::from_json(&json).unwrap();
    let err = build_document(&generic_project(), &library).unwrap_err();
    assert!(matches!(
        err,
        StageplanError::UnknownPreset { reference } if reference == "keys_missing"
    ));
}
