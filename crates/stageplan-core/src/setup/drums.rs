//! Parametric drum kits.
//!
//! A [`DrumSetup`] describes a kit by counts and switches; the catalog turns
//! it into concrete drum input channels with microphone notes.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::overrides::build_inputs_patch_from_target;
use crate::error::StageplanError;
use crate::model::{Group, InputChannel, MusicianSetupPreset, PresetOverridePatch};

pub const MAX_TOM_COUNT: u32 = 4;
pub const MAX_FLOOR_TOM_COUNT: u32 = 4;
pub const MAX_EXTRA_SNARE_COUNT: u32 = 2;

/// Rank of drum keys missing from [`DRUM_KEY_ORDER`].
pub const UNKNOWN_DRUM_RANK: usize = 500;

/// Canonical drum input order.
pub const DRUM_KEY_ORDER: &[&str] = &[
    "dr_kick_out",
    "dr_kick_in",
    "dr_snare1_top",
    "dr_snare1_bottom",
    "dr_hihat",
    "dr_tom_1",
    "dr_tom_2",
    "dr_tom_3",
    "dr_tom_4",
    "dr_floor_1",
    "dr_floor_2",
    "dr_floor_3",
    "dr_floor_4",
    "dr_oh_l",
    "dr_oh_r",
    "dr_snare2_top",
    "dr_snare3_top",
    "dr_pad_mono_sfx",
    "dr_pad_mono_backing",
    "dr_pad_stereo_sfx_l",
    "dr_pad_stereo_sfx_r",
    "dr_pad_stereo_backing_l",
    "dr_pad_stereo_backing_r",
];

/// Keys used by older kit presets, ranked like their catalog counterpart.
const LEGACY_DRUM_KEYS: &[(&str, &str)] = &[
    ("dr_snare_top", "dr_snare1_top"),
    ("dr_snare_bottom", "dr_snare1_bottom"),
    ("dr_floor_tom", "dr_floor_1"),
    ("dr_snare_2_top", "dr_snare2_top"),
    ("dr_pad", "dr_pad_mono_sfx"),
    ("dr_pad_l", "dr_pad_stereo_sfx_l"),
    ("dr_pad_r", "dr_pad_stereo_sfx_r"),
];

const LEGACY_DRUM_PRESET_REFS: &[&str] = &[
    "standard_9",
    "standard_10",
    "sample_pad_mono",
    "sample_pad_stereo",
    "snare_2",
    "effect_snare",
];

const NOTE_KICK_OUT: &str = "Beta 52A / SE V Kick / e602 / D6 / D112 – kick mic stand";
const NOTE_KICK_IN: &str = "TG D71 / SE BL8 / Beta 91A";
const NOTE_SNARE_TOP: &str = "SM57 / Beta 57A / i5 / TG D57 – small boom mic stand";
const NOTE_SNARE_BOTTOM: &str = "e904 / e604 (alt. SM57 / Beta 57A) – small boom mic stand";
const NOTE_HIHAT: &str = "Condenser mic – small boom mic stand";
const NOTE_TOM: &str = "e904 / e604 / D2";
const NOTE_FLOOR_TOM: &str = "e904 / e604 / D4 (alt. D112)";
const NOTE_OVERHEAD: &str = "Condenser mic – boom mic stand";
const NOTE_SNARE_EXTRA: &str = "SM57 / Beta 57A / i5 – small boom mic stand";
const NOTE_PAD: &str = "TS jack 6.3mm – DI box";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadMode {
    Sfx,
    Backing,
}

impl PadMode {
    fn as_str(&self) -> &'static str {
        match self {
            PadMode::Sfx => "sfx",
            PadMode::Backing => "backing",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PadMode::Sfx => "SFX",
            PadMode::Backing => "BACKING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadChannels {
    Mono,
    Stereo,
}

/// Sample pad switch. Mode and channels are required when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrumPad {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<PadMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<PadChannels>,
}

impl DrumPad {
    pub const DISABLED: DrumPad = DrumPad {
        enabled: false,
        mode: None,
        channels: None,
    };

    pub const fn enabled(mode: PadMode, channels: PadChannels) -> Self {
        Self {
            enabled: true,
            mode: Some(mode),
            channels: Some(channels),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrumSetup {
    pub tom_count: u32,
    pub floor_tom_count: u32,
    pub has_hi_hat: bool,
    pub has_overheads: bool,
    pub extra_snare_count: u32,
    pub pad: DrumPad,
}

pub const STANDARD_9_SETUP: DrumSetup = DrumSetup {
    tom_count: 1,
    floor_tom_count: 1,
    has_hi_hat: true,
    has_overheads: true,
    extra_snare_count: 0,
    pad: DrumPad::DISABLED,
};

pub const STANDARD_10_SETUP: DrumSetup = DrumSetup {
    tom_count: 2,
    floor_tom_count: 1,
    has_hi_hat: true,
    has_overheads: true,
    extra_snare_count: 0,
    pad: DrumPad::DISABLED,
};

impl Default for DrumSetup {
    fn default() -> Self {
        STANDARD_9_SETUP
    }
}

/// Sparse edit of a drum setup. Counts are clamped into range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrumControlsPatch {
    pub tom_count: Option<i64>,
    pub floor_tom_count: Option<i64>,
    pub has_hi_hat: Option<bool>,
    pub has_overheads: Option<bool>,
    pub extra_snare_count: Option<i64>,
    pub pad_enabled: Option<bool>,
    pub pad_mode: Option<PadMode>,
    pub pad_channels: Option<PadChannels>,
}

fn clamp_count(value: i64, max: u32) -> u32 {
    value.clamp(0, i64::from(max)) as u32
}

/// Applies UI controls to a setup, clamping counts into their valid range.
pub fn apply_drum_controls(setup: &DrumSetup, patch: &DrumControlsPatch) -> DrumSetup {
    let pad_enabled = patch.pad_enabled.unwrap_or(setup.pad.enabled);
    let current_mode = if setup.pad.enabled { setup.pad.mode } else { None };
    let current_channels = if setup.pad.enabled {
        setup.pad.channels
    } else {
        None
    };

    DrumSetup {
        tom_count: clamp_count(
            patch.tom_count.unwrap_or(i64::from(setup.tom_count)),
            MAX_TOM_COUNT,
        ),
        floor_tom_count: clamp_count(
            patch
                .floor_tom_count
                .unwrap_or(i64::from(setup.floor_tom_count)),
            MAX_FLOOR_TOM_COUNT,
        ),
        has_hi_hat: patch.has_hi_hat.unwrap_or(setup.has_hi_hat),
        has_overheads: patch.has_overheads.unwrap_or(setup.has_overheads),
        extra_snare_count: clamp_count(
            patch
                .extra_snare_count
                .unwrap_or(i64::from(setup.extra_snare_count)),
            MAX_EXTRA_SNARE_COUNT,
        ),
        pad: if pad_enabled {
            DrumPad::enabled(
                patch.pad_mode.or(current_mode).unwrap_or(PadMode::Sfx),
                patch
                    .pad_channels
                    .or(current_channels)
                    .unwrap_or(PadChannels::Mono),
            )
        } else {
            DrumPad::DISABLED
        },
    }
}

/// Range and consistency errors of a setup; empty when valid.
pub fn validate_drum_setup(setup: &DrumSetup) -> Vec<String> {
    let mut errors = Vec::new();
    if setup.tom_count > MAX_TOM_COUNT {
        errors.push("tomCount must be an integer between 0 and 4.".to_string());
    }
    if setup.floor_tom_count > MAX_FLOOR_TOM_COUNT {
        errors.push("floorTomCount must be an integer between 0 and 4.".to_string());
    }
    if setup.extra_snare_count > MAX_EXTRA_SNARE_COUNT {
        errors.push("extraSnareCount must be an integer between 0 and 2.".to_string());
    }
    if setup.pad.enabled && (setup.pad.mode.is_none() || setup.pad.channels.is_none()) {
        errors.push("pad.mode and pad.channels are required when pad is enabled.".to_string());
    }
    errors
}

fn entry(key: impl Into<String>, label: impl Into<String>, note: &str) -> InputChannel {
    InputChannel::new(key, label, Group::Drums).with_note(note)
}

/// Drum channels of a setup in catalog order. Does not validate.
pub fn drum_catalog_for_setup(setup: &DrumSetup) -> Vec<InputChannel> {
    let mut entries = vec![
        entry("dr_kick_out", "Kick OUT", NOTE_KICK_OUT),
        entry("dr_kick_in", "Kick IN", NOTE_KICK_IN),
        entry("dr_snare1_top", "Snare 1 TOP", NOTE_SNARE_TOP),
        entry("dr_snare1_bottom", "Snare 1 BOTTOM", NOTE_SNARE_BOTTOM),
    ];

    if setup.has_hi_hat {
        entries.push(entry("dr_hihat", "Hi-hat", NOTE_HIHAT));
    }
    for i in 1..=setup.tom_count {
        entries.push(entry(format!("dr_tom_{}", i), format!("Tom {}", i), NOTE_TOM));
    }
    for i in 1..=setup.floor_tom_count {
        entries.push(entry(
            format!("dr_floor_{}", i),
            format!("Floor {}", i),
            NOTE_FLOOR_TOM,
        ));
    }
    if setup.has_overheads {
        entries.push(entry("dr_oh_l", "OH L", NOTE_OVERHEAD));
        entries.push(entry("dr_oh_r", "OH R", NOTE_OVERHEAD));
    }
    for snare in 2..2 + setup.extra_snare_count {
        entries.push(entry(
            format!("dr_snare{}_top", snare),
            format!("Snare {} TOP", snare),
            NOTE_SNARE_EXTRA,
        ));
    }

    if let (true, Some(mode), Some(channels)) =
        (setup.pad.enabled, setup.pad.mode, setup.pad.channels)
    {
        match channels {
            PadChannels::Mono => entries.push(entry(
                format!("dr_pad_mono_{}", mode.as_str()),
                format!("PAD ({}, mono)", mode.label()),
                NOTE_PAD,
            )),
            PadChannels::Stereo => {
                for side in ["L", "R"] {
                    entries.push(entry(
                        format!("dr_pad_stereo_{}_{}", mode.as_str(), side.to_lowercase()),
                        format!("PAD {} ({}, stereo)", side, mode.label()),
                        NOTE_PAD,
                    ));
                }
            }
        }
    }

    entries
}

/// Validated drum channels of a setup.
pub fn resolve_drum_inputs(setup: &DrumSetup) -> Result<Vec<InputChannel>, StageplanError> {
    let errors = validate_drum_setup(setup);
    if !errors.is_empty() {
        return Err(StageplanError::InvalidDrumSetup(errors));
    }
    Ok(drum_catalog_for_setup(setup))
}

/// Position of a drum key in the canonical order; legacy keys rank like
/// their catalog counterpart, unknown keys rank [`UNKNOWN_DRUM_RANK`].
pub fn drum_rank_by_key(key: &str) -> usize {
    let lower = key.to_ascii_lowercase();
    let canonical = LEGACY_DRUM_KEYS
        .iter()
        .find(|(legacy, _)| *legacy == lower)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(lower.as_str());
    DRUM_KEY_ORDER
        .iter()
        .position(|k| *k == canonical)
        .unwrap_or(UNKNOWN_DRUM_RANK)
}

/// Reconstructs a setup from existing drum channels.
pub fn infer_drum_setup_from_inputs(inputs: &[InputChannel]) -> DrumSetup {
    let has = |key: &str| inputs.iter().any(|i| i.key == key);
    let count = |keys: &[&str]| keys.iter().filter(|k| has(**k)).count() as u32;

    let tom_count = count(&["dr_tom_1", "dr_tom_2", "dr_tom_3", "dr_tom_4"]);
    let floor_tom_count = count(&[
        "dr_floor_1",
        "dr_floor_2",
        "dr_floor_3",
        "dr_floor_4",
        "dr_floor_tom",
    ]);
    let extra_snare_count = count(&["dr_snare2_top", "dr_snare3_top", "dr_snare_2_top"]);

    let pad = if (has("dr_pad_l") && has("dr_pad_r"))
        || (has("dr_pad_stereo_sfx_l") && has("dr_pad_stereo_sfx_r"))
    {
        DrumPad::enabled(PadMode::Sfx, PadChannels::Stereo)
    } else if has("dr_pad_stereo_backing_l") && has("dr_pad_stereo_backing_r") {
        DrumPad::enabled(PadMode::Backing, PadChannels::Stereo)
    } else if has("dr_pad") || has("dr_pad_mono_sfx") {
        DrumPad::enabled(PadMode::Sfx, PadChannels::Mono)
    } else if has("dr_pad_mono_backing") {
        DrumPad::enabled(PadMode::Backing, PadChannels::Mono)
    } else {
        DrumPad::DISABLED
    };

    DrumSetup {
        tom_count: tom_count.min(MAX_TOM_COUNT),
        floor_tom_count: floor_tom_count.min(MAX_FLOOR_TOM_COUNT),
        has_hi_hat: has("dr_hihat"),
        has_overheads: has("dr_oh_l") && has("dr_oh_r"),
        extra_snare_count: extra_snare_count.min(MAX_EXTRA_SNARE_COUNT),
        pad,
    }
}

/// Maps legacy kit preset refs onto a setup, starting from `standard_9`.
pub fn migrate_legacy_drum_preset_refs<S: AsRef<str>>(refs: &[S]) -> DrumSetup {
    let mut setup = STANDARD_9_SETUP;
    let mut matched_any = false;

    for reference in refs.iter().map(AsRef::as_ref) {
        if !LEGACY_DRUM_PRESET_REFS.contains(&reference) {
            continue;
        }
        matched_any = true;
        match reference {
            "standard_10" => setup = STANDARD_10_SETUP,
            "standard_9" => setup = STANDARD_9_SETUP,
            "sample_pad_mono" => setup.pad = DrumPad::enabled(PadMode::Sfx, PadChannels::Mono),
            "sample_pad_stereo" => {
                setup.pad = DrumPad::enabled(PadMode::Sfx, PadChannels::Stereo)
            }
            _ => setup.extra_snare_count = setup.extra_snare_count.max(1),
        }
    }

    if !matched_any {
        warn!("unknown legacy drum configuration, falling back to standard_9 setup");
    }
    setup
}

/// Patch turning a drummer's default preset into the given kit. Non-drum
/// channels of the default are kept.
pub fn drum_setup_override_patch(
    default: &MusicianSetupPreset,
    setup: &DrumSetup,
) -> Result<PresetOverridePatch, StageplanError> {
    let mut target = resolve_drum_inputs(setup)?;
    target.extend(
        default
            .inputs
            .iter()
            .filter(|i| i.group != Some(Group::Drums))
            .cloned(),
    );
    let inputs = build_inputs_patch_from_target(&default.inputs, &target);
    Ok(PresetOverridePatch {
        inputs: (!inputs.is_empty()).then_some(inputs),
        monitoring: None,
    })
}
