//! Stage-plan boxes: one per instrument position.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::lines::{format_stageplan_input_lines, StageplanLine};
use super::person::StageplanPerson;
use super::power::PowerBadge;
use super::role::{resolve_monitor_instrument, resolve_stageplan_role_for_input};
use super::{StageplanInput, StageplanModel};
use crate::format::{format_monitor_bullets, format_stageplan_box_header, StageplanBoxHeader};
use crate::model::{Group, StageplanRole};

/// Extra bullet of the drums box.
pub const DRUM_RISER_BULLET: &str = "Drum riser 3x2";

const PAD_PATTERN: &str = r"(?i)pad";
const DUMMY_PATTERN: &str = r"(?i)dummy";
const BACK_VOCAL_DRUMS_PATTERN: &str = r"(?i)back vocal\s*[-–—]\s*drums";
const LEAD_NUMBER_PATTERN: &str = r"\b(\d+)\b";

fn compile(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("invalid regex pattern"))
}

fn is_pad(label: &str) -> bool {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compile(&CELL, PAD_PATTERN).is_match(label)
}

fn is_dummy(label: &str) -> bool {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compile(&CELL, DUMMY_PATTERN).is_match(label)
}

fn is_back_vocal_drums(label: &str) -> bool {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compile(&CELL, BACK_VOCAL_DRUMS_PATTERN).is_match(label)
}

/// Position of a box on the stage plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageplanSlot {
    Drums,
    Bass,
    Guitar,
    Keys,
    /// Lead vocal position, numbered from 1.
    LeadVocal(usize),
}

impl StageplanSlot {
    pub fn role(&self) -> StageplanRole {
        match self {
            StageplanSlot::Drums => StageplanRole::Drums,
            StageplanSlot::Bass => StageplanRole::Bass,
            StageplanSlot::Guitar => StageplanRole::Guitar,
            StageplanSlot::Keys => StageplanRole::Keys,
            StageplanSlot::LeadVocal(_) => StageplanRole::LeadVocal,
        }
    }

    fn for_role(role: StageplanRole, label: &str, lead_slots: usize) -> StageplanSlot {
        match role {
            StageplanRole::Drums => StageplanSlot::Drums,
            StageplanRole::Bass => StageplanSlot::Bass,
            StageplanRole::Guitar => StageplanSlot::Guitar,
            StageplanRole::Keys => StageplanSlot::Keys,
            StageplanRole::LeadVocal => StageplanSlot::LeadVocal(lead_slot_index(label, lead_slots)),
        }
    }
}

impl fmt::Display for StageplanSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageplanSlot::Drums => write!(f, "drums"),
            StageplanSlot::Bass => write!(f, "bass"),
            StageplanSlot::Guitar => write!(f, "guitar"),
            StageplanSlot::Keys => write!(f, "keys"),
            StageplanSlot::LeadVocal(n) => write!(f, "lead_voc_{}", n),
        }
    }
}

/// Lead position named by the number in a label such as `"Lead vocal 2"`;
/// position 1 when there is no usable number.
fn lead_slot_index(label: &str, lead_slots: usize) -> usize {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compile(&CELL, LEAD_NUMBER_PATTERN)
        .captures(label)
        .and_then(|caps| caps.get(1)?.as_str().parse::<usize>().ok())
        .filter(|n| (1..=lead_slots).contains(n))
        .unwrap_or(1)
}

/// A rendered stage-plan box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageplanBox {
    pub slot: String,
    pub role: StageplanRole,
    pub header: String,
    pub input_bullets: Vec<String>,
    pub monitor_bullets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_bullets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<PowerBadge>,
}

fn keys_rank(label: &str) -> u8 {
    let normalized = label.trim().to_lowercase();
    if normalized.starts_with("keys") {
        0
    } else if normalized.starts_with("synth (mono)") || normalized.starts_with("synth mono") {
        2
    } else if normalized.starts_with("synth") {
        1
    } else {
        3
    }
}

fn to_lines(inputs: &[&StageplanInput]) -> Vec<StageplanLine> {
    inputs
        .iter()
        .map(|i| StageplanLine::input(i.label.clone(), i.channel_no, i.group))
        .collect()
}

fn format_range(label: &str, inputs: &[&StageplanInput]) -> Option<String> {
    let min = inputs.iter().map(|i| i.channel_no).min()?;
    let max = inputs.iter().map(|i| i.channel_no).max()?;
    if min == max {
        Some(format!("{} ({})", label, min))
    } else {
        Some(format!("{} ({}–{})", label, min, max))
    }
}

fn drum_bullets(inputs: &[&StageplanInput]) -> Vec<String> {
    let pads: Vec<&StageplanInput> = inputs
        .iter()
        .copied()
        .filter(|i| is_pad(&i.label) && !is_dummy(&i.label))
        .collect();
    let back_vocals: Vec<&StageplanInput> = inputs
        .iter()
        .copied()
        .filter(|i| is_back_vocal_drums(&i.label))
        .collect();
    let drums: Vec<&StageplanInput> = inputs
        .iter()
        .copied()
        .filter(|i| {
            i.group == Some(Group::Drums)
                && !is_pad(&i.label)
                && !is_dummy(&i.label)
                && !is_back_vocal_drums(&i.label)
        })
        .collect();

    let mut bullets = Vec::new();
    bullets.extend(format_range("Drums", &drums));

    let collapsed = format_stageplan_input_lines(&to_lines(&pads));
    match collapsed.as_slice() {
        [single] if pads.len() == 2 => bullets.push(single.text.clone()),
        _ => bullets.extend(format_range("PAD", &pads)),
    }

    bullets.extend(
        back_vocals
            .iter()
            .map(|i| format!("{} ({})", i.label, i.channel_no)),
    );
    bullets
}

/// Builds the boxes of a stage plan.
///
/// There is one box per instrument and one lead vocal box per lead singer
/// (at least one). Inputs and monitor mixes are routed to boxes by role.
pub fn build_stageplan_boxes(model: &StageplanModel) -> Vec<StageplanBox> {
    let lead_slots = model.lead_vocals.len().max(1);
    let mut slots = vec![
        StageplanSlot::Drums,
        StageplanSlot::Bass,
        StageplanSlot::Guitar,
        StageplanSlot::Keys,
    ];
    slots.extend((1..=lead_slots).map(StageplanSlot::LeadVocal));

    let mut inputs_by_slot: BTreeMap<StageplanSlot, Vec<&StageplanInput>> = BTreeMap::new();
    for input in &model.inputs {
        if let Some(role) = resolve_stageplan_role_for_input(input) {
            let slot = StageplanSlot::for_role(role, &input.label, lead_slots);
            inputs_by_slot.entry(slot).or_default().push(input);
        }
    }

    let mut monitors_by_slot: BTreeMap<StageplanSlot, Vec<(usize, String)>> = BTreeMap::new();
    for row in &model.monitor_outputs {
        let Some(role) = resolve_monitor_instrument(&row.output) else {
            continue;
        };
        let slot = StageplanSlot::for_role(role, &row.output, lead_slots);
        let entry = monitors_by_slot.entry(slot).or_default();
        for bullet in format_monitor_bullets(&row.note, row.no) {
            entry.push((row.no, bullet));
        }
    }

    slots
        .into_iter()
        .map(|slot| {
            let role = slot.role();
            let fallback = StageplanPerson::default();
            let person = match slot {
                StageplanSlot::LeadVocal(n) => model
                    .lead_vocals
                    .get(n - 1)
                    .or_else(|| (n == 1).then(|| model.lineup_by_role.get(&role)).flatten())
                    .unwrap_or(&fallback),
                _ => model.lineup_by_role.get(&role).unwrap_or(&fallback),
            };
            let header = format_stageplan_box_header(&StageplanBoxHeader {
                instrument_label: role.label(),
                first_name: person.first_name.as_deref(),
                is_band_leader: person.is_band_leader,
            });

            let mut inputs = inputs_by_slot.remove(&slot).unwrap_or_default();
            if slot == StageplanSlot::Keys {
                inputs.sort_by_key(|i| (keys_rank(&i.label), i.channel_no));
            } else {
                inputs.sort_by_key(|i| i.channel_no);
            }
            let input_bullets = if slot == StageplanSlot::Drums {
                drum_bullets(&inputs)
            } else {
                format_stageplan_input_lines(&to_lines(&inputs))
                    .into_iter()
                    .map(|l| l.text)
                    .collect()
            };

            let mut monitors = monitors_by_slot.remove(&slot).unwrap_or_default();
            monitors.sort_by_key(|(no, _)| *no);

            StageplanBox {
                slot: slot.to_string(),
                role,
                header,
                input_bullets,
                monitor_bullets: monitors.into_iter().map(|(_, b)| b).collect(),
                extra_bullets: if slot == StageplanSlot::Drums {
                    vec![DRUM_RISER_BULLET.to_string()]
                } else {
                    Vec::new()
                },
                power: model.power_by_role.get(&role).cloned(),
            }
        })
        .collect()
}
