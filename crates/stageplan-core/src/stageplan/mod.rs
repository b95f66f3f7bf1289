//! Stage-plan resolution: who stands where, what they need, and which
//! inputs and monitor mixes belong to each box.

pub mod boxes;
pub mod lines;
pub mod person;
pub mod power;
pub mod role;

pub use boxes::{build_stageplan_boxes, StageplanBox, StageplanSlot, DRUM_RISER_BULLET};
pub use lines::{
    format_stageplan_base_label, format_stageplan_input_lines, StageplanLine, StageplanLineKind,
    StageplanTextLine,
};
pub use person::{resolve_stageplan_person, StageplanPerson};
pub use power::{resolve_power_for_stageplan, PowerBadge};
pub use role::{is_lead_vocal_label, resolve_monitor_instrument, resolve_stageplan_role_for_input};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assembly::NumberedInput;
use crate::format::{InputLike, MonitorTableRow};
use crate::model::{Group, StageplanRole};

/// A numbered input as listed on the stage plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageplanInput {
    pub channel_no: u32,
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
}

impl InputLike for StageplanInput {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn group(&self) -> Option<Group> {
        self.group
    }

    fn note(&self) -> Option<&str> {
        None
    }
}

/// Stage-plan inputs of a numbered list; spare channels are left out.
pub fn stageplan_inputs(numbered: &[NumberedInput]) -> Vec<StageplanInput> {
    numbered
        .iter()
        .filter(|n| !n.is_spare())
        .map(|n| StageplanInput {
            channel_no: n.ch,
            key: n.key.clone(),
            label: n.label.clone(),
            group: n.group,
        })
        .collect()
}

/// Stage-plan part of the document view model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageplanModel {
    pub lineup_by_role: BTreeMap<StageplanRole, StageplanPerson>,
    pub lead_vocals: Vec<StageplanPerson>,
    pub inputs: Vec<StageplanInput>,
    pub monitor_outputs: Vec<MonitorTableRow>,
    pub power_by_role: BTreeMap<StageplanRole, PowerBadge>,
    pub boxes: Vec<StageplanBox>,
}
