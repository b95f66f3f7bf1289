//! Effective lineup of a project: project slots over band defaults.

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{Group, Lineup, LineupValue, PresetOverridePatch, Project, GROUP_ORDER};

/// Lineup, per-musician override patches and talkback owner of a project.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EffectiveProjectState {
    pub effective_lineup: Lineup,
    pub preset_override_by_musician_id: BTreeMap<String, PresetOverridePatch>,
    pub effective_talkback_owner_id: String,
}

fn non_empty_slots(value: Option<&LineupValue>) -> Option<&LineupValue> {
    value.filter(|v| !v.musician_ids().is_empty())
}

/// Merges the project lineup over the band's default lineup.
///
/// A project entry replaces the band entry of its group as soon as it names
/// at least one musician. Override patches are collected from the slots that
/// ended up in use; a later slot for the same musician wins.
pub fn resolve_effective_project_state(
    project: &Project,
    band_default_lineup: &BTreeMap<Group, LineupValue>,
    band_leader_id: &str,
) -> EffectiveProjectState {
    let mut state = EffectiveProjectState::default();

    for group in GROUP_ORDER {
        let project_value = non_empty_slots(project.lineup_entry(group));
        let value = project_value.or_else(|| non_empty_slots(band_default_lineup.get(&group)));
        let Some(value) = value else {
            continue;
        };

        let mut ids = Vec::new();
        for slot in value.slots() {
            let Some(id) = slot.musician_id() else {
                continue;
            };
            if let Some(patch) = slot.preset_override() {
                state
                    .preset_override_by_musician_id
                    .insert(id.to_string(), patch.clone());
            }
            ids.push(id.to_string());
        }

        debug!(
            group = %group,
            from_project = project_value.is_some(),
            count = ids.len(),
            "resolved lineup slot"
        );
        state.effective_lineup.set(group, ids);
    }

    state.effective_talkback_owner_id = project
        .talkback_owner()
        .unwrap_or(band_leader_id)
        .to_string();
    state
}
