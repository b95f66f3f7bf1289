//! Per-input origin of an effective setup, for setup review screens.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::{MusicianSetupPreset, PresetOverridePatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffOrigin {
    Default,
    Override,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Removed,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDiff {
    pub key: String,
    pub label: String,
    pub origin: DiffOrigin,
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDiff {
    pub origin: DiffOrigin,
    pub change_type: ChangeType,
}

impl FieldDiff {
    fn from_override(overridden: bool) -> Self {
        if overridden {
            Self {
                origin: DiffOrigin::Override,
                change_type: ChangeType::Added,
            }
        } else {
            Self {
                origin: DiffOrigin::Default,
                change_type: ChangeType::Unchanged,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringDiff {
    pub monitor_ref: FieldDiff,
    pub additional_wedge_count: FieldDiff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupDiff {
    pub inputs: Vec<InputDiff>,
    pub monitoring: MonitoringDiff,
}

/// Marks every default input as unchanged or removed, then lists the inputs
/// the patch added.
pub fn compute_setup_diff(
    default: &MusicianSetupPreset,
    effective: &MusicianSetupPreset,
    patch: Option<&PresetOverridePatch>,
) -> SetupDiff {
    let inputs_patch = patch.and_then(|p| p.inputs.as_ref());
    let removed: BTreeSet<&str> = inputs_patch
        .map(|i| i.removed_keys().collect())
        .unwrap_or_default();
    let added: BTreeSet<&str> = inputs_patch
        .map(|i| i.add.iter().map(|a| a.key.as_str()).collect())
        .unwrap_or_default();
    let effective_by_key: BTreeMap<&str, &str> = effective
        .inputs
        .iter()
        .map(|i| (i.key.as_str(), i.label.as_str()))
        .collect();

    let mut inputs: Vec<InputDiff> = default
        .inputs
        .iter()
        .map(|item| {
            if removed.contains(item.key.as_str()) {
                InputDiff {
                    key: item.key.clone(),
                    label: item.label.clone(),
                    origin: DiffOrigin::Override,
                    change_type: ChangeType::Removed,
                }
            } else {
                let label = effective_by_key
                    .get(item.key.as_str())
                    .copied()
                    .unwrap_or(item.label.as_str());
                InputDiff {
                    key: item.key.clone(),
                    label: label.to_string(),
                    origin: DiffOrigin::Default,
                    change_type: ChangeType::Unchanged,
                }
            }
        })
        .collect();

    inputs.extend(
        effective
            .inputs
            .iter()
            .filter(|item| added.contains(item.key.as_str()))
            .map(|item| InputDiff {
                key: item.key.clone(),
                label: item.label.clone(),
                origin: DiffOrigin::Override,
                change_type: ChangeType::Added,
            }),
    );

    let monitoring_patch = patch.and_then(|p| p.monitoring.as_ref());
    SetupDiff {
        inputs,
        monitoring: MonitoringDiff {
            monitor_ref: FieldDiff::from_override(
                monitoring_patch.is_some_and(|m| m.monitor_ref.is_some()),
            ),
            additional_wedge_count: FieldDiff::from_override(
                monitoring_patch.is_some_and(|m| m.additional_wedge_count.is_some()),
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Group, InputChannel, MonitoringSetup};
    use crate::setup::overrides::apply_preset_override;

    #[test]
    fn test_diff_marks_removed_and_added() {
        let default = MusicianSetupPreset {
            inputs: vec![
                InputChannel::new("el_guitar_l", "Electric guitar L", Group::Guitar),
                InputChannel::new("el_guitar_r", "Electric guitar R", Group::Guitar),
            ],
            monitoring: MonitoringSetup::default(),
        };
        let mut patch = PresetOverridePatch::removing(["el_guitar_r"]);
        if let Some(inputs) = patch.inputs.as_mut() {
            inputs
                .add
                .push(InputChannel::new("ac_guitar", "Acoustic guitar", Group::Guitar));
        }
        patch.monitoring = Some(crate::model::MonitoringPatch {
            monitor_ref: Some("iem_mono_wired".to_string()),
            additional_wedge_count: None,
        });
        let effective = apply_preset_override(&default, Some(&patch)).unwrap();

        let diff = compute_setup_diff(&default, &effective, Some(&patch));
        let summary: Vec<(&str, ChangeType)> = diff
            .inputs
            .iter()
            .map(|d| (d.key.as_str(), d.change_type))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("el_guitar_l", ChangeType::Unchanged),
                ("el_guitar_r", ChangeType::Removed),
                ("ac_guitar", ChangeType::Added),
            ]
        );
        assert_eq!(diff.monitoring.monitor_ref.origin, DiffOrigin::Override);
        assert_eq!(
            diff.monitoring.additional_wedge_count.change_type,
            ChangeType::Unchanged
        );
    }

    #[test]
    fn test_diff_without_patch() {
        let default = MusicianSetupPreset {
            inputs: vec![InputChannel::new("keys_l", "Keys L", Group::Keys)],
            monitoring: MonitoringSetup::default(),
        };
        let diff = compute_setup_diff(&default, &default, None);
        assert_eq!(diff.inputs.len(), 1);
        assert_eq!(diff.inputs[0].origin, DiffOrigin::Default);
    }
}
