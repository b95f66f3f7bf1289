//! Preset entities, input channels and per-musician setups.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::group::Group;
use crate::error::StageplanError;

/// Monitor reference used when nothing else is configured.
pub const WEDGE_MONITOR_REF: &str = "wedge";

/// Legacy or ambiguous preset ids mapped to their canonical id.
pub const PRESET_ID_ALIASES: &[(&str, &str)] = &[("el_bass_xlr", "el_bass_xlr_amp")];

/// Translates a preset id through [`PRESET_ID_ALIASES`].
pub fn resolve_preset_id_alias(id: &str) -> &str {
    PRESET_ID_ALIASES
        .iter()
        .find(|(alias, _)| *alias == id)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(id)
}

/// One physical input channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputChannel {
    /// Stable identifier, unique in the final input list.
    pub key: String,
    pub label: String,
    /// Missing groups are inherited from the lineup slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl InputChannel {
    pub fn new(key: impl Into<String>, label: impl Into<String>, group: Group) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            group: Some(group),
            note: None,
        }
    }

    /// Channel without a declared group.
    pub fn ungrouped(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            group: None,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Fills in the group when the channel does not declare one.
    pub fn with_default_group(mut self, group: Group) -> Self {
        self.group.get_or_insert(group);
        self
    }
}

/// Input preset: a reusable bundle of channels for one setup variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPreset {
    pub id: String,
    pub label: String,
    pub group: Group,
    /// Presets sharing a setup group are mutually exclusive variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_group: Option<String>,
    #[serde(default)]
    pub inputs: Vec<InputChannel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorMode {
    Mono,
    Stereo,
}

/// Kind of monitoring shown in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorKind {
    Iem,
    Wedge,
}

/// Monitor preset: an in-ear or wedge monitoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorPreset {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<MonitorMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wireless: Option<bool>,
}

impl MonitorPreset {
    /// Built-in wedge monitor used when the library does not define one.
    pub fn builtin_wedge() -> &'static MonitorPreset {
        static WEDGE: OnceLock<MonitorPreset> = OnceLock::new();
        WEDGE.get_or_init(|| MonitorPreset {
            id: WEDGE_MONITOR_REF.to_string(),
            label: "Wedge".to_string(),
            mode: Some(MonitorMode::Mono),
            wireless: Some(false),
        })
    }

    /// Wireless or `iem*` monitors are in-ear, everything else is a wedge.
    pub fn kind(&self) -> MonitorKind {
        if self.wireless == Some(true) || self.id.starts_with("iem") {
            MonitorKind::Iem
        } else {
            MonitorKind::Wedge
        }
    }
}

/// Entity stored in the preset library, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresetEntity {
    #[serde(alias = "kit", alias = "feature")]
    Preset(InputPreset),
    Monitor(MonitorPreset),
}

impl PresetEntity {
    /// Parses a preset entity from JSON.
    pub fn from_json(json: &str) -> Result<Self, StageplanError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn id(&self) -> &str {
        match self {
            PresetEntity::Preset(p) => &p.id,
            PresetEntity::Monitor(m) => &m.id,
        }
    }

    /// Serialized type tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            PresetEntity::Preset(_) => "preset",
            PresetEntity::Monitor(_) => "monitor",
        }
    }
}

/// Monitoring slot of an effective setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringSetup {
    pub monitor_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_wedge_count: Option<u32>,
}

impl MonitoringSetup {
    pub fn new(monitor_ref: impl Into<String>) -> Self {
        Self {
            monitor_ref: monitor_ref.into(),
            additional_wedge_count: None,
        }
    }

    /// Extra wedge count, zero when absent.
    pub fn wedge_count(&self) -> u32 {
        self.additional_wedge_count.unwrap_or(0)
    }
}

impl Default for MonitoringSetup {
    fn default() -> Self {
        Self::new(WEDGE_MONITOR_REF)
    }
}

/// Effective per-musician preset: ordered inputs plus monitoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicianSetupPreset {
    pub inputs: Vec<InputChannel>,
    pub monitoring: MonitoringSetup,
}

/// Static per-musician defaults used when preset refs produce nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicianDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<InputChannel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<MonitoringSetup>,
}

/// In-place replacement of one input by another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputReplacement {
    pub target_key: String,
    pub with: InputChannel,
}

/// Field-level update of an existing input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputUpdate {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
}

/// Input part of an override patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputsPatch {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<InputChannel>,
    /// Alias of `remove_keys`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replace: Vec<InputReplacement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub update: Vec<InputUpdate>,
}

impl InputsPatch {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty()
            && self.remove.is_empty()
            && self.remove_keys.is_empty()
            && self.replace.is_empty()
            && self.update.is_empty()
    }

    /// Keys removed through either `remove` or `removeKeys`.
    pub fn removed_keys(&self) -> impl Iterator<Item = &str> {
        self.remove
            .iter()
            .chain(self.remove_keys.iter())
            .map(String::as_str)
    }
}

/// Monitoring part of an override patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_ref: Option<String>,
    /// Values of zero or below mean no extra wedges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_wedge_count: Option<i64>,
}

/// Sparse change to a musician's default preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetOverridePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<InputsPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<MonitoringPatch>,
}

impl PresetOverridePatch {
    /// Parses a patch from JSON.
    pub fn from_json(json: &str) -> Result<Self, StageplanError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Patch that only adds inputs.
    pub fn adding(inputs: Vec<InputChannel>) -> Self {
        Self {
            inputs: Some(InputsPatch {
                add: inputs,
                ..Default::default()
            }),
            monitoring: None,
        }
    }

    /// Patch that only removes input keys.
    pub fn removing<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: Some(InputsPatch {
                remove_keys: keys.into_iter().map(Into::into).collect(),
                ..Default::default()
            }),
            monitoring: None,
        }
    }

    /// Patch that only changes monitoring.
    pub fn monitoring(monitor_ref: Option<&str>, additional_wedge_count: Option<i64>) -> Self {
        Self {
            inputs: None,
            monitoring: Some(MonitoringPatch {
                monitor_ref: monitor_ref.map(str::to_string),
                additional_wedge_count,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_resolution() {
        assert_eq!(resolve_preset_id_alias("el_bass_xlr"), "el_bass_xlr_amp");
        assert_eq!(resolve_preset_id_alias("el_bass_mic"), "el_bass_mic");
    }

    #[test]
    fn test_parse_preset_entities() {
        let preset = PresetEntity::from_json(
            r#"{
                "type": "preset",
                "id": "el_bass_xlr_amp",
                "label": "Electric bass guitar",
                "group": "bass",
                "setupGroup": "electric_bass",
                "inputs": [{ "key": "el_bass_xlr_amp", "label": "Bass XLR", "note": "DI out" }]
            }"#,
        )
        .unwrap();
        match &preset {
            PresetEntity::Preset(p) => {
                assert_eq!(p.setup_group.as_deref(), Some("electric_bass"));
                assert_eq!(p.inputs[0].group, None);
                assert_eq!(p.inputs[0].note.as_deref(), Some("DI out"));
            }
            other => panic!("expected preset, got {:?}", other),
        }

        let kit = PresetEntity::from_json(
            r#"{ "type": "kit", "id": "standard_9", "label": "Drums", "group": "drums", "inputs": [] }"#,
        )
        .unwrap();
        assert_eq!(kit.type_name(), "preset");

        let monitor = PresetEntity::from_json(
            r#"{ "type": "monitor", "id": "iem_stereo_wireless", "label": "IEM STEREO wireless", "mode": "stereo", "wireless": true }"#,
        )
        .unwrap();
        assert_eq!(monitor.id(), "iem_stereo_wireless");
        assert_eq!(monitor.type_name(), "monitor");
    }

    #[test]
    fn test_monitor_kind() {
        assert_eq!(MonitorPreset::builtin_wedge().kind(), MonitorKind::Wedge);
        let wired = MonitorPreset {
            id: "iem_mono_wired".to_string(),
            label: "IEM MONO wired".to_string(),
            mode: Some(MonitorMode::Mono),
            wireless: None,
        };
        assert_eq!(wired.kind(), MonitorKind::Iem);
    }

    #[test]
    fn test_parse_override_patch() {
        let patch = PresetOverridePatch::from_json(
            r#"{
                "inputs": {
                    "removeKeys": ["el_bass_mic"],
                    "replace": [{ "targetKey": "el_bass_xlr_amp", "with": { "key": "el_bass_xlr_pedalboard", "label": "Bass pedalboard" } }],
                    "update": [{ "key": "bass_synth", "note": "stereo DI" }]
                },
                "monitoring": { "additionalWedgeCount": 2 }
            }"#,
        )
        .unwrap();
        let inputs = patch.inputs.as_ref().unwrap();
        assert_eq!(inputs.removed_keys().collect::<Vec<_>>(), vec!["el_bass_mic"]);
        assert_eq!(inputs.replace[0].target_key, "el_bass_xlr_amp");
        assert_eq!(inputs.update[0].note.as_deref(), Some("stereo DI"));
        assert_eq!(
            patch.monitoring.as_ref().unwrap().additional_wedge_count,
            Some(2)
        );
    }

    #[test]
    fn test_default_group_only_fills_missing() {
        let grouped = InputChannel::new("ac_guitar", "Acoustic guitar", Group::Guitar)
            .with_default_group(Group::Vocs);
        assert_eq!(grouped.group, Some(Group::Guitar));
        let ungrouped = InputChannel::ungrouped("voc_lead", "Lead vocal").with_default_group(Group::Vocs);
        assert_eq!(ungrouped.group, Some(Group::Vocs));
    }
}
