//! Lineup values as written in band and project records, and the resolved
//! per-group lineup table.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::group::{Group, GROUP_ORDER};
use super::preset::PresetOverridePatch;

/// A musician assignment carrying an optional preset override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedSlot {
    pub musician_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_override: Option<PresetOverridePatch>,
}

/// One lineup slot: a bare musician id or an assignment object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Id(String),
    Assigned(AssignedSlot),
}

impl SlotValue {
    /// Trimmed musician id, `None` when blank.
    pub fn musician_id(&self) -> Option<&str> {
        let raw = match self {
            SlotValue::Id(id) => id,
            SlotValue::Assigned(slot) => &slot.musician_id,
        };
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn preset_override(&self) -> Option<&PresetOverridePatch> {
        match self {
            SlotValue::Id(_) => None,
            SlotValue::Assigned(slot) => slot.preset_override.as_ref(),
        }
    }
}

/// Lineup entry for one group: a single slot or a list of slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineupValue {
    Many(Vec<SlotValue>),
    One(SlotValue),
}

impl LineupValue {
    /// Single bare musician id.
    pub fn id(id: impl Into<String>) -> Self {
        LineupValue::One(SlotValue::Id(id.into()))
    }

    /// List of bare musician ids.
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LineupValue::Many(ids.into_iter().map(|id| SlotValue::Id(id.into())).collect())
    }

    /// Single musician with a preset override.
    pub fn assigned(id: impl Into<String>, preset_override: PresetOverridePatch) -> Self {
        LineupValue::One(SlotValue::Assigned(AssignedSlot {
            musician_id: id.into(),
            preset_override: Some(preset_override),
        }))
    }

    /// Slots with a non-blank musician id, in declaration order.
    pub fn slots(&self) -> Vec<&SlotValue> {
        let all: Vec<&SlotValue> = match self {
            LineupValue::Many(slots) => slots.iter().collect(),
            LineupValue::One(slot) => vec![slot],
        };
        all.into_iter()
            .filter(|slot| slot.musician_id().is_some())
            .collect()
    }

    /// Non-blank musician ids, in declaration order.
    pub fn musician_ids(&self) -> Vec<&str> {
        self.slots()
            .into_iter()
            .filter_map(SlotValue::musician_id)
            .collect()
    }
}

/// Resolved lineup: every group mapped to its ordered musician ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lineup {
    slots: BTreeMap<Group, Vec<String>>,
}

impl Default for Lineup {
    fn default() -> Self {
        Self {
            slots: GROUP_ORDER.iter().map(|g| (*g, Vec::new())).collect(),
        }
    }
}

impl Lineup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the musician ids of a group.
    pub fn set(&mut self, group: Group, ids: Vec<String>) {
        self.slots.insert(group, ids);
    }

    /// Musician ids assigned to a group.
    pub fn ids(&self, group: Group) -> &[String] {
        self.slots.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First musician id assigned to a group.
    pub fn first(&self, group: Group) -> Option<&str> {
        self.ids(group).first().map(String::as_str)
    }

    /// Groups with their ids, in canonical group order.
    pub fn iter(&self) -> impl Iterator<Item = (Group, &[String])> {
        GROUP_ORDER.iter().map(move |g| (*g, self.ids(*g)))
    }

    /// Group of the first slot holding this musician.
    pub fn group_of(&self, musician_id: &str) -> Option<Group> {
        self.iter()
            .find(|(_, ids)| ids.iter().any(|id| id == musician_id))
            .map(|(group, _)| group)
    }

    pub fn contains(&self, musician_id: &str) -> bool {
        self.group_of(musician_id).is_some()
    }

    /// All assignments as (group, musician id), in lineup order.
    pub fn assignments(&self) -> Vec<(Group, &str)> {
        self.iter()
            .flat_map(|(group, ids)| ids.iter().map(move |id| (group, id.as_str())))
            .collect()
    }

    /// Assignments with every musician listed once, under the first group
    /// that holds them.
    pub fn primary_assignments(&self) -> Vec<(Group, &str)> {
        let mut seen = BTreeSet::new();
        self.assignments()
            .into_iter()
            .filter(|(_, id)| seen.insert(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lineup_value_shapes() {
        let single: LineupValue = serde_json::from_str(r#""pavel""#).unwrap();
        assert_eq!(single.musician_ids(), vec!["pavel"]);

        let many: LineupValue = serde_json::from_str(r#"["eliska", " ", "jana"]"#).unwrap();
        assert_eq!(many.musician_ids(), vec!["eliska", "jana"]);

        let assigned: LineupValue = serde_json::from_str(
            r#"{ "musicianId": " tomas ", "presetOverride": { "monitoring": { "monitorRef": "iem_stereo_wired" } } }"#,
        )
        .unwrap();
        assert_eq!(assigned.musician_ids(), vec!["tomas"]);
        assert!(assigned.slots()[0].preset_override().is_some());

        let mixed: LineupValue =
            serde_json::from_str(r#"["eliska", { "musicianId": "jana" }]"#).unwrap();
        assert_eq!(mixed.musician_ids(), vec!["eliska", "jana"]);
    }

    #[test]
    fn test_blank_ids_are_dropped() {
        let blank = LineupValue::id("   ");
        assert!(blank.slots().is_empty());
    }

    #[test]
    fn test_lineup_table() {
        let mut lineup = Lineup::new();
        lineup.set(Group::Vocs, vec!["eliska".to_string(), "jana".to_string()]);
        lineup.set(Group::Drums, vec!["tomas".to_string()]);

        assert_eq!(lineup.first(Group::Vocs), Some("eliska"));
        assert_eq!(lineup.first(Group::Keys), None);
        assert_eq!(lineup.group_of("jana"), Some(Group::Vocs));
        assert_eq!(
            lineup.assignments(),
            vec![
                (Group::Drums, "tomas"),
                (Group::Vocs, "eliska"),
                (Group::Vocs, "jana")
            ]
        );
    }

    #[test]
    fn test_primary_assignments_list_each_musician_once() {
        let mut lineup = Lineup::new();
        lineup.set(Group::Drums, vec!["pavel".to_string()]);
        lineup.set(Group::Vocs, vec!["eliska".to_string(), "pavel".to_string()]);

        assert_eq!(lineup.assignments().len(), 3);
        assert_eq!(
            lineup.primary_assignments(),
            vec![(Group::Drums, "pavel"), (Group::Vocs, "eliska")]
        );
    }
}
