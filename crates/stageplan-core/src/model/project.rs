//! Project records: one document generation request.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::band::PowerRequirement;
use super::group::Group;
use super::lineup::LineupValue;
use crate::error::StageplanError;

/// Lineup key accepted as an alias of `vocs`; it wins when both are present.
pub const LEAD_VOCS_LINEUP_KEY: &str = "lead_vocs";

/// Purpose of the stage plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    /// One-off event, requires event date and venue.
    Event,
    /// Reusable document; the date is the last update.
    #[serde(alias = "general")]
    Generic,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStageplan {
    #[serde(default)]
    pub power_overrides_by_musician: BTreeMap<String, PowerRequirement>,
}

/// A project: band reference, dates and per-event overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub band_ref: String,
    pub purpose: Purpose,
    pub document_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Per-group lineup overrides, keyed by group name or `lead_vocs`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub lineup: BTreeMap<String, LineupValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band_leader_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talkback_owner_id: Option<String>,
    /// When non-empty, only these musicians keep back vocal presets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub back_vocal_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stageplan: Option<ProjectStageplan>,
}

impl Project {
    /// Parses a project from JSON.
    pub fn from_json(json: &str) -> Result<Self, StageplanError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Minimal generic project.
    pub fn generic(
        id: impl Into<String>,
        band_ref: impl Into<String>,
        document_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            band_ref: band_ref.into(),
            purpose: Purpose::Generic,
            document_date,
            event_date: None,
            event_venue: None,
            title: None,
            note: None,
            template: None,
            lineup: BTreeMap::new(),
            band_leader_id: None,
            talkback_owner_id: None,
            back_vocal_ids: Vec::new(),
            stageplan: None,
        }
    }

    /// Raw project lineup entry for a group.
    pub fn lineup_entry(&self, group: Group) -> Option<&LineupValue> {
        if group == Group::Vocs {
            if let Some(value) = self.lineup.get(LEAD_VOCS_LINEUP_KEY) {
                return Some(value);
            }
        }
        self.lineup.get(group.as_str())
    }

    /// Project-level power override for a musician.
    pub fn power_override(&self, musician_id: &str) -> Option<PowerRequirement> {
        self.stageplan
            .as_ref()
            .and_then(|s| s.power_overrides_by_musician.get(musician_id))
            .copied()
    }

    /// Trimmed band leader override, `None` when blank.
    pub fn band_leader_override(&self) -> Option<&str> {
        non_blank(self.band_leader_id.as_deref())
    }

    /// Trimmed talkback owner, `None` when blank.
    pub fn talkback_owner(&self) -> Option<&str> {
        non_blank(self.talkback_owner_id.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_project() {
        let json = r#"{
            "id": "2026-03-07-brno",
            "bandRef": "the-band",
            "purpose": "event",
            "eventDate": "2026-03-07",
            "eventVenue": "Sono Centrum",
            "documentDate": "2026-02-20",
            "lineup": {
                "lead_vocs": ["eliska"],
                "vocs": ["jana"],
                "keys": { "musicianId": "ondra", "presetOverride": { "inputs": { "removeKeys": ["synth"] } } }
            },
            "talkbackOwnerId": "  ",
            "stageplan": { "powerOverridesByMusician": { "tomas": { "voltage": 230, "sockets": 4 } } }
        }"#;
        let project = Project::from_json(json).unwrap();
        assert_eq!(project.purpose, Purpose::Event);
        assert_eq!(
            project.event_date,
            Some(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap())
        );
        assert_eq!(
            project.lineup_entry(Group::Vocs).unwrap().musician_ids(),
            vec!["eliska"]
        );
        assert_eq!(project.talkback_owner(), None);
        assert_eq!(project.power_override("tomas").map(|p| p.sockets), Some(4));
        assert_eq!(project.power_override("pavel"), None);
    }

    #[test]
    fn test_general_is_generic_alias() {
        let json = r#"{ "id": "tour", "bandRef": "the-band", "purpose": "general", "documentDate": "2026-01-05" }"#;
        let project = Project::from_json(json).unwrap();
        assert_eq!(project.purpose, Purpose::Generic);
        assert!(project.lineup.is_empty());
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let json = r#"{ "id": "x", "bandRef": "b", "purpose": "generic", "documentDate": "07.03.2026" }"#;
        assert!(matches!(
            Project::from_json(json),
            Err(StageplanError::JsonParse(_))
        ));
    }
}
