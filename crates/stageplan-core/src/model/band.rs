//! Band and musician records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::group::Group;
use super::lineup::LineupValue;
use crate::error::StageplanError;
use crate::library::Library;

/// A band: static library definition with its default lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Musician id of the band leader. Required, checked by [`resolve_band_leader_id`].
    #[serde(default)]
    pub band_leader: String,
    /// Default lineup: group to one or more musician ids.
    #[serde(default)]
    pub default_lineup: BTreeMap<Group, LineupValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_contact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_template_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_file: Option<String>,
}

impl Band {
    /// Parses a band from JSON.
    pub fn from_json(json: &str) -> Result<Self, StageplanError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Gender of a musician, used for lead vocal labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    M,
    F,
    X,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "m",
            Gender::F => "f",
            Gender::X => "x",
        }
    }
}

/// Power requirement of a musician's stage position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerRequirement {
    pub voltage: u32,
    pub sockets: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicianRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<PowerRequirement>,
}

/// One preset reference on a musician, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresetRef {
    /// Input preset contributing channels.
    Preset {
        #[serde(rename = "ref")]
        reference: String,
    },
    /// Monitor preset setting the monitoring slot.
    Monitor {
        #[serde(rename = "ref")]
        reference: String,
    },
}

impl PresetRef {
    pub fn preset(reference: impl Into<String>) -> Self {
        PresetRef::Preset {
            reference: reference.into(),
        }
    }

    pub fn monitor(reference: impl Into<String>) -> Self {
        PresetRef::Monitor {
            reference: reference.into(),
        }
    }

    /// Returns the referenced preset id.
    pub fn reference(&self) -> &str {
        match self {
            PresetRef::Preset { reference } | PresetRef::Monitor { reference } => reference,
        }
    }

    pub fn is_monitor(&self) -> bool {
        matches!(self, PresetRef::Monitor { .. })
    }
}

/// A musician: person profile plus the presets they play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Musician {
    pub id: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub group: Group,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_ref: Option<String>,
    #[serde(default)]
    pub presets: Vec<PresetRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<MusicianRequirements>,
}

impl Musician {
    /// Parses a musician from JSON.
    pub fn from_json(json: &str) -> Result<Self, StageplanError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Declared power requirement, if any.
    pub fn power(&self) -> Option<PowerRequirement> {
        self.requirements.as_ref().and_then(|r| r.power)
    }

    /// True when one of the input preset refs starts with `vocal_lead`.
    pub fn has_lead_vocal_preset(&self) -> bool {
        self.presets.iter().any(|p| {
            !p.is_monitor() && p.reference().to_ascii_lowercase().starts_with("vocal_lead")
        })
    }
}

/// Returns the trimmed band leader id, failing when it is blank.
pub fn resolve_band_leader_id(band: &Band) -> Result<&str, StageplanError> {
    let leader = band.band_leader.trim();
    if leader.is_empty() {
        return Err(StageplanError::MissingBandLeader {
            band_id: band.id.clone(),
        });
    }
    Ok(leader)
}

/// True exactly for the band's resolved leader id.
pub fn is_band_leader(band: &Band, musician_id: &str) -> bool {
    resolve_band_leader_id(band)
        .map(|leader| leader == musician_id)
        .unwrap_or(false)
}

/// Resolves the band leader and checks that the musician exists in the library.
pub fn validate_band_leader<'a, L: Library + ?Sized>(
    band: &'a Band,
    library: &L,
) -> Result<&'a str, StageplanError> {
    let leader = resolve_band_leader_id(band)?;
    if library.musician(leader).is_none() {
        return Err(StageplanError::UnknownBandLeader {
            band_id: band.id.clone(),
            musician_id: leader.to_string(),
        });
    }
    Ok(leader)
}
