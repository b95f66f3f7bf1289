//! Instrument groups and stage-plan roles.

use serde::{Deserialize, Serialize};

/// Instrument group of a musician or an input channel.
///
/// The declaration order is the canonical input list order, so the derived
/// `Ord` sorts groups the same way [`GROUP_ORDER`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Drums,
    Bass,
    Guitar,
    Keys,
    Vocs,
    Talkback,
}

/// Canonical group order of the input list.
pub const GROUP_ORDER: [Group; 6] = [
    Group::Drums,
    Group::Bass,
    Group::Guitar,
    Group::Keys,
    Group::Vocs,
    Group::Talkback,
];

impl Group {
    /// Returns the serialized name (e.g., "drums").
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Drums => "drums",
            Group::Bass => "bass",
            Group::Guitar => "guitar",
            Group::Keys => "keys",
            Group::Vocs => "vocs",
            Group::Talkback => "talkback",
        }
    }

    /// Parses a serialized group name.
    pub fn parse(s: &str) -> Option<Group> {
        GROUP_ORDER.iter().copied().find(|g| g.as_str() == s)
    }

    /// Position of the group in [`GROUP_ORDER`].
    pub fn rank(&self) -> usize {
        GROUP_ORDER
            .iter()
            .position(|g| g == self)
            .unwrap_or(GROUP_ORDER.len())
    }

    /// Capitalized display name used in generated labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            Group::Drums => "Drums",
            Group::Bass => "Bass",
            Group::Guitar => "Guitar",
            Group::Keys => "Keys",
            Group::Vocs => "Vocals",
            Group::Talkback => "Talkback",
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed instrument slots drawn on the stage plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageplanRole {
    Drums,
    Bass,
    Guitar,
    Keys,
    LeadVocal,
}

impl StageplanRole {
    /// All roles in stage-plan order.
    pub const ALL: [StageplanRole; 5] = [
        StageplanRole::Drums,
        StageplanRole::Bass,
        StageplanRole::Guitar,
        StageplanRole::Keys,
        StageplanRole::LeadVocal,
    ];

    /// Instrument label shown on stage-plan boxes.
    pub fn label(&self) -> &'static str {
        match self {
            StageplanRole::Drums => "Drums",
            StageplanRole::Bass => "Bass",
            StageplanRole::Guitar => "Guitar",
            StageplanRole::Keys => "Keys",
            StageplanRole::LeadVocal => "Lead vocal",
        }
    }

    /// Lineup group occupying this role.
    pub fn group(&self) -> Group {
        match self {
            StageplanRole::Drums => Group::Drums,
            StageplanRole::Bass => Group::Bass,
            StageplanRole::Guitar => Group::Guitar,
            StageplanRole::Keys => Group::Keys,
            StageplanRole::LeadVocal => Group::Vocs,
        }
    }

    /// Instrument role named in "back vocal - <instrument>" style labels.
    pub fn from_instrument_name(name: &str) -> Option<StageplanRole> {
        match name.to_ascii_lowercase().as_str() {
            "drums" => Some(StageplanRole::Drums),
            "bass" => Some(StageplanRole::Bass),
            "guitar" => Some(StageplanRole::Guitar),
            "keys" => Some(StageplanRole::Keys),
            _ => None,
        }
    }
}
