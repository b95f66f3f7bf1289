//! Library records and project input types.

pub mod band;
pub mod group;
pub mod lineup;
pub mod notes;
pub mod preset;
pub mod project;

pub use band::{
    is_band_leader, resolve_band_leader_id, validate_band_leader, Band, Gender, Musician,
    MusicianRequirements, PowerRequirement, PresetRef,
};
pub use group::{Group, StageplanRole, GROUP_ORDER};
pub use lineup::{AssignedSlot, Lineup, LineupValue, SlotValue};
pub use notes::{
    filter_monitor_notes, MonitorCondition, NoteCondition, NoteLine, NoteSeverity,
    NotesTemplate, DEFAULT_NOTES_TEMPLATE_ID,
};
pub use preset::{
    resolve_preset_id_alias, InputChannel, InputPreset, InputReplacement, InputUpdate,
    InputsPatch, MonitorKind, MonitorMode, MonitorPreset, MonitoringPatch, MonitoringSetup,
    MusicianDefaults, MusicianSetupPreset, PresetEntity, PresetOverridePatch,
    PRESET_ID_ALIASES, WEDGE_MONITOR_REF,
};
pub use project::{Project, ProjectStageplan, Purpose, LEAD_VOCS_LINEUP_KEY};
