//! Lineup and per-musician setup resolution.
//!
//! Resolution runs in three stages over immutable records: the effective
//! lineup table ([`state`]), each musician's default setup from their preset
//! references ([`defaults`]), and the slot override patch on top of that
//! default ([`overrides`]). [`project`] composes them.

pub mod defaults;
pub mod diff;
pub mod drums;
pub mod overrides;
pub mod project;
pub mod state;

pub use defaults::resolve_default_musician_setup;
pub use diff::{compute_setup_diff, ChangeType, DiffOrigin, FieldDiff, InputDiff, MonitoringDiff, SetupDiff};
pub use drums::{
    apply_drum_controls, drum_catalog_for_setup, drum_rank_by_key, drum_setup_override_patch,
    infer_drum_setup_from_inputs, migrate_legacy_drum_preset_refs, resolve_drum_inputs,
    validate_drum_setup, DrumControlsPatch, DrumPad, DrumSetup, PadChannels, PadMode,
};
pub use overrides::{
    apply_preset_override, build_changed_summary, build_inputs_patch_from_target,
    is_patch_different_from_default, normalize_bass_connection_override_patch,
    normalize_setup_override_patch,
};
pub use project::{
    resolve_effective_musician_setup, resolve_effective_project_setup,
    resolve_project_preset_refs, EffectiveMusicianSetup, EffectiveProjectSetup,
};
pub use state::{resolve_effective_project_state, EffectiveProjectState};
