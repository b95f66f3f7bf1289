//! Effective setups of every musician in a project.

use std::collections::BTreeMap;

use tracing::debug;

use super::defaults::resolve_default_musician_setup;
use super::diff::{compute_setup_diff, SetupDiff};
use super::overrides::{apply_preset_override, normalize_setup_override_patch};
use super::state::resolve_effective_project_state;
use crate::assembly::order_inputs;
use crate::error::StageplanError;
use crate::library::Library;
use crate::model::{
    Band, Group, Lineup, Musician, MusicianDefaults, MusicianSetupPreset, PresetOverridePatch,
    PresetRef, Project,
};

/// Prefix of back vocal preset ids.
pub const BACK_VOCAL_PRESET_PREFIX: &str = "vocal_back_";

/// Back vocal preset given to listed musicians that have none.
pub const NO_MIC_BACK_VOCAL_PRESET: &str = "vocal_back_no_mic";

/// Lineup and effective setup of every lineup musician.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveProjectSetup {
    pub lineup: Lineup,
    pub by_musician_id: BTreeMap<String, MusicianSetupPreset>,
    pub talkback_owner_id: String,
}

impl EffectiveProjectSetup {
    /// Effective setup of a musician, if they are in the lineup.
    pub fn setup(&self, musician_id: &str) -> Option<&MusicianSetupPreset> {
        self.by_musician_id.get(musician_id)
    }
}

fn is_back_vocal_ref(preset_ref: &PresetRef) -> bool {
    !preset_ref.is_monitor() && preset_ref.reference().starts_with(BACK_VOCAL_PRESET_PREFIX)
}

/// Preset references of a musician after applying the project's back vocal
/// selection.
///
/// Without `backVocalIds` the references are returned unchanged. Otherwise
/// musicians missing from the list lose their back vocal presets, and listed
/// musicians without one get [`NO_MIC_BACK_VOCAL_PRESET`] when the library
/// defines it.
pub fn resolve_project_preset_refs<L: Library + ?Sized>(
    project: &Project,
    musician: &Musician,
    library: &L,
) -> Vec<PresetRef> {
    let selected: Vec<&str> = project
        .back_vocal_ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .collect();
    if selected.is_empty() {
        return musician.presets.clone();
    }

    let has_back_vocal = musician.presets.iter().any(is_back_vocal_ref);
    if !selected.contains(&musician.id.as_str()) {
        return musician
            .presets
            .iter()
            .filter(|p| !is_back_vocal_ref(p))
            .cloned()
            .collect();
    }
    if has_back_vocal || !library.has_input_preset(NO_MIC_BACK_VOCAL_PRESET) {
        return musician.presets.clone();
    }

    debug!(musician = %musician.id, "adding back vocal preset without microphone");
    let mut refs = musician.presets.clone();
    refs.push(PresetRef::preset(NO_MIC_BACK_VOCAL_PRESET));
    refs
}

/// Resolves the lineup and the effective setup of each lineup musician.
///
/// Each musician's default setup is built from their preset references and
/// then patched with the override recorded for them in the lineup. A
/// musician holding several slots gets one setup, for the first of their
/// groups in canonical order.
pub fn resolve_effective_project_setup<L: Library + ?Sized>(
    project: &Project,
    band: &Band,
    band_leader_id: &str,
    library: &L,
    musician_defaults_by_id: Option<&BTreeMap<String, MusicianDefaults>>,
) -> Result<EffectiveProjectSetup, StageplanError> {
    let state = resolve_effective_project_state(project, &band.default_lineup, band_leader_id);

    let mut by_musician_id = BTreeMap::new();
    for (group, musician_id) in state.effective_lineup.primary_assignments() {
        let musician = library.require_musician(musician_id)?;
        let refs = resolve_project_preset_refs(project, musician, library);
        let defaults = musician_defaults_by_id.and_then(|d| d.get(musician_id));
        let default_setup = resolve_default_musician_setup(group, &refs, defaults, library)?;
        let patch = state.preset_override_by_musician_id.get(musician_id);
        let effective = apply_preset_override(&default_setup, patch)?;
        debug!(
            musician = musician_id,
            group = %group,
            inputs = effective.inputs.len(),
            patched = patch.is_some(),
            "resolved musician setup"
        );
        by_musician_id.insert(musician_id.to_string(), effective);
    }

    Ok(EffectiveProjectSetup {
        lineup: state.effective_lineup,
        by_musician_id,
        talkback_owner_id: state.effective_talkback_owner_id,
    })
}

/// Effective setup of one musician together with its diff against the
/// default, as shown when editing a lineup slot.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveMusicianSetup {
    pub default: MusicianSetupPreset,
    pub effective: MusicianSetupPreset,
    pub diff: SetupDiff,
}

/// Applies a slot override to a default setup and computes the diff.
///
/// Both setups are returned in canonical input order for `group`.
pub fn resolve_effective_musician_setup(
    default: &MusicianSetupPreset,
    patch: Option<&PresetOverridePatch>,
    group: Option<Group>,
) -> Result<EffectiveMusicianSetup, StageplanError> {
    let normalized = normalize_setup_override_patch(default, patch)?;
    let applied = apply_preset_override(default, normalized.as_ref())?;
    let default = MusicianSetupPreset {
        inputs: order_inputs(&default.inputs, group),
        monitoring: default.monitoring.clone(),
    };
    let effective = MusicianSetupPreset {
        inputs: order_inputs(&applied.inputs, group),
        monitoring: applied.monitoring,
    };
    let diff = compute_setup_diff(&default, &effective, normalized.as_ref());
    Ok(EffectiveMusicianSetup {
        default,
        effective,
        diff,
    })
}
