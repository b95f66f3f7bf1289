//! Default per-musician setup built from the musician's preset references.

use std::collections::BTreeSet;

use tracing::debug;

use crate::assembly::order_inputs;
use crate::error::StageplanError;
use crate::library::Library;
use crate::model::{Group, InputChannel, MusicianDefaults, MusicianSetupPreset, PresetRef};

/// Builds the default setup of a musician playing `role`.
///
/// References are expanded in order. The first monitor reference sets the
/// monitoring slot. Input presets sharing a `setupGroup` are alternatives:
/// the first one listed is used and the rest are skipped. Channels without a
/// group take the role's group, and a key repeated across presets is kept
/// once.
///
/// When the references produce no inputs, `defaults.inputs` is used.
/// Monitoring falls back to `defaults.monitoring`, then to the wedge.
pub fn resolve_default_musician_setup<L: Library + ?Sized>(
    role: Group,
    preset_refs: &[PresetRef],
    defaults: Option<&MusicianDefaults>,
    library: &L,
) -> Result<MusicianSetupPreset, StageplanError> {
    let mut monitor_id: Option<String> = None;
    let mut selected_setup_groups: BTreeSet<&str> = BTreeSet::new();
    let mut seen_keys: BTreeSet<String> = BTreeSet::new();
    let mut inputs: Vec<InputChannel> = Vec::new();

    for preset_ref in preset_refs {
        if preset_ref.is_monitor() {
            let monitor = library.resolve_monitor(preset_ref.reference())?;
            if monitor_id.is_none() {
                monitor_id = Some(monitor.id.clone());
            }
            continue;
        }

        let preset = library.resolve_input_preset(preset_ref.reference())?;
        if let Some(setup_group) = preset.setup_group.as_deref() {
            if !selected_setup_groups.insert(setup_group) {
                debug!(
                    preset = %preset.id,
                    setup_group,
                    "skipping alternative preset of an already selected setup group"
                );
                continue;
            }
        }

        for input in &preset.inputs {
            if seen_keys.insert(input.key.clone()) {
                inputs.push(input.clone().with_default_group(role));
            }
        }
    }

    if inputs.is_empty() {
        if let Some(fallback) = defaults.and_then(|d| d.inputs.as_ref()) {
            inputs = fallback
                .iter()
                .map(|input| input.clone().with_default_group(role))
                .collect();
        }
    }

    let mut monitoring = defaults
        .and_then(|d| d.monitoring.clone())
        .unwrap_or_default();
    if let Some(id) = monitor_id {
        monitoring.monitor_ref = id;
    }

    Ok(MusicianSetupPreset {
        inputs: order_inputs(&inputs, Some(role)),
        monitoring,
    })
}
