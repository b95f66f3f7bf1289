//! Preset override engine.
//!
//! A [`PresetOverridePatch`] is a sparse change on top of a musician's
//! default [`MusicianSetupPreset`]. Patches are normalized before they are
//! applied: empty lists are dropped, non-positive wedge counts are dropped,
//! and a legacy "add" of a main bass connection is turned into an in-place
//! replacement of the default main bass input.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::StageplanError;
use crate::model::{
    InputChannel, InputReplacement, InputsPatch, MonitoringPatch, MonitoringSetup,
    MusicianSetupPreset, PresetOverridePatch,
};

/// Keys of the main bass connection variants.
pub const BASS_MAIN_CONNECTION_KEYS: [&str; 2] = ["el_bass_xlr_amp", "el_bass_xlr_pedalboard"];

fn is_bass_main_key(key: &str) -> bool {
    BASS_MAIN_CONNECTION_KEYS.contains(&key)
}

fn normalize_patch_shape(patch: &PresetOverridePatch) -> PresetOverridePatch {
    let inputs = patch
        .inputs
        .as_ref()
        .filter(|inputs| !inputs.is_empty())
        .cloned();

    let monitoring = patch.monitoring.as_ref().and_then(|m| {
        let normalized = MonitoringPatch {
            monitor_ref: m.monitor_ref.clone(),
            additional_wedge_count: m.additional_wedge_count.filter(|count| *count > 0),
        };
        if normalized.monitor_ref.is_none() && normalized.additional_wedge_count.is_none() {
            None
        } else {
            Some(normalized)
        }
    });

    PresetOverridePatch { inputs, monitoring }
}

/// Rewrites a legacy bass "add" of a main connection into a `replace` of the
/// default main bass input, then normalizes the patch shape.
pub fn normalize_bass_connection_override_patch(
    default: &MusicianSetupPreset,
    patch: Option<&PresetOverridePatch>,
) -> Option<PresetOverridePatch> {
    let patch = patch?;
    let Some(default_main) = default.inputs.iter().find(|i| is_bass_main_key(&i.key)) else {
        return Some(normalize_patch_shape(patch));
    };

    let inputs = patch.inputs.clone().unwrap_or_default();
    let legacy_replacement = inputs.add.iter().find(|i| is_bass_main_key(&i.key)).cloned();

    let replace = if !inputs.replace.is_empty() {
        inputs.replace.clone()
    } else if let Some(with) = legacy_replacement {
        debug!(
            target_key = %default_main.key,
            with_key = %with.key,
            "rewriting bass connection add into replace"
        );
        vec![InputReplacement {
            target_key: default_main.key.clone(),
            with,
        }]
    } else {
        Vec::new()
    };

    let add = inputs
        .add
        .into_iter()
        .filter(|i| !is_bass_main_key(&i.key))
        .collect();

    Some(normalize_patch_shape(&PresetOverridePatch {
        inputs: Some(InputsPatch {
            add,
            replace,
            ..inputs
        }),
        monitoring: patch.monitoring.clone(),
    }))
}

fn presets_equal(a: &MusicianSetupPreset, b: &MusicianSetupPreset) -> bool {
    a.monitoring.monitor_ref == b.monitoring.monitor_ref
        && a.monitoring.wedge_count() == b.monitoring.wedge_count()
        && a.inputs == b.inputs
}

/// Normalizes a patch against the default it applies to.
///
/// Returns `None` when there is no patch or when applying it leaves the
/// default unchanged.
pub fn normalize_setup_override_patch(
    default: &MusicianSetupPreset,
    patch: Option<&PresetOverridePatch>,
) -> Result<Option<PresetOverridePatch>, StageplanError> {
    let Some(normalized) = normalize_bass_connection_override_patch(default, patch) else {
        return Ok(None);
    };
    let effective = apply_normalized_patch(default, &normalized)?;
    if presets_equal(default, &effective) {
        Ok(None)
    } else {
        Ok(Some(normalized))
    }
}

/// Applies an override patch to a default preset.
///
/// Order of operations: monitoring, removals, updates, replacements, adds.
/// Adding a key that is already present fails with
/// [`StageplanError::OverrideCollision`].
pub fn apply_preset_override(
    default: &MusicianSetupPreset,
    patch: Option<&PresetOverridePatch>,
) -> Result<MusicianSetupPreset, StageplanError> {
    match normalize_setup_override_patch(default, patch)? {
        Some(normalized) => apply_normalized_patch(default, &normalized),
        None => Ok(default.clone()),
    }
}

fn apply_normalized_patch(
    default: &MusicianSetupPreset,
    patch: &PresetOverridePatch,
) -> Result<MusicianSetupPreset, StageplanError> {
    let monitoring = match &patch.monitoring {
        Some(m) => MonitoringSetup {
            monitor_ref: m
                .monitor_ref
                .clone()
                .unwrap_or_else(|| default.monitoring.monitor_ref.clone()),
            additional_wedge_count: m
                .additional_wedge_count
                .filter(|count| *count > 0)
                .map(|count| u32::try_from(count).unwrap_or(u32::MAX)),
        },
        None => default.monitoring.clone(),
    };

    let Some(inputs_patch) = &patch.inputs else {
        return Ok(MusicianSetupPreset {
            inputs: default.inputs.clone(),
            monitoring,
        });
    };

    let removed: BTreeSet<&str> = inputs_patch.removed_keys().collect();
    let mut inputs: Vec<InputChannel> = default
        .inputs
        .iter()
        .filter(|input| !removed.contains(input.key.as_str()))
        .cloned()
        .collect();

    for update in &inputs_patch.update {
        for input in inputs.iter_mut().filter(|i| i.key == update.key) {
            if let Some(label) = &update.label {
                input.label = label.clone();
            }
            if let Some(note) = &update.note {
                input.note = Some(note.clone());
            }
            if let Some(group) = update.group {
                input.group = Some(group);
            }
        }
    }

    apply_input_replacements(&mut inputs, &inputs_patch.replace);

    let replacement_keys: BTreeSet<&str> = inputs_patch
        .replace
        .iter()
        .map(|r| r.with.key.as_str())
        .collect();
    for add in &inputs_patch.add {
        if replacement_keys.contains(add.key.as_str()) {
            continue;
        }
        if inputs.iter().any(|existing| existing.key == add.key) {
            return Err(StageplanError::OverrideCollision {
                key: add.key.clone(),
            });
        }
        inputs.push(add.clone());
    }

    Ok(MusicianSetupPreset { inputs, monitoring })
}

fn apply_input_replacements(inputs: &mut Vec<InputChannel>, replace: &[InputReplacement]) {
    for entry in replace {
        let target = inputs.iter().position(|i| i.key == entry.target_key);
        let duplicate = inputs
            .iter()
            .enumerate()
            .position(|(idx, i)| i.key == entry.with.key && Some(idx) != target);

        let target = match (target, duplicate) {
            (Some(t), Some(d)) => {
                inputs.remove(d);
                Some(if d < t { t - 1 } else { t })
            }
            (t, Some(d)) => {
                inputs.remove(d);
                t
            }
            (t, None) => t,
        };

        match target {
            Some(idx) => inputs[idx] = entry.with.clone(),
            None => inputs.insert(0, entry.with.clone()),
        }
    }
}

/// Projection compared by [`is_patch_different_from_default`]: inputs sorted
/// by key, wedge count only when positive.
fn comparable(preset: &MusicianSetupPreset) -> (String, Option<u32>, Vec<InputChannel>) {
    let mut inputs = preset.inputs.clone();
    inputs.sort_by(|a, b| a.key.cmp(&b.key));
    (
        preset.monitoring.monitor_ref.clone(),
        preset.monitoring.additional_wedge_count.filter(|c| *c > 0),
        inputs,
    )
}

/// True when the patch changes the default beyond input ordering.
pub fn is_patch_different_from_default(
    default: &MusicianSetupPreset,
    patch: Option<&PresetOverridePatch>,
) -> Result<bool, StageplanError> {
    let Some(normalized) = normalize_setup_override_patch(default, patch)? else {
        return Ok(false);
    };
    let effective = apply_normalized_patch(default, &normalized)?;
    Ok(comparable(default) != comparable(&effective))
}

/// Minimal `{add, removeKeys}` patch turning `default_inputs` into
/// `target_inputs`. A key whose channel changed is removed and added back.
pub fn build_inputs_patch_from_target(
    default_inputs: &[InputChannel],
    target_inputs: &[InputChannel],
) -> InputsPatch {
    let remove_keys = default_inputs
        .iter()
        .filter(|d| !target_inputs.iter().any(|t| t == *d))
        .map(|d| d.key.clone())
        .collect();
    let add = target_inputs
        .iter()
        .filter(|t| !default_inputs.iter().any(|d| d == *t))
        .cloned()
        .collect();
    InputsPatch {
        add,
        remove_keys,
        ..Default::default()
    }
}

fn plural(count: usize, singular: &str) -> String {
    if count > 1 {
        format!("{}s", singular)
    } else {
        singular.to_string()
    }
}

/// Human-readable list of what a patch changes.
pub fn build_changed_summary(patch: Option<&PresetOverridePatch>) -> Vec<String> {
    let Some(patch) = patch else {
        return Vec::new();
    };

    let mut out = Vec::new();
    if let Some(inputs) = &patch.inputs {
        let added = inputs.add.len();
        let removed = inputs.remove.len() + inputs.remove_keys.len();
        let replaced = inputs.replace.len();
        let updated = inputs.update.len();
        if added > 0 {
            out.push(format!("+{} {}", added, plural(added, "input")));
        }
        if removed > 0 {
            out.push(format!("-{} {}", removed, plural(removed, "input")));
        }
        if replaced > 0 {
            out.push(format!("{} {}", replaced, plural(replaced, "input replacement")));
        }
        if updated > 0 {
            out.push(format!("{} {}", updated, plural(updated, "input update")));
        }
    }
    if let Some(monitoring) = &patch.monitoring {
        if let Some(monitor_ref) = monitoring.monitor_ref.as_deref().filter(|r| !r.is_empty()) {
            out.push(format!("Monitoring: {}", monitor_ref));
        }
        if let Some(count) = monitoring.additional_wedge_count {
            out.push(format!("Additional wedge monitor {}x", count));
        }
    }
    out
}
