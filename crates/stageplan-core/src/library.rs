//! Record lookup boundary.
//!
//! Loading records from disk happens outside this crate. Callers hand the
//! pipeline anything implementing [`Library`]; [`MemoryLibrary`] covers the
//! common case of records already parsed into memory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StageplanError;
use crate::model::{
    resolve_preset_id_alias, Band, InputPreset, MonitorPreset, Musician, NotesTemplate,
    PresetEntity, WEDGE_MONITOR_REF,
};

/// Read-only access to bands, musicians, presets and notes templates.
pub trait Library {
    fn band(&self, id: &str) -> Option<&Band>;

    fn musician(&self, id: &str) -> Option<&Musician>;

    /// Looks up a preset entity by its exact id. Aliases are not applied.
    fn preset(&self, id: &str) -> Option<&PresetEntity>;

    fn notes_template(&self, id: &str) -> Option<&NotesTemplate>;

    /// Looks up a band, failing with [`StageplanError::UnknownBand`].
    fn require_band(&self, id: &str) -> Result<&Band, StageplanError> {
        self.band(id)
            .ok_or_else(|| StageplanError::UnknownBand(id.to_string()))
    }

    /// Looks up a musician, failing with [`StageplanError::UnknownMusician`].
    fn require_musician(&self, id: &str) -> Result<&Musician, StageplanError> {
        self.musician(id)
            .ok_or_else(|| StageplanError::UnknownMusician(id.to_string()))
    }

    /// Resolves an input preset reference through the alias table.
    fn resolve_input_preset(&self, reference: &str) -> Result<&InputPreset, StageplanError> {
        let id = resolve_preset_id_alias(reference);
        match self.preset(id) {
            Some(PresetEntity::Preset(preset)) => Ok(preset),
            Some(other) => Err(StageplanError::PresetKindMismatch {
                reference: reference.to_string(),
                expected: "preset",
                found: other.type_name(),
            }),
            None => Err(StageplanError::UnknownPreset {
                reference: reference.to_string(),
            }),
        }
    }

    /// Resolves a monitor reference; `wedge` falls back to the built-in wedge.
    fn resolve_monitor(&self, reference: &str) -> Result<&MonitorPreset, StageplanError> {
        let id = resolve_preset_id_alias(reference);
        match self.preset(id) {
            Some(PresetEntity::Monitor(monitor)) => Ok(monitor),
            Some(other) => Err(StageplanError::PresetKindMismatch {
                reference: reference.to_string(),
                expected: "monitor",
                found: other.type_name(),
            }),
            None if id == WEDGE_MONITOR_REF => Ok(MonitorPreset::builtin_wedge()),
            None => Err(StageplanError::UnknownPreset {
                reference: reference.to_string(),
            }),
        }
    }

    /// True when an input preset with this id (after aliasing) exists.
    fn has_input_preset(&self, reference: &str) -> bool {
        matches!(
            self.preset(resolve_preset_id_alias(reference)),
            Some(PresetEntity::Preset(_))
        )
    }
}

/// JSON bundle accepted by [`MemoryLibrary::from_json`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryBundle {
    #[serde(default)]
    pub bands: Vec<Band>,
    #[serde(default)]
    pub musicians: Vec<Musician>,
    #[serde(default)]
    pub presets: Vec<PresetEntity>,
    #[serde(default)]
    pub notes_templates: Vec<NotesTemplate>,
}

/// In-memory [`Library`] keyed by record id.
#[derive(Debug, Clone, Default)]
pub struct MemoryLibrary {
    bands: BTreeMap<String, Band>,
    musicians: BTreeMap<String, Musician>,
    presets: BTreeMap<String, PresetEntity>,
    notes_templates: BTreeMap<String, NotesTemplate>,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a [`LibraryBundle`] and indexes its records.
    pub fn from_json(json: &str) -> Result<Self, StageplanError> {
        let bundle: LibraryBundle = serde_json::from_str(json)?;
        Ok(Self::from_bundle(bundle))
    }

    pub fn from_bundle(bundle: LibraryBundle) -> Self {
        let mut library = Self::new();
        for band in bundle.bands {
            library.insert_band(band);
        }
        for musician in bundle.musicians {
            library.insert_musician(musician);
        }
        for preset in bundle.presets {
            library.insert_preset(preset);
        }
        for template in bundle.notes_templates {
            library.insert_notes_template(template);
        }
        library
    }

    pub fn insert_band(&mut self, band: Band) {
        self.bands.insert(band.id.clone(), band);
    }

    pub fn insert_musician(&mut self, musician: Musician) {
        self.musicians.insert(musician.id.clone(), musician);
    }

    pub fn insert_preset(&mut self, preset: PresetEntity) {
        self.presets.insert(preset.id().to_string(), preset);
    }

    pub fn insert_notes_template(&mut self, template: NotesTemplate) {
        self.notes_templates.insert(template.id.clone(), template);
    }

    pub fn with_band(mut self, band: Band) -> Self {
        self.insert_band(band);
        self
    }

    pub fn with_musician(mut self, musician: Musician) -> Self {
        self.insert_musician(musician);
        self
    }

    pub fn with_preset(mut self, preset: PresetEntity) -> Self {
        self.insert_preset(preset);
        self
    }

    pub fn with_notes_template(mut self, template: NotesTemplate) -> Self {
        self.insert_notes_template(template);
        self
    }

    /// All musicians, by id.
    pub fn musicians(&self) -> impl Iterator<Item = &Musician> {
        self.musicians.values()
    }
}

impl Library for MemoryLibrary {
    fn band(&self, id: &str) -> Option<&Band> {
        self.bands.get(id)
    }

    fn musician(&self, id: &str) -> Option<&Musician> {
        self.musicians.get(id)
    }

    fn preset(&self, id: &str) -> Option<&PresetEntity> {
        self.presets.get(id)
    }

    fn notes_template(&self, id: &str) -> Option<&NotesTemplate> {
        self.notes_templates.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Group, InputChannel};

    fn make_library() -> MemoryLibrary {
        MemoryLibrary::new()
            .with_preset(PresetEntity::Preset(InputPreset {
                id: "el_bass_xlr_amp".to_string(),
                label: "Electric bass guitar".to_string(),
                group: Group::Bass,
                setup_group: Some("electric_bass".to_string()),
                inputs: vec![InputChannel::ungrouped("el_bass_xlr_amp", "Bass XLR")],
            }))
            .with_preset(PresetEntity::Monitor(MonitorPreset {
                id: "iem_stereo_wireless".to_string(),
                label: "IEM STEREO wireless".to_string(),
                mode: None,
                wireless: Some(true),
            }))
    }

    #[test]
    fn test_alias_is_applied_before_lookup() {
        let library = make_library();
        let preset = library.resolve_input_preset("el_bass_xlr").unwrap();
        assert_eq!(preset.id, "el_bass_xlr_amp");
        assert!(library.has_input_preset("el_bass_xlr"));
    }

    #[test]
    fn test_kind_mismatch() {
        let library = make_library();
        let err = library.resolve_input_preset("iem_stereo_wireless").unwrap_err();
        assert!(matches!(
            err,
            StageplanError::PresetKindMismatch { expected: "preset", found: "monitor", .. }
        ));
        let err = library.resolve_monitor("el_bass_xlr_amp").unwrap_err();
        assert!(matches!(
            err,
            StageplanError::PresetKindMismatch { expected: "monitor", found: "preset", .. }
        ));
    }

    #[test]
    fn test_unknown_refs() {
        let library = make_library();
        assert!(matches!(
            library.resolve_input_preset("theremin"),
            Err(StageplanError::UnknownPreset { .. })
        ));
        assert!(matches!(
            library.require_musician("ghost"),
            Err(StageplanError::UnknownMusician(ref id)) if id == "ghost"
        ));
    }

    #[test]
    fn test_builtin_wedge_fallback() {
        let library = MemoryLibrary::new();
        let wedge = library.resolve_monitor("wedge").unwrap();
        assert_eq!(wedge.label, "Wedge");
    }

    #[test]
    fn test_from_json_bundle() {
        let json = r#"{
            "bands": [{ "id": "b", "name": "B", "bandLeader": "m1" }],
            "musicians": [{ "id": "m1", "firstName": "Pavel", "group": "guitar" }],
            "presets": [{ "type": "monitor", "id": "wedge", "label": "Wedge monitor" }],
            "notesTemplates": [{ "id": "notes_default_cs", "lang": "cs" }]
        }"#;
        let library = MemoryLibrary::from_json(json).unwrap();
        assert!(library.band("b").is_some());
        assert_eq!(library.musicians().count(), 1);
        assert_eq!(library.resolve_monitor("wedge").unwrap().label, "Wedge monitor");
        assert!(library.notes_template("notes_default_cs").is_some());
    }
}
