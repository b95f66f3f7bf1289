//! Library and project fixtures shared by the end-to-end tests.

use stageplan_core::{MemoryLibrary, Project};

/// A five-piece band: drums, bass, guitar, keys and two lead singers.
///
/// Pavel (drums) leads the band. Ondra sings a back vocal, Petra has no
/// monitor preset and falls back to the wedge.
pub const FULL_BAND_LIBRARY: &str = r#"{
  "bands": [
    {
      "id": "the-band",
      "name": "The Band",
      "code": "TB",
      "bandLeader": "pavel",
      "defaultLineup": {
        "drums": "pavel",
        "bass": "tomas",
        "guitar": "ondra",
        "keys": "jana",
        "vocs": ["eliska", "petra"]
      }
    }
  ],
  "musicians": [
    {
      "id": "pavel", "firstName": "Pavel", "lastName": "Novak", "gender": "m", "group": "drums",
      "presets": [
        { "kind": "preset", "ref": "drums_std" },
        { "kind": "monitor", "ref": "wedge" }
      ],
      "requirements": { "power": { "voltage": 230, "sockets": 3 } }
    },
    {
      "id": "tomas", "firstName": "Tomas", "lastName": "Dvorak", "gender": "m", "group": "bass",
      "presets": [
        { "kind": "preset", "ref": "el_bass_xlr" },
        { "kind": "preset", "ref": "el_bass_mic" },
        { "kind": "monitor", "ref": "iem_stereo_wireless" }
      ]
    },
    {
      "id": "ondra", "firstName": "Ondra", "lastName": "Svoboda", "gender": "m", "group": "guitar",
      "presets": [
        { "kind": "preset", "ref": "el_guitar_stereo" },
        { "kind": "preset", "ref": "ac_guitar_di" },
        { "kind": "preset", "ref": "vocal_back_guitar" },
        { "kind": "monitor", "ref": "wedge" }
      ]
    },
    {
      "id": "jana", "firstName": "Jana", "lastName": "Kralova", "gender": "f", "group": "keys",
      "presets": [
        { "kind": "preset", "ref": "keys_stereo" },
        { "kind": "monitor", "ref": "iem_stereo_wireless" }
      ]
    },
    {
      "id": "eliska", "firstName": "Eliska", "lastName": "Mala", "gender": "f", "group": "vocs",
      "presets": [
        { "kind": "preset", "ref": "vocal_lead_std" },
        { "kind": "monitor", "ref": "iem_stereo_wireless" }
      ]
    },
    {
      "id": "petra", "firstName": "Petra", "lastName": "Velka", "gender": "f", "group": "vocs",
      "presets": [
        { "kind": "preset", "ref": "vocal_lead_std" }
      ]
    }
  ],
  "presets": [
    {
      "type": "preset", "id": "drums_std", "label": "Drums", "group": "drums",
      "inputs": [
        { "key": "dr_kick_in", "label": "Kick IN" },
        { "key": "dr_snare_top", "label": "Snare top" },
        { "key": "dr_hihat", "label": "Hi-hat" },
        { "key": "dr_tom_1", "label": "Tom 1" },
        { "key": "dr_floor_tom", "label": "Floor tom" },
        { "key": "dr_oh_l", "label": "OH L" },
        { "key": "dr_oh_r", "label": "OH R" }
      ]
    },
    {
      "type": "preset", "id": "el_bass_xlr_amp", "label": "Bass XLR", "group": "bass",
      "inputs": [ { "key": "el_bass_xlr_amp", "label": "Bass XLR" } ]
    },
    {
      "type": "preset", "id": "el_bass_mic", "label": "Bass mic", "group": "bass",
      "inputs": [ { "key": "el_bass_mic", "label": "Bass mic" } ]
    },
    {
      "type": "preset", "id": "el_guitar_stereo", "label": "Electric guitar", "group": "guitar",
      "inputs": [
        { "key": "el_guitar_l", "label": "Electric guitar L" },
        { "key": "el_guitar_r", "label": "Electric guitar R" }
      ]
    },
    {
      "type": "preset", "id": "ac_guitar_di", "label": "Acoustic guitar", "group": "guitar",
      "inputs": [ { "key": "ac_guitar", "label": "Acoustic guitar" } ]
    },
    {
      "type": "preset", "id": "vocal_back_guitar", "label": "Back vocal", "group": "vocs",
      "inputs": [ { "key": "voc_back_guitar", "label": "Back vocal - guitar", "group": "vocs" } ]
    },
    {
      "type": "preset", "id": "keys_stereo", "label": "Keys", "group": "keys",
      "inputs": [
        { "key": "keys_l", "label": "Keys L" },
        { "key": "keys_r", "label": "Keys R" }
      ]
    },
    {
      "type": "preset", "id": "vocal_lead_std", "label": "Lead vocal", "group": "vocs",
      "inputs": [ { "key": "voc_lead", "label": "Lead vocal" } ]
    },
    {
      "type": "monitor", "id": "iem_stereo_wireless", "label": "IEM STEREO wireless",
      "mode": "stereo", "wireless": true
    }
  ],
  "notesTemplates": [
    {
      "id": "notes_default_cs",
      "lang": "cs",
      "inputs": [ { "id": "power", "text": "Power on stage is required at every position." } ],
      "monitors": [
        { "id": "wedges", "text": "Wedges are provided by the venue.", "when": { "monitors": { "hasWedge": true } } }
      ]
    }
  ]
}"#;

/// Reusable project for the full band, with a drums extra wedge and a power
/// override for the bassist.
pub const GENERIC_PROJECT: &str = r#"{
  "id": "the-band-2026",
  "bandRef": "the-band",
  "purpose": "generic",
  "documentDate": "2026-02-20",
  "title": "Tour 2026",
  "lineup": {
    "drums": { "musicianId": "pavel", "presetOverride": { "monitoring": { "additionalWedgeCount": 1 } } }
  },
  "stageplan": {
    "powerOverridesByMusician": { "tomas": { "voltage": 230, "sockets": 2 } }
  }
}"#;

/// One-off event with date and venue.
pub const EVENT_PROJECT: &str = r#"{
  "id": "2026-03-07-brno",
  "bandRef": "the-band",
  "purpose": "event",
  "eventDate": "2026-03-07",
  "eventVenue": "Sono Centrum",
  "documentDate": "2026-02-20"
}"#;

/// Parses [`FULL_BAND_LIBRARY`].
pub fn full_band_library() -> MemoryLibrary {
    MemoryLibrary::from_json(FULL_BAND_LIBRARY).expect("Failed to parse library fixture")
}

/// Parses [`GENERIC_PROJECT`].
pub fn generic_project() -> Project {
    Project::from_json(GENERIC_PROJECT).expect("Failed to parse project fixture")
}

/// Parses [`EVENT_PROJECT`].
pub fn event_project() -> Project {
    Project::from_json(EVENT_PROJECT).expect("Failed to parse project fixture")
}
