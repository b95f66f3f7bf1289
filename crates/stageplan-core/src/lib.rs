//! Stage plan and input list resolution.
//!
//! This crate turns a project (one gig or a reusable document) and the band,
//! musician and preset records it references into a [`DocumentViewModel`]:
//! the numbered input list, the monitor table, the notes and the stage-plan
//! boxes, ready for an external renderer.
//!
//! # Overview
//!
//! Resolution is a pure, synchronous pipeline:
//!
//! - **Setup**: the band's default lineup is merged with the project lineup,
//!   each musician's preset references are expanded into a default setup and
//!   the slot's override patch is applied on top
//! - **Assembly**: the gathered inputs are relabelled, disambiguated, ordered
//!   and numbered, with stereo pairs starting on odd channels
//! - **Stage plan**: inputs and monitor mixes are routed into one box per
//!   instrument position
//! - **Validation**: the final list must be non-empty, within budget and free
//!   of duplicate keys
//!
//! # Example
//!
//! ```
//! use stageplan_core::{build_document, MemoryLibrary, Project};
//!
//! let library = MemoryLibrary::from_json(r#"{
//!     "bands": [{ "id": "solo", "name": "Solo", "bandLeader": "ana",
//!                 "defaultLineup": { "vocs": "ana" } }],
//!     "musicians": [{ "id": "ana", "firstName": "Ana", "group": "vocs",
//!                     "presets": [{ "kind": "preset", "ref": "vocal_lead_std" }] }],
//!     "presets": [{ "type": "preset", "id": "vocal_lead_std", "label": "Lead vocal",
//!                   "group": "vocs", "inputs": [{ "key": "voc_lead", "label": "Lead vocal" }] }]
//! }"#).unwrap();
//!
//! let project = Project::from_json(
//!     r#"{ "id": "solo-tour", "bandRef": "solo", "purpose": "generic", "documentDate": "2026-01-05" }"#,
//! ).unwrap();
//!
//! let vm = build_document(&project, &library).unwrap();
//! assert_eq!(vm.inputs[0].label, "Lead vocal");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Library records and project types
//! - [`library`]: Record lookup boundary
//! - [`setup`]: Lineup merging, default setups, override patches and drum setups
//! - [`assembly`]: Input list assembly and channel numbering
//! - [`format`]: Label formatters
//! - [`stageplan`]: Stage-plan persons, power badges and boxes
//! - [`validation`]: Project, setup and document validation with budgets
//! - [`document`]: The document view model and its builder
//! - [`hash`]: Document fingerprints

pub mod assembly;
pub mod document;
pub mod error;
pub mod format;
pub mod hash;
pub mod library;
pub mod model;
pub mod setup;
pub mod stageplan;
pub mod validation;

pub use document::{
    build_document, build_document_with_budget, build_document_with_defaults, DocumentMeta,
    DocumentNotes, DocumentViewModel, MonitorEntry,
};
pub use error::{
    ErrorCode, StageplanError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use hash::{canonical_value_hash, canonicalize_json, document_fingerprint};
pub use library::{Library, LibraryBundle, MemoryLibrary};
pub use model::{
    Band, Gender, Group, InputChannel, Lineup, LineupValue, MonitorPreset, Musician,
    MusicianSetupPreset, PresetEntity, PresetOverridePatch, PresetRef, Project, Purpose,
    StageplanRole, GROUP_ORDER,
};
pub use validation::{
    validate_document, validate_document_with_budget, validate_effective_setups,
    validate_project, DocumentBudget,
};
