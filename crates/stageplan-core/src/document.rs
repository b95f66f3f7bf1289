//! Document view model and the pipeline that builds it.
//!
//! [`build_document`] turns a project and the library records it references
//! into a validated [`DocumentViewModel`]. Nothing is cached between calls;
//! the same inputs always produce the same document.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assembly::{assemble_inputs, assign_channels, build_input_rows, InputRow, NumberedInput};
use crate::error::{StageplanError, ValidationResult, ValidationWarning, WarningCode};
use crate::format::{
    format_monitor_label, format_monitoring_label, format_project_meta_line, format_vocal_label,
    GenderMode, MetaLine, MetaLineArgs, MonitorChannel, MonitorTableRow, VocalLabel,
};
use crate::library::Library;
use crate::model::{
    filter_monitor_notes, validate_band_leader, Group, InputChannel, MonitorKind, Musician,
    MusicianDefaults, NoteLine, Project, Purpose, StageplanRole, DEFAULT_NOTES_TEMPLATE_ID,
};
use crate::setup::{resolve_effective_project_setup, EffectiveProjectSetup};
use crate::stageplan::{
    build_stageplan_boxes, resolve_power_for_stageplan, resolve_stageplan_person,
    stageplan_inputs, PowerBadge, StageplanModel, StageplanPerson,
};
use crate::validation::{
    validate_document_with_budget, validate_effective_setups, validate_project, DocumentBudget,
};

const LEAD_VOCAL_KEY_PREFIX: &str = "voc_lead";
const LEAD_VOCAL_INDEX_PATTERN: &str = r"(?i)^voc_lead_(\d+)";

fn lead_vocal_index_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(LEAD_VOCAL_INDEX_PATTERN).expect("invalid regex pattern"))
}

/// Document header data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub project_id: String,
    pub band_name: String,
    pub purpose: Purpose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_venue: Option<String>,
    pub document_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub meta_line: MetaLine,
}

/// Monitoring of one lineup musician.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorEntry {
    pub musician_id: String,
    pub id: String,
    pub label: String,
    pub kind: MonitorKind,
}

/// Notes printed under the input list and the monitor table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNotes {
    pub inputs: Vec<NoteLine>,
    pub monitors: Vec<NoteLine>,
}

/// Everything a renderer needs to print the input list and the stage plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentViewModel {
    pub meta: DocumentMeta,
    /// Final numbered channel list, spare channels included.
    pub inputs: Vec<NumberedInput>,
    pub input_rows: Vec<InputRow>,
    pub monitors: Vec<MonitorEntry>,
    pub monitor_table_rows: Vec<MonitorTableRow>,
    pub notes: DocumentNotes,
    pub stageplan: StageplanModel,
    /// Non-fatal findings collected while building.
    #[serde(skip)]
    pub warnings: Vec<ValidationWarning>,
}

/// Builds and validates a document with the default budget.
pub fn build_document<L: Library + ?Sized>(
    project: &Project,
    library: &L,
) -> Result<DocumentViewModel, StageplanError> {
    build_document_with_budget(project, library, &DocumentBudget::default())
}

/// Builds and validates a document against an explicit budget.
///
/// # Errors
/// * [`StageplanError::InvalidProject`] when the project record is incomplete
/// * band leader, musician and preset lookup errors from resolution
/// * [`StageplanError::DocumentInvalid`] when the assembled input list fails
///   validation; no partial document is returned
pub fn build_document_with_budget<L: Library + ?Sized>(
    project: &Project,
    library: &L,
    budget: &DocumentBudget,
) -> Result<DocumentViewModel, StageplanError> {
    DocumentBuilder::new(project, library, budget, None)?.build()
}

/// Like [`build_document_with_budget`], with static per-musician defaults
/// used when a musician's preset refs produce no inputs or monitoring.
pub fn build_document_with_defaults<L: Library + ?Sized>(
    project: &Project,
    library: &L,
    budget: &DocumentBudget,
    musician_defaults_by_id: &BTreeMap<String, MusicianDefaults>,
) -> Result<DocumentViewModel, StageplanError> {
    DocumentBuilder::new(project, library, budget, Some(musician_defaults_by_id))?.build()
}

struct LeadVocals<'a> {
    musicians: Vec<&'a Musician>,
    mixed_genders: bool,
}

impl LeadVocals<'_> {
    fn count(&self) -> usize {
        self.musicians.len()
    }

    fn gender_mode(&self) -> GenderMode {
        if self.mixed_genders {
            GenderMode::Include
        } else {
            GenderMode::Omit
        }
    }

    fn label(&self, index: usize) -> String {
        let gender = self
            .musicians
            .get(index.saturating_sub(1))
            .and_then(|m| m.gender);
        format_vocal_label(
            &VocalLabel::new(index, self.count())
                .with_gender(gender)
                .with_gender_mode(self.gender_mode()),
        )
    }
}

struct DocumentBuilder<'a, L: Library + ?Sized> {
    project: &'a Project,
    library: &'a L,
    budget: &'a DocumentBudget,
    band_name: String,
    band_leader_id: String,
    notes_template_id: String,
    setup: EffectiveProjectSetup,
    warnings: Vec<ValidationWarning>,
}

impl<'a, L: Library + ?Sized> DocumentBuilder<'a, L> {
    fn new(
        project: &'a Project,
        library: &'a L,
        budget: &'a DocumentBudget,
        musician_defaults_by_id: Option<&BTreeMap<String, MusicianDefaults>>,
    ) -> Result<Self, StageplanError> {
        validate_project(project)
            .into_result()
            .map_err(StageplanError::InvalidProject)?;

        let band = library.require_band(&project.band_ref)?;
        let band_leader = validate_band_leader(band, library)?;
        let band_leader_id = match project.band_leader_override() {
            Some(id) => library.require_musician(id)?.id.clone(),
            None => band_leader.to_string(),
        };

        let setup = resolve_effective_project_setup(
            project,
            band,
            &band_leader_id,
            library,
            musician_defaults_by_id,
        )?;
        debug!(
            project = %project.id,
            band = %band.id,
            musicians = setup.by_musician_id.len(),
            "resolved project setup"
        );

        Ok(Self {
            project,
            library,
            budget,
            band_name: band.name.clone(),
            band_leader_id,
            notes_template_id: band
                .notes_template_ref
                .clone()
                .unwrap_or_else(|| DEFAULT_NOTES_TEMPLATE_ID.to_string()),
            setup,
            warnings: Vec::new(),
        })
    }

    fn build(mut self) -> Result<DocumentViewModel, StageplanError> {
        self.check_setups();

        let leads = self.resolve_lead_vocals()?;
        let gathered = self.gather_inputs();
        let assembled = relabel_lead_vocals(assemble_inputs(gathered), &leads);
        let inputs = assign_channels(&assembled);
        let input_rows = build_input_rows(&inputs);

        let monitors = self.resolve_monitors()?;
        let monitor_table_rows = self.build_monitor_table_rows(&leads)?;
        let notes = self.resolve_notes(&monitors);
        let stageplan = self.build_stageplan(&leads, &inputs, &monitor_table_rows);

        let mut vm = DocumentViewModel {
            meta: self.build_meta(),
            inputs,
            input_rows,
            monitors,
            monitor_table_rows,
            notes,
            stageplan,
            warnings: Vec::new(),
        };

        let validation = validate_document_with_budget(&vm, self.budget);
        let warnings = validation
            .into_result()
            .map_err(StageplanError::DocumentInvalid)?;
        self.warnings.extend(warnings);
        vm.warnings = self.warnings;

        debug!(
            project = %self.project.id,
            inputs = vm.inputs.len(),
            warnings = vm.warnings.len(),
            "built document"
        );
        Ok(vm)
    }

    /// Setup budget findings do not stop the build; the final input list is
    /// checked against the document budget instead.
    fn check_setups(&mut self) {
        let slots: Vec<(Group, &_)> = self
            .setup
            .lineup
            .primary_assignments()
            .into_iter()
            .filter_map(|(group, id)| self.setup.setup(id).map(|s| (group, s)))
            .collect();
        let ValidationResult {
            errors, warnings, ..
        } = validate_effective_setups(&slots, self.budget);

        for error in &errors {
            warn!(project = %self.project.id, "{}", error);
        }
        for warning in &warnings {
            warn!(project = %self.project.id, "{}", warning);
        }
        self.warnings.extend(warnings);
    }

    fn resolve_lead_vocals(&self) -> Result<LeadVocals<'a>, StageplanError> {
        let library: &'a L = self.library;
        let vocalists = self
            .setup
            .lineup
            .ids(Group::Vocs)
            .iter()
            .map(|id| library.require_musician(id))
            .collect::<Result<Vec<_>, _>>()?;

        let with_lead_preset: Vec<&Musician> = vocalists
            .iter()
            .copied()
            .filter(|m| m.has_lead_vocal_preset())
            .collect();
        let musicians = if with_lead_preset.is_empty() {
            vocalists
        } else {
            with_lead_preset
        };
        let genders: BTreeSet<&str> = musicians
            .iter()
            .filter_map(|m| m.gender.map(|g| g.as_str()))
            .collect();

        Ok(LeadVocals {
            musicians,
            mixed_genders: genders.len() >= 2,
        })
    }

    /// Inputs of every lineup musician in lineup order, plus the talkback
    /// channel of the talkback owner. Musicians in several slots contribute
    /// once.
    fn gather_inputs(&mut self) -> Vec<InputChannel> {
        let has_talkback = self
            .setup
            .by_musician_id
            .values()
            .flat_map(|s| s.inputs.iter())
            .any(|i| i.group == Some(Group::Talkback));
        let owner_id = self.setup.talkback_owner_id.clone();
        let owner_group = self.setup.lineup.group_of(&owner_id);

        if owner_group.is_none() && !has_talkback {
            warn!(owner = %owner_id, "talkback owner is not in the lineup, skipping talkback");
            self.warnings.push(ValidationWarning::with_path(
                WarningCode::TalkbackOwnerNotInLineup,
                format!(
                    "Talkback owner '{}' is not in the lineup; no talkback channel added.",
                    owner_id
                ),
                "talkbackOwnerId",
            ));
        }

        let mut gathered = Vec::new();
        for (group, musician_id) in self.setup.lineup.primary_assignments() {
            if let Some(setup) = self.setup.setup(musician_id) {
                gathered.extend(setup.inputs.iter().cloned());
            }
            if !has_talkback && musician_id == owner_id {
                debug!(owner = %owner_id, group = %group, "adding talkback channel");
                gathered.push(talkback_channel(group));
            }
        }
        gathered
    }

    fn resolve_monitors(&self) -> Result<Vec<MonitorEntry>, StageplanError> {
        self.setup
            .lineup
            .primary_assignments()
            .into_iter()
            .filter_map(|(_, id)| self.setup.setup(id).map(|s| (id, s)))
            .map(|(musician_id, setup)| -> Result<MonitorEntry, StageplanError> {
                let monitor = self.library.resolve_monitor(&setup.monitoring.monitor_ref)?;
                Ok(MonitorEntry {
                    musician_id: musician_id.to_string(),
                    id: monitor.id.clone(),
                    label: monitor.label.clone(),
                    kind: monitor.kind(),
                })
            })
            .collect()
    }

    fn monitor_note(&self, musician_id: &str) -> Result<String, StageplanError> {
        let Some(setup) = self.setup.setup(musician_id) else {
            return Ok(String::new());
        };
        let monitor = self.library.resolve_monitor(&setup.monitoring.monitor_ref)?;
        Ok(format_monitoring_label(
            &monitor.label,
            setup.monitoring.additional_wedge_count,
        ))
    }

    /// Monitor table in the order Guitar, lead vocals, Keys, Bass, Drums.
    fn build_monitor_table_rows(
        &self,
        leads: &LeadVocals<'_>,
    ) -> Result<Vec<MonitorTableRow>, StageplanError> {
        let lineup = &self.setup.lineup;
        let mut channels: Vec<(MonitorChannel, &str)> = Vec::new();

        channels.extend(lineup.first(Group::Guitar).map(|id| (MonitorChannel::Guitar, id)));
        for (i, musician) in leads.musicians.iter().enumerate() {
            let gender = if leads.mixed_genders {
                musician.gender
            } else {
                None
            };
            channels.push((
                MonitorChannel::Lead {
                    index: i + 1,
                    gender,
                },
                musician.id.as_str(),
            ));
        }
        channels.extend(lineup.first(Group::Keys).map(|id| (MonitorChannel::Keys, id)));
        channels.extend(lineup.first(Group::Bass).map(|id| (MonitorChannel::Bass, id)));
        channels.extend(lineup.first(Group::Drums).map(|id| (MonitorChannel::Drums, id)));

        channels
            .into_iter()
            .enumerate()
            .map(|(i, (channel, musician_id))| -> Result<MonitorTableRow, StageplanError> {
                Ok(MonitorTableRow {
                    no: i + 1,
                    output: format_monitor_label(&channel, leads.count()),
                    note: self.monitor_note(musician_id)?,
                })
            })
            .collect()
    }

    fn resolve_notes(&mut self, monitors: &[MonitorEntry]) -> DocumentNotes {
        let Some(template) = self.library.notes_template(&self.notes_template_id) else {
            warn!(template = %self.notes_template_id, "notes template not found");
            self.warnings.push(ValidationWarning::new(
                WarningCode::MissingNotesTemplate,
                format!("Notes template '{}' not found.", self.notes_template_id),
            ));
            return DocumentNotes::default();
        };
        let has_wedge = monitors.iter().any(|m| m.kind == MonitorKind::Wedge);
        DocumentNotes {
            inputs: template.inputs.clone(),
            monitors: filter_monitor_notes(&template.monitors, has_wedge),
        }
    }

    fn build_stageplan(
        &self,
        leads: &LeadVocals<'_>,
        inputs: &[NumberedInput],
        monitor_table_rows: &[MonitorTableRow],
    ) -> StageplanModel {
        let lineup = &self.setup.lineup;
        let mut lineup_by_role = BTreeMap::new();
        let mut power_by_role = BTreeMap::new();

        for role in StageplanRole::ALL {
            let person = match (role, leads.musicians.first()) {
                (StageplanRole::LeadVocal, Some(lead)) => {
                    StageplanPerson::for_musician(lead, &self.band_leader_id)
                }
                _ => resolve_stageplan_person(role, lineup, &self.band_leader_id, self.library),
            };
            lineup_by_role.insert(role, person);

            if let Some(power) =
                resolve_power_for_stageplan(role, lineup, self.project, self.library)
            {
                power_by_role.insert(role, PowerBadge::new(power));
            }
        }

        let mut model = StageplanModel {
            lineup_by_role,
            lead_vocals: leads
                .musicians
                .iter()
                .map(|m| StageplanPerson::for_musician(m, &self.band_leader_id))
                .collect(),
            inputs: stageplan_inputs(inputs),
            monitor_outputs: monitor_table_rows.to_vec(),
            power_by_role,
            boxes: Vec::new(),
        };
        model.boxes = build_stageplan_boxes(&model);
        model
    }

    fn build_meta(&self) -> DocumentMeta {
        let project = self.project;
        let meta_line = format_project_meta_line(&MetaLineArgs {
            purpose: project.purpose,
            event_date: project.event_date,
            event_venue: project.event_venue.as_deref(),
            document_date: project.document_date,
            title: project.title.as_deref(),
            note: project.note.as_deref(),
        });
        DocumentMeta {
            project_id: project.id.clone(),
            band_name: self.band_name.clone(),
            purpose: project.purpose,
            event_date: project.event_date,
            event_venue: project.event_venue.clone(),
            document_date: project.document_date,
            title: project.title.clone(),
            meta_line,
        }
    }
}

/// Talkback channel owned by a musician of `group`.
fn talkback_channel(group: Group) -> InputChannel {
    InputChannel::new(
        format!("tb_{}", group.as_str()),
        format!("Talkback - {}", group.display_name()),
        Group::Talkback,
    )
}

fn relabel_lead_vocals(inputs: Vec<InputChannel>, leads: &LeadVocals<'_>) -> Vec<InputChannel> {
    inputs
        .into_iter()
        .map(|mut input| {
            if input.key.starts_with(LEAD_VOCAL_KEY_PREFIX) {
                let index = lead_vocal_index_regex()
                    .captures(&input.key)
                    .and_then(|caps| caps.get(1)?.as_str().parse::<usize>().ok())
                    .unwrap_or(1);
                input.label = leads.label(index);
            }
            input
        })
        .collect()
}
