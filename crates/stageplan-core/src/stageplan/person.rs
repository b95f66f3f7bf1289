//! Person standing in a stage-plan slot.

use serde::{Deserialize, Serialize};

use crate::library::Library;
use crate::model::{Lineup, Musician, StageplanRole};

/// Person shown in a stage-plan box header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageplanPerson {
    pub first_name: Option<String>,
    pub is_band_leader: bool,
}

impl StageplanPerson {
    pub fn for_musician(musician: &Musician, band_leader_id: &str) -> Self {
        Self {
            first_name: Some(musician.first_name.clone()),
            is_band_leader: musician.id == band_leader_id,
        }
    }
}

/// First musician of the role's lineup slot.
///
/// An unknown musician id still carries the band leader flag but no name.
pub fn resolve_stageplan_person<L: Library + ?Sized>(
    role: StageplanRole,
    lineup: &Lineup,
    band_leader_id: &str,
    members: &L,
) -> StageplanPerson {
    let Some(member_id) = lineup.first(role.group()) else {
        return StageplanPerson::default();
    };
    StageplanPerson {
        first_name: members.musician(member_id).map(|m| m.first_name.clone()),
        is_band_leader: member_id == band_leader_id,
    }
}
