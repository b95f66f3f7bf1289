//! Power badges of stage-plan slots.

use serde::{Deserialize, Serialize};

use crate::library::Library;
use crate::model::{Lineup, PowerRequirement, Project, StageplanRole};

/// Power badge of a stage-plan box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBadge {
    pub has_power_badge: bool,
    pub power_badge_text: String,
}

impl PowerBadge {
    /// Badge text `"{sockets}x {voltage} V"`.
    pub fn new(power: PowerRequirement) -> Self {
        Self {
            has_power_badge: true,
            power_badge_text: format!("{}x {} V", power.sockets, power.voltage),
        }
    }
}

/// Power needed by the first musician of the role's slot: the project
/// override for that musician, else their declared requirement.
pub fn resolve_power_for_stageplan<L: Library + ?Sized>(
    role: StageplanRole,
    lineup: &Lineup,
    project: &Project,
    musicians: &L,
) -> Option<PowerRequirement> {
    let musician_id = lineup.first(role.group())?;
    project
        .power_override(musician_id)
        .or_else(|| musicians.musician(musician_id).and_then(|m| m.power()))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::library::MemoryLibrary;
    use crate::model::{Group, Musician, ProjectStageplan};

    fn library(with_power: bool) -> MemoryLibrary {
        let json = if with_power {
            r#"{ "id": "m1", "firstName": "Alex", "group": "drums",
                 "requirements": { "power": { "voltage": 230, "sockets": 3 } } }"#
        } else {
            r#"{ "id": "m1", "firstName": "Alex", "group": "drums" }"#
        };
        MemoryLibrary::new().with_musician(Musician::from_json(json).unwrap())
    }

    fn lineup() -> Lineup {
        let mut lineup = Lineup::new();
        lineup.set(Group::Drums, vec!["m1".to_string()]);
        lineup
    }

    fn project() -> Project {
        Project::generic("p", "b", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn test_musician_default_power() {
        let power =
            resolve_power_for_stageplan(StageplanRole::Drums, &lineup(), &project(), &library(true));
        assert_eq!(power, Some(PowerRequirement { voltage: 230, sockets: 3 }));
        assert_eq!(PowerBadge::new(power.unwrap()).power_badge_text, "3x 230 V");
    }

    #[test]
    fn test_project_override_wins() {
        let mut project = project();
        project.stageplan = Some(ProjectStageplan {
            power_overrides_by_musician: BTreeMap::from([(
                "m1".to_string(),
                PowerRequirement { voltage: 230, sockets: 5 },
            )]),
        });
        let power =
            resolve_power_for_stageplan(StageplanRole::Drums, &lineup(), &project, &library(true));
        assert_eq!(power, Some(PowerRequirement { voltage: 230, sockets: 5 }));
    }

    #[test]
    fn test_no_power_declared() {
        let power =
            resolve_power_for_stageplan(StageplanRole::Drums, &lineup(), &project(), &library(false));
        assert_eq!(power, None);
        let power =
            resolve_power_for_stageplan(StageplanRole::Bass, &lineup(), &project(), &library(true));
        assert_eq!(power, None);
    }
}
