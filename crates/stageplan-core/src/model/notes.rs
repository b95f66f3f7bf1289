//! Notes printed under the input and monitor tables.

use serde::{Deserialize, Serialize};

/// Default template id when the band does not name one.
pub const DEFAULT_NOTES_TEMPLATE_ID: &str = "notes_default_cs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteSeverity {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorCondition {
    pub has_wedge: bool,
}

/// Condition under which a note line is printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteCondition {
    pub monitors: MonitorCondition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteLine {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<NoteSeverity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<NoteCondition>,
}

/// Notes template kept as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesTemplate {
    pub id: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub inputs: Vec<NoteLine>,
    #[serde(default)]
    pub monitors: Vec<NoteLine>,
}

/// Keeps unconditional monitor notes, and wedge notes only when a wedge is in use.
pub fn filter_monitor_notes(notes: &[NoteLine], has_wedge: bool) -> Vec<NoteLine> {
    notes
        .iter()
        .filter(|note| match &note.when {
            None => true,
            Some(cond) => !cond.monitors.has_wedge || has_wedge,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, when_wedge: Option<bool>) -> NoteLine {
        NoteLine {
            id: id.to_string(),
            text: format!("text of {}", id),
            severity: None,
            when: when_wedge.map(|has_wedge| NoteCondition {
                monitors: MonitorCondition { has_wedge },
            }),
        }
    }

    #[test]
    fn test_wedge_notes_need_a_wedge() {
        let notes = vec![note("always", None), note("wedge_only", Some(true))];
        let with_wedge = filter_monitor_notes(&notes, true);
        assert_eq!(with_wedge.len(), 2);
        let without = filter_monitor_notes(&notes, false);
        assert_eq!(without.len(), 1);
        assert_eq!(without[0].id, "always");
    }
}
