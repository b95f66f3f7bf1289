//! Lead vocal labels.

use serde::{Deserialize, Serialize};

use crate::model::Gender;

/// Whether a vocal label may carry the singer's gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderMode {
    #[default]
    Include,
    Omit,
}

/// Arguments for [`format_vocal_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocalLabel {
    /// 1-based position among the lead singers.
    pub index: usize,
    pub gender: Option<Gender>,
    pub lead_count: usize,
    pub gender_mode: GenderMode,
}

impl VocalLabel {
    pub fn new(index: usize, lead_count: usize) -> Self {
        Self {
            index,
            gender: None,
            lead_count,
            gender_mode: GenderMode::Include,
        }
    }

    pub fn with_gender(mut self, gender: Option<Gender>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_gender_mode(mut self, mode: GenderMode) -> Self {
        self.gender_mode = mode;
        self
    }
}

/// Formats a lead vocal label.
///
/// A single lead is always `"Lead vocal"`. With more leads the index is
/// appended, plus the gender in parentheses when the mode allows it and the
/// gender is known and not `x`.
pub fn format_vocal_label(args: &VocalLabel) -> String {
    const BASE: &str = "Lead vocal";

    if args.lead_count <= 1 {
        return BASE.to_string();
    }

    let gender = match (args.gender_mode, args.gender) {
        (GenderMode::Include, Some(g)) if g != Gender::X => format!(" ({})", g.as_str()),
        _ => String::new(),
    };
    format!("{} {}{}", BASE, args.index, gender)
}
