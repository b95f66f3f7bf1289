//! Channel numbering and printed input list rows.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format::{
    format_input_list_label, format_input_list_note, resolve_stereo_pair, InputLike, StereoSide,
};
use crate::model::{Group, InputChannel};

/// Key prefix of inserted spare channels.
pub const SPARE_KEY_PREFIX: &str = "spare_ch_";

/// Label and note of a spare channel.
pub const SPARE_LABEL: &str = "---";

/// An input with its console channel number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberedInput {
    pub ch: u32,
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NumberedInput {
    fn from_input(ch: u32, input: &InputChannel) -> Self {
        Self {
            ch,
            key: input.key.clone(),
            label: input.label.clone(),
            group: input.group,
            note: input.note.clone(),
        }
    }

    fn spare(ch: u32, group: Option<Group>) -> Self {
        Self {
            ch,
            key: format!("{}{}", SPARE_KEY_PREFIX, ch),
            label: SPARE_LABEL.to_string(),
            group,
            note: Some(SPARE_LABEL.to_string()),
        }
    }

    pub fn is_spare(&self) -> bool {
        self.key.starts_with(SPARE_KEY_PREFIX)
    }
}

impl InputLike for NumberedInput {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn group(&self) -> Option<Group> {
        self.group
    }

    fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// One printed row of the input list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRow {
    /// Channel number, or `"a+b"` for a merged stereo pair.
    pub no: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Numbers channels from 1.
///
/// A collapsible stereo pair always starts on an odd channel; when it would
/// start on an even one, a spare channel is inserted first. The left side of
/// a pair gets the lower number.
pub fn assign_channels(inputs: &[InputChannel]) -> Vec<NumberedInput> {
    let mut numbered = Vec::with_capacity(inputs.len());
    let mut ch: u32 = 1;
    let mut i = 0;

    while i < inputs.len() {
        let current = &inputs[i];
        let pair = inputs
            .get(i + 1)
            .and_then(|next| resolve_stereo_pair(current, next).map(|pair| (next, pair)));

        let Some((next, pair)) = pair else {
            numbered.push(NumberedInput::from_input(ch, current));
            ch += 1;
            i += 1;
            continue;
        };

        if pair.should_collapse && ch % 2 == 0 {
            debug!(ch, key = %current.key, "inserting spare channel before stereo pair");
            numbered.push(NumberedInput::spare(ch, current.group));
            ch += 1;
        }

        let (left, right) = match pair.a_side {
            StereoSide::L => (current, next),
            StereoSide::R => (next, current),
        };
        numbered.push(NumberedInput::from_input(ch, left));
        numbered.push(NumberedInput::from_input(ch + 1, right));
        ch += 2;
        i += 2;
    }

    numbered
}

/// Builds the printed rows, merging consecutive collapsible stereo pairs
/// into a single `"a+b"` row.
pub fn build_input_rows(inputs: &[NumberedInput]) -> Vec<InputRow> {
    let mut rows = Vec::with_capacity(inputs.len());
    let mut i = 0;

    while i < inputs.len() {
        let a = &inputs[i];
        let merged = inputs.get(i + 1).and_then(|b| {
            if b.ch != a.ch + 1 {
                return None;
            }
            resolve_stereo_pair(a, b)
                .filter(|pair| pair.should_collapse)
                .map(|_| b)
        });

        match merged {
            Some(b) => {
                rows.push(InputRow {
                    no: format!("{}+{}", a.ch, b.ch),
                    label: format_input_list_label(&a.label, &b.label),
                    note: format_input_list_note(a.note.as_deref(), 2),
                });
                i += 2;
            }
            None => {
                rows.push(InputRow {
                    no: a.ch.to_string(),
                    label: a.label.clone(),
                    note: a.note.clone(),
                });
                i += 1;
            }
        }
    }

    rows
}
