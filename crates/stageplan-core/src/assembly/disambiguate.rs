//! Numbering of repeated input keys.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::format::StereoSide;
use crate::model::InputChannel;

static TRAILING_NUMBER: OnceLock<Regex> = OnceLock::new();
static TRAILING_PAREN_NUMBER: OnceLock<Regex> = OnceLock::new();
static TRAILING_SIDE: OnceLock<Regex> = OnceLock::new();

fn trailing_number() -> &'static Regex {
    TRAILING_NUMBER.get_or_init(|| Regex::new(r"\s\d+$").expect("invalid regex pattern"))
}

fn trailing_paren_number() -> &'static Regex {
    TRAILING_PAREN_NUMBER.get_or_init(|| Regex::new(r"\(\d+\)$").expect("invalid regex pattern"))
}

fn trailing_side() -> &'static Regex {
    TRAILING_SIDE
        .get_or_init(|| Regex::new(r"(?i)^(.*)\s+(L|R)\s*$").expect("invalid regex pattern"))
}

fn ends_with_number(label: &str) -> bool {
    trailing_number().is_match(label) || trailing_paren_number().is_match(label)
}

fn key_side(key: &str) -> Option<StereoSide> {
    let lower = key.to_ascii_lowercase();
    if lower.ends_with("_l") {
        Some(StereoSide::L)
    } else if lower.ends_with("_r") {
        Some(StereoSide::R)
    } else {
        None
    }
}

fn number_label(label: &str, index: usize) -> String {
    let trimmed = label.trim_end();
    let Some(caps) = trailing_side().captures(trimmed) else {
        if ends_with_number(trimmed) {
            return label.to_string();
        }
        return format!("{} {}", label, index);
    };

    let base = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    let side = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    if ends_with_number(base) {
        return label.to_string();
    }
    format!("{} {} {}", base, index, side)
}

#[derive(Default)]
struct StemState {
    mono_count: usize,
    // (left taken, right taken) per stereo instance
    slots: Vec<(bool, bool)>,
}

impl StemState {
    fn total(&self) -> usize {
        if self.slots.is_empty() {
            self.mono_count
        } else {
            self.slots.len()
        }
    }

    fn claim(&mut self, side: Option<StereoSide>) -> usize {
        let Some(side) = side else {
            self.mono_count += 1;
            return self.mono_count;
        };
        let free = self.slots.iter_mut().position(|slot| match side {
            StereoSide::L => !slot.0,
            StereoSide::R => !slot.1,
        });
        let index = match free {
            Some(index) => index,
            None => {
                self.slots.push((false, false));
                self.slots.len() - 1
            }
        };
        match side {
            StereoSide::L => self.slots[index].0 = true,
            StereoSide::R => self.slots[index].1 = true,
        }
        index + 1
    }
}

/// Makes repeated keys unique.
///
/// Keys that occur once are left alone. Stereo channels (`_l`/`_r`) are
/// paired per stem in first-seen order and become `<stem>_l_<n>` with labels
/// `<Base> <n> L`; mono repeats become `<key>_<n>` and `<Label> <n>`. Labels
/// already ending in a number keep their text.
pub fn disambiguate_input_keys(inputs: &[InputChannel]) -> Vec<InputChannel> {
    let mut states: HashMap<String, StemState> = HashMap::new();
    let mut assignments = Vec::with_capacity(inputs.len());

    for input in inputs {
        let side = key_side(&input.key);
        let stem = match side {
            Some(_) => input.key[..input.key.len() - 2].to_string(),
            None => input.key.clone(),
        };
        let index = states.entry(stem.clone()).or_default().claim(side);
        assignments.push((stem, index));
    }

    inputs
        .iter()
        .zip(assignments)
        .map(|(input, (stem, index))| {
            let total = states.get(&stem).map(StemState::total).unwrap_or(1);
            if total <= 1 {
                return input.clone();
            }
            InputChannel {
                key: format!("{}_{}", input.key, index),
                label: number_label(&input.label, index),
                ..input.clone()
            }
        })
        .collect()
}
