//! Input bullets of stage-plan boxes.
//!
//! Boxes list one bullet per source, so stereo pairs and repeated instances
//! of the same instrument collapse into `"{label} ({n1}+{n2})"`.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::format::StereoSide;
use crate::model::Group;

const STEREO_PATTERN: &str = r"(?i)^(.*?)(?:\s+([LR]))(?:\s*\(.*\))?$";
const KEYS_PATTERN: &str = r"(?i)^keys\b";
const SYNTH_MONO_PATTERN: &str = r"(?i)^synth\s*\(mono\)|^synth\s+mono\b";
const SYNTH_PATTERN: &str = r"(?i)^synth\b";
const SAME_LABEL_PATTERN: &str = r"(?i)^(keys|synth|electric guitar|bass)\b";

fn compile(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("invalid regex pattern"))
}

fn stereo_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compile(&CELL, STEREO_PATTERN)
}

fn synth_mono_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compile(&CELL, SYNTH_MONO_PATTERN)
}

/// Kind of a stage-plan box line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageplanLineKind {
    Input,
    Monitor,
    Blank,
    Riser,
}

/// A line before collapsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageplanLine {
    pub kind: StageplanLineKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
}

impl StageplanLine {
    pub fn input(label: impl Into<String>, no: u32, group: Option<Group>) -> Self {
        Self {
            kind: StageplanLineKind::Input,
            label: label.into(),
            no: Some(no),
            group,
        }
    }

    fn numbered_input(&self) -> Option<u32> {
        match self.kind {
            StageplanLineKind::Input => self.no,
            _ => None,
        }
    }
}

/// A collapsed, printable line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageplanTextLine {
    pub kind: StageplanLineKind,
    pub text: String,
}

struct StereoCandidate {
    base: String,
    side: StereoSide,
}

fn parse_stereo_candidate(label: &str) -> Option<StereoCandidate> {
    let caps = stereo_regex().captures(label.trim())?;
    let base = caps.get(1)?.as_str().trim();
    if base.is_empty() {
        return None;
    }
    let side = match caps.get(2)?.as_str() {
        "R" | "r" => StereoSide::R,
        _ => StereoSide::L,
    };
    Some(StereoCandidate {
        base: base.to_string(),
        side,
    })
}

/// Display label of a stage-plan input; keyboard labels drop their
/// instance numbers.
pub fn format_stageplan_base_label(label: &str, group: Option<Group>) -> String {
    static KEYS: OnceLock<Regex> = OnceLock::new();
    static SYNTH: OnceLock<Regex> = OnceLock::new();

    let trimmed = label.trim();
    if group == Some(Group::Keys) {
        if compile(&KEYS, KEYS_PATTERN).is_match(trimmed) {
            return "Keys".to_string();
        }
        if synth_mono_regex().is_match(trimmed) {
            return "Synth (mono)".to_string();
        }
        if compile(&SYNTH, SYNTH_PATTERN).is_match(trimmed) {
            return "Synth".to_string();
        }
    }
    trimmed.to_string()
}

fn format_line(line: &StageplanLine) -> String {
    let label = format_stageplan_base_label(&line.label, line.group);
    match line.no {
        None => label,
        Some(no) if label.is_empty() => format!("({})", no),
        Some(no) => format!("{} ({})", label, no),
    }
}

fn format_numbers(label: &str, mut numbers: Vec<u32>) -> String {
    numbers.sort_unstable();
    let joined = numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("+");
    format!("{} ({})", label, joined)
}

fn are_pairable_by_same_label(current: &StageplanLine, next: &StageplanLine) -> bool {
    static SAME_LABEL: OnceLock<Regex> = OnceLock::new();

    if current.numbered_input().is_none() || next.numbered_input().is_none() {
        return false;
    }
    let current_label = format_stageplan_base_label(&current.label, current.group);
    let next_label = format_stageplan_base_label(&next.label, next.group);
    if current_label.to_lowercase() != next_label.to_lowercase() {
        return false;
    }
    if synth_mono_regex().is_match(&current_label) {
        return false;
    }
    current.group == Some(Group::Keys)
        || compile(&SAME_LABEL, SAME_LABEL_PATTERN).is_match(&current_label)
}

fn find_stereo_partner(lines: &[StageplanLine], start: usize, used: &BTreeSet<usize>) -> Option<usize> {
    lines[start].numbered_input()?;
    let stereo = parse_stereo_candidate(&lines[start].label)?;
    if stereo.base.eq_ignore_ascii_case("oh") {
        return None;
    }
    let base = stereo.base.to_lowercase();

    (start + 1..lines.len()).find(|idx| {
        if used.contains(idx) || lines[*idx].numbered_input().is_none() {
            return false;
        }
        parse_stereo_candidate(&lines[*idx].label)
            .is_some_and(|c| c.base.to_lowercase() == base && c.side != stereo.side)
    })
}

/// Collapses box input lines into bullets.
///
/// A numbered input whose label ends in `L`/`R` pairs with the next line
/// sharing its base and carrying the other side (overheads excepted).
/// Adjacent instances of the same keyboard, synth, electric guitar or bass
/// label merge into one bullet. Other lines print as `"{label} ({no})"`.
pub fn format_stageplan_input_lines(lines: &[StageplanLine]) -> Vec<StageplanTextLine> {
    let mut used = BTreeSet::new();
    let mut output = Vec::with_capacity(lines.len());

    for index in 0..lines.len() {
        if used.contains(&index) {
            continue;
        }
        let line = &lines[index];

        if let Some(no) = line.numbered_input() {
            if let Some(partner) = find_stereo_partner(lines, index, &used) {
                let base = parse_stereo_candidate(&line.label)
                    .map(|c| c.base)
                    .unwrap_or_else(|| line.label.clone());
                let label = format_stageplan_base_label(&base, line.group);
                let partner_no = lines[partner].no.unwrap_or(no);
                output.push(StageplanTextLine {
                    kind: line.kind,
                    text: format_numbers(&label, vec![no, partner_no]),
                });
                used.insert(index);
                used.insert(partner);
                continue;
            }

            let mut numbers = vec![no];
            let mut next = index + 1;
            while next < lines.len()
                && !used.contains(&next)
                && are_pairable_by_same_label(line, &lines[next])
            {
                numbers.extend(lines[next].no);
                used.insert(next);
                next += 1;
            }
            if numbers.len() > 1 {
                let label = format_stageplan_base_label(&line.label, line.group);
                output.push(StageplanTextLine {
                    kind: line.kind,
                    text: format_numbers(&label, numbers),
                });
                used.insert(index);
                continue;
            }
        }

        output.push(StageplanTextLine {
            kind: line.kind,
            text: format_line(line),
        });
        used.insert(index);
    }

    output
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn texts(lines: &[StageplanLine]) -> Vec<String> {
        format_stageplan_input_lines(lines)
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    #[test]
    fn test_collapse_stereo_and_instances() {
        let lines = vec![
            StageplanLine::input("Electric guitar L", 13, Some(Group::Guitar)),
            StageplanLine::input("Electric guitar R", 14, Some(Group::Guitar)),
            StageplanLine::input("Keys", 15, Some(Group::Keys)),
            StageplanLine::input("Keys", 16, Some(Group::Keys)),
            StageplanLine::input("Synth", 17, Some(Group::Keys)),
            StageplanLine::input("Synth", 18, Some(Group::Keys)),
            StageplanLine::input("Synth (mono)", 19, Some(Group::Keys)),
        ];
        let out = texts(&lines);
        assert_eq!(
            out,
            vec![
                "Electric guitar (13+14)",
                "Keys (15+16)",
                "Synth (17+18)",
                "Synth (mono) (19)",
            ]
        );
        assert!(!out.join(" ").contains("2x "));
    }

    #[test]
    fn test_numbered_instances_share_one_bullet() {
        let lines = vec![
            StageplanLine::input("Keys 1", 20, Some(Group::Keys)),
            StageplanLine::input("Keys 1", 21, Some(Group::Keys)),
            StageplanLine::input("Keys 2", 22, Some(Group::Keys)),
            StageplanLine::input("Keys 2", 23, Some(Group::Keys)),
        ];
        assert_eq!(texts(&lines), vec!["Keys (20+21+22+23)"]);
    }

    #[test]
    fn test_overheads_are_not_paired() {
        let lines = vec![
            StageplanLine::input("OH L", 7, Some(Group::Drums)),
            StageplanLine::input("OH R", 8, Some(Group::Drums)),
        ];
        assert_eq!(texts(&lines), vec!["OH L (7)", "OH R (8)"]);
    }

    #[test]
    fn test_non_input_lines_pass_through() {
        let lines = vec![
            StageplanLine {
                kind: StageplanLineKind::Riser,
                label: "Drum riser 3x2".to_string(),
                no: None,
                group: None,
            },
            StageplanLine::input("", 4, None),
        ];
        assert_eq!(texts(&lines), vec!["Drum riser 3x2", "(4)"]);
    }
}
