//! Which stage-plan box an input or monitor mix belongs to.

use std::sync::OnceLock;

use regex::Regex;

use crate::format::InputLike;
use crate::model::{Group, StageplanRole};

const BACK_VOCAL_PATTERN: &str = r"(?i)back vocal\s*[-–—]\s*(guitar|keys|bass|drums)";
const TALKBACK_PATTERN: &str = r"(?i)talkback\s*[-–—]\s*(guitar|keys|bass|drums)";

static BACK_VOCAL_REGEX: OnceLock<Regex> = OnceLock::new();
static TALKBACK_REGEX: OnceLock<Regex> = OnceLock::new();

fn back_vocal_regex() -> &'static Regex {
    BACK_VOCAL_REGEX.get_or_init(|| Regex::new(BACK_VOCAL_PATTERN).expect("invalid regex pattern"))
}

fn talkback_regex() -> &'static Regex {
    TALKBACK_REGEX.get_or_init(|| Regex::new(TALKBACK_PATTERN).expect("invalid regex pattern"))
}

fn named_instrument(re: &Regex, label: &str) -> Option<Option<StageplanRole>> {
    re.captures(label)
        .map(|caps| caps.get(1).and_then(|m| StageplanRole::from_instrument_name(m.as_str())))
}

/// True for labels starting with "lead voc" or containing "lead vocal".
pub fn is_lead_vocal_label(label: &str) -> bool {
    let normalized = label.trim().to_lowercase();
    normalized.starts_with("lead voc") || normalized.contains("lead vocal")
}

/// Stage-plan role of an input channel.
///
/// `"Back vocal - bass"` and `"Talkback – keys"` belong to the named
/// instrument (back vocal is checked first). Lead vocal labels map to
/// [`StageplanRole::LeadVocal`]. Anything else follows the channel group;
/// other vocals and talkback have no box.
pub fn resolve_stageplan_role_for_input<I: InputLike + ?Sized>(input: &I) -> Option<StageplanRole> {
    let label = input.label();
    if let Some(role) = named_instrument(back_vocal_regex(), label) {
        return role;
    }
    if let Some(role) = named_instrument(talkback_regex(), label) {
        return role;
    }
    if is_lead_vocal_label(label) {
        return Some(StageplanRole::LeadVocal);
    }
    match input.group()? {
        Group::Drums => Some(StageplanRole::Drums),
        Group::Bass => Some(StageplanRole::Bass),
        Group::Guitar => Some(StageplanRole::Guitar),
        Group::Keys => Some(StageplanRole::Keys),
        Group::Vocs | Group::Talkback => None,
    }
}

/// Stage-plan role of a monitor table output name.
pub fn resolve_monitor_instrument(output: &str) -> Option<StageplanRole> {
    let normalized = output.trim().to_lowercase();
    if normalized.starts_with("lead voc") {
        return Some(StageplanRole::LeadVocal);
    }
    [
        StageplanRole::Guitar,
        StageplanRole::Keys,
        StageplanRole::Bass,
        StageplanRole::Drums,
    ]
    .into_iter()
    .find(|role| normalized.starts_with(&role.label().to_lowercase()))
}
