//! Canonical input list order.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Group, InputChannel};
use crate::setup::drums::drum_rank_by_key;

/// Rank of inputs a group-specific rule does not know.
const UNRANKED: usize = 900;

const BASS_ORDER: &[(&str, usize)] = &[
    ("el_bass_xlr_amp", 0),
    ("el_bass_xlr_pedalboard", 0),
    ("el_bass_mic", 1),
    ("bass_synth", 2),
];

const BACK_VOCAL_ORDER: &[(&str, usize)] = &[("guitar", 1), ("keys", 3), ("bass", 4), ("drums", 5)];

const LEAD_VOCAL_RANK: usize = 2;

static INSTANCE_SUFFIX: OnceLock<Regex> = OnceLock::new();

fn instance_suffix() -> &'static Regex {
    INSTANCE_SUFFIX.get_or_init(|| Regex::new(r"_\d+$").expect("invalid regex pattern"))
}

fn bass_rank(key: &str) -> usize {
    BASS_ORDER
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, rank)| *rank)
        .unwrap_or(UNRANKED)
}

fn vocal_rank(key: &str) -> usize {
    let key = key.to_ascii_lowercase();
    if key.starts_with("voc_lead") {
        return LEAD_VOCAL_RANK;
    }
    let Some(instrument) = key.strip_prefix("voc_back_") else {
        return UNRANKED;
    };
    let instrument = instance_suffix().replace(instrument, "");
    BACK_VOCAL_ORDER
        .iter()
        .find(|(name, _)| *name == instrument)
        .map(|(_, rank)| *rank)
        .unwrap_or(UNRANKED)
}

/// Group-specific ordering inside one group.
///
/// Bass puts the main connection first, vocals put the guitarist's back
/// vocal before the lead vocal and the remaining back vocals after it. Other
/// groups compare equal.
pub fn compare_inputs_for_role(group: Option<Group>, a: &InputChannel, b: &InputChannel) -> Ordering {
    match group {
        Some(Group::Drums) => drum_rank_by_key(&a.key).cmp(&drum_rank_by_key(&b.key)),
        Some(Group::Bass) => bass_rank(&a.key).cmp(&bass_rank(&b.key)),
        Some(Group::Vocs) => vocal_rank(&a.key).cmp(&vocal_rank(&b.key)),
        _ => Ordering::Equal,
    }
}

/// Sorts inputs into the canonical list order.
///
/// Groups follow [`crate::model::GROUP_ORDER`] with ungrouped inputs last,
/// unless `default_group` assigns them one. Inside a group the role rule
/// applies first, then keys compare lexicographically.
pub fn order_inputs(inputs: &[InputChannel], default_group: Option<Group>) -> Vec<InputChannel> {
    let group_of = |input: &InputChannel| input.group.or(default_group);
    let group_rank = |group: Option<Group>| group.map(|g| g.rank()).unwrap_or(usize::MAX);

    let mut ordered = inputs.to_vec();
    ordered.sort_by(|a, b| {
        let (ga, gb) = (group_of(a), group_of(b));
        group_rank(ga)
            .cmp(&group_rank(gb))
            .then_with(|| compare_inputs_for_role(ga, a, b))
            .then_with(|| a.key.cmp(&b.key))
    });
    ordered
}
