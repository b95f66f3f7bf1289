//! Placement of acoustic guitar channels.

use crate::model::{Group, InputChannel};

fn key_starts_with(input: &InputChannel, prefixes: &[&str]) -> bool {
    let key = input.key.to_ascii_lowercase();
    prefixes.iter().any(|p| key.starts_with(p))
}

fn is_acoustic_guitar(input: &InputChannel) -> bool {
    key_starts_with(input, &["ac_guitar", "acoustic_guitar"])
}

fn is_electric_guitar(input: &InputChannel) -> bool {
    key_starts_with(input, &["el_guitar", "electric_guitar"])
}

fn is_keys_or_synth(input: &InputChannel) -> bool {
    input.group == Some(Group::Keys) || key_starts_with(input, &["keys_", "synth"])
}

/// Moves every acoustic guitar channel, whatever its group, right after the
/// last electric guitar (or the last guitar channel) that precedes the first
/// keyboard channel, and never past that keyboard channel.
pub fn reorder_acoustic_guitars(inputs: Vec<InputChannel>) -> Vec<InputChannel> {
    let (acoustic, mut result): (Vec<_>, Vec<_>) =
        inputs.into_iter().partition(is_acoustic_guitar);

    for guitar in acoustic {
        let idx_keys = result
            .iter()
            .position(is_keys_or_synth)
            .unwrap_or(result.len());
        let before_keys = &result[..idx_keys];
        let anchor = before_keys
            .iter()
            .rposition(is_electric_guitar)
            .or_else(|| {
                before_keys
                    .iter()
                    .rposition(|i| i.group == Some(Group::Guitar))
            });
        let insert_at = anchor.map(|i| i + 1).unwrap_or(0).min(idx_keys);
        result.insert(insert_at, guitar);
    }

    result
}
