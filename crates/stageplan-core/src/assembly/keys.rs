//! Keyboard channel labels.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Group, InputChannel};

const KEYS_KEY_PATTERN: &str = r"(?i)^(keys|synth|synth_mono)(?:_(\d+))?(?:_[lr])?$";

static KEYS_KEY_REGEX: OnceLock<Regex> = OnceLock::new();

fn keys_key_regex() -> &'static Regex {
    KEYS_KEY_REGEX.get_or_init(|| Regex::new(KEYS_KEY_PATTERN).expect("invalid regex pattern"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeysKind {
    Keys,
    Synth,
    SynthMono,
}

impl KeysKind {
    fn label(&self) -> &'static str {
        match self {
            KeysKind::Keys => "Keys",
            KeysKind::Synth => "Synth",
            KeysKind::SynthMono => "Synth (mono)",
        }
    }
}

fn parse_kind_and_index(key: &str) -> Option<(KeysKind, u32)> {
    let caps = keys_key_regex().captures(key)?;
    let kind = match caps.get(1)?.as_str().to_ascii_lowercase().as_str() {
        "keys" => KeysKind::Keys,
        "synth" => KeysKind::Synth,
        _ => KeysKind::SynthMono,
    };
    let index = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(1);
    Some((kind, index))
}

/// Relabels keyboard channels as `Keys`, `Synth` or `Synth (mono)`.
///
/// Only `keys` group channels with a recognized key are touched. A kind is
/// numbered (`"Keys 2"`) when its highest index is above one.
pub fn format_keys_input_instances(inputs: Vec<InputChannel>) -> Vec<InputChannel> {
    let parsed: Vec<Option<(KeysKind, u32)>> = inputs
        .iter()
        .map(|input| {
            if input.group == Some(Group::Keys) {
                parse_kind_and_index(&input.key)
            } else {
                None
            }
        })
        .collect();

    let max_index = |kind: KeysKind| {
        parsed
            .iter()
            .flatten()
            .filter(|(k, _)| *k == kind)
            .map(|(_, index)| *index)
            .max()
            .unwrap_or(0)
    };

    inputs
        .into_iter()
        .zip(parsed.iter())
        .map(|(mut input, parsed)| {
            if let Some((kind, index)) = parsed {
                input.label = if max_index(*kind) <= 1 {
                    kind.label().to_string()
                } else {
                    format!("{} {}", kind.label(), index)
                };
            }
            input
        })
        .collect()
}
