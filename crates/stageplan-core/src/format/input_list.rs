//! Input list labels: stereo pair detection and merged row labels.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{Group, InputChannel};

/// Side of a stereo channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StereoSide {
    L,
    R,
}

impl StereoSide {
    fn parse(s: &str) -> Option<StereoSide> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "left" => Some(StereoSide::L),
            "r" | "right" => Some(StereoSide::R),
            _ => None,
        }
    }
}

/// A label split into its base and stereo side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StereoLabel {
    pub base: String,
    pub side: StereoSide,
}

/// Two adjacent channels recognized as one stereo pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StereoPair {
    pub base: String,
    /// Side of the first channel of the pair.
    pub a_side: StereoSide,
    /// Overheads stay as two rows in the printed list.
    pub should_collapse: bool,
}

/// Read access to the fields stereo detection looks at.
pub trait InputLike {
    fn key(&self) -> &str;
    fn label(&self) -> &str;
    fn group(&self) -> Option<Group>;
    fn note(&self) -> Option<&str>;
}

impl InputLike for InputChannel {
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

// Side patterns, tried in order.
const SIDE_BEFORE_PAREN_PATTERN: &str = r"(?i)^(.*?)\s+(L|R)\s*(?:\(.*)?$";
const SIDE_IN_PARENS_PATTERN: &str = r"(?i)^(.*)\((L|R)\)$";
const SIDE_AFTER_DASH_PATTERN: &str = r"(?i)^(.*)\s+[-–—]\s*(L|R)\s*$";
const SIDE_WORD_PATTERN: &str = r"(?i)^(.*?)\s+(Left|Right)\s*(?:\(.*)?$";

const TRAILING_SIDE_PATTERN: &str = r"(?i)\s+(L|R)\s*$";
const SIDE_IN_TRAILING_PARENS_PATTERN: &str = r"(?i)\(([^()]*)\b(L|R)\b([^()]*)\)\s*$";
const SPACE_BEFORE_CLOSE_PATTERN: &str = r"\s+\)";
const SIDE_BEFORE_OPEN_PATTERN: &str = r"(?i)\s+(L|R)\s*\(";
const COUNTED_NOTE_PATTERN: &str = r"(?i)^\d+x\s+";

fn compile(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("invalid regex pattern"))
}

fn side_patterns() -> [&'static Regex; 4] {
    static BEFORE_PAREN: OnceLock<Regex> = OnceLock::new();
    static IN_PARENS: OnceLock<Regex> = OnceLock::new();
    static AFTER_DASH: OnceLock<Regex> = OnceLock::new();
    static WORD: OnceLock<Regex> = OnceLock::new();
    [
        compile(&BEFORE_PAREN, SIDE_BEFORE_PAREN_PATTERN),
        compile(&IN_PARENS, SIDE_IN_PARENS_PATTERN),
        compile(&AFTER_DASH, SIDE_AFTER_DASH_PATTERN),
        compile(&WORD, SIDE_WORD_PATTERN),
    ]
}

/// Collapses whitespace runs to single spaces and trims.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Recognizes `"Keys L"`, `"Keys L (main out L)"`, `"Keys (L)"`, `"Keys - L"`
/// and `"Keys Left"` style labels.
pub fn parse_stereo_label(label: &str) -> Option<StereoLabel> {
    let s = normalize_ws(label);
    side_patterns().iter().find_map(|re| {
        let caps = re.captures(&s)?;
        let side = StereoSide::parse(caps.get(2)?.as_str())?;
        Some(StereoLabel {
            base: normalize_ws(caps.get(1)?.as_str()),
            side,
        })
    })
}

/// True for drum overhead bases, which never merge into one row.
pub fn is_overheads_base(base: &str) -> bool {
    matches!(
        normalize_ws(base).to_lowercase().as_str(),
        "overhead" | "overheads" | "oh"
    )
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

/// Detects whether two adjacent channels form a stereo pair.
///
/// Both must share group and note. Matching label bases with opposite sides
/// win; otherwise `_l`/`_r` key suffixes decide.
pub fn resolve_stereo_pair<A: InputLike + ?Sized, B: InputLike + ?Sized>(
    a: &A,
    b: &B,
) -> Option<StereoPair> {
    if a.group() != b.group() {
        return None;
    }
    if normalize_ws(a.note().unwrap_or("")) != normalize_ws(b.note().unwrap_or("")) {
        return None;
    }

    if let (Some(pa), Some(pb)) = (parse_stereo_label(a.label()), parse_stereo_label(b.label())) {
        if pa.base == pb.base && pa.side != pb.side {
            let should_collapse = !is_overheads_base(&pa.base);
            return Some(StereoPair {
                base: pa.base,
                a_side: pa.side,
                should_collapse,
            });
        }
    }

    match (key_side(a.key()), key_side(b.key())) {
        (Some(sa), Some(sb)) if sa != sb => {
            let key = a.key();
            let base = key[..key.len() - 2].to_string();
            let should_collapse = !is_overheads_base(&base);
            Some(StereoPair {
                base,
                a_side: sa,
                should_collapse,
            })
        }
        _ => None,
    }
}

fn clean_side_label(label: &str) -> String {
    static TRAILING_SIDE: OnceLock<Regex> = OnceLock::new();
    static SIDE_IN_TRAILING_PARENS: OnceLock<Regex> = OnceLock::new();
    static SPACE_BEFORE_CLOSE: OnceLock<Regex> = OnceLock::new();
    static SIDE_BEFORE_OPEN: OnceLock<Regex> = OnceLock::new();

    let x = normalize_ws(label);
    let x = compile(&TRAILING_SIDE, TRAILING_SIDE_PATTERN)
        .replace(&x, "")
        .trim()
        .to_string();
    let x = compile(&SIDE_IN_TRAILING_PARENS, SIDE_IN_TRAILING_PARENS_PATTERN)
        .replace(&x, "(${1}${3})")
        .into_owned();
    let x = compile(&SPACE_BEFORE_CLOSE, SPACE_BEFORE_CLOSE_PATTERN)
        .replace_all(&x, ")")
        .into_owned();
    let x = normalize_ws(&x);
    let x = compile(&SIDE_BEFORE_OPEN, SIDE_BEFORE_OPEN_PATTERN)
        .replace(&x, " (")
        .into_owned();
    normalize_ws(&x)
}

/// Shared label of a merged stereo row.
///
/// `"Sample pad L (main out L)"` and `"Sample pad R (main out R)"` become
/// `"Sample pad (main out)"`.
pub fn format_input_list_label(left_label: &str, right_label: &str) -> String {
    let l = clean_side_label(left_label);
    let r = clean_side_label(right_label);
    if !l.is_empty() && l == r {
        return l;
    }
    if l.is_empty() {
        normalize_ws(left_label)
    } else {
        l
    }
}

/// Note of a merged row, prefixed with the channel count (`"2x DI"`).
pub fn format_input_list_note(note: Option<&str>, duplicate_count: usize) -> Option<String> {
    static COUNTED_NOTE: OnceLock<Regex> = OnceLock::new();

    let normalized = normalize_ws(note.unwrap_or(""));
    if normalized.is_empty() {
        return None;
    }
    if duplicate_count <= 1 || compile(&COUNTED_NOTE, COUNTED_NOTE_PATTERN).is_match(&normalized) {
        return Some(normalized);
    }
    Some(format!("{}x {}", duplicate_count, normalized))
}
