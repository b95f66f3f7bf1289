//! Stage-plan box headers and monitor bullets.

use std::sync::OnceLock;

use regex::Regex;

const ADDITIONAL_WEDGE_PATTERN: &str =
    r"^(?P<base>.*?)(?:\s*\+\s*Additional wedge monitor\s+(?P<count>\d+)x)$";

static ADDITIONAL_WEDGE_REGEX: OnceLock<Regex> = OnceLock::new();

fn additional_wedge_regex() -> &'static Regex {
    ADDITIONAL_WEDGE_REGEX
        .get_or_init(|| Regex::new(ADDITIONAL_WEDGE_PATTERN).expect("invalid regex pattern"))
}

/// Arguments for [`format_stageplan_box_header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageplanBoxHeader<'a> {
    pub instrument_label: &'a str,
    pub first_name: Option<&'a str>,
    pub is_band_leader: bool,
}

/// Formats `"{INSTRUMENT} – {NAME}"` in upper case, with `" (band leader)"`
/// appended for the leader. `Lead vocal` is shortened to `Lead voc`.
pub fn format_stageplan_box_header(args: &StageplanBoxHeader<'_>) -> String {
    let name = args.first_name.map(str::trim).unwrap_or("");
    let instrument = if args.instrument_label == "Lead vocal" {
        "Lead voc"
    } else {
        args.instrument_label
    };
    let main = if name.is_empty() {
        instrument.to_string()
    } else {
        format!("{} – {}", instrument, name)
    };
    let suffix = if args.is_band_leader {
        " (band leader)"
    } else {
        ""
    };
    format!("{}{}", main.to_uppercase(), suffix)
}

/// One monitor bullet: `"{note} ({no})"`, or `"({no})"` without a note.
pub fn format_monitor_bullet(note: &str, no: usize) -> String {
    let label = note.trim();
    if label.is_empty() {
        format!("({})", no)
    } else {
        format!("{} ({})", label, no)
    }
}

/// Splits an extra-wedge suffix off a monitoring label into a second bullet.
pub fn format_monitor_bullets(note: &str, no: usize) -> Vec<String> {
    let label = note.trim();
    if label.is_empty() {
        return vec![format_monitor_bullet("", no)];
    }

    match additional_wedge_regex().captures(label) {
        Some(caps) => {
            let base = caps.name("base").map(|m| m.as_str().trim()).unwrap_or("");
            let count = caps.name("count").map(|m| m.as_str()).unwrap_or("");
            vec![
                format_monitor_bullet(base, no),
                format!("+ Additional wedge monitor {}x", count),
            ]
        }
        None => vec![format_monitor_bullet(label, no)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_header_with_leader() {
        let header = StageplanBoxHeader {
            instrument_label: "Lead vocal",
            first_name: Some(" Eliška "),
            is_band_leader: true,
        };
        assert_eq!(
            format_stageplan_box_header(&header),
            "LEAD VOC – ELIŠKA (band leader)"
        );
    }

    #[test]
    fn test_box_header_without_name() {
        for first_name in [None, Some("  ")] {
            let header = StageplanBoxHeader {
                instrument_label: "Keys",
                first_name,
                is_band_leader: false,
            };
            assert_eq!(format_stageplan_box_header(&header), "KEYS");
        }
    }

    #[test]
    fn test_monitor_bullets() {
        assert_eq!(format_monitor_bullets("", 3), vec!["(3)"]);
        assert_eq!(
            format_monitor_bullets("IEM STEREO wireless", 2),
            vec!["IEM STEREO wireless (2)"]
        );
        assert_eq!(
            format_monitor_bullets("IEM MONO wired + Additional wedge monitor 2x", 5),
            vec!["IEM MONO wired (5)", "+ Additional wedge monitor 2x"]
        );
    }
}
