//! Document date and meta line.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::Purpose;

/// Label of the event meta line.
pub const EVENT_META_LABEL: &str = "Datum akce a místo konání:";

/// Meta line printed under the document title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MetaLine {
    Labeled { label: String, value: String },
    Plain { value: String },
}

impl MetaLine {
    /// Printed value without the label.
    pub fn value(&self) -> &str {
        match self {
            MetaLine::Labeled { value, .. } | MetaLine::Plain { value } => value,
        }
    }
}

/// Inputs of [`format_project_meta_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaLineArgs<'a> {
    pub purpose: Purpose,
    pub event_date: Option<NaiveDate>,
    pub event_venue: Option<&'a str>,
    pub document_date: NaiveDate,
    pub title: Option<&'a str>,
    pub note: Option<&'a str>,
}

/// Formats a date as `D. M. YYYY` without leading zeros.
pub fn format_document_date(date: NaiveDate) -> String {
    date.format("%-d. %-m. %Y").to_string()
}

/// Builds the meta line: event date and venue for events, otherwise the
/// note or title (falling back to `"Stage plan"`) with the update date.
pub fn format_project_meta_line(args: &MetaLineArgs<'_>) -> MetaLine {
    let doc_date = format_document_date(args.document_date);

    match args.purpose {
        Purpose::Event => {
            let event_date = args
                .event_date
                .map(format_document_date)
                .unwrap_or_default();
            let venue = args.event_venue.map(str::trim).unwrap_or("");
            MetaLine::Labeled {
                label: EVENT_META_LABEL.to_string(),
                value: format!(
                    "{}, {} (datum aktualizace: {})",
                    event_date, venue, doc_date
                ),
            }
        }
        Purpose::Generic => {
            let heading = [args.note, args.title]
                .into_iter()
                .flatten()
                .map(str::trim)
                .find(|s| !s.is_empty())
                .unwrap_or("Stage plan");
            MetaLine::Plain {
                value: format!("{} (datum aktualizace: {})", heading, doc_date),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn generic_args<'a>() -> MetaLineArgs<'a> {
        MetaLineArgs {
            purpose: Purpose::Generic,
            event_date: None,
            event_venue: None,
            document_date: date(2026, 1, 5),
            title: None,
            note: None,
        }
    }

    #[test]
    fn test_document_date_has_no_padding() {
        assert_eq!(format_document_date(date(2026, 3, 7)), "7. 3. 2026");
        assert_eq!(format_document_date(date(2025, 12, 24)), "24. 12. 2025");
    }

    #[test]
    fn test_event_meta_line() {
        let args = MetaLineArgs {
            purpose: Purpose::Event,
            event_date: Some(date(2026, 3, 7)),
            event_venue: Some(" Sono Centrum "),
            document_date: date(2026, 2, 20),
            title: None,
            note: None,
        };
        assert_eq!(
            format_project_meta_line(&args),
            MetaLine::Labeled {
                label: EVENT_META_LABEL.to_string(),
                value: "7. 3. 2026, Sono Centrum (datum aktualizace: 20. 2. 2026)".to_string(),
            }
        );
    }

    #[test]
    fn test_generic_meta_line_fallbacks() {
        let bare = generic_args();
        assert_eq!(
            format_project_meta_line(&bare).value(),
            "Stage plan (datum aktualizace: 5. 1. 2026)"
        );

        let titled = MetaLineArgs {
            title: Some("Tour 2026"),
            ..generic_args()
        };
        assert_eq!(
            format_project_meta_line(&titled).value(),
            "Tour 2026 (datum aktualizace: 5. 1. 2026)"
        );

        let noted = MetaLineArgs {
            title: Some("Tour 2026"),
            note: Some("Club shows"),
            ..generic_args()
        };
        assert_eq!(
            format_project_meta_line(&noted).value(),
            "Club shows (datum aktualizace: 5. 1. 2026)"
        );
    }
}
