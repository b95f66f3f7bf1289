//! Monitor output labels.

use serde::{Deserialize, Serialize};

use super::vocals::{format_vocal_label, VocalLabel};
use crate::model::Gender;

/// One row of the monitor table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorTableRow {
    pub no: usize,
    /// Mix name, e.g. `"Guitar"` or `"Lead vocal 2"`.
    pub output: String,
    /// Monitor label with the extra wedge suffix.
    pub note: String,
}

/// One monitor output of the monitor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorChannel {
    Guitar,
    Keys,
    Bass,
    Drums,
    Lead { index: usize, gender: Option<Gender> },
}

/// Fixed label for instrument mixes; lead mixes use the vocal label.
pub fn format_monitor_label(channel: &MonitorChannel, lead_count: usize) -> String {
    match channel {
        MonitorChannel::Guitar => "Guitar".to_string(),
        MonitorChannel::Keys => "Keys".to_string(),
        MonitorChannel::Bass => "Bass".to_string(),
        MonitorChannel::Drums => "Drums".to_string(),
        MonitorChannel::Lead { index, gender } => {
            format_vocal_label(&VocalLabel::new(*index, lead_count).with_gender(*gender))
        }
    }
}

/// Appends the extra wedge count to a monitor label when it is positive.
pub fn format_monitoring_label(base: &str, additional_wedge_count: Option<u32>) -> String {
    match additional_wedge_count {
        Some(count) if count > 0 => format!("{} + Additional wedge monitor {}x", base, count),
        _ => base.to_string(),
    }
}
