//! Pure label formatters used by the document builder.

pub mod input_list;
pub mod meta;
pub mod monitors;
pub mod stageplan;
pub mod vocals;

pub use input_list::{
    format_input_list_label, format_input_list_note, is_overheads_base, normalize_ws,
    parse_stereo_label, resolve_stereo_pair, InputLike, StereoLabel, StereoPair, StereoSide,
};
pub use meta::{format_document_date, format_project_meta_line, MetaLine, MetaLineArgs};
pub use monitors::{
    format_monitor_label, format_monitoring_label, MonitorChannel, MonitorTableRow,
};
pub use stageplan::{
    format_monitor_bullet, format_monitor_bullets, format_stageplan_box_header,
    StageplanBoxHeader,
};
pub use vocals::{format_vocal_label, GenderMode, VocalLabel};
