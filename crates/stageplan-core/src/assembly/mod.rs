//! Input list assembly.
//!
//! Gathered per-musician inputs go through a fixed pipeline:
//!
//! 1. [`format_keys_input_instances`] relabels keyboard channels
//! 2. [`disambiguate_input_keys`] numbers repeated keys
//! 3. [`order_inputs`] sorts into the canonical list order
//! 4. [`reorder_acoustic_guitars`] moves acoustic guitars after the electrics
//!
//! [`assign_channels`] and [`build_input_rows`] then number the result and
//! produce the printed rows.

pub mod acoustic;
pub mod channels;
pub mod disambiguate;
pub mod keys;
pub mod order;

pub use acoustic::reorder_acoustic_guitars;
pub use channels::{
    assign_channels, build_input_rows, InputRow, NumberedInput, SPARE_KEY_PREFIX, SPARE_LABEL,
};
pub use disambiguate::disambiguate_input_keys;
pub use keys::format_keys_input_instances;
pub use order::{compare_inputs_for_role, order_inputs};

use tracing::debug;

use crate::model::InputChannel;

/// Runs the assembly pipeline over inputs gathered in lineup order.
pub fn assemble_inputs(gathered: Vec<InputChannel>) -> Vec<InputChannel> {
    let count = gathered.len();
    let formatted = format_keys_input_instances(gathered);
    let unique = disambiguate_input_keys(&formatted);
    let ordered = order_inputs(&unique, None);
    let result = reorder_acoustic_guitars(ordered);
    debug!(count, "assembled input list");
    result
}
