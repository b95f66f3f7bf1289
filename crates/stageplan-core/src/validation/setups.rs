//! Budget and ordering checks over the effective per-musician setups.

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::model::{Group, MusicianSetupPreset, GROUP_ORDER, WEDGE_MONITOR_REF};

use super::budgets::DocumentBudget;

/// Monitor mixes a setup needs from the console: wedges share the common
/// mix, anything else takes its own aux send.
pub fn required_monitor_mix_count(setup: &MusicianSetupPreset) -> usize {
    if setup.monitoring.monitor_ref == WEDGE_MONITOR_REF {
        0
    } else {
        1
    }
}

/// Validates the effective setups of a project, given in lineup order.
pub fn validate_effective_setups(
    slots: &[(Group, &MusicianSetupPreset)],
    budget: &DocumentBudget,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_input_total(slots, budget, &mut result);
    validate_monitor_mixes(slots, budget, &mut result);
    validate_group_order(slots, &mut result);

    result
}

fn validate_input_total(
    slots: &[(Group, &MusicianSetupPreset)],
    budget: &DocumentBudget,
    result: &mut ValidationResult,
) {
    let total: usize = slots.iter().map(|(_, setup)| setup.inputs.len()).sum();
    if total > budget.max_setup_inputs {
        result.add_error(ValidationError::new(
            ErrorCode::SetupInputBudgetExceeded,
            format!(
                "Total input channels exceed limit: {}/{}.",
                total, budget.max_setup_inputs
            ),
        ));
    }
}

fn validate_monitor_mixes(
    slots: &[(Group, &MusicianSetupPreset)],
    budget: &DocumentBudget,
    result: &mut ValidationResult,
) {
    let total: usize = slots
        .iter()
        .map(|(_, setup)| required_monitor_mix_count(setup))
        .sum();
    if total > budget.monitor_mix_limit {
        result.add_warning(ValidationWarning::new(
            WarningCode::MonitorMixLimitExceeded,
            format!(
                "Total required monitor mixes (aux sends) exceed the configured limit ({} > {}).",
                total, budget.monitor_mix_limit
            ),
        ));
    }
}

fn validate_group_order(slots: &[(Group, &MusicianSetupPreset)], result: &mut ValidationResult) {
    let out_of_order = slots
        .windows(2)
        .position(|pair| pair[1].0.rank() < pair[0].0.rank());

    if let Some(index) = out_of_order {
        let order = GROUP_ORDER
            .iter()
            .map(Group::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        result.add_error(ValidationError::with_path(
            ErrorCode::GroupOrderViolation,
            format!("Group order must stay fixed: {}.", order),
            format!("slots[{}]", index + 1),
        ));
    }
}
