//! Document and project validation.

pub mod budgets;
mod setups;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use tracing::warn;

use crate::document::DocumentViewModel;
use crate::error::{ErrorCode, ValidationError, ValidationResult};
use crate::model::{Project, Purpose};

pub use budgets::DocumentBudget;
pub use setups::{required_monitor_mix_count, validate_effective_setups};

/// Validates a document against the default budget.
///
/// # Returns
/// * `ValidationResult` with `ok=true` if the input list is non-empty,
///   within budget and free of duplicate keys.
/// * `ValidationResult` with `ok=false` and the failing checks otherwise.
pub fn validate_document(vm: &DocumentViewModel) -> ValidationResult {
    validate_document_with_budget(vm, &DocumentBudget::default())
}

/// Validates a document against an explicit budget.
pub fn validate_document_with_budget(
    vm: &DocumentViewModel,
    budget: &DocumentBudget,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    let keys: Vec<&str> = vm.inputs.iter().map(|input| input.key.as_str()).collect();

    validate_input_count(keys.len(), budget, &mut result);
    validate_unique_keys(&keys, &mut result);

    if !result.is_ok() {
        warn!(
            errors = result.errors.len(),
            budget = %budget.name,
            "document validation failed"
        );
    }
    result
}

fn validate_input_count(count: usize, budget: &DocumentBudget, result: &mut ValidationResult) {
    if count == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoInputs,
            "No inputs generated. Check band.defaultLineup and musician.presets mapping.",
            "inputs",
        ));
    } else if count > budget.max_inputs {
        result.add_error(ValidationError::with_path(
            ErrorCode::TooManyInputs,
            format!("Too many inputs: {} (max {})", count, budget.max_inputs),
            "inputs",
        ));
    }
}

fn validate_unique_keys(keys: &[&str], result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    for (i, key) in keys.iter().enumerate() {
        if !seen.insert(*key) {
            result.add_error(ValidationError::with_path(
                ErrorCode::DuplicateInputKey,
                format!("Duplicate input key: \"{}\"", key),
                format!("inputs[{}].key", i),
            ));
        }
    }
}

/// Validates the project record before any resolution happens.
pub fn validate_project(project: &Project) -> ValidationResult {
    let mut result = ValidationResult::default();

    if project.id.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::MissingProjectField,
            "Project id must not be empty.",
            "id",
        ));
    }
    if project.band_ref.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::MissingProjectField,
            "Project bandRef must not be empty.",
            "bandRef",
        ));
    }

    if project.purpose == Purpose::Event {
        if project.event_date.is_none() {
            result.add_error(ValidationError::with_path(
                ErrorCode::MissingEventDetails,
                format!("Event project '{}' requires eventDate.", project.id),
                "eventDate",
            ));
        }
        let venue = project.event_venue.as_deref().map(str::trim).unwrap_or("");
        if venue.is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::MissingEventDetails,
                format!("Event project '{}' requires eventVenue.", project.id),
                "eventVenue",
            ));
        }
    }

    if !result.is_ok() {
        warn!(project = %project.id, errors = result.errors.len(), "project validation failed");
    }
    result
}
