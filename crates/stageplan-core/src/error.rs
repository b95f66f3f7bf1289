//! Error types for document resolution and validation.

use thiserror::Error;

/// Error codes for structural validation of projects, setups and documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Document errors (S001-S003)
    /// S001: No inputs were generated
    NoInputs,
    /// S002: Input list exceeds the console capacity
    TooManyInputs,
    /// S003: Two inputs share the same key
    DuplicateInputKey,

    // Setup errors (S010-S011)
    /// S010: Effective setups exceed the input budget
    SetupInputBudgetExceeded,
    /// S011: Setup slots are not in canonical group order
    GroupOrderViolation,

    // Project errors (S020-S021)
    /// S020: Project id or band reference is blank
    MissingProjectField,
    /// S021: Event project without event date or venue
    MissingEventDetails,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "S001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NoInputs => "S001",
            ErrorCode::TooManyInputs => "S002",
            ErrorCode::DuplicateInputKey => "S003",
            ErrorCode::SetupInputBudgetExceeded => "S010",
            ErrorCode::GroupOrderViolation => "S011",
            ErrorCode::MissingProjectField => "S020",
            ErrorCode::MissingEventDetails => "S021",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for validation and document assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Required monitor mixes exceed the aux send limit
    MonitorMixLimitExceeded,
    /// W002: Talkback owner is not part of the lineup
    TalkbackOwnerNotInLineup,
    /// W003: Notes template referenced by the band is missing
    MissingNotesTemplate,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::MonitorMixLimitExceeded => "W001",
            WarningCode::TalkbackOwnerNotInLineup => "W002",
            WarningCode::MissingNotesTemplate => "W003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "inputs\[3\].key").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for document resolution.
///
/// Every variant names the offending entity so the caller can point at the
/// record that needs fixing. None of these are retryable: the same inputs
/// always produce the same error.
#[derive(Debug, Error)]
pub enum StageplanError {
    /// The band does not declare a band leader.
    #[error("Band '{band_id}' must define bandLeader referencing an existing musician id.")]
    MissingBandLeader { band_id: String },

    /// The band leader id does not resolve to a known musician.
    #[error("Band '{band_id}' must define bandLeader referencing an existing musician id (unknown musician '{musician_id}').")]
    UnknownBandLeader {
        band_id: String,
        musician_id: String,
    },

    /// The project references a band that is not in the library.
    #[error("unknown band '{0}'")]
    UnknownBand(String),

    /// A lineup slot references a musician that is not in the library.
    #[error("unknown musician '{0}'")]
    UnknownMusician(String),

    /// A preset or monitor reference does not resolve.
    #[error("unknown preset ref '{reference}'")]
    UnknownPreset { reference: String },

    /// A reference resolved to an entity of the wrong type.
    #[error("preset ref \"{reference}\" of kind {expected} points to type \"{found}\"")]
    PresetKindMismatch {
        reference: String,
        expected: &'static str,
        found: &'static str,
    },

    /// An override adds a key that is already present.
    #[error("Preset override collision for input key \"{key}\".")]
    OverrideCollision { key: String },

    /// A drum setup is out of range.
    #[error("Invalid drum setup: {}", .0.join(" "))]
    InvalidDrumSetup(Vec<String>),

    /// The project record failed validation.
    #[error("project validation failed with {} error(s)", .0.len())]
    InvalidProject(Vec<ValidationError>),

    /// The assembled document failed validation.
    #[error("document validation failed with {} error(s)", .0.len())]
    DocumentInvalid(Vec<ValidationError>),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Result of validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::NoInputs.code(), "S001");
        assert_eq!(ErrorCode::DuplicateInputKey.code(), "S003");
        assert_eq!(ErrorCode::GroupOrderViolation.code(), "S011");
        assert_eq!(ErrorCode::MissingEventDetails.code(), "S021");
    }

    #[test]
    fn test_warning_codes() {
        assert_eq!(WarningCode::MonitorMixLimitExceeded.code(), "W001");
        assert_eq!(WarningCode::MissingNotesTemplate.code(), "W003");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorCode::NoInputs, "no inputs");
        assert_eq!(err.to_string(), "S001: no inputs");

        let err_with_path = ValidationError::with_path(
            ErrorCode::DuplicateInputKey,
            "Duplicate input key: \"voc_lead\"",
            "inputs[4].key",
        );
        assert_eq!(
            err_with_path.to_string(),
            "S003: Duplicate input key: \"voc_lead\" (at inputs[4].key)"
        );
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::success();
        assert!(result.is_ok());

        result.add_warning(ValidationWarning::new(
            WarningCode::MonitorMixLimitExceeded,
            "too many mixes",
        ));
        assert!(result.is_ok());

        result.add_error(ValidationError::new(ErrorCode::NoInputs, "no inputs"));
        assert!(!result.is_ok());
        assert_eq!(result.errors.len(), 1);
        assert!(result.into_result().is_err());
    }

    #[test]
    fn test_band_leader_error_message() {
        let err = StageplanError::MissingBandLeader {
            band_id: "the-band".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Band 'the-band' must define bandLeader referencing an existing musician id."
        );
    }

    #[test]
    fn test_drum_setup_error_joins_messages() {
        let err = StageplanError::InvalidDrumSetup(vec![
            "tomCount must be an integer between 0 and 4.".to_string(),
            "extraSnareCount must be an integer between 0 and 2.".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid drum setup: tomCount must be an integer between 0 and 4. extraSnareCount must be an integer between 0 and 2."
        );
    }
}
