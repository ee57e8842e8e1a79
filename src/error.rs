/// The error type returned by every fallible operation in this crate.
///
/// Both variants carry a human-readable message naming the check that failed
/// and the offending values.
///
/// # Variants
///
/// - `InputValidationError` - an argument failed validation before any work
///   was done (zero layer size, bad learning rate, empty or mis-shaped data,
///   invalid split fraction)
/// - `ProcessingError` - inputs that passed entry validation turned out to be
///   inconsistent with each other mid-operation, such as a forward-pass
///   bundle produced for a different batch
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InputValidationError(String),
    ProcessingError(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InputValidationError(msg) => write!(f, "input validation failed: {}", msg),
            ModelError::ProcessingError(msg) => write!(f, "processing failed: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}
