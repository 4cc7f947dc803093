use thiserror::Error;

/// Errors raised at the boundary of the calculator: input checks, configuration,
/// base-rate lookup and report conversion. The amortisation engine itself never fails.
#[derive(Debug, Error, PartialEq)]
pub enum MortgageError {
    /// A loan parameter broke one of the validation rules.
    #[error("invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    /// A value was NaN or infinite.
    #[error("non-finite value in {field}")]
    NonFiniteValue { field: String },

    /// A finite value was too large to convert to a `Decimal`.
    #[error("value out of range in {field}")]
    OutOfRange { field: String },

    /// The published base rate could not be obtained.
    #[error("base rate unavailable: {0}")]
    RateUnavailable(String),

    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// JSON could not be read or written.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl MortgageError {
    pub(crate) fn invalid_input(field: &str, reason: &str) -> Self {
        MortgageError::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MortgageError>;
