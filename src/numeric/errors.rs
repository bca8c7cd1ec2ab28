// ============================================================================
// Numeric Errors
// Error types for scaled-integer construction, arithmetic and registration
// ============================================================================

use std::fmt;

/// Errors that can occur while building, combining or registering values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result does not fit the scaled integer range
    Overflow,
    /// Attempted division or modulo by a zero-valued operand
    DivisionByZero,
    /// Input string or value is malformed
    InvalidInput,
    /// `^` with a negative exponent
    NegativeExponent,
    /// Pass-through operation the scaled integer does not support
    NoSuchOperation(String),
    /// Registry lookup for a name that was never registered
    UnknownDenomination(String),
    /// Denomination settings rejected by validation
    InvalidConfig(String),
    /// Mapping could not be encoded or decoded
    Serialization(String),
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded the scaled integer range")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::NegativeExponent => {
                write!(f, "negative exponent: power would leave the integer domain")
            },
            NumericError::NoSuchOperation(name) => write!(f, "no such operation: `{}`", name),
            NumericError::UnknownDenomination(name) => {
                write!(f, "unknown denomination: `{}` is not registered", name)
            },
            NumericError::InvalidConfig(reason) => write!(f, "invalid denomination: {}", reason),
            NumericError::Serialization(reason) => write!(f, "serialization failed: {}", reason),
        }
    }
}

impl std::error::Error for NumericError {}

impl From<serde_json::Error> for NumericError {
    fn from(err: serde_json::Error) -> Self {
        NumericError::Serialization(err.to_string())
    }
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
