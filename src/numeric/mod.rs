// ============================================================================
// Numeric Module
// Fixed-point values stored as scaled integers
// ============================================================================
//
// This module provides:
// - ScaledInt: fixed-point value bound to a runtime Denomination
// - Denomination: immutable scale / decimals / symbol / formatter settings
// - parser / formatter: input coercion and display strings
// - NumericError: Error types for construction and arithmetic
//
// Design principles:
// - Stored integer is `true value × 10^accuracy`, truncated toward zero
// - Parsing and formatting are lenient (zero / empty string, never errors)
// - Checked arithmetic returns Result; operator traits panic like integers
// - Denominations are shared by Arc and never mutated after creation

mod denomination;
mod errors;
pub mod formatter;
mod mapping;
mod ops;
pub mod parser;
mod scaled_int;

pub use denomination::{
    Denomination, DenominationBuilder, DenominationConfig, FormatResult, Operator, StrFormat,
    DEFAULT_ACCURACY, MAX_ACCURACY, OPERATORS,
};
pub use errors::{NumericError, NumericResult};
pub use mapping::{MappingInput, ValueMapping};
pub use parser::RawValue;
pub use scaled_int::{Delegate, Passthrough, ScaledInt};

/// Naming alias only. The denomination lives on the value; build one with
/// [`crate::registry::money`] to get accuracy 2, two decimals and `$`.
pub type Money = ScaledInt;

/// Naming alias only. Build one with [`crate::registry::exchange_rate`] to
/// get accuracy 10, four decimals and `%`.
pub type ExchangeRate = ScaledInt;
