// ============================================================================
// Parser
// Turns heterogeneous input into a scaled integer for a denomination
// ============================================================================
//
// Rules, by input kind:
// - Absent / empty string  -> no value (distinct from zero)
// - Value, same denomination -> stored integer copied verbatim
// - Value, other denomination -> its real value, rescaled
// - Integer               -> used as the scaled integer directly
// - Real / float          -> multiplied by base, truncated toward zero
// - String                -> matched, then treated as a real
//
// The lenient entry point never fails: malformed strings and out-of-range
// numbers become zero. `parse_strict` reports them instead.

use super::denomination::Denomination;
use super::errors::{NumericError, NumericResult};
use super::scaled_int::ScaledInt;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

/// Any input a scaled value can be built from.
#[derive(Debug, Clone)]
pub enum RawValue {
    /// Nothing supplied
    Absent,
    /// Already at the target scale
    Integer(i128),
    /// Arbitrary-precision real
    Real(Decimal),
    /// Floating-point real
    Float(f64),
    /// Human-entered text, e.g. "$1,234.50"
    Text(String),
    /// Another scaled value
    Value(ScaledInt),
}

macro_rules! raw_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RawValue {
                #[inline]
                fn from(value: $t) -> Self {
                    RawValue::Integer(value as i128)
                }
            }
        )*
    };
}

raw_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<f32> for RawValue {
    fn from(value: f32) -> Self {
        RawValue::Float(value as f64)
    }
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        RawValue::Real(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<&String> for RawValue {
    fn from(value: &String) -> Self {
        RawValue::Text(value.clone())
    }
}

impl From<ScaledInt> for RawValue {
    fn from(value: ScaledInt) -> Self {
        RawValue::Value(value)
    }
}

impl From<&ScaledInt> for RawValue {
    fn from(value: &ScaledInt) -> Self {
        RawValue::Value(value.clone())
    }
}

impl From<&RawValue> for RawValue {
    fn from(value: &RawValue) -> Self {
        value.clone()
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Absent, Into::into)
    }
}

// ============================================================================
// Matcher
// ============================================================================

/// Build the numeric-string pattern for a symbol.
///
/// Optional sign, then the symbol and any other non-digit noise, then
/// integer digits and an optional `.` fraction.
pub fn matcher_pattern(symbol: &str) -> String {
    let symbol = if symbol.is_empty() {
        String::new()
    } else {
        format!("(?:{})?", regex::escape(symbol))
    };

    format!(
        r"^(?P<sign>[+-]?){}[^0-9+\-.]*(?P<int>[0-9]+)(?:\.(?P<frac>[0-9]+))?$",
        symbol
    )
}

/// Strip thousands separators and whitespace.
fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect()
}

/// Extract the signed decimal literal from a numeric string.
fn match_literal(text: &str, denomination: &Denomination) -> NumericResult<String> {
    let matcher = denomination.matcher().ok_or(NumericError::InvalidInput)?;
    let cleaned = clean(text);
    let caps = matcher
        .captures(&cleaned)
        .ok_or(NumericError::InvalidInput)?;

    let sign = caps.name("sign").map_or("", |m| m.as_str());
    let int = caps.name("int").map_or("0", |m| m.as_str());

    let mut literal = String::with_capacity(cleaned.len());
    literal.push_str(if sign == "-" { "-" } else { "" });
    literal.push_str(int);
    if let Some(frac) = caps.name("frac") {
        literal.push('.');
        literal.push_str(frac.as_str());
    }

    Ok(literal)
}

// ============================================================================
// Scaling
// ============================================================================

/// Multiply a real by the denomination base and truncate toward zero.
fn scale_real(real: Decimal, denomination: &Denomination) -> NumericResult<i64> {
    real.checked_mul(Decimal::from(denomination.base()))
        .ok_or(NumericError::Overflow)?
        .trunc()
        .to_i64()
        .ok_or(NumericError::Overflow)
}

/// Floats go through their shortest decimal representation so that
/// `0.1234` scales to `12340`, not `12339`.
fn float_to_real(value: f64) -> NumericResult<Decimal> {
    if !value.is_finite() {
        return Err(NumericError::InvalidInput);
    }

    Decimal::from_str(&value.to_string()).map_err(|_| NumericError::Overflow)
}

/// Parse `raw` for `denomination`, reporting malformed or out-of-range input.
///
/// `Ok(None)` means the input was absent.
pub fn parse_strict(raw: &RawValue, denomination: &Arc<Denomination>) -> NumericResult<Option<i64>> {
    match raw {
        RawValue::Absent => Ok(None),
        RawValue::Value(value) if Arc::ptr_eq(value.denomination(), denomination) => {
            Ok(value.raw())
        },
        RawValue::Value(value) => match value.raw() {
            Some(_) => scale_real(value.to_real(), denomination).map(Some),
            None => Ok(None),
        },
        RawValue::Integer(int) => i64::try_from(*int)
            .map(Some)
            .map_err(|_| NumericError::Overflow),
        RawValue::Real(real) => scale_real(*real, denomination).map(Some),
        RawValue::Float(float) => scale_real(float_to_real(*float)?, denomination).map(Some),
        RawValue::Text(text) if text.trim().is_empty() => Ok(None),
        RawValue::Text(text) => {
            let literal = match_literal(text, denomination)?;
            let real = Decimal::from_str(&literal).map_err(|_| NumericError::Overflow)?;
            scale_real(real, denomination).map(Some)
        },
    }
}

/// Parse `raw` for `denomination`. Never fails.
///
/// Malformed strings and numbers outside the scaled range yield `Some(0)`.
pub fn parse(raw: &RawValue, denomination: &Arc<Denomination>) -> Option<i64> {
    match parse_strict(raw, denomination) {
        Ok(scaled) => scaled,
        Err(NumericError::InvalidInput) => {
            tracing::debug!(
                denomination = denomination.type_name(),
                input = ?raw,
                "malformed numeric input, using zero"
            );
            Some(0)
        },
        Err(err) => {
            tracing::warn!(
                denomination = denomination.type_name(),
                input = ?raw,
                error = %err,
                "numeric input out of range, using zero"
            );
            Some(0)
        },
    }
}

/// Whether `raw` is a number, a value of `denomination`, or a numeric string.
pub fn accepts(raw: &RawValue, denomination: &Arc<Denomination>) -> bool {
    match raw {
        RawValue::Absent => false,
        RawValue::Integer(_) | RawValue::Real(_) => true,
        RawValue::Float(float) => float.is_finite(),
        RawValue::Value(value) => Arc::ptr_eq(value.denomination(), denomination),
        RawValue::Text(text) => match_literal(text, denomination).is_ok(),
    }
}
