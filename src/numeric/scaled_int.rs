// ============================================================================
// Scaled Integer
// Fixed-point value stored as `true value × base` in an i64
// ============================================================================

use super::denomination::{Denomination, Operator};
use super::errors::{NumericError, NumericResult};
use super::formatter;
use super::parser::{self, RawValue};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use strum::{Display, EnumIter, EnumString};

/// A fixed-point value of some [`Denomination`].
///
/// The stored integer is the true value multiplied by the denomination's
/// `base` and truncated toward zero. It may be absent, which only matters
/// for presence checks and plain rendering: arithmetic and [`value`]
/// treat an absent integer as `0`.
///
/// Values never change magnitude. Arithmetic and conversions build new
/// values; the symbol is the only mutable field.
///
/// # Example
/// ```
/// use store_as_int::numeric::{Denomination, ScaledInt};
///
/// let money = Denomination::money();
/// let price = ScaledInt::new(&money, 1234.5);
///
/// assert_eq!(price.to_integer(), 123_450);
/// assert_eq!(price.to_display_string(true), "$1,234.50");
/// assert_eq!(price.to_display_string(false), "1234.50");
/// ```
///
/// [`value`]: ScaledInt::value
#[derive(Clone)]
pub struct ScaledInt {
    denomination: Arc<Denomination>,
    num: Option<i64>,
    sym: Option<String>,
}

/// Pass-through operations forwarded to the stored integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Delegate {
    Abs,
    Neg,
    Signum,
    Succ,
    Pred,
    IsZero,
    IsPositive,
    IsNegative,
    IsEven,
    IsOdd,
    BitLength,
}

/// Outcome of a [`Delegate`] call.
#[derive(Debug, Clone)]
pub enum Passthrough {
    /// Numeric result, rewrapped into the caller's denomination
    Value(ScaledInt),
    Flag(bool),
    Count(u32),
}

impl ScaledInt {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build a value, silently treating malformed input as zero.
    pub fn new(denomination: &Arc<Denomination>, raw: impl Into<RawValue>) -> Self {
        let raw = raw.into();
        Self {
            num: parser::parse(&raw, denomination),
            denomination: Arc::clone(denomination),
            sym: None,
        }
    }

    /// Build a value with a per-instance symbol override.
    pub fn with_symbol(
        denomination: &Arc<Denomination>,
        raw: impl Into<RawValue>,
        symbol: impl Into<String>,
    ) -> Self {
        let mut value = Self::new(denomination, raw);
        value.sym = Some(symbol.into());
        value
    }

    /// Build a value, rejecting malformed or out-of-range input.
    ///
    /// # Errors
    /// - `InvalidInput` for strings that are not numeric
    /// - `Overflow` for numbers outside the scaled range
    pub fn try_new(denomination: &Arc<Denomination>, raw: impl Into<RawValue>) -> NumericResult<Self> {
        let raw = raw.into();
        Ok(Self {
            num: parser::parse_strict(&raw, denomination)?,
            denomination: Arc::clone(denomination),
            sym: None,
        })
    }

    /// Wrap an already scaled integer.
    #[inline]
    pub fn from_scaled(denomination: &Arc<Denomination>, scaled: i64) -> Self {
        Self {
            denomination: Arc::clone(denomination),
            num: Some(scaled),
            sym: None,
        }
    }

    /// A value of the generic denomination.
    pub fn standard(raw: impl Into<RawValue>) -> Self {
        Self::new(&Denomination::standard(), raw)
    }

    pub(crate) fn with_num(&self, num: Option<i64>) -> Self {
        Self {
            denomination: Arc::clone(&self.denomination),
            num,
            sym: None,
        }
    }

    /// Replace the stored integer, keeping denomination and symbol.
    pub(crate) fn with_stored(mut self, num: Option<i64>) -> Self {
        self.num = num;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn denomination(&self) -> &Arc<Denomination> {
        &self.denomination
    }

    pub fn accuracy(&self) -> u32 {
        self.denomination.accuracy()
    }

    pub fn base(&self) -> i64 {
        self.denomination.base()
    }

    pub fn base_float(&self) -> f64 {
        self.denomination.base() as f64
    }

    pub fn decimals(&self) -> Option<u32> {
        self.denomination.decimals()
    }

    /// Symbol in effect: the override if set, else the denomination's.
    pub fn sym(&self) -> &str {
        self.sym
            .as_deref()
            .unwrap_or_else(|| self.denomination.symbol())
    }

    pub fn set_sym(&mut self, symbol: impl Into<String>) {
        self.sym = Some(symbol.into());
    }

    /// Per-instance symbol override, if any
    pub fn sym_override(&self) -> Option<&str> {
        self.sym.as_deref()
    }

    /// The stored integer, `None` when absent
    #[inline]
    pub fn raw(&self) -> Option<i64> {
        self.num
    }

    /// The stored integer, absent coerced to `0`
    #[inline]
    pub fn value(&self) -> i64 {
        self.num.unwrap_or(0)
    }

    pub fn negative_sign(&self) -> &'static str {
        if self.value() < 0 {
            "-"
        } else {
            ""
        }
    }

    /// False when absent or when the value renders as blank.
    pub fn is_present(&self) -> bool {
        self.num.is_some() && !self.to_display_string(false).trim().is_empty()
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    #[inline]
    pub fn to_integer(&self) -> i64 {
        self.value()
    }

    /// `scaled / base` as an exact decimal
    pub fn to_real(&self) -> Decimal {
        Decimal::new(self.value(), self.accuracy())
    }

    /// `scaled / base` as a float approximation
    pub fn to_float(&self) -> f64 {
        self.value() as f64 / self.base_float()
    }

    /// Build a value of this denomination from `other`, keeping this symbol.
    pub fn convert(&self, other: impl Into<RawValue>) -> Self {
        let mut converted = Self::new(&self.denomination, other);
        converted.sym = self.sym.clone();
        converted
    }

    /// Foreign-operand hook: `(other converted, self)`.
    ///
    /// Lets a plain number on the left of an operation retry it against
    /// this value's denomination.
    pub fn coerce(&self, other: impl Into<RawValue>) -> (Self, Self) {
        (self.convert(other), self.clone())
    }

    /// The same real value in another denomination (truncated).
    pub fn to_denomination(&self, denomination: &Arc<Denomination>) -> Self {
        Self::new(denomination, self)
    }

    pub fn to_exchange_rate(&self) -> Self {
        self.to_denomination(&Denomination::exchange_rate())
    }

    pub fn exchange_rate_str(&self) -> String {
        self.to_exchange_rate().to_display_string(true)
    }

    // ========================================================================
    // Formatting
    // ========================================================================

    pub fn to_display_string(&self, include_symbol: bool) -> String {
        formatter::format(self, include_symbol, 0)
    }

    pub fn to_padded_string(&self, include_symbol: bool, padding: usize) -> String {
        formatter::format(self, include_symbol, padding)
    }

    /// Symbol-included rendering
    pub fn inspect(&self) -> String {
        self.to_display_string(true)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compare against anything convertible into this denomination.
    pub fn compare(&self, other: impl Into<RawValue>) -> Ordering {
        self.value().cmp(&self.convert(other).value())
    }

    pub fn equals(&self, other: impl Into<RawValue>) -> bool {
        self.compare(other) == Ordering::Equal
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Apply `op` to the two scaled integers and wrap the result.
    ///
    /// `rhs` is converted into this denomination first, so `+` and `-` are
    /// exact. `*`, `/`, `%` and `^` act on the raw scaled integers.
    pub fn apply(&self, op: Operator, rhs: impl Into<RawValue>) -> NumericResult<Self> {
        let rhs = self.convert(rhs);
        let result = op.apply(self.value(), rhs.value())?;
        Ok(self.with_num(Some(result)))
    }

    pub fn checked_add(&self, rhs: impl Into<RawValue>) -> NumericResult<Self> {
        self.apply(Operator::Add, rhs)
    }

    pub fn checked_sub(&self, rhs: impl Into<RawValue>) -> NumericResult<Self> {
        self.apply(Operator::Sub, rhs)
    }

    pub fn checked_mul(&self, rhs: impl Into<RawValue>) -> NumericResult<Self> {
        self.apply(Operator::Mul, rhs)
    }

    /// # Errors
    /// `DivisionByZero` when `rhs` has a zero stored integer.
    pub fn checked_div(&self, rhs: impl Into<RawValue>) -> NumericResult<Self> {
        self.apply(Operator::Div, rhs)
    }

    /// # Errors
    /// `DivisionByZero` when `rhs` has a zero stored integer.
    pub fn checked_rem(&self, rhs: impl Into<RawValue>) -> NumericResult<Self> {
        self.apply(Operator::Rem, rhs)
    }

    pub fn checked_pow(&self, rhs: impl Into<RawValue>) -> NumericResult<Self> {
        self.apply(Operator::Pow, rhs)
    }

    pub fn checked_neg(&self) -> NumericResult<Self> {
        self.value()
            .checked_neg()
            .map(|n| self.with_num(Some(n)))
            .ok_or(NumericError::Overflow)
    }

    // ========================================================================
    // Pass-through
    // ========================================================================

    /// Forward a named operation to the stored integer.
    ///
    /// # Errors
    /// `NoSuchOperation` when `name` is not a [`Delegate`].
    pub fn delegate(&self, name: &str) -> NumericResult<Passthrough> {
        let op = Delegate::from_str(name)
            .map_err(|_| NumericError::NoSuchOperation(name.to_string()))?;
        self.delegate_op(op)
    }

    pub fn delegate_op(&self, op: Delegate) -> NumericResult<Passthrough> {
        let n = self.value();
        let wrap = |result: Option<i64>| {
            result
                .map(|r| Passthrough::Value(self.with_num(Some(r))))
                .ok_or(NumericError::Overflow)
        };

        match op {
            Delegate::Abs => wrap(n.checked_abs()),
            Delegate::Neg => wrap(n.checked_neg()),
            Delegate::Signum => wrap(Some(n.signum())),
            Delegate::Succ => wrap(n.checked_add(1)),
            Delegate::Pred => wrap(n.checked_sub(1)),
            Delegate::IsZero => Ok(Passthrough::Flag(n == 0)),
            Delegate::IsPositive => Ok(Passthrough::Flag(n > 0)),
            Delegate::IsNegative => Ok(Passthrough::Flag(n < 0)),
            Delegate::IsEven => Ok(Passthrough::Flag(n % 2 == 0)),
            Delegate::IsOdd => Ok(Passthrough::Flag(n % 2 != 0)),
            Delegate::BitLength => {
                let bits = if n < 0 { !n } else { n };
                Ok(Passthrough::Count(i64::BITS - bits.leading_zeros()))
            },
        }
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Display for ScaledInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string(false))
    }
}

impl fmt::Debug for ScaledInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, raw={:?})",
            self.denomination.type_name(),
            self.inspect(),
            self.num
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::denomination::DenominationBuilder;

    fn money(raw: impl Into<RawValue>) -> ScaledInt {
        ScaledInt::new(&Denomination::money(), raw)
    }

    #[test]
    fn test_construction() {
        assert_eq!(ScaledInt::standard(1.0).raw(), Some(100_000));
        assert_eq!(ScaledInt::standard(0.123456789).raw(), Some(12_345));
        assert_eq!(ScaledInt::standard("-asaa0.12345").raw(), Some(-12_345));
        assert_eq!(ScaledInt::standard("ASDF").raw(), Some(0));
        assert_eq!(ScaledInt::standard("1.0.0").raw(), Some(0));
        for i in (1i64..10_000).step_by(97) {
            assert_eq!(ScaledInt::standard(i).value(), i);
        }
    }

    #[test]
    fn test_absent_value() {
        let absent = ScaledInt::standard(RawValue::Absent);
        assert_eq!(absent.raw(), None);
        assert_eq!(absent.value(), 0);
        assert_eq!(absent.to_integer(), 0);
        assert!(!absent.is_present());
        assert!(ScaledInt::standard(0).is_present());
        assert_eq!(absent.to_display_string(false), "");
    }

    #[test]
    fn test_blank_rendering_is_not_present() {
        let blank = Arc::new(
            DenominationBuilder::new("blank")
                .formatter(|_, _, _| Ok("  ".to_string()))
                .build()
                .unwrap(),
        );
        let value = blank.value(5);
        assert_eq!(value.raw(), Some(5));
        assert!(!value.is_present());
    }

    #[test]
    fn test_try_new() {
        let denom = Denomination::money();
        assert_eq!(
            ScaledInt::try_new(&denom, "ASDF").unwrap_err(),
            NumericError::InvalidInput
        );
        assert_eq!(ScaledInt::try_new(&denom, "$1.50").unwrap().raw(), Some(150));
    }

    #[test]
    fn test_symbol() {
        let mut value = money(100);
        assert_eq!(value.sym(), "$");
        assert_eq!(value.sym_override(), None);

        value.set_sym("USD ");
        assert_eq!(value.sym(), "USD ");
        assert_eq!(value.inspect(), "USD 1.00");

        let converted = value.convert(250);
        assert_eq!(converted.sym(), "USD ");
        assert_eq!(converted.raw(), Some(250));
    }

    #[test]
    fn test_conversions() {
        let value = money(-1234.56);
        assert_eq!(value.to_integer(), -123_456);
        assert_eq!(value.to_real(), Decimal::new(-123_456, 2));
        assert!((value.to_float() + 1234.56).abs() < 1e-9);
        assert_eq!(value.base(), 100);
        assert_eq!(value.base_float(), 100.0);
        assert_eq!(value.negative_sign(), "-");
        assert_eq!(money(5).negative_sign(), "");
    }

    #[test]
    fn test_comparison_converts_other() {
        let zero = ScaledInt::standard(RawValue::Absent);
        let fifteen = ScaledInt::standard(15.0);

        assert_eq!(zero.compare(-1), Ordering::Greater);
        assert_eq!(zero.compare(0), Ordering::Equal);
        assert_eq!(zero.compare(1), Ordering::Less);

        assert_eq!(fifteen.compare(14.0), Ordering::Greater);
        assert_eq!(fifteen.compare(15.0), Ordering::Equal);
        assert_eq!(fifteen.compare(16.0), Ordering::Less);
        assert!(fifteen.equals(15 * 100_000));
        assert!(fifteen.equals(Decimal::new(15, 0)));
        assert!(fifteen.equals("15"));
    }

    #[test]
    fn test_equality_ignores_symbol() {
        let a = money(100);
        let b = ScaledInt::with_symbol(&Denomination::money(), 100, "€");
        assert!(a.equals(&b));
    }

    #[test]
    fn test_arithmetic_on_scaled_integers() {
        let a = money(1.50);
        let b = money(2.25);

        assert_eq!(a.checked_add(&b).unwrap().raw(), Some(375));
        assert_eq!(a.checked_sub(&b).unwrap().raw(), Some(-75));
        assert_eq!(a.checked_mul(2).unwrap().raw(), Some(300));
        assert_eq!(b.checked_div(2).unwrap().raw(), Some(112));
        assert_eq!(b.checked_rem(100).unwrap().raw(), Some(25));
        assert_eq!(money(3).checked_pow(2).unwrap().raw(), Some(9));
    }

    #[test]
    fn test_arithmetic_result_is_new_instance() {
        let a = money(100);
        let sum = a.checked_add(1).unwrap();
        assert_eq!(a.raw(), Some(100));
        assert_eq!(sum.raw(), Some(101));
        assert!(Arc::ptr_eq(sum.denomination(), a.denomination()));
    }

    #[test]
    fn test_division_by_zero() {
        let a = money(100);
        assert_eq!(a.checked_div(0).unwrap_err(), NumericError::DivisionByZero);
        assert_eq!(
            a.checked_rem(money(RawValue::Absent)).unwrap_err(),
            NumericError::DivisionByZero
        );
    }

    #[test]
    fn test_absent_arithmetic_coerces_to_zero() {
        let absent = money(RawValue::Absent);
        assert_eq!(absent.checked_add(5).unwrap().raw(), Some(5));
    }

    #[test]
    fn test_delegate() {
        let value = money(-250);
        match value.delegate("abs").unwrap() {
            Passthrough::Value(v) => assert_eq!(v.raw(), Some(250)),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(value.delegate("is_negative"), Ok(Passthrough::Flag(true))));
        assert!(matches!(value.delegate("is_even"), Ok(Passthrough::Flag(true))));
        assert!(matches!(money(255).delegate("bit_length"), Ok(Passthrough::Count(8))));
        assert!(matches!(money(-256).delegate("bit_length"), Ok(Passthrough::Count(8))));
        assert_eq!(
            value.delegate("frobnicate").unwrap_err(),
            NumericError::NoSuchOperation("frobnicate".to_string())
        );
        assert_eq!(
            ScaledInt::from_scaled(&Denomination::money(), i64::MIN)
                .delegate_op(Delegate::Abs)
                .unwrap_err(),
            NumericError::Overflow
        );
    }

    #[test]
    fn test_cross_denomination() {
        let rate = money(1.5).to_exchange_rate();
        assert_eq!(rate.raw(), Some(15_000_000_000));
        assert_eq!(rate.inspect(), "%1.5000");
        assert_eq!(money(1.5).exchange_rate_str(), "%1.5000");
    }

    #[test]
    fn test_coerce() {
        let value = money(100);
        let (other, this) = value.coerce(5);
        assert_eq!(other.raw(), Some(5));
        assert_eq!(this.raw(), Some(100));
    }

    #[test]
    fn test_debug_and_display() {
        let value = money(123_456);
        assert_eq!(value.to_string(), "1234.56");
        assert_eq!(format!("{:?}", value), "Money($1,234.56, raw=Some(123456))");
    }

    #[test]
    fn test_end_to_end_custom_denomination() {
        let custom = Arc::new(
            DenominationBuilder::new("custom")
                .accuracy(2)
                .decimals(2)
                .symbol("¤")
                .build()
                .unwrap(),
        );
        let value = custom.value(1234.5);
        assert_eq!(value.to_integer(), 123_450);
        assert_eq!(value.to_display_string(true), "¤1,234.50");
        assert_eq!(value.to_display_string(false), "1234.50");
    }
}
