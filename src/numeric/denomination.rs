// ============================================================================
// Denomination
// Immutable per-type configuration: scale, display decimals, symbol, formatter
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::parser::{self, RawValue};
use super::scaled_int::ScaledInt;
use heck::ToUpperCamelCase;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock};
use strum::{Display, EnumIter, EnumString};

/// Largest supported accuracy. `10^18` still fits an i64 scale factor.
pub const MAX_ACCURACY: u32 = 18;

/// Accuracy used by [`DenominationConfig::new`] when none is given.
pub const DEFAULT_ACCURACY: u32 = 1;

// ============================================================================
// Operator Set
// ============================================================================

/// Arithmetic operators eligible for delegation to the scaled integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Operator {
    #[strum(to_string = "+")]
    Add,
    #[strum(to_string = "-")]
    Sub,
    #[strum(to_string = "*")]
    Mul,
    #[strum(to_string = "/")]
    Div,
    #[strum(to_string = "%")]
    Rem,
    #[strum(to_string = "^", serialize = "**")]
    Pow,
}

/// The fixed operator set every denomination carries.
pub const OPERATORS: [Operator; 6] = [
    Operator::Add,
    Operator::Sub,
    Operator::Mul,
    Operator::Div,
    Operator::Rem,
    Operator::Pow,
];

impl Operator {
    /// Apply the operator to two scaled integers of the same scale.
    ///
    /// # Errors
    /// - `DivisionByZero` for `/` and `%` with a zero right-hand side
    /// - `NegativeExponent` for `^` with a negative right-hand side
    /// - `Overflow` if the result leaves the i64 range
    pub fn apply(self, lhs: i64, rhs: i64) -> NumericResult<i64> {
        match self {
            Operator::Add => lhs.checked_add(rhs).ok_or(NumericError::Overflow),
            Operator::Sub => lhs.checked_sub(rhs).ok_or(NumericError::Overflow),
            Operator::Mul => lhs.checked_mul(rhs).ok_or(NumericError::Overflow),
            Operator::Div => {
                if rhs == 0 {
                    return Err(NumericError::DivisionByZero);
                }
                lhs.checked_div(rhs).ok_or(NumericError::Overflow)
            },
            Operator::Rem => {
                if rhs == 0 {
                    return Err(NumericError::DivisionByZero);
                }
                lhs.checked_rem(rhs).ok_or(NumericError::Overflow)
            },
            Operator::Pow => {
                if rhs < 0 {
                    return Err(NumericError::NegativeExponent);
                }
                let exp = u32::try_from(rhs).map_err(|_| NumericError::Overflow)?;
                lhs.checked_pow(exp).ok_or(NumericError::Overflow)
            },
        }
    }
}

// ============================================================================
// Custom Formatter
// ============================================================================

/// Result returned by a custom formatter.
pub type FormatResult = Result<String, Box<dyn std::error::Error + Send + Sync>>;

type FormatFn = dyn Fn(&ScaledInt, bool, usize) -> FormatResult + Send + Sync;

/// Formatter that replaces the default rendering of a denomination.
///
/// Called with `(value, include_symbol, padding)`. Failures and panics are
/// swallowed by the formatter and render as an empty string.
#[derive(Clone)]
pub struct StrFormat(Arc<FormatFn>);

impl StrFormat {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ScaledInt, bool, usize) -> FormatResult + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, value: &ScaledInt, include_symbol: bool, padding: usize) -> FormatResult {
        (self.0)(value, include_symbol, padding)
    }
}

impl fmt::Debug for StrFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StrFormat(..)")
    }
}

// ============================================================================
// Denomination Configuration
// ============================================================================

fn default_decimals() -> Option<u32> {
    Some(0)
}

/// Plain, serializable settings for a denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominationConfig {
    /// Snake-case registration name (e.g. "exchange_rate")
    pub name: String,

    /// Digits of internal scale; `base = 10^accuracy`
    #[serde(default = "default_accuracy")]
    pub accuracy: u32,

    /// Digits shown when formatting. `None` prints the scaled integer as-is
    #[serde(default = "default_decimals")]
    pub decimals: Option<u32>,

    /// Default symbol, may be empty
    #[serde(default)]
    pub symbol: String,
}

fn default_accuracy() -> u32 {
    DEFAULT_ACCURACY
}

impl DenominationConfig {
    /// Create a configuration with registration defaults
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accuracy: DEFAULT_ACCURACY,
            decimals: default_decimals(),
            symbol: String::new(),
        }
    }

    pub fn with_accuracy(mut self, accuracy: u32) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Render the raw scaled integer without a decimal point
    pub fn without_decimals(mut self) -> Self {
        self.decimals = None;
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> NumericResult<()> {
        if self.name.trim().is_empty() {
            return Err(NumericError::InvalidConfig(
                "name cannot be empty".to_string(),
            ));
        }

        if self.type_name().is_empty() {
            return Err(NumericError::InvalidConfig(format!(
                "name `{}` has no usable characters",
                self.name
            )));
        }

        if self.accuracy > MAX_ACCURACY {
            return Err(NumericError::InvalidConfig(format!(
                "accuracy {} exceeds the maximum of {}",
                self.accuracy, MAX_ACCURACY
            )));
        }

        Ok(())
    }

    /// Registry key: snake-case name turned into a capitalized concatenation
    pub fn type_name(&self) -> String {
        self.name.to_upper_camel_case()
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl DenominationConfig {
    /// Generic configuration: accuracy 5, two display decimals, no symbol
    pub fn standard() -> Self {
        Self::new("base").with_accuracy(5).with_decimals(2)
    }

    /// Money: cents precision, `$`
    pub fn money() -> Self {
        Self::new("money")
            .with_accuracy(2)
            .with_decimals(2)
            .with_symbol("$")
    }

    /// Exchange rate: ten digits of scale, four shown, `%`
    pub fn exchange_rate() -> Self {
        Self::new("exchange_rate")
            .with_accuracy(10)
            .with_decimals(4)
            .with_symbol("%")
    }
}

// ============================================================================
// Denomination
// ============================================================================

/// A concrete value type: immutable once created.
///
/// Values hold an `Arc<Denomination>`; two values share a configuration
/// exactly when their `Arc`s point at the same denomination.
#[derive(Debug)]
pub struct Denomination {
    name: String,
    type_name: String,
    accuracy: u32,
    base: i64,
    decimals: Option<u32>,
    symbol: String,
    str_format: Option<StrFormat>,
    str_matcher: String,
    matcher: Option<Regex>,
}

static STANDARD: LazyLock<Arc<Denomination>> =
    LazyLock::new(|| Arc::new(Denomination::from_config(DenominationConfig::standard(), None)));

static MONEY: LazyLock<Arc<Denomination>> =
    LazyLock::new(|| Arc::new(Denomination::from_config(DenominationConfig::money(), None)));

static EXCHANGE_RATE: LazyLock<Arc<Denomination>> = LazyLock::new(|| {
    Arc::new(Denomination::from_config(
        DenominationConfig::exchange_rate(),
        None,
    ))
});

impl Denomination {
    /// Build from an already validated configuration.
    pub(crate) fn from_config(config: DenominationConfig, str_format: Option<StrFormat>) -> Self {
        let type_name = config.type_name();
        let str_matcher = parser::matcher_pattern(&config.symbol);
        let matcher = match Regex::new(&str_matcher) {
            Ok(re) => Some(re),
            Err(err) => {
                tracing::warn!(
                    denomination = %type_name,
                    error = %err,
                    "numeric matcher failed to compile; strings will parse as zero"
                );
                None
            },
        };

        Self {
            base: 10i64.pow(config.accuracy),
            name: config.name,
            type_name,
            accuracy: config.accuracy,
            decimals: config.decimals,
            symbol: config.symbol,
            str_format,
            str_matcher,
            matcher,
        }
    }

    /// The generic denomination (accuracy 5, two decimals, no symbol).
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    /// The preconfigured Money denomination.
    pub fn money() -> Arc<Self> {
        Arc::clone(&MONEY)
    }

    /// The preconfigured ExchangeRate denomination.
    pub fn exchange_rate() -> Arc<Self> {
        Arc::clone(&EXCHANGE_RATE)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    /// Scale factor, `10^accuracy`
    pub fn base(&self) -> i64 {
        self.base
    }

    pub fn decimals(&self) -> Option<u32> {
        self.decimals
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn str_format(&self) -> Option<&StrFormat> {
        self.str_format.as_ref()
    }

    /// Pattern numeric strings are matched against
    pub fn str_matcher(&self) -> &str {
        &self.str_matcher
    }

    pub(crate) fn matcher(&self) -> Option<&Regex> {
        self.matcher.as_ref()
    }

    pub fn operators(&self) -> &'static [Operator] {
        &OPERATORS
    }

    pub fn config(&self) -> DenominationConfig {
        DenominationConfig {
            name: self.name.clone(),
            accuracy: self.accuracy,
            decimals: self.decimals,
            symbol: self.symbol.clone(),
        }
    }

    // ========================================================================
    // Construction Shortcuts
    // ========================================================================

    /// Build a value of this denomination from one argument.
    pub fn value(self: &Arc<Self>, raw: impl Into<RawValue>) -> ScaledInt {
        ScaledInt::new(self, raw)
    }

    /// Build a value of this denomination with a per-instance symbol.
    pub fn value_with_symbol(
        self: &Arc<Self>,
        raw: impl Into<RawValue>,
        symbol: impl Into<String>,
    ) -> ScaledInt {
        ScaledInt::with_symbol(self, raw, symbol)
    }

    /// Whether `raw` is something this denomination can be built from:
    /// any number, a value of this denomination, or a matching string.
    pub fn accepts(self: &Arc<Self>, raw: impl Into<RawValue>) -> bool {
        parser::accepts(&raw.into(), self)
    }
}

// ============================================================================
// Denomination Builder
// ============================================================================

/// Fluent builder for registering a denomination.
///
/// # Example
/// ```
/// use store_as_int::numeric::DenominationBuilder;
///
/// let custom = DenominationBuilder::new("accurate_money")
///     .accuracy(4)
///     .decimals(2)
///     .symbol("$")
///     .build()
///     .unwrap();
///
/// assert_eq!(custom.type_name(), "AccurateMoney");
/// assert_eq!(custom.base(), 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct DenominationBuilder {
    config: DenominationConfig,
    str_format: Option<StrFormat>,
}

impl DenominationBuilder {
    /// Create a builder with registration defaults
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_config(DenominationConfig::new(name))
    }

    pub fn from_config(config: DenominationConfig) -> Self {
        Self {
            config,
            str_format: None,
        }
    }

    pub fn accuracy(mut self, accuracy: u32) -> Self {
        self.config.accuracy = accuracy;
        self
    }

    pub fn decimals(mut self, decimals: u32) -> Self {
        self.config.decimals = Some(decimals);
        self
    }

    pub fn no_decimals(mut self) -> Self {
        self.config.decimals = None;
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.config.symbol = symbol.into();
        self
    }

    /// Replace the default formatting algorithm
    pub fn formatter<F>(mut self, f: F) -> Self
    where
        F: Fn(&ScaledInt, bool, usize) -> FormatResult + Send + Sync + 'static,
    {
        self.str_format = Some(StrFormat::new(f));
        self
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &DenominationConfig {
        &self.config
    }

    /// Validate and build the denomination
    pub fn build(self) -> NumericResult<Denomination> {
        self.config.validate()?;
        Ok(Denomination::from_config(self.config, self.str_format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_operator_symbols() {
        let symbols: Vec<String> = OPERATORS.iter().map(|op| op.to_string()).collect();
        assert_eq!(symbols, vec!["+", "-", "*", "/", "%", "^"]);
        assert_eq!(Operator::from_str("**").unwrap(), Operator::Pow);
        assert_eq!(Operator::from_str("%").unwrap(), Operator::Rem);
        assert!(Operator::from_str("<<").is_err());
    }

    #[test]
    fn test_operator_apply() {
        assert_eq!(Operator::Add.apply(150, 25), Ok(175));
        assert_eq!(Operator::Sub.apply(25, 150), Ok(-125));
        assert_eq!(Operator::Mul.apply(100, 200), Ok(20_000));
        assert_eq!(Operator::Div.apply(7, 2), Ok(3));
        assert_eq!(Operator::Div.apply(-7, 2), Ok(-3));
        assert_eq!(Operator::Rem.apply(-7, 2), Ok(-1));
        assert_eq!(Operator::Pow.apply(3, 4), Ok(81));
    }

    #[test]
    fn test_operator_faults() {
        assert_eq!(Operator::Div.apply(1, 0), Err(NumericError::DivisionByZero));
        assert_eq!(Operator::Rem.apply(1, 0), Err(NumericError::DivisionByZero));
        assert_eq!(Operator::Pow.apply(2, -1), Err(NumericError::NegativeExponent));
        assert_eq!(Operator::Add.apply(i64::MAX, 1), Err(NumericError::Overflow));
        assert_eq!(Operator::Div.apply(i64::MIN, -1), Err(NumericError::Overflow));
        assert_eq!(Operator::Pow.apply(10, 19), Err(NumericError::Overflow));
    }

    #[test]
    fn test_config_defaults() {
        let config = DenominationConfig::new("custom_to_s");
        assert_eq!(config.accuracy, DEFAULT_ACCURACY);
        assert_eq!(config.decimals, Some(0));
        assert_eq!(config.symbol, "");
        assert_eq!(config.type_name(), "CustomToS");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            DenominationConfig::new("").validate(),
            Err(NumericError::InvalidConfig(_))
        ));
        assert!(matches!(
            DenominationConfig::new("___").validate(),
            Err(NumericError::InvalidConfig(_))
        ));
        assert!(matches!(
            DenominationConfig::new("huge").with_accuracy(19).validate(),
            Err(NumericError::InvalidConfig(_))
        ));
        assert!(DenominationConfig::new("edge").with_accuracy(18).validate().is_ok());
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: DenominationConfig = serde_json::from_str(r#"{"name": "points"}"#).unwrap();
        assert_eq!(config, DenominationConfig::new("points"));

        let config: DenominationConfig =
            serde_json::from_str(r#"{"name": "raw", "accuracy": 3, "decimals": null}"#).unwrap();
        assert_eq!(config.decimals, None);
        assert_eq!(config.accuracy, 3);
    }

    #[test]
    fn test_presets() {
        let money = Denomination::money();
        assert_eq!(money.type_name(), "Money");
        assert_eq!(money.base(), 100);
        assert_eq!(money.decimals(), Some(2));
        assert_eq!(money.symbol(), "$");

        let rate = Denomination::exchange_rate();
        assert_eq!(rate.type_name(), "ExchangeRate");
        assert_eq!(rate.base(), 10_000_000_000);
        assert_eq!(rate.decimals(), Some(4));
        assert_eq!(rate.symbol(), "%");

        let standard = Denomination::standard();
        assert_eq!(standard.base(), 100_000);
        assert_eq!(standard.symbol(), "");
        assert_eq!(standard.operators().len(), 6);

        assert!(Arc::ptr_eq(&Denomination::money(), &money));
    }

    #[test]
    fn test_builder() {
        let denom = DenominationBuilder::new("accurate_money")
            .accuracy(4)
            .decimals(2)
            .symbol("$")
            .build()
            .unwrap();

        assert_eq!(denom.name(), "accurate_money");
        assert_eq!(denom.type_name(), "AccurateMoney");
        assert_eq!(denom.base(), 10_000);
        assert!(denom.str_format().is_none());
        assert!(denom.matcher().is_some());
        assert_eq!(denom.config().symbol, "$");
    }

    #[test]
    fn test_builder_rejects_invalid() {
        let result = DenominationBuilder::new("too_precise").accuracy(40).build();
        assert!(matches!(result, Err(NumericError::InvalidConfig(_))));
    }

    #[test]
    fn test_accepts() {
        let standard = Denomination::standard();
        assert!(standard.accepts(1));
        assert!(standard.accepts(2.5));
        assert!(standard.accepts(rust_decimal::Decimal::ONE));
        assert!(standard.accepts("2.34"));
        assert!(standard.accepts("+2.34"));
        assert!(standard.accepts("-2.34"));
        assert!(!standard.accepts("ASFD"));
        assert!(!standard.accepts("2.3.4"));
        assert!(!standard.accepts(RawValue::Absent));

        let money_value = Denomination::money().value(100);
        assert!(Denomination::money().accepts(&money_value));
        assert!(!standard.accepts(&money_value));
    }
}
