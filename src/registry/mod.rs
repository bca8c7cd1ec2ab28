// ============================================================================
// Registry Module
// Process-wide denomination table and named constructor shortcuts
// ============================================================================

mod table;

pub use table::Registry;

use crate::numeric::{
    Denomination, DenominationBuilder, NumericResult, RawValue, ScaledInt,
};
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::with_defaults);

/// The process-wide registry, preloaded with Money and ExchangeRate.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Register a denomination in the global registry.
///
/// # Example
/// ```
/// use store_as_int::numeric::DenominationBuilder;
/// use store_as_int::registry;
///
/// registry::register(DenominationBuilder::new("accurate_money").accuracy(4).decimals(2).symbol("$"))
///     .unwrap();
///
/// let am = registry::construct("accurate_money", 1.2345).unwrap();
/// assert_eq!(am.to_display_string(true), "$1.23");
/// assert_eq!(am.value(), 12_345);
/// ```
pub fn register(builder: DenominationBuilder) -> NumericResult<Arc<Denomination>> {
    global().register(builder)
}

/// Look up a denomination in the global registry.
pub fn denomination(name: &str) -> NumericResult<Arc<Denomination>> {
    global().get(name)
}

/// Build a value of a globally registered denomination.
pub fn construct(name: &str, raw: impl Into<RawValue>) -> NumericResult<ScaledInt> {
    global().construct(name, raw)
}

/// Build a Money value.
///
/// ```
/// let m = store_as_int::registry::money(1001.23);
/// assert_eq!(m.to_display_string(false), "1001.23");
/// assert_eq!(m.to_display_string(true), "$1,001.23");
/// assert_eq!(m.value(), 100_123);
/// ```
pub fn money(raw: impl Into<RawValue>) -> ScaledInt {
    ScaledInt::new(&Denomination::money(), raw)
}

/// Build an ExchangeRate value.
///
/// ```
/// let er = store_as_int::registry::exchange_rate("1.234567890");
/// assert_eq!(er.to_display_string(false), "1.2345");
/// assert_eq!(er.to_display_string(true), "%1.2345");
/// assert_eq!(er.value(), 12_345_678_900);
/// ```
pub fn exchange_rate(raw: impl Into<RawValue>) -> ScaledInt {
    ScaledInt::new(&Denomination::exchange_rate(), raw)
}
