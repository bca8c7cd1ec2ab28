// ============================================================================
// Store As Int Library
// Fixed-point decimal values stored as scaled integers
// ============================================================================

//! # Store As Int
//!
//! Currency-like quantities kept as scaled integers instead of floats.
//!
//! ## Features
//!
//! - **Runtime denominations**: register a name, accuracy, display decimals
//!   and symbol, then build values of that type by name
//! - **Lenient parsing** from integers, floats, decimals, strings like
//!   `"-$1,234.50"` and other values
//! - **Deterministic formatting** with thousands grouping, padding and
//!   symbol placement
//! - **Operators** on scaled integers, with plain numbers on either side
//! - **Lossless JSON** snapshots that rebuild identical values
//!
//! ## Example
//!
//! ```rust
//! use store_as_int::prelude::*;
//!
//! let price = money(1234.5);
//! assert_eq!(price.to_integer(), 123_450);
//! assert_eq!(price.to_display_string(true), "$1,234.50");
//!
//! let total = &price + money("$0.50");
//! assert_eq!(total.inspect(), "$1,235.00");
//!
//! let custom = register(DenominationBuilder::new("custom").accuracy(2).decimals(2).symbol("¤"))
//!     .unwrap();
//! let value = custom.value(1234.5);
//! assert_eq!(value.to_display_string(true), "¤1,234.50");
//!
//! let json = value.to_json().unwrap();
//! let rebuilt = ScaledInt::from_json(&custom, &json).unwrap();
//! assert_eq!(rebuilt, value);
//! ```

#[cfg(feature = "logging")]
pub mod logging;
pub mod numeric;
pub mod registry;

// Re-exports for convenience
pub mod prelude {
    pub use crate::numeric::{
        Delegate, Denomination, DenominationBuilder, DenominationConfig, ExchangeRate, Money,
        NumericError, NumericResult, Operator, Passthrough, RawValue, ScaledInt, ValueMapping,
    };
    pub use crate::registry::{construct, exchange_rate, money, register, Registry};
}
