// ============================================================================
// Denomination Registry
// Configuration table + factory for runtime-defined value types
// ============================================================================

use crate::numeric::{
    Denomination, DenominationBuilder, DenominationConfig, NumericError, NumericResult, RawValue,
    ScaledInt,
};
use heck::ToUpperCamelCase;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// Table of registered denominations keyed by type name.
///
/// Registration is check-then-insert under the write lock, so registering
/// the same name from several threads yields exactly one denomination.
/// Lookups clone the `Arc` out under a read lock; the denomination itself
/// is immutable and read without locking.
pub struct Registry {
    denominations: RwLock<HashMap<String, Arc<Denomination>>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            denominations: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry holding Money and ExchangeRate
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.insert_preset(Denomination::money());
        registry.insert_preset(Denomination::exchange_rate());
        registry
    }

    fn insert_preset(&self, denomination: Arc<Denomination>) {
        self.denominations
            .write()
            .entry(denomination.type_name().to_string())
            .or_insert(denomination);
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a denomination.
    ///
    /// Registering a name that already exists does nothing and returns the
    /// existing denomination.
    ///
    /// # Errors
    /// `InvalidConfig` when the builder's settings fail validation.
    ///
    /// # Example
    /// ```
    /// use store_as_int::numeric::DenominationBuilder;
    /// use store_as_int::registry::Registry;
    ///
    /// let registry = Registry::new();
    /// let custom = registry
    ///     .register(DenominationBuilder::new("custom").accuracy(2).decimals(2).symbol("¤"))
    ///     .unwrap();
    ///
    /// let value = registry.construct("custom", 1234.5).unwrap();
    /// assert_eq!(value.to_display_string(true), "¤1,234.50");
    /// assert_eq!(custom.type_name(), "Custom");
    /// ```
    pub fn register(&self, builder: DenominationBuilder) -> NumericResult<Arc<Denomination>> {
        let type_name = builder.get_config().type_name();

        if let Some(existing) = self.denominations.read().get(&type_name) {
            tracing::warn!(denomination = %type_name, "already registered, nothing has been done");
            return Ok(Arc::clone(existing));
        }

        let candidate = Arc::new(builder.build()?);

        match self.denominations.write().entry(type_name) {
            Entry::Occupied(entry) => {
                tracing::warn!(
                    denomination = %entry.key(),
                    "already registered, nothing has been done"
                );
                Ok(Arc::clone(entry.get()))
            },
            Entry::Vacant(entry) => {
                tracing::info!(
                    denomination = %entry.key(),
                    shortcut = candidate.name(),
                    accuracy = candidate.accuracy(),
                    decimals = ?candidate.decimals(),
                    symbol = candidate.symbol(),
                    "registered denomination"
                );
                Ok(Arc::clone(entry.insert(candidate)))
            },
        }
    }

    /// Register from plain configuration (e.g. loaded from JSON)
    pub fn register_config(&self, config: DenominationConfig) -> NumericResult<Arc<Denomination>> {
        self.register(DenominationBuilder::from_config(config))
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Look up by snake-case name or type name ("exchange_rate" or "ExchangeRate").
    ///
    /// # Errors
    /// `UnknownDenomination` when nothing is registered under `name`.
    pub fn get(&self, name: &str) -> NumericResult<Arc<Denomination>> {
        self.denominations
            .read()
            .get(&name.to_upper_camel_case())
            .cloned()
            .ok_or_else(|| NumericError::UnknownDenomination(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.denominations
            .read()
            .contains_key(&name.to_upper_camel_case())
    }

    /// Registered type names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.denominations.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.denominations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.denominations.read().is_empty()
    }

    // ========================================================================
    // Factory
    // ========================================================================

    /// Shorthand constructor: build a value of the named denomination.
    pub fn construct(&self, name: &str, raw: impl Into<RawValue>) -> NumericResult<ScaledInt> {
        Ok(ScaledInt::new(&self.get(name)?, raw))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
