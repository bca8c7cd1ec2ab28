// ============================================================================
// Value Mapping
// Lossless snapshot of a value and its inverse constructor
// ============================================================================

use super::denomination::{Denomination, StrFormat};
use super::errors::NumericResult;
use super::parser::RawValue;
use super::scaled_int::ScaledInt;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Snapshot of a value, keyed the way it is emitted as JSON.
///
/// `str_format` holds the custom formatter and is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct ValueMapping {
    pub accuracy: u32,
    pub base: i64,
    pub decimal: Decimal,
    pub decimals: Option<u32>,
    pub float: f64,
    pub int: i64,
    #[serde(rename = "str")]
    pub plain: String,
    #[serde(skip)]
    pub str_format: Option<StrFormat>,
    pub str_matcher: String,
    pub str_pretty: String,
    pub sym: String,
    pub value: Option<i64>,
}

/// Keys accepted when rebuilding a value. Any subset works.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MappingInput {
    /// Outer `None`: key missing. `Some(None)`: explicitly null
    #[serde(deserialize_with = "present")]
    pub value: Option<Option<i64>>,
    pub int: Option<i64>,
    pub decimal: Option<Decimal>,
    pub float: Option<f64>,
    #[serde(rename = "str")]
    pub plain: Option<String>,
    pub sym: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

impl From<&ValueMapping> for MappingInput {
    fn from(mapping: &ValueMapping) -> Self {
        Self {
            value: Some(mapping.value),
            int: Some(mapping.int),
            decimal: Some(mapping.decimal),
            float: Some(mapping.float),
            plain: Some(mapping.plain.clone()),
            sym: Some(mapping.sym.clone()),
        }
    }
}

impl From<ValueMapping> for MappingInput {
    fn from(mapping: ValueMapping) -> Self {
        Self::from(&mapping)
    }
}

impl MappingInput {
    /// First present of `value`, `int`, `decimal`, `float`, `str`.
    fn source(&self) -> RawValue {
        if let Some(Some(value)) = self.value {
            return RawValue::from(value);
        }
        if let Some(int) = self.int {
            return RawValue::from(int);
        }
        if let Some(decimal) = self.decimal {
            return RawValue::from(decimal);
        }
        if let Some(float) = self.float {
            return RawValue::from(float);
        }
        self.plain.clone().map_or(RawValue::Absent, RawValue::Text)
    }
}

impl ScaledInt {
    /// Ordered snapshot of everything needed to rebuild and render the value.
    pub fn to_mapping(&self) -> ValueMapping {
        let denomination = self.denomination();
        ValueMapping {
            accuracy: denomination.accuracy(),
            base: denomination.base(),
            decimal: self.to_real(),
            decimals: denomination.decimals(),
            float: self.to_float(),
            int: self.to_integer(),
            plain: self.to_display_string(false),
            str_format: denomination.str_format().cloned(),
            str_matcher: denomination.str_matcher().to_string(),
            str_pretty: self.to_display_string(true),
            sym: self.sym().to_string(),
            value: self.raw(),
        }
    }

    /// Rebuild a value from a mapping (or any subset of its keys).
    ///
    /// The `value` key, when present, is restored verbatim so that absent
    /// values stay absent.
    pub fn from_mapping(denomination: &Arc<Denomination>, mapping: impl Into<MappingInput>) -> Self {
        let input = mapping.into();
        let rebuilt = match &input.sym {
            Some(sym) => ScaledInt::with_symbol(denomination, input.source(), sym.clone()),
            None => ScaledInt::new(denomination, input.source()),
        };

        match input.value {
            Some(num) => rebuilt.with_stored(num),
            None => rebuilt,
        }
    }

    /// JSON form of [`to_mapping`](ScaledInt::to_mapping), formatter dropped.
    pub fn to_json_value(&self) -> NumericResult<serde_json::Value> {
        Ok(serde_json::to_value(self.to_mapping())?)
    }

    pub fn to_json(&self) -> NumericResult<String> {
        Ok(serde_json::to_string(&self.to_mapping())?)
    }

    /// # Errors
    /// `Serialization` when `json` is not an object of mapping keys.
    pub fn from_json(denomination: &Arc<Denomination>, json: &str) -> NumericResult<Self> {
        let input: MappingInput = serde_json::from_str(json)?;
        Ok(Self::from_mapping(denomination, input))
    }

    pub fn from_json_value(
        denomination: &Arc<Denomination>,
        json: serde_json::Value,
    ) -> NumericResult<Self> {
        let input: MappingInput = serde_json::from_value(json)?;
        Ok(Self::from_mapping(denomination, input))
    }
}

impl Serialize for ScaledInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_mapping().serialize(serializer)
    }
}
