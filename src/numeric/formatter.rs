// ============================================================================
// Formatter
// Deterministic display strings for scaled values
// ============================================================================

use super::denomination::StrFormat;
use super::scaled_int::ScaledInt;
use std::panic::{self, AssertUnwindSafe};

/// Render `value`, using the denomination's custom formatter when present.
///
/// Never fails: a custom formatter that errors or panics renders as `""`.
pub fn format(value: &ScaledInt, include_symbol: bool, padding: usize) -> String {
    match value.denomination().str_format() {
        Some(custom) => format_custom(custom, value, include_symbol, padding),
        None => format_default(value, include_symbol, padding),
    }
}

fn format_custom(
    custom: &StrFormat,
    value: &ScaledInt,
    include_symbol: bool,
    padding: usize,
) -> String {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        custom.call(value, include_symbol, padding)
    }));

    match outcome {
        Ok(Ok(rendered)) => rendered,
        Ok(Err(err)) => {
            tracing::warn!(
                denomination = value.denomination().type_name(),
                error = %err,
                "custom formatter failed"
            );
            String::new()
        },
        Err(_) => {
            tracing::warn!(
                denomination = value.denomination().type_name(),
                "custom formatter panicked"
            );
            String::new()
        },
    }
}

/// The built-in algorithm.
///
/// `[-][symbol]integer[.fraction]`, where the integer part is zero-padded to
/// `padding` digits and grouped by thousands only when the symbol is shown.
pub fn format_default(value: &ScaledInt, include_symbol: bool, padding: usize) -> String {
    if !include_symbol && value.raw().is_none() && padding == 0 {
        return String::new();
    }

    let denomination = value.denomination();
    let magnitude = value.value().unsigned_abs();

    let (integer, fraction) = match denomination.decimals() {
        Some(decimals) => split_digits(magnitude, denomination.accuracy(), decimals),
        None => (magnitude.to_string(), None),
    };

    let integer = pad_digits(integer, padding);
    let integer = if include_symbol {
        group_thousands(&integer)
    } else {
        integer
    };

    let mut out = String::with_capacity(integer.len() + 24);
    out.push_str(value.negative_sign());
    if include_symbol {
        out.push_str(value.sym());
    }
    out.push_str(&integer);
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(&fraction);
    }
    out
}

/// Split a scaled magnitude into integer digits and `decimals` fraction digits.
///
/// Extra fraction digits are dropped, missing ones are filled with zeros.
fn split_digits(magnitude: u64, accuracy: u32, decimals: u32) -> (String, Option<String>) {
    let base = 10u64.pow(accuracy);
    let integer = (magnitude / base).to_string();

    if decimals == 0 {
        return (integer, None);
    }

    let width = accuracy as usize;
    let mut fraction = if width == 0 {
        String::new()
    } else {
        format!("{:0width$}", magnitude % base, width = width)
    };

    let decimals = decimals as usize;
    if fraction.len() > decimals {
        fraction.truncate(decimals);
    } else {
        fraction.extend(std::iter::repeat_n('0', decimals - fraction.len()));
    }

    (integer, Some(fraction))
}

fn pad_digits(digits: String, padding: usize) -> String {
    if digits.len() >= padding {
        digits
    } else {
        format!("{:0>width$}", digits, width = padding)
    }
}

/// Insert a comma every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::denomination::{Denomination, DenominationBuilder};
    use crate::numeric::parser::RawValue;
    use std::sync::Arc;

    fn standard(raw: impl Into<RawValue>) -> ScaledInt {
        Denomination::standard().value(raw)
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("123456789"), "123,456,789");
    }

    #[test]
    fn test_split_digits() {
        assert_eq!(split_digits(1_000, 5, 2), ("0".into(), Some("01".into())));
        assert_eq!(split_digits(123_456, 5, 2), ("1".into(), Some("23".into())));
        assert_eq!(split_digits(150, 2, 4), ("1".into(), Some("5000".into())));
        assert_eq!(split_digits(7, 0, 2), ("7".into(), Some("00".into())));
        assert_eq!(split_digits(150, 2, 0), ("1".into(), None));
    }

    #[test]
    fn test_integer_scale_rendering() {
        assert_eq!(standard(100_000).to_string(), "1.00");
        for i in 1..=10u32 {
            let front = if i < 5 {
                "0".to_string()
            } else {
                format!("1{}", "0".repeat((i - 5) as usize))
            };
            let back = match i {
                3 => "01",
                4 => "10",
                _ => "00",
            };
            assert_eq!(standard(10i64.pow(i)).to_string(), format!("{front}.{back}"));
        }
    }

    #[test]
    fn test_grouping_only_with_symbol() {
        let value = Denomination::money().value(123_456_789);
        assert_eq!(format(&value, false, 0), "1234567.89");
        assert_eq!(format(&value, true, 0), "$1,234,567.89");

        let small = standard(100_000);
        assert_eq!(format(&small, true, 0), "1.00");
    }

    #[test]
    fn test_negative_sign_precedes_symbol() {
        let value = Denomination::money().value(-123_456);
        assert_eq!(format(&value, true, 0), "-$1,234.56");
        assert_eq!(format(&value, false, 0), "-1234.56");
    }

    #[test]
    fn test_absent_renders_empty() {
        let absent = standard(RawValue::Absent);
        assert_eq!(format(&absent, false, 0), "");
        assert_eq!(format(&absent, false, 3), "000.00");

        let money = Denomination::money().value(RawValue::Absent);
        assert_eq!(format(&money, true, 0), "$0.00");
    }

    #[test]
    fn test_padding() {
        let value = Denomination::money().value(512);
        assert_eq!(format(&value, false, 4), "0005.12");
        assert_eq!(format(&value, true, 4), "$0,005.12");
        assert_eq!(format(&value, false, 1), "5.12");
    }

    #[test]
    fn test_no_decimals_prints_scaled_integer() {
        let denom = Arc::new(
            DenominationBuilder::new("points")
                .accuracy(3)
                .no_decimals()
                .symbol("pt")
                .build()
                .unwrap(),
        );
        let value = denom.value(-1_234_567);
        assert_eq!(format(&value, false, 0), "-1234567");
        assert_eq!(format(&value, true, 0), "-pt1,234,567");
    }

    #[test]
    fn test_symbol_override() {
        let value = Denomination::money().value_with_symbol(250, "€");
        assert_eq!(format(&value, true, 0), "€2.50");
    }

    #[test]
    fn test_custom_formatter() {
        let denom = Arc::new(
            DenominationBuilder::new("custom_to_s")
                .accuracy(2)
                .decimals(2)
                .symbol("$")
                .formatter(|value, _include_symbol, _padding| {
                    Ok(format!(
                        "CUSTOM_STR {}{}{:.2}",
                        value.negative_sign(),
                        value.sym(),
                        value.to_real().abs()
                    ))
                })
                .build()
                .unwrap(),
        );

        let value = denom.value(-1.23);
        assert_eq!(value.raw(), Some(-123));
        assert_eq!(format(&value, true, 0), "CUSTOM_STR -$1.23");
        assert_eq!(format(&value, false, 0), "CUSTOM_STR -$1.23");
    }

    #[test]
    fn test_failing_formatter_renders_empty() {
        let erroring = Arc::new(
            DenominationBuilder::new("erroring")
                .formatter(|_, _, _| Err("boom".into()))
                .build()
                .unwrap(),
        );
        assert_eq!(format(&erroring.value(1), true, 0), "");

        let panicking = Arc::new(
            DenominationBuilder::new("panicking")
                .formatter(|_, _, _| panic!("formatter exploded"))
                .build()
                .unwrap(),
        );
        assert_eq!(format(&panicking.value(1), true, 0), "");
    }
}
