// ============================================================================
// Operator Overloads
// std::ops / comparison traits for ScaledInt, both operand orders
// ============================================================================
//
// The operator forms mirror host integer behaviour: they panic where an
// integer would (division by zero, overflow). Use the `checked_*` methods
// on `ScaledInt` to get a `NumericResult` instead.

use super::denomination::Operator;
use super::parser::RawValue;
use super::scaled_int::ScaledInt;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::ops::{Add, BitXor, Div, Mul, Neg, Rem, Sub};

fn apply_or_panic(lhs: &ScaledInt, op: Operator, rhs: RawValue) -> ScaledInt {
    match lhs.apply(op, rhs) {
        Ok(result) => result,
        Err(err) => panic!("{} {} failed: {}", lhs.denomination().type_name(), op, err),
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Into<RawValue>> $trait<T> for ScaledInt {
            type Output = ScaledInt;

            #[inline]
            fn $method(self, rhs: T) -> ScaledInt {
                apply_or_panic(&self, $op, rhs.into())
            }
        }

        impl<T: Into<RawValue>> $trait<T> for &ScaledInt {
            type Output = ScaledInt;

            #[inline]
            fn $method(self, rhs: T) -> ScaledInt {
                apply_or_panic(self, $op, rhs.into())
            }
        }
    };
}

impl_binary_op!(Add, add, Operator::Add);
impl_binary_op!(Sub, sub, Operator::Sub);
impl_binary_op!(Mul, mul, Operator::Mul);
impl_binary_op!(Div, div, Operator::Div);
impl_binary_op!(Rem, rem, Operator::Rem);
// `^` is exponentiation, not xor.
impl_binary_op!(BitXor, bitxor, Operator::Pow);

impl Neg for ScaledInt {
    type Output = ScaledInt;

    fn neg(self) -> ScaledInt {
        match self.checked_neg() {
            Ok(result) => result,
            Err(err) => panic!("{} negation failed: {}", self.denomination().type_name(), err),
        }
    }
}

impl Neg for &ScaledInt {
    type Output = ScaledInt;

    fn neg(self) -> ScaledInt {
        -self.clone()
    }
}

// ============================================================================
// Comparison
// ============================================================================

// The left operand's denomination decides: `other` is converted into it
// (truncating) before the stored integers are compared. Across
// denominations this is not symmetric: `money(1.23) == exchange_rate(1.23456)`
// holds, the reverse does not.

impl<T: Into<RawValue> + Clone> PartialEq<T> for ScaledInt {
    fn eq(&self, other: &T) -> bool {
        self.equals(other.clone())
    }
}

impl<T: Into<RawValue> + Clone> PartialOrd<T> for ScaledInt {
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        Some(self.compare(other.clone()))
    }
}

// ============================================================================
// Foreign Left-Hand Operands
// ============================================================================
//
// `5 + value` converts 5 into the value's denomination (via `coerce`) and
// retries the operation with the converted operand on the left.

macro_rules! impl_foreign_lhs {
    (@op $t:ty, $trait:ident, $method:ident, $op:expr) => {
        impl $trait<ScaledInt> for $t {
            type Output = ScaledInt;

            fn $method(self, rhs: ScaledInt) -> ScaledInt {
                let (lhs, rhs) = rhs.coerce(self);
                apply_or_panic(&lhs, $op, rhs.into())
            }
        }

        impl $trait<&ScaledInt> for $t {
            type Output = ScaledInt;

            fn $method(self, rhs: &ScaledInt) -> ScaledInt {
                let (lhs, rhs) = rhs.coerce(self);
                apply_or_panic(&lhs, $op, rhs.into())
            }
        }
    };
    ($($t:ty),*) => {
        $(
            impl PartialEq<ScaledInt> for $t {
                fn eq(&self, other: &ScaledInt) -> bool {
                    other.equals(*self)
                }
            }

            impl PartialOrd<ScaledInt> for $t {
                fn partial_cmp(&self, other: &ScaledInt) -> Option<Ordering> {
                    Some(other.compare(*self).reverse())
                }
            }

            impl_foreign_lhs!(@op $t, Add, add, Operator::Add);
            impl_foreign_lhs!(@op $t, Sub, sub, Operator::Sub);
            impl_foreign_lhs!(@op $t, Mul, mul, Operator::Mul);
            impl_foreign_lhs!(@op $t, Div, div, Operator::Div);
            impl_foreign_lhs!(@op $t, Rem, rem, Operator::Rem);
            impl_foreign_lhs!(@op $t, BitXor, bitxor, Operator::Pow);
        )*
    };
}

impl_foreign_lhs!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize, f32, f64, Decimal
);
