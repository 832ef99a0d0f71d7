//! Conversion between cell value kinds.
//!
//! Every typed accessor funnels through [`coerce`], so the parsing and
//! narrowing rules live here and nowhere else:
//!
//! - text to number uses a strict parse of the exact text (no trimming)
//! - number to text uses the canonical [`Value`] display form: integers in
//!   plain decimal, floats in Rust's shortest round-trip form, which keeps a
//!   fractional part (`7.0`) and switches to exponent notation for very
//!   large or small magnitudes (`1e16`, `1e-7`)
//! - LONG to INT saturates at the `i32` bounds
//! - FLOAT/DOUBLE to INT/LONG truncates toward zero, saturates out of range,
//!   and maps NaN to zero
//! - DOUBLE to FLOAT rounds to nearest; out-of-range values become infinite

use std::str::FromStr;

use crate::{
    TableError,
    common::error::Result,
    core::types::{Value, ValueKind},
};

/// Converts `value` into the `target` kind.
pub fn coerce(value: Value, target: ValueKind) -> Result<Value> {
    let coerced = match (value, target) {
        (Value::String(text), ValueKind::String) => Value::String(text),
        (Value::String(text), ValueKind::Int) => Value::Int(parse(&text, target)?),
        (Value::String(text), ValueKind::Long) => Value::Long(parse(&text, target)?),
        (Value::String(text), ValueKind::Float) => Value::Float(parse(&text, target)?),
        (Value::String(text), ValueKind::Double) => Value::Double(parse(&text, target)?),

        (number, ValueKind::String) => Value::String(number.to_string()),

        (Value::Int(i), ValueKind::Int) => Value::Int(i),
        (Value::Long(l), ValueKind::Int) => Value::Int(saturate_i32(l)),
        (Value::Float(f), ValueKind::Int) => Value::Int(f as i32),
        (Value::Double(d), ValueKind::Int) => Value::Int(d as i32),

        (Value::Int(i), ValueKind::Long) => Value::Long(i64::from(i)),
        (Value::Long(l), ValueKind::Long) => Value::Long(l),
        (Value::Float(f), ValueKind::Long) => Value::Long(f as i64),
        (Value::Double(d), ValueKind::Long) => Value::Long(d as i64),

        (Value::Int(i), ValueKind::Float) => Value::Float(i as f32),
        (Value::Long(l), ValueKind::Float) => Value::Float(l as f32),
        (Value::Float(f), ValueKind::Float) => Value::Float(f),
        (Value::Double(d), ValueKind::Float) => Value::Float(d as f32),

        (Value::Int(i), ValueKind::Double) => Value::Double(f64::from(i)),
        (Value::Long(l), ValueKind::Double) => Value::Double(l as f64),
        (Value::Float(f), ValueKind::Double) => Value::Double(f64::from(f)),
        (Value::Double(d), ValueKind::Double) => Value::Double(d),
    };

    Ok(coerced)
}

fn parse<T: FromStr>(text: &str, target: ValueKind) -> Result<T> {
    text.parse().map_err(|_| TableError::MalformedNumber {
        text: text.to_owned(),
        target,
    })
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// A Rust type that a cell can be read as or written from.
///
/// Implemented for the five accessor kinds: `String`, `i32`, `i64`, `f32`
/// and `f64`.
pub trait Primitive: Sized {
    /// The value kind this type corresponds to.
    const KIND: ValueKind;

    /// Coerces `value` to [`Self::KIND`] and unwraps it.
    fn from_value(value: Value) -> Result<Self>;

    fn into_value(self) -> Value;
}

macro_rules! impl_primitive {
    ($ty:ty, $variant:ident) => {
        impl Primitive for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_value(value: Value) -> Result<Self> {
                match coerce(value, Self::KIND)? {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(TableError::UnexpectedKind {
                        expected: Self::KIND,
                        found: other.kind(),
                    }),
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }
    };
}

impl_primitive!(String, String);
impl_primitive!(i32, Int);
impl_primitive!(i64, Long);
impl_primitive!(f32, Float);
impl_primitive!(f64, Double);
