use strum::{Display, EnumDiscriminants, EnumString};

/// Declared column types supported by a table.
///
/// The declared type decides how a column's cells are held in the backing
/// store. Any cell can still be read or written through any of the five
/// primitive accessors; see [`coerce`](crate::coerce).
///
/// # Example
///
/// ```
/// use tabula::DataType;
///
/// assert_eq!("double".parse::<DataType>().unwrap(), DataType::Double);
/// assert_eq!(DataType::Categorical.to_string(), "CATEGORICAL");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum DataType {
    /// UTF-8 text.
    String,

    /// 32-bit signed integer.
    Int,

    /// 64-bit signed integer.
    Long,

    /// 32-bit floating point number.
    Float,

    /// 64-bit floating point number.
    Double,

    /// Labels drawn from a per-column dictionary.
    ///
    /// Stored as 32-bit integer codes.
    Categorical,
}

impl DataType {
    /// The kind of raw value the backing store holds for this type.
    pub fn storage_kind(self) -> ValueKind {
        match self {
            DataType::String => ValueKind::String,
            DataType::Int | DataType::Categorical => ValueKind::Int,
            DataType::Long => ValueKind::Long,
            DataType::Float => ValueKind::Float,
            DataType::Double => ValueKind::Double,
        }
    }

    /// The kind a cell of this type naturally reads back as.
    ///
    /// Same as [`DataType::storage_kind`] except for categorical columns,
    /// which read as their label text.
    pub fn natural_kind(self) -> ValueKind {
        match self {
            DataType::Categorical => ValueKind::String,
            other => other.storage_kind(),
        }
    }
}

/// A single cell value.
///
/// The tag set doubles as the closed set of coercion targets, exposed as
/// [`ValueKind`].
///
/// # Example
///
/// ```
/// use tabula::{Value, ValueKind};
///
/// let score = Value::Double(9.5);
/// assert_eq!(score.kind(), ValueKind::Double);
/// assert_eq!(score.to_string(), "9.5");
/// assert_eq!(Value::Float(7.0).to_string(), "7.0");
/// ```
#[derive(Debug, Clone, PartialEq, PartialOrd, EnumDiscriminants)]
#[strum_discriminants(name(ValueKind), derive(Hash, Display))]
pub enum Value {
    /// UTF-8 text.
    String(String),

    /// 32-bit signed integer.
    Int(i32),

    /// 64-bit signed integer.
    Long(i64),

    /// 32-bit floating point number.
    Float(f32),

    /// 64-bit floating point number.
    Double(f64),
}

impl Value {
    /// Returns the tag of this value.
    pub fn kind(&self) -> ValueKind {
        self.into()
    }
}

impl std::fmt::Display for Value {
    /// Canonical text form, used by every number-to-text coercion.
    ///
    /// Floats use the shortest representation that parses back to the same
    /// value and always keep a fractional part, except in exponent form
    /// (`1e16`, `1e-7`), which very large or small magnitudes switch to.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Long(l) => write!(f, "{l}"),
            Value::Float(fl) => write!(f, "{fl:?}"),
            Value::Double(d) => write!(f, "{d:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_parses_case_insensitively() {
        assert_eq!("STRING".parse::<DataType>().unwrap(), DataType::String);
        assert_eq!("Long".parse::<DataType>().unwrap(), DataType::Long);
        assert_eq!(
            "categorical".parse::<DataType>().unwrap(),
            DataType::Categorical
        );
        assert!("varchar".parse::<DataType>().is_err());
    }

    #[test]
    fn test_categorical_is_stored_as_int_but_reads_as_text() {
        assert_eq!(DataType::Categorical.storage_kind(), ValueKind::Int);
        assert_eq!(DataType::Categorical.natural_kind(), ValueKind::String);
        assert_eq!(DataType::Double.natural_kind(), ValueKind::Double);
    }

    #[test]
    fn test_value_display_is_canonical() {
        assert_eq!(Value::Int(-30).to_string(), "-30");
        assert_eq!(Value::Long(9_000_000_000).to_string(), "9000000000");
        assert_eq!(Value::Double(9.5).to_string(), "9.5");
        assert_eq!(Value::Double(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(0.1).to_string(), "0.1");
        assert_eq!(Value::from("Ann").to_string(), "Ann");

        // Very large or small magnitudes switch to exponent form.
        assert_eq!(Value::Double(1e15).to_string(), "1000000000000000.0");
        assert_eq!(Value::Double(1e16).to_string(), "1e16");
        assert_eq!(Value::Float(1e-7).to_string(), "1e-7");
        assert_eq!(Value::Double(-2.5e-9).to_string(), "-2.5e-9");
    }

    #[test]
    fn test_value_kind_matches_variant() {
        assert_eq!(Value::from(1i64).kind(), ValueKind::Long);
        assert_eq!(Value::from(1.5f32).kind(), ValueKind::Float);
        assert_eq!(Value::from(String::new()).kind(), ValueKind::String);
    }
}
