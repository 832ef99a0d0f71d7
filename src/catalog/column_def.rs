use std::str::FromStr;

use crate::{TableError, core::types::DataType};

/// Definition of a single column, before it is placed in a catalog.
///
/// # Example
///
/// ```
/// use tabula::{ColumnDef, DataType};
///
/// let age = ColumnDef::new("age", DataType::Int);
/// let score: ColumnDef = "score:double".parse().unwrap();
///
/// assert_eq!(age.name, "age");
/// assert_eq!(score.data_type, DataType::Double);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// The column name.
    pub name: String,

    /// The declared type for cells in this column.
    pub data_type: DataType,
}

impl ColumnDef {
    /// Creates a new column definition.
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_owned(),
            data_type,
        }
    }
}

impl FromStr for ColumnDef {
    type Err = TableError;

    /// Parses a `name:TYPE` pair. The type is matched case-insensitively.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || TableError::InvalidColumnDef {
            text: text.to_owned(),
        };

        let (name, data_type) = text.rsplit_once(':').ok_or_else(invalid)?;
        if name.is_empty() {
            return Err(invalid());
        }

        let data_type = data_type.parse::<DataType>().map_err(|_| invalid())?;

        Ok(Self::new(name, data_type))
    }
}

/// A column placed at a fixed position in a [`ColumnCatalog`].
///
/// [`ColumnCatalog`]: super::ColumnCatalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Zero-based position, stable for the lifetime of the catalog.
    pub index: usize,

    pub name: String,

    pub data_type: DataType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_def() {
        let def: ColumnDef = "team:Categorical".parse().unwrap();
        assert_eq!(def, ColumnDef::new("team", DataType::Categorical));
    }

    #[test]
    fn test_parse_column_def_keeps_colons_in_name() {
        let def: ColumnDef = "a:b:LONG".parse().unwrap();
        assert_eq!(def.name, "a:b");
        assert_eq!(def.data_type, DataType::Long);
    }

    #[test]
    fn test_parse_column_def_rejects_bad_input() {
        for text in ["age", ":INT", "age:integer", "age:"] {
            let err = text.parse::<ColumnDef>().unwrap_err();
            assert!(
                matches!(err, TableError::InvalidColumnDef { .. }),
                "{text} gave {err:?}"
            );
        }
    }
}
