use std::collections::HashMap;

use crate::{
    TableError,
    catalog::column_def::{Column, ColumnDef},
    common::error::Result,
    core::types::DataType,
};

/// A column address: either its position or its name.
///
/// Every cell accessor takes `impl Into<ColumnRef>`, so `usize`, `&str` and
/// `&String` can be passed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRef<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for ColumnRef<'_> {
    fn from(index: usize) -> Self {
        ColumnRef::Index(index)
    }
}

impl<'a> From<&'a str> for ColumnRef<'a> {
    fn from(name: &'a str) -> Self {
        ColumnRef::Name(name)
    }
}

impl<'a> From<&'a String> for ColumnRef<'a> {
    fn from(name: &'a String) -> Self {
        ColumnRef::Name(name)
    }
}

/// An immutable schema snapshot mapping column names to positions and types.
///
/// The catalog is shared (behind an `Arc`) by every row view over a table.
/// A schema change builds a new catalog; views keep the snapshot they were
/// created with.
///
/// # Example
///
/// ```
/// use tabula::{ColumnCatalog, ColumnDef, DataType};
///
/// let catalog = ColumnCatalog::new(vec![
///     ColumnDef::new("name", DataType::String),
///     ColumnDef::new("age", DataType::Int),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.count(), 2);
/// assert_eq!(catalog.index_of("age").unwrap(), 1);
/// assert_eq!(catalog.type_of(0usize).unwrap(), DataType::String);
/// assert!(catalog.index_of("email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCatalog {
    columns: Vec<Column>,
    by_name: HashMap<String, usize>,
}

impl ColumnCatalog {
    /// Builds a catalog, assigning indices in definition order.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if two definitions share a name.
    pub fn new(defs: Vec<ColumnDef>) -> Result<Self> {
        let mut columns = Vec::with_capacity(defs.len());
        let mut by_name = HashMap::with_capacity(defs.len());

        for (index, def) in defs.into_iter().enumerate() {
            if by_name.insert(def.name.clone(), index).is_some() {
                return Err(TableError::DuplicateColumn { name: def.name });
            }

            columns.push(Column {
                index,
                name: def.name,
                data_type: def.data_type,
            });
        }

        tracing::debug!(columns = columns.len(), "built column catalog");

        Ok(Self { columns, by_name })
    }

    /// Number of columns.
    pub fn count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Finds the index of a column by name.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| TableError::UnknownColumn {
                name: name.to_owned(),
            })
    }

    /// Resolves either addressing form to a bounds-checked index.
    pub fn resolve(&self, column: ColumnRef<'_>) -> Result<usize> {
        match column {
            ColumnRef::Index(index) => self.column(index).map(|col| col.index),
            ColumnRef::Name(name) => self.index_of(name),
        }
    }

    /// Gets the full column entry at `index`.
    pub fn column(&self, index: usize) -> Result<&Column> {
        self.columns
            .get(index)
            .ok_or(TableError::ColumnIndexOutOfRange {
                index,
                count: self.count(),
            })
    }

    /// Name of the column at `index`.
    pub fn name_of(&self, index: usize) -> Result<&str> {
        self.column(index).map(|col| col.name.as_str())
    }

    /// Declared type of a column, addressed by index or name.
    pub fn type_of<'a>(&self, column: impl Into<ColumnRef<'a>>) -> Result<DataType> {
        let index = self.resolve(column.into())?;
        Ok(self.columns[index].data_type)
    }

    /// Declared types in column order.
    pub fn types(&self) -> Vec<DataType> {
        self.columns.iter().map(|col| col.data_type).collect()
    }

    /// Column names in column order.
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|col| col.name.clone()).collect()
    }

    /// Columns in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ColumnCatalog {
        ColumnCatalog::new(vec![
            ColumnDef::new("name", DataType::String),
            ColumnDef::new("age", DataType::Int),
            ColumnDef::new("score", DataType::Double),
            ColumnDef::new("team", DataType::Categorical),
        ])
        .expect("valid catalog")
    }

    #[test]
    fn test_indices_follow_definition_order() {
        let catalog = catalog();
        for (expected, column) in catalog.iter().enumerate() {
            assert_eq!(column.index, expected);
            assert_eq!(catalog.index_of(&column.name).unwrap(), expected);
        }
    }

    #[test]
    fn test_lookups_by_name_and_index_agree() {
        let catalog = catalog();
        assert_eq!(catalog.name_of(2).unwrap(), "score");
        assert_eq!(catalog.type_of(2usize).unwrap(), DataType::Double);
        assert_eq!(catalog.type_of("score").unwrap(), DataType::Double);
        assert_eq!(
            catalog.resolve(ColumnRef::Name("team")).unwrap(),
            catalog.resolve(ColumnRef::Index(3)).unwrap()
        );
    }

    #[test]
    fn test_snapshots_have_one_entry_per_column() {
        let catalog = catalog();
        assert_eq!(catalog.names(), vec!["name", "age", "score", "team"]);
        assert_eq!(
            catalog.types(),
            vec![
                DataType::String,
                DataType::Int,
                DataType::Double,
                DataType::Categorical
            ]
        );
        assert_eq!(catalog.names().len(), catalog.count());
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = catalog().type_of("email").unwrap_err();
        assert!(matches!(err, TableError::UnknownColumn { name } if name == "email"));
    }

    #[test]
    fn test_index_past_end_fails() {
        let catalog = catalog();
        let err = catalog.name_of(catalog.count()).unwrap_err();
        assert!(matches!(
            err,
            TableError::ColumnIndexOutOfRange { index: 4, count: 4 }
        ));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = ColumnCatalog::new(vec![
            ColumnDef::new("id", DataType::Int),
            ColumnDef::new("id", DataType::Long),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { name } if name == "id"));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = ColumnCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.types().is_empty());
    }
}
