use std::sync::Arc;

use crate::{
    TableError,
    catalog::{ColumnCatalog, ColumnDef},
    common::error::Result,
    core::{
        coerce::coerce,
        types::{DataType, Value},
    },
    storage::{CellStore, column_store::ColumnStore},
};

pub mod row;

pub use row::RowView;

/// An in-memory table: a named schema snapshot over a columnar cell store.
///
/// Rows are read and written through [`RowView`] handles handed out by
/// [`Table::row`], [`Table::rows`] and [`Table::add_row`].
///
/// # Example
///
/// ```
/// use tabula::{ColumnDef, DataType, Table, Value};
///
/// let mut table = Table::new("scores", vec![
///     ColumnDef::new("name", DataType::String),
///     ColumnDef::new("team", DataType::Categorical),
///     ColumnDef::new("points", DataType::Long),
/// ])
/// .unwrap();
///
/// table
///     .append_row(vec![Value::from("Ann"), Value::from("red"), Value::from("12")])
///     .unwrap();
///
/// let row = table.row(0).unwrap();
/// assert_eq!(row.get_long("points").unwrap(), 12);
/// assert_eq!(row.get_int("team").unwrap(), 0);
/// assert!(table.row(1).is_err());
/// ```
#[derive(Debug)]
pub struct Table {
    name: String,
    catalog: Arc<ColumnCatalog>,
    store: ColumnStore,
}

impl Table {
    /// Creates an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if two columns share a name.
    pub fn new(name: &str, columns: Vec<ColumnDef>) -> Result<Self> {
        let catalog = ColumnCatalog::new(columns)?;
        let store = ColumnStore::new(&catalog.types());

        tracing::debug!(table = name, columns = catalog.count(), "created table");

        Ok(Self {
            name: name.to_owned(),
            catalog: Arc::new(catalog),
            store,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current schema snapshot.
    pub fn catalog(&self) -> &Arc<ColumnCatalog> {
        &self.catalog
    }

    /// The backing cell store.
    pub fn store(&self) -> &ColumnStore {
        &self.store
    }

    pub fn row_count(&self) -> usize {
        self.store.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.catalog.count()
    }

    /// Appends a row of default cells and returns a view over it.
    pub fn add_row(&mut self) -> RowView<'_> {
        let index = self.store.push_default_row();
        tracing::debug!(table = %self.name, row = index, "added row");

        self.view(index)
    }

    /// Appends a row built from `values`, one per column in column order.
    ///
    /// Each value is converted to its column's declared type the same way a
    /// [`RowView`] set would. Text destined for a categorical column becomes
    /// a label; numbers become codes that must already exist.
    ///
    /// # Errors
    ///
    /// [`TableError::RowWidthMismatch`] if the number of values is wrong, or
    /// the first conversion error. Nothing is appended on failure.
    pub fn append_row(&mut self, values: Vec<Value>) -> Result<RowView<'_>> {
        if values.len() != self.catalog.count() {
            return Err(TableError::RowWidthMismatch {
                expected: self.catalog.count(),
                found: values.len(),
            });
        }

        let raw = values
            .into_iter()
            .zip(self.catalog.iter())
            .map(|(value, column)| match (column.data_type, value) {
                (DataType::Categorical, label @ Value::String(_)) => Ok(label),
                (declared, value) => coerce(value, declared.storage_kind()),
            })
            .collect::<Result<Vec<_>>>()?;

        let index = self.store.push_row(raw)?;
        tracing::debug!(table = %self.name, row = index, "appended row");

        Ok(self.view(index))
    }

    /// Gets a view over the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RowIndexOutOfRange`] if there is no such row.
    pub fn row(&self, index: usize) -> Result<RowView<'_>> {
        if index >= self.row_count() {
            return Err(TableError::RowIndexOutOfRange {
                index,
                count: self.row_count(),
            });
        }

        Ok(self.view(index))
    }

    /// Views over every row, in order.
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        (0..self.row_count()).map(|index| self.view(index))
    }

    fn view(&self, index: usize) -> RowView<'_> {
        RowView::new(index, Arc::clone(&self.catalog), &self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Table {
        let mut table = Table::new(
            "people",
            vec![
                ColumnDef::new("name", DataType::String),
                ColumnDef::new("age", DataType::Int),
                ColumnDef::new("score", DataType::Double),
            ],
        )
        .expect("valid table");

        table
            .append_row(vec![Value::from("Ann"), Value::Int(30), Value::Double(9.5)])
            .expect("valid row");
        table
            .append_row(vec![Value::from("Bob"), Value::from("41"), Value::Float(7.25)])
            .expect("valid row");

        table
    }

    #[test]
    fn test_new_table_is_empty() {
        let table = Table::new("t", vec![ColumnDef::new("a", DataType::Int)]).unwrap();
        assert_eq!(table.name(), "t");
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.rows().count(), 0);
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let err = Table::new(
            "t",
            vec![
                ColumnDef::new("a", DataType::Int),
                ColumnDef::new("a", DataType::String),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_append_row_coerces_values() {
        let table = people();
        let bob = table.row(1).unwrap();

        assert_eq!(bob.get_int("age").unwrap(), 41);
        assert_eq!(bob.get_double("score").unwrap(), 7.25);
        assert_eq!(bob.index(), 1);
    }

    #[test]
    fn test_append_row_failure_appends_nothing() {
        let mut table = people();

        let err = table
            .append_row(vec![Value::from("Cy"), Value::from("old"), Value::Double(1.0)])
            .unwrap_err();
        assert!(matches!(err, TableError::MalformedNumber { .. }));

        let err = table.append_row(vec![Value::from("Cy")]).unwrap_err();
        assert!(matches!(
            err,
            TableError::RowWidthMismatch {
                expected: 3,
                found: 1
            }
        ));

        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_add_row_starts_with_defaults() {
        let mut table = people();
        let row = table.add_row();

        assert_eq!(row.index(), 2);
        assert_eq!(row.to_line().unwrap(), "\t0\t0.0\n");

        row.set_string("name", "Dee").unwrap();
        assert_eq!(table.row(2).unwrap().get_string("name").unwrap(), "Dee");
    }

    #[test]
    fn test_row_out_of_range() {
        let table = people();
        assert!(matches!(
            table.row(2),
            Err(TableError::RowIndexOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn test_rows_emit_in_order() {
        let table = people();

        let mut sink = Vec::new();
        for row in table.rows() {
            row.write(&mut sink).unwrap();
        }

        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "Ann\t30\t9.5\nBob\t41\t7.25\n"
        );
    }

    #[test]
    fn test_categorical_append() {
        let mut table = Table::new(
            "t",
            vec![
                ColumnDef::new("team", DataType::Categorical),
                ColumnDef::new("n", DataType::Int),
            ],
        )
        .unwrap();

        table
            .append_row(vec![Value::from("red"), Value::Int(1)])
            .unwrap();
        table
            .append_row(vec![Value::Long(0), Value::Int(2)])
            .unwrap();

        assert_eq!(table.row(1).unwrap().get_string("team").unwrap(), "red");
        assert!(matches!(
            table.append_row(vec![Value::Int(9), Value::Int(3)]),
            Err(TableError::UnknownCategory { column: 0, code: 9 })
        ));
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_store_tracks_table_shape() {
        let mut table = people();
        assert_eq!(table.store().column_count(), table.column_count());
        assert_eq!(table.store().row_count(), 2);

        table.add_row();
        assert_eq!(table.store().row_count(), table.row_count());
        assert_eq!(table.store().read_cell(2, 1).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_views_share_one_catalog() {
        let table = people();
        let first = table.row(0).unwrap();
        let second = table.row(1).unwrap();

        assert!(std::ptr::eq(first.catalog(), second.catalog()));
        assert_eq!(Arc::strong_count(table.catalog()), 3);
    }
}
