use std::{io::Write, sync::Arc};

use crate::{
    catalog::{ColumnCatalog, ColumnRef},
    common::error::Result,
    core::{
        coerce::{Primitive, coerce},
        types::{DataType, Value, ValueKind},
    },
    storage::{CellStore, column_store::ColumnStore},
};

/// Separator between cells in an emitted row line.
pub const SEPARATOR: char = '\t';

/// A non-owning handle on one row of a table.
///
/// A view is just a row index plus shared access to the table's catalog and
/// cell store. It caches nothing: every get reads the store, and every set
/// is visible at once to any other view over the same row.
///
/// Columns can be addressed by index or by name. Cells can be read or
/// written as any of `String`, `i32`, `i64`, `f32` and `f64`, and are
/// converted to and from the column's declared type on the way (see
/// [`coerce`](crate::coerce)).
///
/// # Example
///
/// ```
/// use tabula::{ColumnDef, DataType, Table};
///
/// let mut table = Table::new("people", vec![
///     ColumnDef::new("name", DataType::String),
///     ColumnDef::new("age", DataType::Int),
///     ColumnDef::new("score", DataType::Double),
/// ])
/// .unwrap();
///
/// let row = table.add_row();
/// row.set_string("name", "Ann").unwrap();
/// row.set_int("age", 30).unwrap();
/// row.set_double("score", 9.5).unwrap();
///
/// assert_eq!(row.get_string("age").unwrap(), "30");
/// assert_eq!(row.get_long(1usize).unwrap(), 30);
/// assert_eq!(row.to_line().unwrap(), "Ann\t30\t9.5\n");
/// ```
pub struct RowView<'s, S: CellStore + ?Sized = ColumnStore> {
    row: usize,
    catalog: Arc<ColumnCatalog>,
    store: &'s S,
}

impl<'s, S: CellStore + ?Sized> RowView<'s, S> {
    /// Creates a view over `row`.
    ///
    /// The row index is not checked here; the store reports
    /// [`RowIndexOutOfRange`](crate::TableError::RowIndexOutOfRange) on access.
    pub fn new(row: usize, catalog: Arc<ColumnCatalog>, store: &'s S) -> Self {
        Self {
            row,
            catalog,
            store,
        }
    }

    /// The index of the row this view points at.
    pub fn index(&self) -> usize {
        self.row
    }

    /// The schema snapshot this view resolves columns against.
    pub fn catalog(&self) -> &ColumnCatalog {
        &self.catalog
    }

    /// Reads a cell as `T`, converting from the column's declared type.
    ///
    /// # Errors
    ///
    /// - [`UnknownColumn`](crate::TableError::UnknownColumn) or
    ///   [`ColumnIndexOutOfRange`](crate::TableError::ColumnIndexOutOfRange)
    ///   if the column does not exist
    /// - [`RowIndexOutOfRange`](crate::TableError::RowIndexOutOfRange) if the
    ///   row does not exist
    /// - [`MalformedNumber`](crate::TableError::MalformedNumber) if a text cell
    ///   does not parse as `T`
    pub fn get<'c, T: Primitive>(&self, column: impl Into<ColumnRef<'c>>) -> Result<T> {
        let index = self.catalog.resolve(column.into())?;
        T::from_value(self.read_raw(index, T::KIND)?)
    }

    /// Writes `value` into a cell, converting it to the column's declared type.
    ///
    /// A failed set leaves the cell untouched.
    pub fn set<'c, T: Primitive>(&self, column: impl Into<ColumnRef<'c>>, value: T) -> Result<()> {
        let index = self.catalog.resolve(column.into())?;
        self.write_raw(index, value.into_value())
    }

    /// Reads a cell in its natural kind.
    ///
    /// Categorical cells come back as their label.
    pub fn value<'c>(&self, column: impl Into<ColumnRef<'c>>) -> Result<Value> {
        let index = self.catalog.resolve(column.into())?;
        let natural = self.catalog.column(index)?.data_type.natural_kind();
        coerce(self.read_raw(index, natural)?, natural)
    }

    /// Writes a value of any kind into a cell.
    pub fn set_value<'c>(&self, column: impl Into<ColumnRef<'c>>, value: Value) -> Result<()> {
        let index = self.catalog.resolve(column.into())?;
        self.write_raw(index, value)
    }

    /// Every cell in column order, each in its natural kind.
    pub fn values(&self) -> Result<Vec<Value>> {
        (0..self.catalog.count())
            .map(|index| self.value(index))
            .collect()
    }

    /// Reads a cell as text.
    pub fn get_string<'c>(&self, column: impl Into<ColumnRef<'c>>) -> Result<String> {
        self.get(column)
    }

    /// Reads a cell as a 32-bit integer.
    pub fn get_int<'c>(&self, column: impl Into<ColumnRef<'c>>) -> Result<i32> {
        self.get(column)
    }

    /// Reads a cell as a 64-bit integer.
    pub fn get_long<'c>(&self, column: impl Into<ColumnRef<'c>>) -> Result<i64> {
        self.get(column)
    }

    /// Reads a cell as a 32-bit float.
    pub fn get_float<'c>(&self, column: impl Into<ColumnRef<'c>>) -> Result<f32> {
        self.get(column)
    }

    /// Reads a cell as a 64-bit float.
    pub fn get_double<'c>(&self, column: impl Into<ColumnRef<'c>>) -> Result<f64> {
        self.get(column)
    }

    /// Writes text into a cell.
    pub fn set_string<'c>(&self, column: impl Into<ColumnRef<'c>>, value: &str) -> Result<()> {
        self.set(column, value.to_owned())
    }

    /// Writes a 32-bit integer into a cell.
    pub fn set_int<'c>(&self, column: impl Into<ColumnRef<'c>>, value: i32) -> Result<()> {
        self.set(column, value)
    }

    /// Writes a 64-bit integer into a cell.
    pub fn set_long<'c>(&self, column: impl Into<ColumnRef<'c>>, value: i64) -> Result<()> {
        self.set(column, value)
    }

    /// Writes a 32-bit float into a cell.
    pub fn set_float<'c>(&self, column: impl Into<ColumnRef<'c>>, value: f32) -> Result<()> {
        self.set(column, value)
    }

    /// Writes a 64-bit float into a cell.
    pub fn set_double<'c>(&self, column: impl Into<ColumnRef<'c>>, value: f64) -> Result<()> {
        self.set(column, value)
    }

    /// Number of columns in the row.
    pub fn column_count(&self) -> usize {
        self.catalog.count()
    }

    /// Declared type of a column.
    pub fn column_type<'c>(&self, column: impl Into<ColumnRef<'c>>) -> Result<DataType> {
        self.catalog.type_of(column)
    }

    /// Declared types of every column, in order.
    pub fn column_types(&self) -> Vec<DataType> {
        self.catalog.types()
    }

    /// Name of the column at `index`.
    pub fn column_title(&self, index: usize) -> Result<&str> {
        self.catalog.name_of(index)
    }

    /// Names of every column, in order.
    pub fn column_titles(&self) -> Vec<String> {
        self.catalog.names()
    }

    /// Renders the row as one line: every cell as text, tab-separated,
    /// ending in `\n`.
    ///
    /// No quoting or escaping is applied; a tab inside a text cell ends up
    /// verbatim in the line.
    pub fn to_line(&self) -> Result<String> {
        let mut line = String::new();

        for index in 0..self.catalog.count() {
            if index > 0 {
                line.push(SEPARATOR);
            }
            line.push_str(&self.get::<String>(index)?);
        }

        line.push('\n');
        Ok(line)
    }

    /// Writes the row line to `sink`.
    ///
    /// Nothing is written if a cell cannot be read.
    pub fn write<W: Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        let line = self.to_line()?;
        sink.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Writes the row line to standard output.
    pub fn print(&self) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        self.write(&mut stdout)?;
        stdout.flush()?;
        Ok(())
    }

    fn read_raw(&self, index: usize, target: ValueKind) -> Result<Value> {
        let data_type = self.catalog.column(index)?.data_type;

        if data_type == DataType::Categorical && target == ValueKind::String {
            return self.store.read_label(self.row, index).map(Value::String);
        }

        self.store.read_cell(self.row, index)
    }

    fn write_raw(&self, index: usize, value: Value) -> Result<()> {
        let data_type = self.catalog.column(index)?.data_type;

        match (data_type, value) {
            (DataType::Categorical, Value::String(label)) => {
                self.store.write_label(self.row, index, &label)
            }
            (declared, value) => {
                let raw = coerce(value, declared.storage_kind())?;
                self.store.write_cell(self.row, index, raw)
            }
        }
    }
}

impl<S: CellStore + ?Sized> Clone for RowView<'_, S> {
    fn clone(&self) -> Self {
        Self {
            row: self.row,
            catalog: Arc::clone(&self.catalog),
            store: self.store,
        }
    }
}

impl<S: CellStore + ?Sized> std::fmt::Debug for RowView<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowView")
            .field("row", &self.row)
            .field("columns", &self.catalog.names())
            .finish()
    }
}
