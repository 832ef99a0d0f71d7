use crate::{common::error::Result, core::types::Value};

pub mod category;
pub mod column_store;

/// Backing storage for the cells of a table.
///
/// Cells are exchanged in their column's storage representation (see
/// [`DataType::storage_kind`](crate::DataType::storage_kind)); categorical
/// columns hold `Value::Int` codes and expose their labels through
/// [`CellStore::read_label`] and [`CellStore::write_label`].
///
/// Every method takes `&self` so that many row views can share one store.
/// Implementations must serialize concurrent writes to the same cell.
/// Reads and writes of disjoint cells may proceed independently.
///
/// A call that fails must leave the store unchanged.
pub trait CellStore {
    /// Number of rows currently stored.
    fn row_count(&self) -> usize;

    /// Reads the raw value of a cell.
    ///
    /// # Errors
    ///
    /// [`TableError::RowIndexOutOfRange`] or [`TableError::ColumnIndexOutOfRange`]
    /// for invalid indices.
    ///
    /// [`TableError::RowIndexOutOfRange`]: crate::TableError::RowIndexOutOfRange
    /// [`TableError::ColumnIndexOutOfRange`]: crate::TableError::ColumnIndexOutOfRange
    fn read_cell(&self, row: usize, column: usize) -> Result<Value>;

    /// Overwrites a cell with a raw value matching the column's representation.
    ///
    /// # Errors
    ///
    /// Invalid indices as for [`CellStore::read_cell`], plus
    /// [`TableError::TypeMismatch`](crate::TableError::TypeMismatch) for a value
    /// of the wrong kind and
    /// [`TableError::UnknownCategory`](crate::TableError::UnknownCategory) for a
    /// code missing from a categorical column's dictionary.
    fn write_cell(&self, row: usize, column: usize, value: Value) -> Result<()>;

    /// Reads the label of a categorical cell.
    fn read_label(&self, row: usize, column: usize) -> Result<String>;

    /// Stores `label` in a categorical cell, adding it to the column's
    /// dictionary if it is new.
    fn write_label(&self, row: usize, column: usize, label: &str) -> Result<()>;
}
