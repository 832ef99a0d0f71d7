//! Typed row access over an in-memory columnar table.
//!
//! A [`Table`] pairs an immutable [`ColumnCatalog`] with a [`CellStore`].
//! Individual rows are read and written through [`RowView`] handles, which
//! address columns by index or name and convert between text, 32/64-bit
//! integers and 32/64-bit floats on every access.

pub(crate) mod catalog;
pub(crate) mod common;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod storage;

pub use crate::core::{
    coerce::{Primitive, coerce},
    types::{DataType, Value, ValueKind},
};
pub use catalog::{Column, ColumnCatalog, ColumnDef, ColumnRef};
pub use common::error::{Result, TableError};
pub use db::table::{RowView, Table, row::SEPARATOR};
pub use storage::{CellStore, category::CategoryDictionary, column_store::ColumnStore};
