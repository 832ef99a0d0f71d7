pub mod column_catalog;
pub mod column_def;

pub use column_catalog::{ColumnCatalog, ColumnRef};
pub use column_def::{Column, ColumnDef};
