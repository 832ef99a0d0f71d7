use miette::Diagnostic;
use thiserror::Error;

use crate::core::types::{DataType, ValueKind};

/// Errors raised by catalog lookups, cell access and row emission.
///
/// Every error is reported by the single call that caused it. A failed
/// get or set never leaves a partial change behind in the backing store.
#[derive(Debug, Error, Diagnostic)]
pub enum TableError {
    #[error("Unknown column: {name}")]
    #[diagnostic(
        code(tabula::unknown_column),
        help("column names are case-sensitive; check `column_titles()`")
    )]
    UnknownColumn { name: String },

    #[error("Column index {index} out of range [0, {count})")]
    #[diagnostic(code(tabula::column_out_of_range))]
    ColumnIndexOutOfRange { index: usize, count: usize },

    #[error("Row index {index} out of range [0, {count})")]
    #[diagnostic(code(tabula::row_out_of_range))]
    RowIndexOutOfRange { index: usize, count: usize },

    #[error("Cannot parse {text:?} as {target}")]
    #[diagnostic(code(tabula::malformed_number))]
    MalformedNumber { text: String, target: ValueKind },

    #[error("Duplicate column name: {name}")]
    #[diagnostic(code(tabula::duplicate_column))]
    DuplicateColumn { name: String },

    #[error("Invalid column definition {text:?}")]
    #[diagnostic(
        code(tabula::invalid_column_def),
        help("expected `name:TYPE` where TYPE is one of STRING, INT, LONG, FLOAT, DOUBLE, CATEGORICAL")
    )]
    InvalidColumnDef { text: String },

    #[error("Type mismatch in column {column}: expected {expected}, found {found}")]
    #[diagnostic(code(tabula::type_mismatch))]
    TypeMismatch {
        column: usize,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Expected a {expected} value, found {found}")]
    #[diagnostic(code(tabula::unexpected_kind))]
    UnexpectedKind {
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Column {column} is {data_type}, not CATEGORICAL")]
    #[diagnostic(code(tabula::not_categorical))]
    NotCategorical { column: usize, data_type: DataType },

    #[error("Unknown category code {code} in column {column}")]
    #[diagnostic(code(tabula::unknown_category))]
    UnknownCategory { column: usize, code: i32 },

    #[error("Row has {found} values but the table has {expected} columns")]
    #[diagnostic(code(tabula::row_width_mismatch))]
    RowWidthMismatch { expected: usize, found: usize },

    #[error("I/O failure while emitting row")]
    #[diagnostic(code(tabula::io))]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = TableError> = std::result::Result<T, E>;
