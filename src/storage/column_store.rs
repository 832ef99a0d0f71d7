use parking_lot::RwLock;

use crate::{
    TableError,
    common::error::Result,
    core::types::{DataType, Value},
    storage::{CellStore, category::CategoryDictionary},
};

/// Cells of one column, held in the column's declared representation.
#[derive(Debug)]
enum ColumnData {
    Strings(Vec<String>),
    Ints(Vec<i32>),
    Longs(Vec<i64>),
    Floats(Vec<f32>),
    Doubles(Vec<f64>),
    Categories {
        codes: Vec<i32>,
        dictionary: CategoryDictionary,
    },
}

impl ColumnData {
    fn new(data_type: DataType) -> Self {
        match data_type {
            DataType::String => ColumnData::Strings(Vec::new()),
            DataType::Int => ColumnData::Ints(Vec::new()),
            DataType::Long => ColumnData::Longs(Vec::new()),
            DataType::Float => ColumnData::Floats(Vec::new()),
            DataType::Double => ColumnData::Doubles(Vec::new()),
            DataType::Categorical => ColumnData::Categories {
                codes: Vec::new(),
                dictionary: CategoryDictionary::new(),
            },
        }
    }

    fn data_type(&self) -> DataType {
        match self {
            ColumnData::Strings(_) => DataType::String,
            ColumnData::Ints(_) => DataType::Int,
            ColumnData::Longs(_) => DataType::Long,
            ColumnData::Floats(_) => DataType::Float,
            ColumnData::Doubles(_) => DataType::Double,
            ColumnData::Categories { .. } => DataType::Categorical,
        }
    }

    /// Reads a cell. `row` must already be bounds-checked.
    fn get(&self, row: usize) -> Value {
        match self {
            ColumnData::Strings(v) => Value::String(v[row].clone()),
            ColumnData::Ints(v) => Value::Int(v[row]),
            ColumnData::Longs(v) => Value::Long(v[row]),
            ColumnData::Floats(v) => Value::Float(v[row]),
            ColumnData::Doubles(v) => Value::Double(v[row]),
            ColumnData::Categories { codes, .. } => Value::Int(codes[row]),
        }
    }

    /// Checks that `value` can be stored here without changing anything.
    ///
    /// Categorical columns accept a label (inserted on write) or an existing code.
    fn validate(&self, column: usize, value: &Value) -> Result<()> {
        match (self, value) {
            (ColumnData::Categories { .. }, Value::String(_)) => Ok(()),
            (ColumnData::Categories { dictionary, .. }, Value::Int(code)) => {
                if dictionary.contains_code(*code) {
                    Ok(())
                } else {
                    Err(TableError::UnknownCategory {
                        column,
                        code: *code,
                    })
                }
            }
            (data, value) if data.data_type().storage_kind() == value.kind() => Ok(()),
            (data, value) => Err(data.mismatch(column, value)),
        }
    }

    /// Overwrites a cell with a value that passed [`ColumnData::validate`].
    fn set(&mut self, column: usize, row: usize, value: Value) -> Result<()> {
        match (self, value) {
            (ColumnData::Strings(v), Value::String(s)) => v[row] = s,
            (ColumnData::Ints(v), Value::Int(i)) => v[row] = i,
            (ColumnData::Longs(v), Value::Long(l)) => v[row] = l,
            (ColumnData::Floats(v), Value::Float(f)) => v[row] = f,
            (ColumnData::Doubles(v), Value::Double(d)) => v[row] = d,
            (ColumnData::Categories { codes, dictionary }, Value::String(label)) => {
                codes[row] = dictionary.code_or_insert(&label);
            }
            (ColumnData::Categories { codes, .. }, Value::Int(code)) => codes[row] = code,
            (data, value) => return Err(data.mismatch(column, &value)),
        }

        Ok(())
    }

    /// Appends a value that passed [`ColumnData::validate`].
    fn push(&mut self, column: usize, value: Value) -> Result<()> {
        match (self, value) {
            (ColumnData::Strings(v), Value::String(s)) => v.push(s),
            (ColumnData::Ints(v), Value::Int(i)) => v.push(i),
            (ColumnData::Longs(v), Value::Long(l)) => v.push(l),
            (ColumnData::Floats(v), Value::Float(f)) => v.push(f),
            (ColumnData::Doubles(v), Value::Double(d)) => v.push(d),
            (ColumnData::Categories { codes, dictionary }, Value::String(label)) => {
                codes.push(dictionary.code_or_insert(&label));
            }
            (ColumnData::Categories { codes, .. }, Value::Int(code)) => codes.push(code),
            (data, value) => return Err(data.mismatch(column, &value)),
        }

        Ok(())
    }

    fn mismatch(&self, column: usize, value: &Value) -> TableError {
        TableError::TypeMismatch {
            column,
            expected: self.data_type().storage_kind(),
            found: value.kind(),
        }
    }

    fn push_default(&mut self) {
        match self {
            ColumnData::Strings(v) => v.push(String::new()),
            ColumnData::Ints(v) => v.push(0),
            ColumnData::Longs(v) => v.push(0),
            ColumnData::Floats(v) => v.push(0.0),
            ColumnData::Doubles(v) => v.push(0.0),
            ColumnData::Categories { codes, dictionary } => {
                codes.push(dictionary.code_or_insert(""));
            }
        }
    }
}

/// In-memory columnar cell storage.
///
/// Each column is a typed vector behind its own lock, so writes to the same
/// cell are serialized while readers of other columns never wait. Appending
/// rows needs `&mut self`, which keeps the row count fixed while any
/// [`RowView`](crate::RowView) borrows the store.
#[derive(Debug)]
pub struct ColumnStore {
    columns: Vec<RwLock<ColumnData>>,
    row_count: usize,
}

impl ColumnStore {
    /// Creates an empty store with one column per declared type.
    pub fn new(types: &[DataType]) -> Self {
        Self {
            columns: types
                .iter()
                .map(|&data_type| RwLock::new(ColumnData::new(data_type)))
                .collect(),
            row_count: 0,
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Appends a row of default cells and returns its index.
    ///
    /// Defaults are empty text, zero, and for categorical columns the code
    /// of the empty label.
    pub fn push_default_row(&mut self) -> usize {
        for column in &mut self.columns {
            column.get_mut().push_default();
        }

        self.row_count += 1;
        self.row_count - 1
    }

    /// Appends a row of raw values and returns its index.
    ///
    /// Each value must match its column's storage representation; categorical
    /// columns also accept a label. Nothing is appended unless every value
    /// is valid.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<usize> {
        if values.len() != self.columns.len() {
            return Err(TableError::RowWidthMismatch {
                expected: self.columns.len(),
                found: values.len(),
            });
        }

        for (idx, (column, value)) in self.columns.iter_mut().zip(&values).enumerate() {
            column.get_mut().validate(idx, value)?;
        }

        for (idx, (column, value)) in self.columns.iter_mut().zip(values).enumerate() {
            column.get_mut().push(idx, value)?;
        }

        self.row_count += 1;
        Ok(self.row_count - 1)
    }

    fn column(&self, column: usize) -> Result<&RwLock<ColumnData>> {
        self.columns
            .get(column)
            .ok_or(TableError::ColumnIndexOutOfRange {
                index: column,
                count: self.columns.len(),
            })
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row < self.row_count {
            Ok(())
        } else {
            Err(TableError::RowIndexOutOfRange {
                index: row,
                count: self.row_count,
            })
        }
    }
}

impl CellStore for ColumnStore {
    fn row_count(&self) -> usize {
        self.row_count
    }

    fn read_cell(&self, row: usize, column: usize) -> Result<Value> {
        let data = self.column(column)?;
        self.check_row(row)?;

        Ok(data.read().get(row))
    }

    fn write_cell(&self, row: usize, column: usize, value: Value) -> Result<()> {
        let data = self.column(column)?;
        self.check_row(row)?;

        let mut data = data.write();
        data.validate(column, &value)?;
        data.set(column, row, value)?;

        tracing::trace!(row, column, "wrote cell");
        Ok(())
    }

    fn read_label(&self, row: usize, column: usize) -> Result<String> {
        let data = self.column(column)?;
        self.check_row(row)?;

        match &*data.read() {
            ColumnData::Categories { codes, dictionary } => dictionary
                .label(codes[row])
                .map(str::to_owned)
                .ok_or(TableError::UnknownCategory {
                    column,
                    code: codes[row],
                }),
            other => Err(TableError::NotCategorical {
                column,
                data_type: other.data_type(),
            }),
        }
    }

    fn write_label(&self, row: usize, column: usize, label: &str) -> Result<()> {
        let data = self.column(column)?;
        self.check_row(row)?;

        match &mut *data.write() {
            ColumnData::Categories { codes, dictionary } => {
                codes[row] = dictionary.code_or_insert(label);
                tracing::trace!(row, column, label, "wrote category");
                Ok(())
            }
            other => Err(TableError::NotCategorical {
                column,
                data_type: other.data_type(),
            }),
        }
    }
}
