//! Column-oriented agent tables.
//!
//! A [`Table`] holds named, ordered columns of equal length. Input columns
//! carry arbitrary JSON cells; columns computed by the scorer carry `f64`
//! with NaN marking an undefined value.

use profile_types::{Agent, AttributeSource};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// One column of a [`Table`].
#[derive(Debug, Clone)]
pub enum Column {
    /// Untyped input cells
    Values(Vec<Value>),
    /// Computed scores, NaN = undefined
    Scores(Vec<f64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Values(v) => v.len(),
            Column::Scores(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cell at `row` as JSON. Undefined scores become `null`.
    pub fn value_at(&self, row: usize) -> Option<Value> {
        match self {
            Column::Values(v) => v.get(row).cloned(),
            Column::Scores(s) => s.get(row).map(|&x| Value::from(x)),
        }
    }
}

/// Two score columns are equal when every pair of cells is equal or both are
/// undefined.
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Column::Values(a), Column::Values(b)) => a == b,
            (Column::Scores(a), Column::Scores(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
            }
            _ => false,
        }
    }
}

/// Structural problems with a table argument.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// The argument is neither an array of records nor an object of columns
    #[error("agent table must be an array of records or an object of columns, got {0}")]
    NotATable(&'static str),
    /// A record in an array-of-records table is not an object
    #[error("agent table record {index} is not an object, got {found}")]
    RecordNotObject { index: usize, found: &'static str },
    /// A column in an object-of-columns table is not an array
    #[error("agent table column {name:?} is not an array, got {found}")]
    ColumnNotArray { name: String, found: &'static str },
    /// A column's length disagrees with the table's row count
    #[error("column {name:?} has {actual} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Returns the JSON type name used in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Ordered, named columns of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: usize,
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    /// Empty table: no rows, no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with `rows` rows and no columns yet.
    pub fn with_rows(rows: usize) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Builds a table from records; the column set is the union of every
    /// record's keys in first-seen order, and missing keys become `null`.
    pub fn from_records<S: AttributeSource>(records: &[S]) -> Self {
        let maps: Vec<_> = records.iter().map(AttributeSource::to_attributes).collect();

        let mut names: Vec<String> = Vec::new();
        for map in &maps {
            for key in map.keys() {
                if !names.contains(key) {
                    names.push(key.clone());
                }
            }
        }

        let columns = names
            .iter()
            .map(|name| {
                Column::Values(
                    maps.iter()
                        .map(|m| m.get(name).cloned().unwrap_or(Value::Null))
                        .collect(),
                )
            })
            .collect();

        Self {
            rows: maps.len(),
            names,
            columns,
        }
    }

    /// Builds a table with one row per agent, in order.
    pub fn from_agents(agents: &[Agent]) -> Self {
        Self::from_records(agents)
    }

    /// Parses an untyped table: either an array of record objects or an
    /// object mapping column names to equal-length arrays.
    pub fn from_json(value: &Value) -> Result<Self, TableError> {
        match value {
            Value::Array(records) => {
                let mut objects = Vec::with_capacity(records.len());
                for (index, record) in records.iter().enumerate() {
                    match record {
                        Value::Object(obj) => objects.push(obj),
                        other => {
                            return Err(TableError::RecordNotObject {
                                index,
                                found: json_type_name(other),
                            })
                        }
                    }
                }
                Ok(Self::from_objects(&objects))
            }
            Value::Object(columns) => {
                let rows = match columns.values().next() {
                    Some(Value::Array(first)) => first.len(),
                    _ => 0,
                };
                let mut table = Self::with_rows(rows);
                for (name, column) in columns {
                    let Value::Array(cells) = column else {
                        return Err(TableError::ColumnNotArray {
                            name: name.clone(),
                            found: json_type_name(column),
                        });
                    };
                    table.push_column(name.clone(), Column::Values(cells.clone()))?;
                }
                Ok(table)
            }
            other => Err(TableError::NotATable(json_type_name(other))),
        }
    }

    /// Like [`Table::from_records`] but borrows the parsed objects.
    fn from_objects(objects: &[&Map<String, Value>]) -> Self {
        let mut names: Vec<String> = Vec::new();
        for obj in objects {
            for key in obj.keys() {
                if !names.contains(key) {
                    names.push(key.clone());
                }
            }
        }

        let columns = names
            .iter()
            .map(|name| {
                Column::Values(
                    objects
                        .iter()
                        .map(|o| o.get(name).cloned().unwrap_or(Value::Null))
                        .collect(),
                )
            })
            .collect();

        Self {
            rows: objects.len(),
            names,
            columns,
        }
    }

    /// Appends a column, or replaces an existing column of the same name in
    /// place.
    pub fn push_column(&mut self, name: impl Into<String>, column: Column) -> Result<(), TableError> {
        let name = name.into();
        if column.len() != self.rows {
            return Err(TableError::LengthMismatch {
                name,
                expected: self.rows,
                actual: column.len(),
            });
        }
        self.set_column(name, column);
        Ok(())
    }

    /// Inserts a column already known to have `self.rows` cells.
    pub(crate) fn set_column(&mut self, name: String, column: Column) {
        debug_assert_eq!(column.len(), self.rows, "column {} length", name);
        match self.names.iter().position(|n| *n == name) {
            Some(idx) => self.columns[idx] = column,
            None => {
                self.names.push(name);
                self.columns.push(column);
            }
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| &self.columns[idx])
    }

    /// Input cells of a column, if it exists and holds values.
    pub fn values(&self, name: &str) -> Option<&[Value]> {
        match self.column(name)? {
            Column::Values(v) => Some(v),
            Column::Scores(_) => None,
        }
    }

    /// Computed cells of a column, if it exists and holds scores.
    pub fn scores(&self, name: &str) -> Option<&[f64]> {
        match self.column(name)? {
            Column::Scores(s) => Some(s),
            Column::Values(_) => None,
        }
    }

    /// Iterates `(name, column)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(&self.columns)
    }

    /// Returns row `index` as a JSON object.
    pub fn record(&self, index: usize) -> Option<Map<String, Value>> {
        if index >= self.rows {
            return None;
        }
        Some(
            self.iter()
                .map(|(name, column)| {
                    (name.to_string(), column.value_at(index).unwrap_or(Value::Null))
                })
                .collect(),
        )
    }

    /// Returns every row as a JSON object, in row order.
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        (0..self.rows).filter_map(|i| self.record(i)).collect()
    }
}

/// Serializes as an array of records.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.to_records())
    }
}
