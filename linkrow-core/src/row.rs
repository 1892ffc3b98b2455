//! Rows and table collections.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RowId, TableId};

/// One table row: an ordered mapping from column key to cell value.
///
/// Column keys are either user field names or `field_<id>`, depending on how
/// the rows were requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// The row's `id` cell, if present and scalar.
    pub fn id(&self) -> Option<RowId> {
        self.0.get("id").and_then(RowId::from_value)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(column.into(), value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Row> for Value {
    fn from(row: Row) -> Self {
        row.into_value()
    }
}

/// Tables keyed by id, in insertion order.
pub type Tables = IndexMap<TableId, Vec<Row>>;

/// Rows of a whole database keyed by table name.
pub type NamedTables = IndexMap<String, Vec<Row>>;

/// A table as listed by the table list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub id: TableId,
    pub name: String,
}
