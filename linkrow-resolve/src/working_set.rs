//! The growing collection of fetched tables.

use std::collections::HashMap;

use linkrow_core::{Row, RowId, TableId, Tables};

/// Fetched tables with a per-table row index.
///
/// Tables are added when first referenced and never evicted, so every table
/// is fetched at most once per run.
#[derive(Debug, Default)]
pub struct WorkingSet {
    tables: Tables,
    index: HashMap<TableId, HashMap<RowId, usize>>,
}

impl WorkingSet {
    pub fn new(tables: Tables) -> Self {
        let index = tables
            .iter()
            .map(|(id, rows)| (id.clone(), index_rows(rows)))
            .collect();
        Self { tables, index }
    }

    pub fn contains(&self, table_id: &TableId) -> bool {
        self.tables.contains_key(table_id)
    }

    /// Add a table unless it is already present.
    ///
    /// Returns `false` if the table was already in the set; its rows are
    /// kept as they were.
    pub fn insert(&mut self, table_id: TableId, rows: Vec<Row>) -> bool {
        if self.tables.contains_key(&table_id) {
            return false;
        }
        self.index.insert(table_id.clone(), index_rows(&rows));
        self.tables.insert(table_id, rows);
        true
    }

    pub fn rows(&self, table_id: &TableId) -> &[Row] {
        self.tables.get(table_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up a row of `table_id` by its id.
    pub fn row(&self, table_id: &TableId, row_id: &RowId) -> Option<&Row> {
        let position = *self.index.get(table_id)?.get(row_id)?;
        self.tables.get(table_id)?.get(position)
    }

    /// The table at `position` in insertion order.
    pub fn table_id_at(&self, position: usize) -> Option<&TableId> {
        self.tables.get_index(position).map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }
}

fn index_rows(rows: &[Row]) -> HashMap<RowId, usize> {
    let mut index = HashMap::with_capacity(rows.len());
    for (position, row) in rows.iter().enumerate() {
        if let Some(id) = row.id() {
            // first occurrence wins if the source repeats an id
            index.entry(id).or_insert(position);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(value: serde_json::Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_row_lookup() {
        let mut tables = Tables::new();
        tables.insert(
            TableId::from("1"),
            vec![row(json!({"id": 4, "n": "a"})), row(json!({"id": 7, "n": "b"}))],
        );
        let set = WorkingSet::new(tables);

        let found = set.row(&TableId::from("1"), &RowId::from(7)).unwrap();
        assert_eq!(found.get("n"), Some(&json!("b")));
        assert!(set.row(&TableId::from("1"), &RowId::from(8)).is_none());
        assert!(set.row(&TableId::from("2"), &RowId::from(4)).is_none());
    }

    #[test]
    fn test_insert_never_replaces() {
        let mut set = WorkingSet::default();
        assert!(set.insert(TableId::from("1"), vec![row(json!({"id": 1}))]));
        assert!(!set.insert(TableId::from("1"), Vec::new()));
        assert_eq!(set.rows(&TableId::from("1")).len(), 1);
    }

    #[test]
    fn test_insertion_order() {
        let mut set = WorkingSet::default();
        set.insert(TableId::from("b"), Vec::new());
        set.insert(TableId::from("a"), Vec::new());
        assert_eq!(set.table_id_at(0), Some(&TableId::from("b")));
        assert_eq!(set.table_id_at(1), Some(&TableId::from("a")));
        assert_eq!(set.table_id_at(2), None);
    }
}
