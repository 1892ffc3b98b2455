use std::fmt;

use crate::{FieldId, RowId, TableId};

/// Names one cell's embedding obligation: the row `row` of table `table`,
/// reached through the reciprocal field `field`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    pub table: TableId,
    pub field: FieldId,
    pub row: RowId,
}

impl CellId {
    pub fn new(table: TableId, field: FieldId, row: RowId) -> Self {
        Self { table, field, row }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "table_{}_field_{}_row_{}",
            self.table, self.field, self.row
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let cell = CellId::new(TableId::from("T2"), FieldId(9), RowId::from(5));
        assert_eq!(cell.to_string(), "table_T2_field_9_row_5");
    }

    #[test]
    fn test_equality_covers_all_parts() {
        let a = CellId::new(TableId::from("1"), FieldId(2), RowId::from(3));
        let b = CellId::new(TableId::from("1"), FieldId(2), RowId::from(4));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
