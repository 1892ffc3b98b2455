//! Seams between the resolver and wherever rows and fields come from.

use crate::{FieldDescriptor, Result, Row, TableId};

/// Supplies the complete ordered rows of a table.
///
/// Implementations follow pagination transparently. A failing page ends the
/// fetch and the rows collected so far are returned: a row source degrades,
/// it does not fail.
pub trait RowSource {
    /// Fetch every row of `table_id`, in the order the source provides them.
    fn fetch_rows(&self, table_id: &TableId) -> Vec<Row>;
}

/// Supplies the field descriptors of a table.
///
/// Unlike [`RowSource`], failures here are returned to the caller: link
/// discovery cannot proceed without the schema.
pub trait FieldInspector {
    /// Fetch every field descriptor of `table_id`.
    fn fields_for(&self, table_id: &TableId) -> Result<Vec<FieldDescriptor>>;

    /// Fetch the descriptors of `table_id` whose type marks them as links.
    fn link_fields_for(&self, table_id: &TableId) -> Result<Vec<FieldDescriptor>> {
        Ok(self
            .fields_for(table_id)?
            .into_iter()
            .filter(FieldDescriptor::is_link)
            .collect())
    }
}

impl<T: RowSource + ?Sized> RowSource for &T {
    fn fetch_rows(&self, table_id: &TableId) -> Vec<Row> {
        (**self).fetch_rows(table_id)
    }
}

impl<T: FieldInspector + ?Sized> FieldInspector for &T {
    fn fields_for(&self, table_id: &TableId) -> Result<Vec<FieldDescriptor>> {
        (**self).fields_for(table_id)
    }

    fn link_fields_for(&self, table_id: &TableId) -> Result<Vec<FieldDescriptor>> {
        (**self).link_fields_for(table_id)
    }
}
