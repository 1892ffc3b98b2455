//! Field descriptors as returned by the field list endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{Error, FieldId, Result, TableId};

/// Type tag of fields that reference rows in another table.
pub const LINK_ROW: &str = "link_row";

/// Describes one column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Target table of a link field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_row_table_id: Option<TableId>,
    /// Reciprocal field on the target table. `0` is read as absent.
    #[serde(
        default,
        deserialize_with = "deserialize_related_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub link_row_related_field_id: Option<FieldId>,
    /// Every other attribute the API sent (order, primary, table_id, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn deserialize_related_field<'de, D>(deserializer: D) -> std::result::Result<Option<FieldId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<u64>::deserialize(deserializer)?;
    Ok(raw.filter(|id| *id != 0).map(FieldId))
}

impl FieldDescriptor {
    /// Whether the type tag marks this as an inter-table link.
    pub fn is_link(&self) -> bool {
        self.field_type == LINK_ROW
    }

    /// Whether `column` is this field's key in a row.
    pub fn matches_column(&self, column: &str) -> bool {
        column == self.name || column == self.id.column_key()
    }

    /// The target table and reciprocal field of a link field.
    ///
    /// A link without either is a schema inconsistency and is reported
    /// against `table_id`, the table owning the field.
    pub fn link_target(&self, table_id: &TableId) -> Result<LinkTarget> {
        let Some(table) = self.link_row_table_id.clone() else {
            return Err(Box::new(Error::MissingLinkTarget {
                table_id: table_id.clone(),
                field_id: self.id,
                field_name: self.name.clone(),
            }));
        };
        let Some(related_field) = self.link_row_related_field_id else {
            return Err(Box::new(Error::MissingRelatedField {
                table_id: table_id.clone(),
                field_id: self.id,
                field_name: self.name.clone(),
            }));
        };
        Ok(LinkTarget {
            table,
            related_field,
        })
    }
}

/// Where a link field points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkTarget {
    pub table: TableId,
    pub related_field: FieldId,
}
