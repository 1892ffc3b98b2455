//! Export report data structures.

use std::io;

use clap::ValueEnum;
use indexmap::IndexMap;
use linkrow_core::{FieldDescriptor, NamedTables, TableId, Tables};
use serde_json::{Map, Value};

use super::output::{Output, Report};

/// A document the export can produce for a `--table_ids` selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum OutputKind {
    /// Link-type field descriptors of each requested table.
    #[value(name = "linked_fields")]
    LinkedFields,
    /// Raw rows keyed by table id.
    #[value(name = "tables")]
    Tables,
    /// Rows with linked rows embedded.
    #[value(name = "matrix")]
    Matrix,
}

impl OutputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::LinkedFields => "linked_fields",
            OutputKind::Tables => "tables",
            OutputKind::Matrix => "matrix",
        }
    }
}

/// Link fields per table.
pub type LinkedFields = IndexMap<TableId, Vec<FieldDescriptor>>;

/// Report data from an export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Link fields of the requested tables.
    pub linked_fields: Option<LinkedFields>,
    /// Requested tables as fetched.
    pub tables: Option<Tables>,
    /// Requested and discovered tables, dereferenced.
    pub matrix: Option<Tables>,
    /// A whole database keyed by table name.
    pub database: Option<NamedTables>,
}

impl ExportReport {
    /// The sections present, in output order.
    fn sections(&self) -> Vec<(&'static str, Value)> {
        let mut sections = Vec::new();
        if let Some(fields) = &self.linked_fields {
            sections.push((OutputKind::LinkedFields.as_str(), to_value(fields)));
        }
        if let Some(tables) = &self.tables {
            sections.push((OutputKind::Tables.as_str(), to_value(tables)));
        }
        if let Some(matrix) = &self.matrix {
            sections.push((OutputKind::Matrix.as_str(), to_value(matrix)));
        }
        if let Some(database) = &self.database {
            sections.push(("database", to_value(database)));
        }
        sections
    }

    /// The JSON document this report renders.
    ///
    /// A single section renders bare; several are wrapped in an object keyed
    /// by section name.
    pub fn document(&self) -> Value {
        let mut sections = self.sections();
        if sections.len() == 1 {
            return sections.remove(0).1;
        }
        let object: Map<String, Value> = sections
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        Value::Object(object)
    }
}

fn to_value<T: serde::Serialize>(data: &T) -> Value {
    // maps with string keys of plain JSON data always serialize
    serde_json::to_value(data).unwrap_or(Value::Null)
}

impl Report for ExportReport {
    fn render(&self, out: &mut dyn Output) -> io::Result<()> {
        out.document(&self.document())
    }
}

#[cfg(test)]
mod tests {
    use linkrow_core::Row;
    use serde_json::json;

    use super::*;
    use crate::reports::JsonOutput;

    fn tables(value: Value) -> Tables {
        let map: IndexMap<String, Vec<Row>> = serde_json::from_value(value).unwrap();
        map.into_iter()
            .map(|(id, rows)| (TableId::from(id), rows))
            .collect()
    }

    #[test]
    fn test_single_section_renders_bare() {
        let report = ExportReport {
            tables: Some(tables(json!({"1": [{"id": 1}]}))),
            ..Default::default()
        };
        assert_eq!(report.document(), json!({"1": [{"id": 1}]}));
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let report = ExportReport {
            matrix: Some(tables(json!({"1": []}))),
            tables: Some(tables(json!({"1": []}))),
            linked_fields: Some(LinkedFields::new()),
            database: None,
        };
        let document = report.document();
        let keys: Vec<_> = document.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["linked_fields", "tables", "matrix"]);
    }

    #[test]
    fn test_render_json() {
        let report = ExportReport {
            tables: Some(tables(json!({"7": [{"id": 1, "name": "x"}]}))),
            ..Default::default()
        };
        let mut out = JsonOutput::new(Vec::new());
        report.render(&mut out).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        insta::assert_snapshot!(text.trim_end(), @r#"
        {
            "7": [
                {
                    "id": 1,
                    "name": "x"
                }
            ]
        }
        "#);
    }

    #[test]
    fn test_output_kind_names() {
        assert_eq!(
            OutputKind::from_str("linked_fields", false).unwrap(),
            OutputKind::LinkedFields
        );
        assert_eq!(OutputKind::Matrix.as_str(), "matrix");
    }
}
