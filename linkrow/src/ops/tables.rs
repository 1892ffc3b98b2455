//! Table export operation - rows of selected tables, optionally resolved.

use linkrow_core::{FieldInspector, Result, RowSource, TableId, Tables};
use linkrow_resolve::Resolver;
use tracing::debug;

use crate::reports::{ExportReport, LinkedFields, OutputKind};

/// Split a comma-separated `--table_ids` value, dropping blanks and repeats.
pub fn parse_table_ids(raw: &str) -> Vec<TableId> {
    let mut ids: Vec<TableId> = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = TableId::from(part);
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Fetch the rows of each table, keyed by table id in request order.
pub fn fetch_tables<S: RowSource>(source: &S, ids: &[TableId]) -> Tables {
    ids.iter()
        .map(|id| (id.clone(), source.fetch_rows(id)))
        .collect()
}

/// Link fields of each table in `tables`.
pub fn linked_fields<S: FieldInspector>(source: &S, tables: &Tables) -> Result<LinkedFields> {
    tables
        .keys()
        .map(|id| Ok((id.clone(), source.link_fields_for(id)?)))
        .collect()
}

/// Execute the table export.
///
/// Fetches the tables once and builds every requested document from them.
/// With no kinds requested, the raw tables are exported.
pub fn export_tables<S>(source: &S, ids: &[TableId], kinds: &[OutputKind]) -> Result<ExportReport>
where
    S: RowSource + FieldInspector,
{
    let wants = |kind| (kinds.is_empty() && kind == OutputKind::Tables) || kinds.contains(&kind);

    let tables = fetch_tables(source, ids);
    debug!(
        tables = tables.len(),
        rows = tables.values().map(Vec::len).sum::<usize>(),
        "fetched requested tables"
    );

    let mut report = ExportReport::default();

    if wants(OutputKind::LinkedFields) {
        report.linked_fields = Some(linked_fields(source, &tables)?);
    }

    if wants(OutputKind::Matrix) {
        let resolution = Resolver::new(source, tables.clone()).run()?;
        debug!(stats = ?resolution.stats, "resolved links");
        report.matrix = Some(resolution.matrix);
    }

    if wants(OutputKind::Tables) {
        report.tables = Some(tables);
    }

    Ok(report)
}
