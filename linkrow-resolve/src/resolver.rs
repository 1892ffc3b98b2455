//! Depth-first link resolution.

use std::{collections::HashMap, rc::Rc};

use linkrow_core::{
    CellId, FieldDescriptor, FieldInspector, LinkTarget, Result, Row, RowId, RowSource, TableId,
    Tables,
};
use serde_json::Value;
use tracing::{debug, trace};

use crate::{ReferenceMap, WorkingSet};

/// A link field of one table, with its target already validated.
#[derive(Debug, Clone)]
struct LinkField {
    descriptor: FieldDescriptor,
    target: LinkTarget,
}

/// Counters collected during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Tables fetched because a link pointed at them.
    pub tables_fetched: usize,
    /// Link entries replaced by the referenced row.
    pub cells_embedded: usize,
    /// Link entries dropped because the path already embedded them.
    pub entries_suppressed: usize,
    /// Link entries whose row is absent from the target table.
    pub rows_missing: usize,
}

/// Output of a resolver run.
#[derive(Debug)]
pub struct Resolution {
    /// Every table of the working set, inputs first, with links embedded.
    pub matrix: Tables,
    pub stats: ResolveStats,
}

/// Resolve `tables` against `source`, returning the dereferenced matrix.
///
/// Tables referenced by link fields but missing from `tables` are fetched
/// from `source` and appear in the result after the inputs.
pub fn resolve<S>(source: &S, tables: Tables) -> Result<Tables>
where
    S: RowSource + FieldInspector,
{
    Resolver::new(source, tables).run().map(|res| res.matrix)
}

/// Embeds linked rows in place of link entries.
///
/// The working set is shared by every path of the traversal. The
/// [`ReferenceMap`] is not: each descent receives its own copy, and an entry
/// whose cell identifier is already marked on the current path is dropped
/// instead of expanded. That marker set bounds the depth of every path, which
/// makes cyclic links terminate.
pub struct Resolver<'s, S> {
    source: &'s S,
    working: WorkingSet,
    link_fields: HashMap<TableId, Rc<[LinkField]>>,
    stats: ResolveStats,
}

impl<'s, S> Resolver<'s, S>
where
    S: RowSource + FieldInspector,
{
    pub fn new(source: &'s S, tables: Tables) -> Self {
        Self {
            source,
            working: WorkingSet::new(tables),
            link_fields: HashMap::new(),
            stats: ResolveStats::default(),
        }
    }

    /// Resolve every table of the working set, including the ones discovered
    /// along the way.
    ///
    /// # Errors
    ///
    /// Fails if a field list cannot be fetched or a link field lacks its
    /// target table or reciprocal field.
    pub fn run(mut self) -> Result<Resolution> {
        let mut matrix = Tables::with_capacity(self.working.len());
        let mut position = 0;

        // the working set may grow while we walk it
        while let Some(table_id) = self.working.table_id_at(position).cloned() {
            debug!(table = %table_id, "building matrix for table");
            let rows = self.resolve_table(&table_id, ReferenceMap::new())?;
            matrix.insert(table_id, rows);
            position += 1;
        }

        debug!(
            tables = matrix.len(),
            fetched = self.stats.tables_fetched,
            embedded = self.stats.cells_embedded,
            suppressed = self.stats.entries_suppressed,
            missing = self.stats.rows_missing,
            "matrix complete"
        );

        Ok(Resolution {
            matrix,
            stats: self.stats,
        })
    }

    /// Resolve all rows of `table_id` on the path described by `path`.
    pub fn resolve_table(&mut self, table_id: &TableId, mut path: ReferenceMap) -> Result<Vec<Row>> {
        let links = self.enter_table(table_id, &mut path)?;
        let rows = self.working.rows(table_id).to_vec();

        rows.into_iter()
            .map(|row| self.resolve_row(&links, row, &path))
            .collect()
    }

    /// Fetch the table's link fields, load any target table not yet in the
    /// working set, and register the fields on `path`.
    fn enter_table(
        &mut self,
        table_id: &TableId,
        path: &mut ReferenceMap,
    ) -> Result<Rc<[LinkField]>> {
        let links = self.link_fields(table_id)?;

        for link in links.iter() {
            let target = &link.target.table;
            if !self.working.contains(target) {
                debug!(table = %target, "loading data for missing table");
                let rows = self.source.fetch_rows(target);
                self.working.insert(target.clone(), rows);
                self.stats.tables_fetched += 1;
            }

            if path.register(link.descriptor.id) {
                trace!(field = %link.descriptor.id, "registered link field on path");
            }
        }

        Ok(links)
    }

    /// The link fields of `table_id`, asking the inspector once per run.
    fn link_fields(&mut self, table_id: &TableId) -> Result<Rc<[LinkField]>> {
        if let Some(links) = self.link_fields.get(table_id) {
            return Ok(Rc::clone(links));
        }

        let links = self
            .source
            .link_fields_for(table_id)?
            .into_iter()
            .map(|descriptor| {
                let target = descriptor.link_target(table_id)?;
                Ok(LinkField { descriptor, target })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(table = %table_id, links = links.len(), "processing link fields");
        let links: Rc<[LinkField]> = links.into();
        self.link_fields.insert(table_id.clone(), Rc::clone(&links));
        Ok(links)
    }

    fn resolve_row(&mut self, links: &[LinkField], mut row: Row, path: &ReferenceMap) -> Result<Row> {
        for link in links {
            let columns: Vec<String> = row
                .columns()
                .filter(|column| link.descriptor.matches_column(column))
                .cloned()
                .collect();

            for column in columns {
                let Some(Value::Array(entries)) = row.get(&column) else {
                    continue;
                };
                let entries = entries.clone();
                trace!(column = %column, "handling linked content");
                let content = self.expand_cell(link, entries, path)?;
                row.insert(column, Value::Array(content));
            }
        }
        Ok(row)
    }

    /// Replace each entry of a link cell with the row it references.
    ///
    /// Entries already embedded on this path are dropped. Entries without an
    /// id, or whose row is missing from the target table, are kept as is.
    fn expand_cell(
        &mut self,
        link: &LinkField,
        entries: Vec<Value>,
        path: &ReferenceMap,
    ) -> Result<Vec<Value>> {
        let field = link.descriptor.id;
        let mut content = Vec::with_capacity(entries.len());

        for entry in entries {
            let Some(row_id) = entry.get("id").and_then(RowId::from_value) else {
                content.push(entry);
                continue;
            };

            let cell = CellId::new(link.target.table.clone(), link.target.related_field, row_id);
            if path.is_embedded(field, &cell) {
                trace!(cell = %cell, "already embedded on this path");
                self.stats.entries_suppressed += 1;
                continue;
            }

            let mut branch = path.clone();
            branch.mark_embedded(field, cell.clone());

            match self.embed(&link.target.table, &cell.row, branch)? {
                Some(row) => {
                    self.stats.cells_embedded += 1;
                    content.push(row.into_value());
                }
                None => {
                    debug!(cell = %cell, "linked row not found in target table");
                    self.stats.rows_missing += 1;
                    content.push(entry);
                }
            }
        }

        Ok(content)
    }

    /// Resolve one row of `table_id` on its own copy of the path.
    fn embed(
        &mut self,
        table_id: &TableId,
        row_id: &RowId,
        mut path: ReferenceMap,
    ) -> Result<Option<Row>> {
        let links = self.enter_table(table_id, &mut path)?;
        let Some(row) = self.working.row(table_id, row_id).cloned() else {
            return Ok(None);
        };
        self.resolve_row(&links, row, &path).map(Some)
    }
}
