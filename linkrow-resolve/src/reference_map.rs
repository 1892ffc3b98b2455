//! Path-scoped record of registered link fields and the cells already
//! embedded through them.

use std::collections::HashSet;

use indexmap::IndexMap;
use linkrow_core::{CellId, FieldId};

/// Link fields seen along one traversal path.
///
/// A map is never shared between paths: every descent hands the callee its
/// own copy, so markers only flow from ancestors to descendants. Entries are
/// only ever added, and embedded sets only grow.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMap {
    embedded: IndexMap<FieldId, HashSet<CellId>>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a link field with an empty embedded set.
    ///
    /// Returns `false` and leaves the existing entry untouched if the field
    /// is already registered on this path.
    pub fn register(&mut self, field: FieldId) -> bool {
        if self.embedded.contains_key(&field) {
            return false;
        }
        self.embedded.insert(field, HashSet::new());
        true
    }

    /// Cells embedded through `field` on this path.
    pub fn get(&self, field: FieldId) -> Option<&HashSet<CellId>> {
        self.embedded.get(&field)
    }

    /// Whether `cell` was already embedded through `field` on this path.
    pub fn is_embedded(&self, field: FieldId, cell: &CellId) -> bool {
        self.embedded
            .get(&field)
            .is_some_and(|cells| cells.contains(cell))
    }

    /// Mark `cell` as embedded through `field`.
    ///
    /// Returns `false` if the field is not registered or the cell was
    /// already marked.
    pub fn mark_embedded(&mut self, field: FieldId, cell: CellId) -> bool {
        match self.embedded.get_mut(&field) {
            Some(cells) => cells.insert(cell),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.embedded.len()
    }
}
