//! Data model shared across the linkrow crates.
//!
//! ```text
//! Baserow API → linkrow-client (RowSource, FieldInspector) → linkrow-resolve → linkrow (JSON)
//! ```
//!
//! Rows stay schemaless JSON objects; only the pieces the resolver reasons
//! about (ids, link field descriptors, cell identifiers) get types.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod cell;
mod error;
mod field;
mod id;
mod row;
mod source;

pub use cell::CellId;
pub use error::{Error, Result};
pub use field::{FieldDescriptor, LINK_ROW, LinkTarget};
pub use id::{FieldId, RowId, TableId};
pub use row::{NamedTables, Row, TableSummary, Tables};
pub use source::{FieldInspector, RowSource};
