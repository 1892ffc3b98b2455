//! Link resolution for Baserow tables.
//!
//! Turns independently fetched tables, whose link cells hold `{id, value}`
//! stubs, into a matrix where each stub is replaced by the row it names.
//!
//! # Example
//!
//! ```ignore
//! use linkrow_resolve::resolve;
//!
//! let tables = ops::fetch_tables(&client, &table_ids);
//! let matrix = resolve(&client, tables)?;
//! ```

mod reference_map;
mod resolver;
mod working_set;

pub use reference_map::ReferenceMap;
pub use resolver::{Resolution, ResolveStats, Resolver, resolve};
pub use working_set::WorkingSet;
