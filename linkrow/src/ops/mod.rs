//! Core operations.
//!
//! This module contains the fetch and resolve logic behind the CLI,
//! separated from argument parsing and output rendering.

pub mod database;
pub mod tables;

pub use database::export_database;
pub use tables::{export_tables, parse_table_ids};
