//! Blocking Baserow REST client.
//!
//! Implements [`RowSource`](linkrow_core::RowSource) by following the row
//! endpoint's `next` pointers, and [`FieldInspector`](linkrow_core::FieldInspector)
//! over the field list endpoint.

mod client;
mod config;
mod pages;

pub use client::BaserowClient;
pub use config::{AuthScheme, ClientConfig};
pub use pages::RowPages;
