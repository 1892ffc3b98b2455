//! Database export operation - every table of a database, unresolved.

use linkrow_client::BaserowClient;
use tracing::debug;

use crate::reports::ExportReport;

/// Execute the database export.
///
/// Rows are keyed by table name. Links are left as the API returned them.
pub fn export_database(client: &BaserowClient, database_id: &str) -> ExportReport {
    let database = client.fetch_database(database_id);
    debug!(database = database_id, tables = database.len(), "fetched database");

    ExportReport {
        database: Some(database),
        ..Default::default()
    }
}
