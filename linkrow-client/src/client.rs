//! Blocking client for the Baserow REST API.

use linkrow_core::{
    Error, FieldDescriptor, FieldInspector, NamedTables, Result, Row, RowSource, TableId,
    TableSummary,
};
use reqwest::{
    blocking::{Client, Response},
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::{ClientConfig, RowPages};

/// Longest response body kept in an error.
const BODY_SNIPPET_LEN: usize = 512;

/// Talks to one Baserow instance.
///
/// All calls block; requests are issued one at a time.
#[derive(Debug)]
pub struct BaserowClient {
    http: Client,
    config: ClientConfig,
}

impl BaserowClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::transport(config.base_url().as_str(), e))?;
        debug!(config = ?config, "client ready");
        Ok(Self { http, config })
    }

    /// Url of an endpoint below the base url.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.config.base_url().join(path).map_err(|e| {
            Box::new(Error::InvalidBaseUrl {
                url: format!("{}{}", self.config.base_url(), path),
                reason: e.to_string(),
            })
        })
    }

    /// Iterate over the pages of a table's rows.
    pub fn pages(&self, table_id: &TableId) -> Result<RowPages<'_>> {
        let mut first = self.endpoint(&format!("database/rows/table/{table_id}/"))?;
        {
            let mut query = first.query_pairs_mut();
            if self.config.uses_user_field_names() {
                query.append_pair("user_field_names", "true");
            }
            if let Some(size) = self.config.rows_per_page() {
                query.append_pair("size", &size.to_string());
            }
        }
        // an empty query_pairs_mut still leaves a trailing '?'
        if first.query() == Some("") {
            first.set_query(None);
        }
        Ok(RowPages::new(self, table_id.clone(), first))
    }

    /// List the tables of a database.
    ///
    /// A failed request is logged and yields no tables.
    pub fn tables_in(&self, database_id: &str) -> Vec<TableSummary> {
        debug!(database = database_id, "fetching all tables from database");
        let result = self
            .endpoint(&format!("database/tables/database/{database_id}/"))
            .and_then(|url| self.get_json::<Vec<TableSummary>>(&url));

        match result {
            Ok(tables) => tables,
            Err(err) => {
                warn!(database = database_id, error = %err, "could not list tables");
                Vec::new()
            }
        }
    }

    /// Fetch the rows of every table in a database, keyed by table name.
    pub fn fetch_database(&self, database_id: &str) -> NamedTables {
        debug!(database = database_id, "fetching all data from database");
        self.tables_in(database_id)
            .into_iter()
            .map(|table| {
                let rows = self.fetch_rows(&table.id);
                (table.name, rows)
            })
            .collect()
    }

    /// Issue a GET and fail on anything but a success status.
    fn get(&self, url: &Url) -> Result<Response> {
        let response = self
            .http
            .get(url.clone())
            .header(AUTHORIZATION, self.config.authorization())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .map_err(|e| Error::transport(url.as_str(), e))?;

        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "response received");
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::status(url.as_str(), status.as_u16(), snippet(&body)));
        }
        Ok(response)
    }

    pub(crate) fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let bytes = self
            .get(url)?
            .bytes()
            .map_err(|e| Error::transport(url.as_str(), e))?;
        serde_json::from_slice(&bytes).map_err(|e| Error::decode(url.as_str(), e))
    }
}

fn snippet(body: &str) -> String {
    match body.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((end, _)) => format!("{}…", &body[..end]),
        None => body.to_string(),
    }
}

impl RowSource for BaserowClient {
    fn fetch_rows(&self, table_id: &TableId) -> Vec<Row> {
        debug!(table = %table_id, "fetching all rows from table");
        let pages = match self.pages(table_id) {
            Ok(pages) => pages,
            Err(err) => {
                warn!(table = %table_id, error = %err, "cannot request rows");
                return Vec::new();
            }
        };

        let mut rows = Vec::new();
        for page in pages {
            match page {
                Ok(batch) => rows.extend(batch),
                Err(err) => {
                    warn!(
                        table = %table_id,
                        collected = rows.len(),
                        error = %err,
                        "row fetch stopped early, keeping rows collected so far"
                    );
                    break;
                }
            }
        }
        rows
    }
}

impl FieldInspector for BaserowClient {
    fn fields_for(&self, table_id: &TableId) -> Result<Vec<FieldDescriptor>> {
        debug!(table = %table_id, "fetching fields for table");
        let url = self.endpoint(&format!("database/fields/table/{table_id}/"))?;
        self.get_json(&url).map_err(|err| match *err {
            Error::Status { status, .. } => Box::new(Error::FieldsUnavailable {
                table_id: table_id.clone(),
                status,
            }),
            other @ (Error::Transport { .. } | Error::Decode { .. }) => {
                Box::new(Error::FieldsUnreadable {
                    table_id: table_id.clone(),
                    reason: other.to_string(),
                })
            }
            other => Box::new(other),
        })
    }
}
