//! Row pagination.

use linkrow_core::{Result, Row, TableId};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::BaserowClient;

/// One page of the row list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct RowPage {
    pub results: Vec<Row>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Iterator over the pages of a table's rows.
///
/// Each item is one page's rows. After an error the iterator is exhausted:
/// there is no `next` pointer to follow from a page that did not decode.
pub struct RowPages<'c> {
    client: &'c BaserowClient,
    table_id: TableId,
    next: Option<Url>,
    requested: usize,
}

impl<'c> RowPages<'c> {
    pub(crate) fn new(client: &'c BaserowClient, table_id: TableId, first: Url) -> Self {
        Self {
            client,
            table_id,
            next: Some(first),
            requested: 0,
        }
    }

    pub fn table_id(&self) -> &TableId {
        &self.table_id
    }

    /// Pages requested so far, including a failed one.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Work out the url of the following page, if any.
    fn follow(&self, current: &Url, next: &str) -> Option<Url> {
        let url = match current.join(next) {
            Ok(url) => url,
            Err(err) => {
                warn!(table = %self.table_id, next, error = %err, "ignoring unparsable next page url");
                return None;
            }
        };
        if url == *current {
            warn!(table = %self.table_id, url = %url, "next page points at the current page");
            return None;
        }
        Some(url)
    }
}

impl Iterator for RowPages<'_> {
    type Item = Result<Vec<Row>>;

    fn next(&mut self) -> Option<Self::Item> {
        let url = self.next.take()?;
        self.requested += 1;
        debug!(table = %self.table_id, page = self.requested, url = %url, "requesting page");

        let page: RowPage = match self.client.get_json(&url) {
            Ok(page) => page,
            Err(err) => return Some(Err(err)),
        };

        self.next = page
            .next
            .as_deref()
            .and_then(|next| self.follow(&url, next));

        Some(Ok(page.results))
    }
}
