use miette::Diagnostic;
use thiserror::Error;

use crate::{FieldId, TableId};

/// Result type for linkrow operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid base url '{url}'")]
    #[diagnostic(
        code(linkrow::invalid_base_url),
        help("pass the API root of your instance, e.g. https://baserow.example.com/api/")
    )]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request to '{url}' failed: {message}")]
    #[diagnostic(code(linkrow::transport))]
    Transport { url: String, message: String },

    #[error("received status code {status} from '{url}'")]
    #[diagnostic(code(linkrow::status))]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode the response from '{url}' as JSON")]
    #[diagnostic(code(linkrow::decode))]
    Decode { url: String, message: String },

    #[error("failed to fetch fields for table {table_id}, status code: {status}")]
    #[diagnostic(
        code(linkrow::fields_unavailable),
        help("link discovery needs the field list; check the table id and the token's permissions")
    )]
    FieldsUnavailable { table_id: TableId, status: u16 },

    #[error("failed to fetch fields for table {table_id}: {reason}")]
    #[diagnostic(code(linkrow::fields_unreadable))]
    FieldsUnreadable { table_id: TableId, reason: String },

    #[error("link field '{field_name}' ({field_id}) in table {table_id} has no related field id")]
    #[diagnostic(
        code(linkrow::missing_related_field),
        help("link_row_related_field_id has to be a positive number")
    )]
    MissingRelatedField {
        table_id: TableId,
        field_id: FieldId,
        field_name: String,
    },

    #[error("link field '{field_name}' ({field_id}) in table {table_id} has no target table")]
    #[diagnostic(code(linkrow::missing_link_target))]
    MissingLinkTarget {
        table_id: TableId,
        field_id: FieldId,
        field_name: String,
    },

    #[error("either database_id or table_ids must be provided")]
    #[diagnostic(
        code(linkrow::missing_selection),
        help("pass --table_ids 1,2,3 or --database_id 42")
    )]
    MissingSelection,
}

impl Error {
    /// Create a transport error for a request that never produced a response.
    pub fn transport(url: impl Into<String>, message: impl ToString) -> Box<Self> {
        Box::new(Error::Transport {
            url: url.into(),
            message: message.to_string(),
        })
    }

    /// Create an error for a non-success status code.
    pub fn status(url: impl Into<String>, status: u16, body: impl Into<String>) -> Box<Self> {
        Box::new(Error::Status {
            url: url.into(),
            status,
            body: body.into(),
        })
    }

    /// Create an error for a body that is not the expected JSON.
    pub fn decode(url: impl Into<String>, message: impl ToString) -> Box<Self> {
        Box::new(Error::Decode {
            url: url.into(),
            message: message.to_string(),
        })
    }

    /// Status code carried by this error, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } | Error::FieldsUnavailable { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_unavailable_message() {
        let err = Error::FieldsUnavailable {
            table_id: TableId::from("17"),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch fields for table 17, status code: 404"
        );
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_fields_unreadable_names_table() {
        let err = Error::FieldsUnreadable {
            table_id: TableId::from("17"),
            reason: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch fields for table 17: connection refused"
        );
        assert!(err.status_code().is_none());
    }

    #[test]
    fn test_transport_has_no_status() {
        let err = Error::transport("http://localhost/api/", "connection refused");
        assert!(err.status_code().is_none());
        assert!(err.to_string().contains("connection refused"));
    }
}
