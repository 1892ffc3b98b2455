use std::time::Duration;

use clap::{Args, ValueEnum};
use eyre::{Context, Result};
use linkrow_client::{AuthScheme, BaserowClient, ClientConfig};
use linkrow_core::{Error, TableId};
use tracing::debug;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{JsonOutput, Output, OutputKind, QuietOutput, Report},
};

#[derive(Args)]
pub struct ExportCommand {
    /// Base URL of your Baserow instance, e.g. https://YOUR_BASEROW_INSTANCE_URL/api/
    #[arg(env = "BASEROW_URL")]
    pub base_url: String,

    /// Your Baserow API key
    #[arg(env = "BASEROW_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// ID of the Baserow database you want to fetch data from
    #[arg(long = "database_id", alias = "database-id")]
    pub database_id: Option<String>,

    /// IDs of the Baserow tables you want to fetch data from, separated by commas
    #[arg(long = "table_ids", alias = "table-ids")]
    pub table_ids: Option<String>,

    /// Documents to output for --table_ids (defaults to tables)
    #[arg(long, value_enum, value_delimiter = ',', num_args = 1..)]
    pub output: Vec<OutputKind>,

    /// Suppress output of json
    #[arg(long)]
    pub quiet: bool,

    /// Key rows by field name instead of field_<id>
    #[arg(long = "user_field_names", alias = "user-field-names")]
    pub user_field_names: bool,

    /// Rows per page requested from the API
    #[arg(
        long = "page_size",
        alias = "page-size",
        value_parser = clap::value_parser!(u32).range(1..=200)
    )]
    pub page_size: Option<u32>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Authorization header scheme of the API key
    #[arg(long = "auth_scheme", alias = "auth-scheme", value_enum, default_value_t = AuthArg::Token)]
    pub auth_scheme: AuthArg,
}

/// `--auth_scheme` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthArg {
    /// Database token
    Token,
    /// User session token
    Jwt,
}

impl From<AuthArg> for AuthScheme {
    fn from(arg: AuthArg) -> Self {
        match arg {
            AuthArg::Token => AuthScheme::Token,
            AuthArg::Jwt => AuthScheme::Jwt,
        }
    }
}

/// What to fetch, from `--table_ids` or `--database_id`.
#[derive(Debug, PartialEq)]
enum Selection {
    Tables(Vec<TableId>),
    Database(String),
}

impl ExportCommand {
    /// Run the export
    pub fn run(&self) -> Result<()> {
        let selection = self.selection().unwrap_or_exit();
        let client = BaserowClient::new(self.client_config().unwrap_or_exit()).unwrap_or_exit();

        let report = match selection {
            Selection::Tables(ids) => ops::export_tables(&client, &ids, &self.output).unwrap_or_exit(),
            Selection::Database(id) => {
                if !self.output.is_empty() {
                    debug!("--output only applies to --table_ids, ignoring it");
                }
                ops::export_database(&client, &id)
            }
        };

        let mut out: Box<dyn Output> = if self.quiet {
            Box::new(QuietOutput)
        } else {
            Box::new(JsonOutput::stdout())
        };
        report
            .render(out.as_mut())
            .wrap_err("Failed to write output")
    }

    /// Table ids take precedence over a database id.
    fn selection(&self) -> linkrow_core::Result<Selection> {
        if let Some(raw) = &self.table_ids {
            let ids = ops::parse_table_ids(raw);
            if !ids.is_empty() {
                return Ok(Selection::Tables(ids));
            }
        }
        match self.database_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(Selection::Database(id.to_string())),
            _ => Err(Box::new(Error::MissingSelection)),
        }
    }

    fn client_config(&self) -> linkrow_core::Result<ClientConfig> {
        Ok(ClientConfig::new(&self.base_url, self.api_key.clone())?
            .auth_scheme(self.auth_scheme.into())
            .user_field_names(self.user_field_names)
            .page_size(self.page_size)
            .timeout(self.timeout.map(Duration::from_secs)))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        export: ExportCommand,
    }

    fn parse(args: &[&str]) -> ExportCommand {
        let mut argv = vec!["linkrow", "https://baserow.example.com/api/", "secret"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().export
    }

    #[test]
    fn test_table_selection() {
        let cmd = parse(&["--table_ids", "1, 2"]);
        assert_eq!(
            cmd.selection().unwrap(),
            Selection::Tables(vec![TableId::from("1"), TableId::from("2")])
        );
    }

    #[test]
    fn test_table_ids_win_over_database() {
        let cmd = parse(&["--table_ids", "1", "--database_id", "9"]);
        assert_eq!(
            cmd.selection().unwrap(),
            Selection::Tables(vec![TableId::from("1")])
        );
    }

    #[test]
    fn test_database_selection() {
        let cmd = parse(&["--database-id", "9"]);
        assert_eq!(cmd.selection().unwrap(), Selection::Database("9".into()));
    }

    #[test]
    fn test_missing_selection() {
        let cmd = parse(&[]);
        let err = cmd.selection().unwrap_err();
        assert!(matches!(*err, Error::MissingSelection));
    }

    #[test]
    fn test_blank_table_ids_fall_back() {
        let cmd = parse(&["--table_ids", " , "]);
        assert!(cmd.selection().is_err());
    }

    #[test]
    fn test_output_multi_select() {
        let cmd = parse(&["--table_ids", "1", "--output", "linked_fields,matrix"]);
        assert_eq!(cmd.output, [OutputKind::LinkedFields, OutputKind::Matrix]);

        let cmd = parse(&["--table_ids", "1", "--output", "tables", "matrix"]);
        assert_eq!(cmd.output, [OutputKind::Tables, OutputKind::Matrix]);
    }

    #[test]
    fn test_unknown_output_rejected() {
        let result = TestCli::try_parse_from([
            "linkrow",
            "https://baserow.example.com/api/",
            "secret",
            "--output",
            "csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_page_size_range() {
        let result = TestCli::try_parse_from([
            "linkrow",
            "https://baserow.example.com/api/",
            "secret",
            "--page_size",
            "500",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_client_config() {
        let cmd = parse(&[
            "--table_ids",
            "1",
            "--user_field_names",
            "--page_size",
            "100",
            "--timeout",
            "30",
            "--auth_scheme",
            "jwt",
        ]);
        let config = cmd.client_config().unwrap();

        assert!(config.uses_user_field_names());
        assert_eq!(config.rows_per_page(), Some(100));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.authorization(), "JWT secret");
    }

    #[test]
    fn test_invalid_base_url() {
        let cmd = TestCli::try_parse_from(["linkrow", "nope", "secret"]).unwrap().export;
        let err = cmd.client_config().unwrap_err();
        assert!(matches!(*err, Error::InvalidBaseUrl { .. }));
    }
}
