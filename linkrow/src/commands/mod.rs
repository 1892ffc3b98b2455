mod export;

use clap::Parser;
use eyre::Result;
use export::ExportCommand;

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for linkrow_core::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "linkrow")]
#[command(version)]
#[command(about = "Fetch all data from a Baserow database, optionally embedding linked rows")]
pub(crate) struct Cli {
    #[command(flatten)]
    export: ExportCommand,

    /// Enable verbose mode for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        self.export.run()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(["linkrow", "http://x/api/", "key", "-v"]).unwrap();
        assert!(cli.verbose);

        let cli = Cli::try_parse_from(["linkrow", "http://x/api/", "key"]).unwrap();
        assert!(!cli.verbose);
    }
}
