use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Launch the TUI (default)
    #[command(alias = "tui")]
    Ui,

    /// Run one sync without the TUI and print the aggregate as JSON
    Sync {
        /// Single-line JSON
        #[arg(short, long)]
        compact: bool,
    },

    /// Show or reset configuration
    Config {
        /// Print config file path
        #[arg(long)]
        path: bool,

        /// Reset config to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Reads today's health records, shows the daily summary and uploads it
#[derive(Debug, Parser)]
#[command(name = "vitals", version, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Health export document to read records from
    #[arg(long, global = true)]
    pub export: Option<PathBuf>,

    /// Backend base URL (the aggregate is POSTed to <url>/hh/receive)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Appearance mode (auto, dark, light)
    #[arg(short, long, global = true)]
    pub appearance: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["vitals"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "vitals",
            "sync",
            "--compact",
            "--backend-url",
            "http://10.0.2.2:8080",
            "--export",
            "/tmp/export.json",
        ])
        .unwrap();

        assert!(matches!(cli.command, Some(Commands::Sync { compact: true })));
        assert_eq!(cli.backend_url.as_deref(), Some("http://10.0.2.2:8080"));
        assert_eq!(cli.export, Some(PathBuf::from("/tmp/export.json")));
    }
}
