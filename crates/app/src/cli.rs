//! Command line interface.

use clap::{Parser, Subcommand};

use bestellblick::config::{ApiKey, Config};

/// Live dashboard over the hosted order database.
#[derive(Debug, Parser)]
#[command(name = "bestellblick", about = "Live Bestell-Dashboard", long_about = None)]
pub struct Cli {
    /// Base URL of the hosted database project.
    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: String,

    /// Service API key for the read queries.
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    supabase_key: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the interactive terminal dashboard (default).
    Dashboard,

    /// Render one pass as plain text to stdout.
    Snapshot,
}

impl Cli {
    /// Dispatch the selected mode.
    ///
    /// # Errors
    ///
    /// Returns a display-ready message when the run fails.
    pub fn run(self) -> Result<(), String> {
        let config = Config {
            url: self.supabase_url,
            key: ApiKey::new(self.supabase_key),
        };

        match self.command.unwrap_or(Commands::Dashboard) {
            Commands::Dashboard => crate::app::run(config),
            Commands::Snapshot => crate::snapshot::run(&config),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn parses_credentials_from_flags() {
        let cli = Cli::try_parse_from([
            "bestellblick",
            "--supabase-url",
            "https://example.supabase.co",
            "--supabase-key",
            "k",
            "snapshot",
        ]);

        assert!(cli.is_ok(), "snapshot invocation should parse: {cli:?}");
    }

    #[test]
    fn subcommand_is_optional() {
        let cli = Cli::try_parse_from([
            "bestellblick",
            "--supabase-url",
            "https://example.supabase.co",
            "--supabase-key",
            "k",
        ]);

        assert!(cli.is_ok(), "bare invocation should parse: {cli:?}");
    }
}
