//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Veracity CLI - Fact-check claims against web evidence.
#[derive(Debug, Parser)]
#[command(name = "veracity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "VERACITY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `veracity_retrieval=debug`
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify a list of claims
    Verify(VerifyArgs),

    /// Look up domain reputation scores
    Reputation(ReputationArgs),

    /// Maintain the result cache
    Cache(CacheArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// JSON file with `[{"id", "text", "queries"?}]`
    #[arg(short, long)]
    pub input: PathBuf,

    /// Page text the claims were extracted from; keys the cache when given
    #[arg(short, long)]
    pub text_file: Option<PathBuf>,

    /// Neither read nor write the result cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the reputation command.
#[derive(Debug, Parser)]
pub struct ReputationArgs {
    /// Hostnames to look up
    #[arg(required = true)]
    pub domains: Vec<String>,
}

/// Arguments for cache maintenance.
#[derive(Debug, Parser)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache maintenance actions.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Delete every expired entry
    Purge,

    /// Delete the cached result for a content hash
    Delete {
        /// Hex SHA-256 content hash
        hash: String,
    },

    /// Print the content hash of a file
    Hash {
        /// File to hash
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_command() {
        let cli = Cli::parse_from([
            "veracity",
            "verify",
            "--input",
            "claims.json",
            "--text-file",
            "page.txt",
            "--no-cache",
        ]);
        match cli.command {
            Command::Verify(args) => {
                assert_eq!(args.input, PathBuf::from("claims.json"));
                assert_eq!(args.text_file, Some(PathBuf::from("page.txt")));
                assert!(args.no_cache);
            }
            _ => panic!("Expected Verify command"),
        }
        assert_eq!(cli.format, CliFormat::Table);
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::parse_from(["veracity", "reputation", "nature.com", "--format", "json"]);
        assert_eq!(cli.format, CliFormat::Json);
        match cli.command {
            Command::Reputation(args) => assert_eq!(args.domains, vec!["nature.com"]),
            _ => panic!("Expected Reputation command"),
        }
    }

    #[test]
    fn test_reputation_requires_a_domain() {
        assert!(Cli::try_parse_from(["veracity", "reputation"]).is_err());
    }

    #[test]
    fn test_cache_delete() {
        let cli = Cli::parse_from(["veracity", "cache", "delete", "abc123"]);
        match cli.command {
            Command::Cache(CacheArgs {
                action: CacheAction::Delete { hash },
            }) => assert_eq!(hash, "abc123"),
            _ => panic!("Expected cache delete"),
        }
    }
}
