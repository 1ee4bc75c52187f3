//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tagsync",
    version,
    author = "neur0map",
    about = "Entity-to-resource mapper registry for tag synchronization",
    long_about = "Tagsync converts metadata entities discovered in source systems (Hive tables, \
                  HDFS paths, Kafka topics, ...) into normalized service resources for an \
                  access-control system. Extension mappers are picked up from the configuration."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/tagsync/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Map a file of entities to their normalized service resources
    Map {
        /// JSON file containing an array of source entities
        input: PathBuf,

        /// Print resources as a JSON array instead of summary lines
        #[arg(long)]
        json: bool,

        /// Fail when any configured mapper did not bootstrap
        #[arg(long)]
        strict: bool,
    },

    /// Check whether an entity type has a registered mapper
    Check {
        /// Entity type identifier (e.g. "hive_table")
        entity_type: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
