//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "taginfo-gen")]
#[command(about = "Generate a taginfo project file from a question catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Input sources shared by generate and tags
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Question catalog file or directory (repeatable, read in order)
    #[arg(short, long = "catalog", value_name = "PATH", required = true)]
    pub catalogs: Vec<PathBuf>,

    /// Locale file or directory with translations (repeatable)
    #[arg(short, long = "locale", value_name = "PATH")]
    pub locales: Vec<PathBuf>,

    /// Configuration file (default: taginfo.toml or $TAGINFO_CONFIG)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the taginfo document and publish it if its content changed
    Generate {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output document (also read as the previous version)
        #[arg(short, long, default_value = "taginfo.json")]
        output: PathBuf,

        /// Report the decision without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// List aggregated tags with their object types and descriptions
    Tags {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Write a default taginfo.toml
    Init {
        /// Directory to write into (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}
