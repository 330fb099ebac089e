//! Command-line surface of the scriptsync binary

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "scriptsync",
    version,
    about = "Sync scripting artifacts between the workspace and the store"
)]
pub struct Cli {
    /// Log level (error,warn,info,debug,trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Materialize store rows as workspace files
    Pull {
        #[command(subcommand)]
        target: PullTarget,
    },
    /// Push one saved file back to its row
    Push {
        /// The saved file, absolute or workspace-relative
        file: PathBuf,
    },
    /// Watch the workspace and push saves as they happen
    Watch,
    /// Render lookup results as a fixed-width text table file
    Report {
        #[command(subcommand)]
        target: ReportTarget,
    },
}

#[derive(Subcommand, Debug)]
pub enum PullTarget {
    /// Macros for the configured application names
    Macros {
        /// Pull every application name present in the store instead
        #[arg(long, conflicts_with = "app")]
        all: bool,
        /// Pull a single application name
        #[arg(long)]
        app: Option<String>,
    },
    /// Table event scripts for the configured application names
    Events {
        /// Pull every application name present in the store instead
        #[arg(long, conflicts_with = "app")]
        all: bool,
        /// Pull a single application name
        #[arg(long)]
        app: Option<String>,
    },
    /// Every user's library units
    Library,
    /// Search scripts of one table
    Search {
        /// Table name; prompted for when omitted
        table: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReportTarget {
    /// Document type codes matching a numeric code or description text
    DocTypes {
        /// Code (numeric) or description substring (text)
        filter: String,
    },
    /// Known company records
    Companies,
}
