//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// depkit - project discovery, solver parameters and vendor backups
#[derive(Parser)]
#[command(name = "depkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', long, global = true, env = "DEPKIT_CWD")]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the root directory of the current project
    Root(RootArgs),

    /// Print the parameters that would be handed to the solver
    Params(ParamsArgs),

    /// Move a non-empty vendor directory aside
    BackupVendor(BackupVendorArgs),
}

#[derive(Args)]
pub struct RootArgs {}

#[derive(Args)]
pub struct ParamsArgs {
    /// Import path of the project (defaults to the root directory's name)
    #[arg(long)]
    pub import_root: Option<String>,
}

#[derive(Args)]
pub struct BackupVendorArgs {
    /// Suffix for the backup directory (defaults to the current Unix time)
    #[arg(long)]
    pub suffix: Option<String>,
}
