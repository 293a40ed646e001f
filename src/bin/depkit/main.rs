//! depkit CLI - project discovery and vendor backups

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use depkit::util::diagnostic::emit;
use depkit::{GlobalContext, ProjectError};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ProjectError>() {
            Some(err) => emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("depkit=debug")
    } else {
        EnvFilter::new("depkit=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = match cli.cwd {
        Some(cwd) => GlobalContext::with_cwd(cwd)?,
        None => GlobalContext::new()?,
    };
    ctx.set_color(!cli.no_color);

    match cli.command {
        Commands::Root(args) => commands::root::execute(args, &ctx),
        Commands::Params(args) => commands::params::execute(args, &ctx),
        Commands::BackupVendor(args) => commands::backup_vendor::execute(args, &ctx),
    }
}
