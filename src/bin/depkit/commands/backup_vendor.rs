//! `depkit backup-vendor` command

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::cli::BackupVendorArgs;
use depkit::util::diagnostic::{emit, Diagnostic};
use depkit::{backup_vendor, GlobalContext};

pub fn execute(args: BackupVendorArgs, ctx: &GlobalContext) -> Result<()> {
    let root = ctx.find_project_root()?;
    let config = ctx.load_config(&root)?;
    let vendor_dir = config.vendor.path_in(&root);

    if !config.vendor.backup_enabled() {
        emit(
            &Diagnostic::note("vendor backups are disabled by `vendor.backup = false`"),
            ctx.color(),
        );
        return Ok(());
    }

    let suffix = match args.suffix {
        Some(suffix) => suffix,
        None => default_suffix()?,
    };

    match backup_vendor(&vendor_dir, &suffix)? {
        Some(backup) => println!("{}", backup.display()),
        None => emit(
            &Diagnostic::note(format!(
                "nothing to back up at {}",
                vendor_dir.display()
            )),
            ctx.color(),
        ),
    }

    Ok(())
}

fn default_suffix() -> Result<String> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?;
    Ok(now.as_secs().to_string())
}
