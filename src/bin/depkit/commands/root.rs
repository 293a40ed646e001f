//! `depkit root` command

use anyhow::Result;

use crate::cli::RootArgs;
use depkit::GlobalContext;

pub fn execute(_args: RootArgs, ctx: &GlobalContext) -> Result<()> {
    let root = ctx.find_project_root()?;
    println!("{}", root.display());
    Ok(())
}
