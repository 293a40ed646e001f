//! `depkit params` command

use anyhow::{Context, Result};

use crate::cli::ParamsArgs;
use depkit::{GlobalContext, Project, ProjectRoot};

pub fn execute(args: ParamsArgs, ctx: &GlobalContext) -> Result<()> {
    let project = Project::discover(ctx.cwd(), args.import_root.map(ProjectRoot::new))?;
    tracing::debug!(
        "loaded {} at {}",
        project.import_root(),
        project.abs_root().display()
    );

    let params = project.make_params();
    let json =
        serde_json::to_string_pretty(&params).context("failed to serialize solve parameters")?;
    println!("{}", json);

    Ok(())
}
