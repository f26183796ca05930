use crate::cli::InspectArgs;
use crate::config;
use crate::error::{CliError, Result};
use cgnp::workflows::assemble::{self, BuildSummary};
use tracing::info;

pub async fn run(args: InspectArgs) -> Result<()> {
    let summary = summarize(&args)?;
    let text = summary
        .to_toml_string()
        .map_err(|e| CliError::Other(e.into()))?;
    print!("{}", text);
    Ok(())
}

fn summarize(args: &InspectArgs) -> Result<BuildSummary> {
    let final_config = config::build_config(&args.geometry)?;
    let summary = assemble::predict(&final_config)?;
    info!(
        core_beads = summary.core_beads,
        total_beads = summary.total_beads,
        "Predicted nanoparticle size."
    );
    Ok(summary)
}
