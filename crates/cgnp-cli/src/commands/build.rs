use crate::cli::BuildArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use cgnp::core::io::{StructureFormat, write_structure};
use cgnp::engine::config::NanoparticleConfig;
use cgnp::engine::progress::ProgressReporter;
use cgnp::workflows;
use cgnp::workflows::assemble::BuildSummary;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Contents of the `--summary` file: the counts and the configuration that produced them.
#[derive(Serialize)]
struct BuildReport<'a> {
    summary: &'a BuildSummary,
    config: &'a NanoparticleConfig,
}

pub async fn run(args: BuildArgs) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let final_config = config::build_config(&args.geometry)?;
    let format = resolve_format(&args);
    info!(
        radius = final_config.core.radius,
        chain_length = final_config.chain.chain_length,
        sizing = %final_config.core.sizing,
        "Configuration resolved."
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Building nanoparticle...");
    info!("Invoking the core assembly workflow...");

    let nanoparticle =
        tokio::task::block_in_place(|| workflows::assemble::run(&final_config, &reporter));
    progress_handler.finish();
    let nanoparticle = nanoparticle?;

    let summary = nanoparticle.summary();
    info!(
        core_beads = summary.core_beads,
        chains = summary.chains,
        total_beads = summary.total_beads,
        "Workflow finished."
    );

    info!("Writing {} structure to {:?}", format, &args.output);
    write_structure(nanoparticle.structure(), format, &args.output).map_err(|e| {
        CliError::FileWriting {
            path: args.output.clone(),
            source: e,
        }
    })?;

    println!(
        "✓ {} core beads, {} chains of {} beads ({} beads total) written to: {}",
        summary.core_beads,
        summary.chains,
        summary.beads_per_chain,
        summary.total_beads,
        args.output.display()
    );

    if let Some(summary_path) = &args.summary {
        write_summary(&summary, &final_config, summary_path)?;
        println!("  Summary written to: {}", summary_path.display());
    }

    Ok(())
}

fn resolve_format(args: &BuildArgs) -> StructureFormat {
    args.format
        .map(Into::into)
        .or_else(|| StructureFormat::from_path(&args.output))
        .unwrap_or_default()
}

fn write_summary(summary: &BuildSummary, config: &NanoparticleConfig, path: &Path) -> Result<()> {
    let text = toml::to_string(&BuildReport { summary, config })
        .map_err(|e| CliError::Other(e.into()))?;
    std::fs::write(path, text)?;
    Ok(())
}
