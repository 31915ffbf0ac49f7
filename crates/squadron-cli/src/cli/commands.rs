use super::args::Cli;
use squadron_core::dataset;
use squadron_core::engine::Orchestrator;
use squadron_core::providers::fitter::HttpFitter;
use squadron_core::registry::LocalRegistry;
use squadron_core::tracking::JsonlTracker;
use squadron_core::{FinetuneConfig, PipelineResult};
use std::sync::Arc;

pub async fn dispatch(cli: Cli) -> PipelineResult<()> {
    let mut config = FinetuneConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    config.validate()?;
    tracing::debug!(?config, "configuration resolved");

    let dataset = dataset::load_dataset_dict(&config.data_dir, &cli.language)?;

    let orchestrator = Orchestrator::new(
        Arc::new(HttpFitter::new(cli.fitter_url)),
        Arc::new(JsonlTracker::new(config.tracking_dir.clone())),
        Arc::new(LocalRegistry::new(config.registry_dir.clone())),
    );
    let scores = orchestrator.run(&dataset, &cli.language, &config).await?;

    println!("EM: {:.3}", scores.em);
    println!("F1: {:.3}", scores.f1);
    Ok(())
}
