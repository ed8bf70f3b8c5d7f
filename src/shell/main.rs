// Imports tracker bundles against in memory stores and prints one report per bundle.
//
// Usage: tracker_imports <metadata.json> <bundle.json>...

use anyhow::{Context, bail};
use std::fs;
use tracing_subscriber::EnvFilter;
use tracker_imports::modules::tracker::adapters::outbound::metadata_catalog::MetadataCatalog;
use tracker_imports::modules::tracker::core::change_log::ChangeLogQuery;
use tracker_imports::modules::tracker::core::payload::TrackerObjects;
use tracker_imports::shell::config::AppConfig;
use tracker_imports::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(metadata_path) = args.next() else {
        bail!("usage: tracker_imports <metadata.json> <bundle.json>...");
    };
    let bundle_paths: Vec<String> = args.collect();
    if bundle_paths.is_empty() {
        bail!("no bundle files given");
    }

    let config = AppConfig::from_env()?;
    let catalog: MetadataCatalog = serde_json::from_str(
        &fs::read_to_string(&metadata_path).with_context(|| format!("reading {metadata_path}"))?,
    )
    .with_context(|| format!("parsing {metadata_path}"))?;
    let state = AppState::in_memory(&config, catalog);

    for path in &bundle_paths {
        let objects: TrackerObjects = serde_json::from_str(
            &fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
        )
        .with_context(|| format!("parsing {path}"))?;
        let report = state.importer.import_bundle(&state.params, objects.events).await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        if report.fatal.is_some() {
            bail!("import of {path} aborted");
        }
    }

    let entries = state.change_logs.handle(&ChangeLogQuery::new()).await?;
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
