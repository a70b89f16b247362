use std::path::Path;

use anyhow::Context;
use cpwgen_airbridge::{AirbridgeReport, PathPlacements, UniformAirbridging};
use cpwgen_components::Design;
use cpwgen_parser::RawConfig;
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Summary,
    Json,
}

#[derive(Debug, Serialize)]
struct LayerSummary {
    layer: u32,
    positive: usize,
    subtract: usize,
}

#[derive(Debug, Serialize)]
struct RenderSummary {
    components: Vec<String>,
    placements: Vec<PathPlacements>,
    skipped: Vec<String>,
    layers: Vec<LayerSummary>,
}

fn load_config(path: &Path) -> anyhow::Result<RawConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read config {}", path.display()))?;
    RawConfig::from_yaml_str(&raw).with_context(|| format!("could not parse {}", path.display()))
}

pub fn run_render(input: &Path, format: Format) -> Result<(), CliError> {
    let config = load_config(input).map_err(|e| CliError::input(format!("{e:#}")))?;
    let design = Design::from_config(&config)?;
    tracing::info!(components = design.components.len(), "design built");

    let report = match &config.airbridges {
        Some(raw) => UniformAirbridging::from_raw(raw, &design.units)?.run(&design)?,
        None => {
            tracing::info!("no airbridges block, skipping airbridge placement");
            AirbridgeReport::default()
        }
    };

    let mut export = design.export();
    report.table.merge_into(&mut export);

    let layers = export
        .layer_ids()
        .into_iter()
        .filter_map(|id| {
            export.layer(id).map(|shapes| LayerSummary {
                layer: id,
                positive: shapes.positive.len(),
                subtract: shapes.subtract.len(),
            })
        })
        .collect();
    let summary = RenderSummary {
        components: design.components.keys().cloned().collect(),
        placements: report.placements,
        skipped: report.skipped,
        layers,
    };

    match format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| CliError::processing(e.to_string()))?;
            println!("{json}");
        }
        Format::Summary => print_summary(&summary),
    }
    Ok(())
}

fn print_summary(summary: &RenderSummary) {
    println!("Components: {}", summary.components.join(", "));
    if summary.placements.is_empty() {
        println!("Airbridges: none");
    } else {
        let total: usize = summary.placements.iter().map(|p| p.points.len()).sum();
        println!("Airbridges: {total}");
        for p in &summary.placements {
            println!("  {}: {}", p.path, p.points.len());
        }
    }
    for name in &summary.skipped {
        println!("  {name}: skipped");
    }
    println!("Layers:");
    for l in &summary.layers {
        println!("  {}: {} positive, {} subtract", l.layer, l.positive, l.subtract);
    }
}
