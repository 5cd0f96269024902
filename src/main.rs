use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rust_graph_slam::calibration::StaticCalibration;
use rust_graph_slam::config::FrontendConfig;
use rust_graph_slam::frontend::NodeBuilder;
use rust_graph_slam::graph::{InMemoryPoseGraph, NodeId};
use rust_graph_slam::io::ReplayDataset;
use rust_graph_slam::system::FrontendSystem;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let mut args = std::env::args().skip(1);
    let dataset_path = args
        .next()
        .unwrap_or_else(|| "data/replay".to_string());
    let config = match args.next() {
        Some(path) => FrontendConfig::from_yaml_file(&path)?,
        None => FrontendConfig::default(),
    };

    info!("Loading replay dataset from: {}", dataset_path);
    let dataset = ReplayDataset::new(&dataset_path)?;
    info!(
        "Loaded {} motion deltas, {} depth frames, {} feature sets",
        dataset.motion.len(),
        dataset.depth.len(),
        dataset.features.len()
    );

    let builder = NodeBuilder::new(
        InMemoryPoseGraph::new(),
        StaticCalibration::new(dataset.t_body_depth),
        config,
    );
    let mut system = FrontendSystem::spawn(builder);

    for event in dataset.events() {
        if system.send(event).is_err() {
            warn!("Front-end stopped before the replay finished");
            break;
        }
    }

    let graph = system
        .shutdown()
        .context("Front-end stopped on an unrecoverable error")?;
    let stats = system.stats();

    info!(
        "Done! {} nodes ({} with features), {} frames dropped, {} feature sets overwritten",
        graph.len(),
        stats.nodes_with_features,
        stats.frames_dropped,
        stats.feature_sets_overwritten
    );
    if let Some(last) = graph.last() {
        if let Some(pose) = graph.absolute_pose(last.id) {
            info!(
                "Final node {} at [{:.2}, {:.2}, {:.2}] relative to {}",
                last.id,
                pose.translation.x,
                pose.translation.y,
                pose.translation.z,
                NodeId::new(0)
            );
        }
    }

    Ok(())
}
