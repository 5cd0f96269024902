//! Threaded front-end: ordering, concurrency and halting.

mod common;

use std::thread;

use approx::assert_relative_eq;
use nalgebra::Matrix6;

use rust_graph_slam::calibration::StaticCalibration;
use rust_graph_slam::config::FrontendConfig;
use rust_graph_slam::error::FrontendError;
use rust_graph_slam::frontend::NodeBuilder;
use rust_graph_slam::geometry::{SE3, UncertainTransform};
use rust_graph_slam::graph::InMemoryPoseGraph;
use rust_graph_slam::sensors::{DepthFrame, MotionDelta, ReadingKind};
use rust_graph_slam::system::{FrontendEvent, FrontendSystem};

use common::{features, motion, translation};

fn spawn_system(config: FrontendConfig) -> FrontendSystem<InMemoryPoseGraph> {
    FrontendSystem::spawn(NodeBuilder::new(
        InMemoryPoseGraph::new(),
        StaticCalibration::new(SE3::identity()),
        config,
    ))
}

#[test]
fn events_are_applied_in_delivery_order() {
    let mut system = spawn_system(FrontendConfig::default());

    system.push_motion_delta(motion(1, translation(1.0, 0.0, 0.0), 0.0)).unwrap();
    system.push_features(features(2, &[1])).unwrap();
    system.push_features(features(3, &[2, 3])).unwrap();
    system.push_depth_frame(DepthFrame::empty(4)).unwrap();
    system.push_motion_delta(motion(5, translation(0.0, 2.0, 0.0), 0.0)).unwrap();
    system.send(FrontendEvent::DepthFrame(DepthFrame::empty(6))).unwrap();

    let graph = system.shutdown().unwrap();
    let stats = system.stats();

    assert_eq!(graph.len(), 2);
    assert_eq!(graph.nodes()[0].features(), Some(&features(3, &[2, 3])));
    assert_eq!(graph.nodes()[1].count_of(ReadingKind::Features), 0);
    assert_relative_eq!(graph.nodes()[1].relative.mean.translation.y, 2.0, epsilon = 1e-12);

    assert_eq!(stats.motion_deltas, 2);
    assert_eq!(stats.feature_sets, 2);
    assert_eq!(stats.feature_sets_overwritten, 1);
    assert_eq!(stats.nodes_committed, 2);
    assert_eq!(stats.nodes_with_features, 1);
    assert_eq!(stats.frames_dropped, 0);
    assert!(!system.is_halted());
}

#[test]
fn concurrent_producers_lose_no_motion() {
    let config = FrontendConfig {
        channel_capacity: 4,
        ..FrontendConfig::default()
    };
    let mut system = spawn_system(config);

    let deltas_per_thread = 200;
    thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..deltas_per_thread {
                system
                    .push_motion_delta(motion(i, translation(0.01, 0.0, 0.0), 1e-6))
                    .unwrap();
            }
        });
        scope.spawn(|| {
            for i in 0..deltas_per_thread {
                system
                    .push_motion_delta(motion(i, translation(0.0, 0.0, 0.02), 1e-6))
                    .unwrap();
            }
        });
        scope.spawn(|| {
            for i in 0..50 {
                system.push_depth_frame(DepthFrame::empty(i)).unwrap();
                system.push_features(features(i, &[i])).unwrap();
            }
        });
    });
    system.push_depth_frame(DepthFrame::empty(1_000)).unwrap();

    let graph = system.shutdown().unwrap();

    // Pure translations commute, so the split between nodes does not matter.
    let total = graph
        .nodes()
        .iter()
        .fold(SE3::identity(), |acc, node| acc.compose(&node.relative.mean));
    assert_relative_eq!(total.translation.x, 2.0, epsilon = 1e-9);
    assert_relative_eq!(total.translation.z, 4.0, epsilon = 1e-9);

    assert_eq!(graph.len(), 51);
    let attached: usize = graph
        .nodes()
        .iter()
        .map(|n| n.count_of(ReadingKind::Features))
        .sum();
    assert!(attached <= 50);
    assert!(graph.nodes().iter().all(|n| n.count_of(ReadingKind::Depth) == 1));
}

#[test]
fn covariance_violation_halts_worker() {
    let mut system = spawn_system(FrontendConfig::default());

    system.push_motion_delta(motion(1, translation(1.0, 0.0, 0.0), 0.0)).unwrap();
    system.push_depth_frame(DepthFrame::empty(2)).unwrap();
    system
        .push_motion_delta(MotionDelta::new(
            3,
            UncertainTransform::new(SE3::identity(), Matrix6::from_diagonal_element(-1.0)),
        ))
        .unwrap();
    system.push_depth_frame(DepthFrame::empty(4)).unwrap();

    let err = system.shutdown().unwrap_err();
    assert!(err.is_covariance_violation());
    assert!(system.is_halted());

    let stats = system.stats();
    assert_eq!(stats.nodes_committed, 1);
    assert_eq!(stats.covariance_violations, 1);

    assert!(matches!(
        system.push_depth_frame(DepthFrame::empty(5)),
        Err(FrontendError::WorkerStopped)
    ));
}
