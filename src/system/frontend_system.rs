//! Threaded front-end: a dedicated worker owns the [`NodeBuilder`].
//!
//! Callers on any thread push events into a bounded channel; the worker
//! applies them one at a time, which serializes every commit sequence with
//! respect to other triggers and to motion-delta integration.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded};
use tracing::{error, info};

use crate::calibration::CalibrationLookup;
use crate::error::{FrontendError, Result};
use crate::frontend::{NodeBuilder, TriggerOutcome};
use crate::graph::PoseGraph;
use crate::sensors::{DepthFrame, FeatureSet, MotionDelta};

use super::messages::FrontendEvent;
use super::shared_state::{FrontendStats, SharedState};

/// Handle to a running front-end worker.
///
/// The worker exclusively owns the graph collaborator until
/// [`shutdown`](Self::shutdown) hands it back.
pub struct FrontendSystem<G> {
    shared: Arc<SharedState>,
    sender: Option<Sender<FrontendEvent>>,
    worker: Option<JoinHandle<Result<G>>>,
}

impl<G> FrontendSystem<G>
where
    G: PoseGraph + Send + 'static,
{
    /// Move `builder` into a new worker thread.
    pub fn spawn<C>(builder: NodeBuilder<G, C>) -> Self
    where
        C: CalibrationLookup + Send + 'static,
    {
        let capacity = builder.config().channel_capacity.max(1);
        let shared = SharedState::new();
        let (sender, receiver) = bounded::<FrontendEvent>(capacity);

        let worker_shared = shared.clone();
        let worker = thread::spawn(move || run_worker(builder, receiver, worker_shared));

        Self {
            shared,
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    pub fn push_motion_delta(&self, sample: MotionDelta) -> Result<()> {
        self.send(FrontendEvent::MotionDelta(sample))
    }

    pub fn push_features(&self, features: FeatureSet) -> Result<()> {
        self.send(FrontendEvent::Features(features))
    }

    pub fn push_depth_frame(&self, frame: DepthFrame) -> Result<()> {
        self.send(FrontendEvent::DepthFrame(frame))
    }

    /// Enqueue an event, blocking while the channel is full.
    pub fn send(&self, event: FrontendEvent) -> Result<()> {
        let sender = self.sender.as_ref().ok_or(FrontendError::WorkerStopped)?;
        sender.send(event).map_err(|_| FrontendError::WorkerStopped)
    }

    pub fn stats(&self) -> FrontendStats {
        self.shared.stats()
    }

    /// Whether the worker stopped on an unrecoverable error.
    pub fn is_halted(&self) -> bool {
        self.shared.is_halted()
    }

    /// Drain queued events, stop the worker and return the graph.
    ///
    /// If the worker halted, the error that stopped it is returned instead.
    pub fn shutdown(&mut self) -> Result<G> {
        // Dropping the sender disconnects the channel once the queue drains.
        self.sender.take();

        let worker = self.worker.take().ok_or(FrontendError::WorkerStopped)?;
        worker.join().map_err(|_| FrontendError::WorkerPanicked)?
    }
}

impl<G> Drop for FrontendSystem<G> {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker<G, C>(
    mut builder: NodeBuilder<G, C>,
    receiver: Receiver<FrontendEvent>,
    shared: Arc<SharedState>,
) -> Result<G>
where
    G: PoseGraph,
    C: CalibrationLookup,
{
    info!("front-end worker started");

    for event in receiver.iter() {
        match event {
            FrontendEvent::MotionDelta(sample) => {
                builder.on_motion_delta(sample);
                shared.update_stats(|s| s.motion_deltas += 1);
            }
            FrontendEvent::Features(features) => {
                let overwritten = builder.on_features(features);
                shared.update_stats(|s| {
                    s.feature_sets += 1;
                    if overwritten {
                        s.feature_sets_overwritten += 1;
                    }
                });
            }
            FrontendEvent::DepthFrame(frame) => match builder.on_depth_frame(frame) {
                Ok(TriggerOutcome::NodeCommitted(summary)) => shared.update_stats(|s| {
                    s.nodes_committed += 1;
                    if summary.attached_features {
                        s.nodes_with_features += 1;
                    }
                }),
                Ok(TriggerOutcome::FrameDropped { .. }) => {
                    shared.update_stats(|s| s.frames_dropped += 1)
                }
                Err(err) => {
                    error!(%err, "front-end halted");
                    if err.is_covariance_violation() {
                        shared.update_stats(|s| s.covariance_violations += 1);
                    }
                    shared.set_halted();
                    return Err(err);
                }
            },
        }
    }

    let stats = shared.stats();
    info!(
        motion_deltas = stats.motion_deltas,
        feature_sets = stats.feature_sets,
        nodes = stats.nodes_committed,
        dropped = stats.frames_dropped,
        "front-end worker exiting"
    );
    Ok(builder.into_graph())
}
