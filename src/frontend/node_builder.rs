//! Node creation triggered by depth frames.
//!
//! Every depth frame runs one commit sequence to completion:
//!
//! 1. Resolve the sensor-to-body extrinsic at the frame time (miss → drop)
//! 2. Regularize the accumulated covariance with isotropic process noise
//! 3. Validate the regularized covariance (violation → error, no node)
//! 4. Begin a node with the regularized relative transform
//! 5. Attach the depth frame
//! 6. Attach the buffered feature set, if one is valid
//! 7. Commit the node to the graph, consuming the feature set
//! 8. Reset the accumulator
//!
//! If the graph rejects any step the pending node is aborted, and the
//! accumulator and feature set stay as they were.

use tracing::{debug, error, info, trace};

use crate::calibration::CalibrationLookup;
use crate::config::FrontendConfig;
use crate::error::{FrontendError, Result};
use crate::geometry::{SE3, UncertainTransform};
use crate::graph::{GraphError, NodeId, PoseGraph};
use crate::sensors::{DepthFrame, FeatureSet, MotionDelta, SensorReading};

use super::accumulator::KeyframeAccumulator;
use super::evidence::EvidenceBuffer;
use super::outcome::{CommitSummary, DropReason, TriggerOutcome};
use super::validation::{CovarianceDiagnostics, CovarianceValidator, TracingDiagnostics};

/// Owns the front-end state and the graph collaborator.
///
/// All three input streams enter through `&mut self` methods, so a commit
/// sequence can never interleave with another event.
pub struct NodeBuilder<G, C> {
    config: FrontendConfig,
    validator: CovarianceValidator,
    calibration: C,
    graph: G,
    accumulator: KeyframeAccumulator,
    evidence: EvidenceBuffer<FeatureSet>,
    diagnostics: Option<Box<dyn CovarianceDiagnostics>>,
}

impl<G: PoseGraph, C: CalibrationLookup> NodeBuilder<G, C> {
    /// Start accumulating from identity. When `config.diagnostics` is set,
    /// the covariance spectrum of each node is logged at debug level.
    pub fn new(graph: G, calibration: C, config: FrontendConfig) -> Self {
        let diagnostics: Option<Box<dyn CovarianceDiagnostics>> = if config.diagnostics {
            Some(Box::new(TracingDiagnostics))
        } else {
            None
        };

        Self {
            validator: CovarianceValidator::from_config(&config),
            config,
            calibration,
            graph,
            accumulator: KeyframeAccumulator::new(),
            evidence: EvidenceBuffer::new(),
            diagnostics,
        }
    }

    /// Replace the diagnostics hook.
    pub fn with_diagnostics(mut self, hook: Box<dyn CovarianceDiagnostics>) -> Self {
        self.diagnostics = Some(hook);
        self
    }

    pub fn on_motion_delta(&mut self, sample: MotionDelta) {
        self.accumulator.integrate(&sample.delta);
    }

    /// Buffer a feature set for the next node.
    ///
    /// Returns `true` if an unconsumed feature set was discarded.
    pub fn on_features(&mut self, features: FeatureSet) -> bool {
        let timestamp_ns = features.timestamp_ns;
        match self.evidence.put(features) {
            Some(discarded) => {
                trace!(
                    timestamp_ns,
                    discarded_ns = discarded.timestamp_ns,
                    "replaced unconsumed feature set"
                );
                true
            }
            None => false,
        }
    }

    /// Run the commit sequence for one depth frame.
    ///
    /// A calibration miss is not an error: it yields
    /// [`TriggerOutcome::FrameDropped`] and leaves all state untouched. A
    /// covariance violation returns an error before anything reaches the
    /// graph, also leaving accumulator and evidence untouched.
    pub fn on_depth_frame(&mut self, frame: DepthFrame) -> Result<TriggerOutcome> {
        let timestamp_ns = frame.timestamp_ns;

        let Some(extrinsic) = self.calibration.resolve(timestamp_ns) else {
            debug!(timestamp_ns, "extrinsic unavailable, dropping depth frame");
            return Ok(TriggerOutcome::FrameDropped {
                timestamp_ns,
                reason: DropReason::CalibrationUnavailable,
            });
        };

        let relative = self
            .accumulator
            .current()
            .with_isotropic_noise(self.config.process_noise);

        let report = self
            .validator
            .validate(&relative.covariance)
            .map_err(|violation| {
                error!(timestamp_ns, %violation, "node covariance failed validation");
                FrontendError::CovarianceViolation {
                    timestamp_ns,
                    violation,
                }
            })?;
        if let Some(hook) = self.diagnostics.as_mut() {
            hook.inspect(timestamp_ns, &relative.covariance, &report);
        }

        debug!(timestamp_ns, "adding node");
        let pending_features = self.evidence.peek().cloned();
        let attached_features = pending_features.is_some();
        let node_id = match self.submit_node(relative.clone(), frame, pending_features, extrinsic) {
            Ok(node_id) => node_id,
            Err(err) => {
                error!(timestamp_ns, %err, "graph rejected node, aborting it");
                self.graph.abort_node();
                return Err(err.into());
            }
        };

        // Consumed only once the node holding it is committed.
        self.evidence.take_if_valid();
        let deltas_integrated = self.accumulator.num_integrated();
        self.accumulator.reset();

        info!(
            %node_id,
            timestamp_ns,
            attached_features,
            deltas_integrated,
            "committed graph node"
        );

        Ok(TriggerOutcome::NodeCommitted(CommitSummary {
            node_id,
            timestamp_ns,
            relative,
            attached_features,
            deltas_integrated,
            covariance: report,
        }))
    }

    fn submit_node(
        &mut self,
        relative: UncertainTransform,
        frame: DepthFrame,
        features: Option<FeatureSet>,
        extrinsic: SE3,
    ) -> std::result::Result<NodeId, GraphError> {
        self.graph.begin_node(relative)?;
        self.graph
            .attach_reading(SensorReading::Depth(frame), extrinsic)?;
        if let Some(features) = features {
            self.graph
                .attach_reading(SensorReading::Features(features), extrinsic)?;
        }
        self.graph.commit_node()
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    pub fn accumulator(&self) -> &KeyframeAccumulator {
        &self.accumulator
    }

    pub fn evidence(&self) -> &EvidenceBuffer<FeatureSet> {
        &self.evidence
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Release the graph collaborator, ending the front-end's lifetime.
    pub fn into_graph(self) -> G {
        self.graph
    }
}
