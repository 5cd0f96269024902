//! Recorded sensor streams for offline replay.
//!
//! Directory layout (all CSV files without header, `#` lines are comments):
//!
//! ```text
//! <root>/odometry/data.csv   ts, qw, qx, qy, qz, tx, ty, tz, var_rx, var_ry, var_rz, var_tx, var_ty, var_tz
//! <root>/depth/data.csv      ts, width, height, filename
//! <root>/depth/data/<file>   width * height little-endian f32 ranges
//! <root>/depth/sensor.yaml   T_BS extrinsic (4x4 row-major `data`)
//! <root>/features/data.csv   ts, id, x, y, z   (one row per feature)
//! ```
//!
//! Odometry rows are relative motions since the previous row. The feature
//! stream is optional.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord};
use nalgebra::{Matrix4, Vector3, Vector6};
use serde::Deserialize;
use tracing::warn;

use crate::geometry::{SE3, UncertainTransform};
use crate::sensors::{DepthFrame, FeatureSet, MotionDelta, StereoFeature};
use crate::system::FrontendEvent;

#[derive(Debug)]
pub struct ReplayDataset {
    pub root: PathBuf,
    pub motion: Vec<MotionDelta>,
    pub depth: Vec<DepthFrame>,
    pub features: Vec<FeatureSet>,
    /// Extrinsic of the depth sensor (`T_body_depth`).
    pub t_body_depth: SE3,
}

impl ReplayDataset {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let motion = load_motion_list(root.join("odometry/data.csv"))?;
        let depth = load_depth_list(&root.join("depth"))?;
        let t_body_depth = load_extrinsic(&root.join("depth/sensor.yaml"))?;

        // Features are optional - nodes then carry depth only
        let features_csv = root.join("features/data.csv");
        let features = if features_csv.exists() {
            load_feature_list(features_csv)?
        } else {
            warn!("No feature stream in {:?}. Continuing without it.", root);
            Vec::new()
        };

        Ok(Self {
            root,
            motion,
            depth,
            features,
            t_body_depth,
        })
    }

    /// All samples merged into one time-ordered event sequence.
    ///
    /// Per-stream order is preserved. On equal timestamps motion comes
    /// first, then features, then depth, so evidence recorded at the trigger
    /// instant is attached to the node it triggers.
    pub fn events(&self) -> Vec<FrontendEvent> {
        let mut keyed: Vec<(u64, u8, FrontendEvent)> =
            Vec::with_capacity(self.motion.len() + self.depth.len() + self.features.len());
        keyed.extend(
            self.motion
                .iter()
                .map(|m| (m.timestamp_ns, 0, FrontendEvent::MotionDelta(m.clone()))),
        );
        keyed.extend(
            self.features
                .iter()
                .map(|f| (f.timestamp_ns, 1, FrontendEvent::Features(f.clone()))),
        );
        keyed.extend(
            self.depth
                .iter()
                .map(|d| (d.timestamp_ns, 2, FrontendEvent::DepthFrame(d.clone()))),
        );

        // Stable sort keeps per-stream delivery order.
        keyed.sort_by_key(|(ts, rank, _)| (*ts, *rank));
        keyed.into_iter().map(|(_, _, event)| event).collect()
    }
}

fn csv_reader(csv_path: &Path) -> Result<csv::Reader<File>> {
    ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open {}", csv_path.display()))
}

fn field<T>(rec: &StringRecord, idx: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = rec
        .get(idx)
        .with_context(|| format!("Missing column {} in {:?}", idx, rec))?;
    raw.trim()
        .parse()
        .with_context(|| format!("Bad value {:?} in column {}", raw, idx))
}

fn load_motion_list(csv_path: PathBuf) -> Result<Vec<MotionDelta>> {
    let mut rdr = csv_reader(&csv_path)?;

    let mut entries = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.len() < 14 {
            continue;
        }
        let ts: u64 = field(&rec, 0)?;
        let mean = SE3::from_quaternion(
            field(&rec, 1)?,
            field(&rec, 2)?,
            field(&rec, 3)?,
            field(&rec, 4)?,
            Vector3::new(field(&rec, 5)?, field(&rec, 6)?, field(&rec, 7)?),
        );
        let variances = Vector6::new(
            field(&rec, 8)?,
            field(&rec, 9)?,
            field(&rec, 10)?,
            field(&rec, 11)?,
            field(&rec, 12)?,
            field(&rec, 13)?,
        );
        if variances.iter().any(|v| *v < 0.0) {
            bail!("Negative variance in odometry row at {} ns", ts);
        }
        entries.push(MotionDelta::new(
            ts,
            UncertainTransform::from_variances(mean, variances),
        ));
    }
    Ok(entries)
}

fn load_depth_list(depth_dir: &Path) -> Result<Vec<DepthFrame>> {
    let mut rdr = csv_reader(&depth_dir.join("data.csv"))?;

    let mut frames = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.len() < 4 {
            continue;
        }
        let ts: u64 = field(&rec, 0)?;
        let width: usize = field(&rec, 1)?;
        let height: usize = field(&rec, 2)?;
        let Some(expected) = width.checked_mul(height) else {
            bail!("Depth frame at {} ns has oversized dimensions {}x{}", ts, width, height);
        };
        let path = depth_dir.join("data").join(rec[3].trim());
        let ranges = load_ranges(&path)?;
        if ranges.len() != expected {
            bail!(
                "Depth frame {:?} has {} ranges, expected {}x{}",
                path,
                ranges.len(),
                width,
                height
            );
        }
        frames.push(DepthFrame::new(ts, width, height, ranges));
    }
    Ok(frames)
}

fn load_ranges(path: &Path) -> Result<Vec<f32>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    if bytes.len() % 4 != 0 {
        bail!("Depth file {:?} is not a whole number of f32 values", path);
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

fn load_feature_list(csv_path: PathBuf) -> Result<Vec<FeatureSet>> {
    let mut rdr = csv_reader(&csv_path)?;

    let mut sets: Vec<FeatureSet> = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.len() < 5 {
            continue;
        }
        let ts: u64 = field(&rec, 0)?;
        let feature = StereoFeature {
            id: field(&rec, 1)?,
            point: Vector3::new(field(&rec, 2)?, field(&rec, 3)?, field(&rec, 4)?),
            descriptor: Vec::new(),
        };

        // Consecutive rows with the same timestamp form one set
        match sets.last_mut() {
            Some(set) if set.timestamp_ns == ts => set.features.push(feature),
            Some(set) if set.timestamp_ns > ts => {
                bail!("Feature rows out of order at {} ns", ts)
            }
            Some(_) | None => sets.push(FeatureSet::new(ts, vec![feature])),
        }
    }
    Ok(sets)
}

/// `T_BS` transform block: has cols, rows, data fields
#[derive(Debug, Deserialize)]
struct TransformYaml {
    data: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct SensorYaml {
    #[serde(rename = "T_BS")]
    t_bs: TransformYaml,
}

/// Load the sensor-to-body extrinsic from a `sensor.yaml` file.
pub fn load_extrinsic(yaml_path: &Path) -> Result<SE3> {
    let sensor: SensorYaml = serde_yaml::from_reader(
        File::open(yaml_path).with_context(|| format!("Failed to open {:?}", yaml_path))?,
    )
    .with_context(|| format!("Failed to parse {:?}", yaml_path))?;
    transform_from(&sensor.t_bs.data)
}

fn transform_from(data: &[f64]) -> Result<SE3> {
    if data.len() != 16 {
        bail!("Expected 16 elements for transform, got {}", data.len());
    }
    let mat = Matrix4::from_row_slice(data);
    Ok(SE3::from_matrix(mat))
}
