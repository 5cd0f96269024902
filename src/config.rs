//! Front-end configuration.
//!
//! Loaded from YAML; every key is optional and falls back to the default:
//!
//! ```yaml
//! process_noise: 0.01
//! symmetry_tolerance: 1.0e-12
//! psd_tolerance: 1.0e-9
//! diagnostics: false
//! channel_capacity: 64
//! ```

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Variance added on every tangent axis before a node is committed.
pub const DEFAULT_PROCESS_NOISE: f64 = 0.01;

/// Capacity of the event channel of the threaded front-end.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontendConfig {
    /// Isotropic regularization added to the accumulated covariance.
    pub process_noise: f64,

    /// Relative tolerance of the covariance symmetry check.
    pub symmetry_tolerance: f64,

    /// Most negative eigenvalue still accepted as positive semi-definite.
    pub psd_tolerance: f64,

    /// Report the covariance spectrum of every committed node.
    pub diagnostics: bool,

    /// Bounded channel capacity for [`crate::system::FrontendSystem`].
    pub channel_capacity: usize,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            process_noise: DEFAULT_PROCESS_NOISE,
            symmetry_tolerance: 1e-12,
            psd_tolerance: 1e-9,
            diagnostics: false,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl FrontendConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Failed to parse front-end config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let config: Self = serde_yaml::from_reader(file)
            .with_context(|| format!("Failed to parse front-end config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the covariance invariants.
    pub fn validate(&self) -> Result<()> {
        if !(self.process_noise.is_finite() && self.process_noise > 0.0) {
            bail!("process_noise must be positive, got {}", self.process_noise);
        }
        if !(self.symmetry_tolerance.is_finite() && self.symmetry_tolerance >= 0.0) {
            bail!(
                "symmetry_tolerance must be non-negative, got {}",
                self.symmetry_tolerance
            );
        }
        if !(self.psd_tolerance.is_finite() && self.psd_tolerance >= 0.0) {
            bail!("psd_tolerance must be non-negative, got {}", self.psd_tolerance);
        }
        if self.channel_capacity == 0 {
            bail!("channel_capacity must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FrontendConfig::default();
        assert_eq!(config.process_noise, 0.01);
        assert!(!config.diagnostics);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = FrontendConfig::from_yaml_str("process_noise: 0.05\ndiagnostics: true\n").unwrap();

        assert_eq!(config.process_noise, 0.05);
        assert!(config.diagnostics);
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(FrontendConfig::from_yaml_str("process_noise: 0.0").is_err());
        assert!(FrontendConfig::from_yaml_str("process_noise: -1.0").is_err());
        assert!(FrontendConfig::from_yaml_str("channel_capacity: 0").is_err());
        assert!(FrontendConfig::from_yaml_str("unknown_key: 1").is_err());
    }
}
