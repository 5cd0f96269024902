pub mod calibration;
pub mod config;
pub mod error;
pub mod frontend;
pub mod geometry;
pub mod graph;
pub mod io;
pub mod sensors;
pub mod system;

pub use config::FrontendConfig;
pub use error::FrontendError;
