//! Threaded front-end and its shared state.
//!
//! [`FrontendSystem`] runs a [`NodeBuilder`](crate::frontend::NodeBuilder)
//! on a dedicated worker thread fed by a bounded channel of
//! [`FrontendEvent`]s.

mod frontend_system;
pub mod messages;
pub mod shared_state;

pub use frontend_system::FrontendSystem;
pub use messages::FrontendEvent;
pub use shared_state::{FrontendStats, SharedState};
