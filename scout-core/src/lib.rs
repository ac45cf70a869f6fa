//! Scout Core - Shared foundation for the Scout research assistant
//!
//! This module defines the error taxonomy, configuration surface, logging
//! setup and async utilities used by every other crate in the workspace

pub mod async_utils;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use async_utils::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tokio;
pub use tracing;
