//! Willow Core — shared errors and configuration.

pub mod config;
pub mod error;

pub use config::{DataPaths, WillowConfig};
pub use error::{Error, Result};
