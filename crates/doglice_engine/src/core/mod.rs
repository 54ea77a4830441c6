//! # Core Engine Module
//!
//! Shared settings types used by the bootstrap pipeline and the engine driver.

pub mod config;

pub use config::{BootstrapConfig, DiagnosticsConfig, VersionTriple, WindowConfig};
pub use crate::config::{Config, ConfigError};
