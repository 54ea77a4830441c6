//! # DoGlIce Engine
//!
//! Vulkan bootstrap for a windowed application: instance creation with
//! optional validation, debug messenger, window surface, physical device
//! selection and logical device creation, with teardown in exact reverse
//! order on every exit path.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doglice_engine::prelude::*;
//!
//! let config = BootstrapConfig::default();
//! let mut frames = 0u64;
//! let code = launch(&config, &mut |_frame: &FrameContext| {
//!     frames += 1;
//!     Ok::<(), AppError>(())
//! });
//! std::process::exit(code);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod render;

mod application;
mod engine;

pub use application::{AppError, Application, FrameContext};
pub use engine::{launch, Engine, EngineError, EXIT_INIT_FAILURE, EXIT_RUNTIME_FAILURE, EXIT_SUCCESS};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{BootstrapConfig, DiagnosticsConfig, WindowConfig},
        launch, AppError, Application, Engine, EngineError, FrameContext,
        config::Config,
        render::{GraphicsHandles, VulkanError},
    };
}
