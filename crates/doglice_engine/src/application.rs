//! Application trait and per-frame hook

use thiserror::Error;

use crate::render::{GraphicsHandles, VulkanError};

/// Data handed to the application every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameContext {
    /// Live Vulkan handles, valid for the duration of the call
    pub graphics: GraphicsHandles,
    /// Framebuffer size reported by the window
    pub framebuffer_size: (u32, u32),
    /// Number of frames completed before this one
    pub frame_index: u64,
}

/// Application lifecycle trait
///
/// The engine owns startup, the event loop and teardown; the application only
/// supplies what happens each frame. Any `FnMut(&FrameContext)` closure with
/// the right return type is an application too.
pub trait Application {
    /// Called once per loop iteration, after window events were polled
    fn update(&mut self, frame: &FrameContext) -> Result<(), AppError>;
}

impl<F> Application for F
where
    F: FnMut(&FrameContext) -> Result<(), AppError>,
{
    fn update(&mut self, frame: &FrameContext) -> Result<(), AppError> {
        self(frame)
    }
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Graphics call made by the application failed
    #[error("Graphics error: {0}")]
    Graphics(#[from] VulkanError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
