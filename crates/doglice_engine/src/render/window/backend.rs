//! Windowing toolkit contract

use ash::vk;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The toolkit itself failed to start
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The native window could not be created
    #[error("Window creation failed")]
    CreationFailed,

    /// The toolkit reports no Vulkan support on this system
    #[error("Vulkan not supported by the windowing toolkit")]
    VulkanUnsupported,

    /// Surface creation returned a non-success code
    #[error("Surface creation failed: {0:?}")]
    SurfaceCreationFailed(vk::Result),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// What the engine needs from a windowing toolkit
///
/// Destroying the native window and shutting the toolkit down happen when
/// the implementation is dropped. Any surface created through
/// [`WindowSystem::create_surface`] must be destroyed first.
pub trait WindowSystem {
    /// Instance extensions needed to present to this window, in toolkit order
    fn required_instance_extensions(&self) -> WindowResult<Vec<String>>;

    /// Create a presentation surface for `instance`
    fn create_surface(&mut self, instance: vk::Instance) -> WindowResult<vk::SurfaceKHR>;

    /// True once the user asked to close the window
    fn should_close(&self) -> bool;

    /// Process pending toolkit events
    fn poll_events(&mut self);

    /// Current framebuffer size in pixels
    fn framebuffer_size(&self) -> (u32, u32);
}
