//! Rendering subsystem
//!
//! - **`window`**: windowing toolkit seam and its GLFW implementation
//! - **`backends`**: graphics API backends (Vulkan)

pub mod backends;
pub mod window;

pub use backends::vulkan::{AshHost, GraphicsHandles, GraphicsHost, VulkanContext, VulkanError, VulkanResult};
pub use window::{GlfwWindow, WindowError, WindowResult, WindowSystem};
