//! Vulkan surface binding
//!
//! The surface is created by the windowing toolkit but destroyed through the
//! instance, so it is released before the instance and after the device.

use ash::vk;

use crate::render::backends::vulkan::error::{VulkanError, VulkanResult};
use crate::render::window::WindowSystem;

/// Bind `instance` to the window's native surface
pub fn bind<W: WindowSystem + ?Sized>(window: &mut W, instance: vk::Instance) -> VulkanResult<vk::SurfaceKHR> {
    let surface = window
        .create_surface(instance)
        .map_err(|e| VulkanError::SurfaceCreationFailed(e.to_string()))?;

    log::info!("Window surface created");
    Ok(surface)
}
