//! Vulkan backend implementation
//!
//! Organized into the host runtime seam, its ash implementation, and the
//! initialization modules that drive it.

/// Host runtime interface
pub mod host;

/// ash-backed host runtime
pub mod ash_host;

/// Vulkan bootstrap errors
pub mod error;

/// Vulkan initialization types (instance, messenger, surface, devices)
pub mod initialization;

#[cfg(test)]
pub(crate) mod tests;

pub use ash_host::AshHost;
pub use error::{VulkanError, VulkanResult};
pub use host::GraphicsHost;
pub use initialization::{GraphicsHandles, VulkanContext};
