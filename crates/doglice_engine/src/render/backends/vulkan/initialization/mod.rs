// Vulkan initialization components

pub mod capabilities;
pub mod context;
pub mod device_selection;
pub mod diagnostics;
pub mod lifecycle;
pub mod logical_device;
pub mod surface;

pub use capabilities::CapabilityProber;
pub use context::{create_context, required_extensions, DEBUG_UTILS_EXTENSION};
pub use device_selection::{
    evaluate_device, find_queue_families, is_suitable, select_physical_device, CompleteQueueFamilies,
    QueueFamilyIndices, SelectedDevice, Suitability,
};
pub use diagnostics::{DiagnosticsChannel, DiagnosticsDescriptor};
pub use lifecycle::{GraphicsHandles, Resource, ResourceStack, VulkanContext};
pub use logical_device::{create_logical_device, LogicalDevice};
