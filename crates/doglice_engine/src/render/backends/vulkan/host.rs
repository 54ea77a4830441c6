//! Host graphics runtime interface
//!
//! Every call the bootstrap pipeline makes into the Vulkan runtime goes
//! through [`GraphicsHost`]. The production implementation is
//! [`AshHost`](super::ash_host::AshHost); tests drive the pipeline with a
//! recording host instead of a GPU.
//!
//! Handles crossing this boundary are plain `ash::vk` handles. They carry no
//! ownership: destruction is requested explicitly, and the lifecycle stack in
//! [`initialization::lifecycle`](super::initialization::lifecycle) decides when.

use ash::vk;

use super::error::VulkanResult;
use super::initialization::diagnostics::DiagnosticsDescriptor;

/// Parameters for `vkCreateInstance`
#[derive(Debug, Clone, Copy)]
pub struct InstanceRequest<'a> {
    /// Application name reported to the driver
    pub application_name: &'a str,
    /// Packed application version
    pub application_version: u32,
    /// Engine name reported to the driver
    pub engine_name: &'a str,
    /// Packed engine version
    pub engine_version: u32,
    /// Packed API version
    pub api_version: u32,
    /// Instance extensions, in request order
    pub extensions: &'a [String],
    /// Instance layers, in request order
    pub layers: &'a [String],
    /// Debug messenger chained into the creation call itself
    pub diagnostics: Option<&'a DiagnosticsDescriptor>,
}

/// One queue-create entry of a logical device request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueRequest {
    /// Queue family index
    pub family_index: u32,
    /// Priority of the single queue requested from this family
    pub priority: f32,
}

/// Parameters for `vkCreateDevice`
#[derive(Debug, Clone, Copy)]
pub struct DeviceRequest<'a> {
    /// One entry per unique queue family
    pub queues: &'a [QueueRequest],
    /// Device extensions to enable
    pub extensions: &'a [String],
    /// Device layers (mirrors the instance layers for older loaders)
    pub layers: &'a [String],
}

/// Dynamically resolved `vkCreateDebugUtilsMessengerEXT`
pub type CreateMessengerFn<'h> =
    Box<dyn Fn(&DiagnosticsDescriptor) -> Result<vk::DebugUtilsMessengerEXT, vk::Result> + 'h>;

/// Dynamically resolved `vkDestroyDebugUtilsMessengerEXT`
pub type DestroyMessengerFn<'h> = Box<dyn Fn(vk::DebugUtilsMessengerEXT) + 'h>;

/// Calls the bootstrap pipeline needs from the Vulkan runtime
pub trait GraphicsHost {
    /// Names of all instance layers installed on the host
    fn enumerate_layers(&self) -> VulkanResult<Vec<String>>;

    /// Names of all instance extensions available on the host
    fn enumerate_instance_extensions(&self) -> VulkanResult<Vec<String>>;

    /// Create the instance; failure is reported as `ContextCreationFailed`
    fn create_instance(&mut self, request: &InstanceRequest<'_>) -> VulkanResult<vk::Instance>;

    /// Destroy the instance
    fn destroy_instance(&mut self, instance: vk::Instance);

    /// Look up `vkCreateDebugUtilsMessengerEXT`, `None` when the runtime does not expose it
    fn resolve_create_messenger(&self, instance: vk::Instance) -> Option<CreateMessengerFn<'_>>;

    /// Look up `vkDestroyDebugUtilsMessengerEXT`, `None` when the runtime does not expose it
    fn resolve_destroy_messenger(&self, instance: vk::Instance) -> Option<DestroyMessengerFn<'_>>;

    /// Destroy a surface created against `instance`
    fn destroy_surface(&mut self, instance: vk::Instance, surface: vk::SurfaceKHR);

    /// Physical devices in host enumeration order
    fn enumerate_physical_devices(&self, instance: vk::Instance) -> VulkanResult<Vec<vk::PhysicalDevice>>;

    /// Human readable device name, used for logging
    fn physical_device_name(&self, physical_device: vk::PhysicalDevice) -> String;

    /// Queue families of a device in index order
    fn queue_family_properties(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> VulkanResult<Vec<vk::QueueFamilyProperties>>;

    /// Whether `family_index` of `physical_device` can present to `surface`
    fn present_support(
        &self,
        physical_device: vk::PhysicalDevice,
        family_index: u32,
        surface: vk::SurfaceKHR,
    ) -> VulkanResult<bool>;

    /// Names of the device extensions supported by `physical_device`
    fn device_extensions(&self, physical_device: vk::PhysicalDevice) -> VulkanResult<Vec<String>>;

    /// Create a logical device; failure is reported as `LogicalContextCreationFailed`
    fn create_device(
        &mut self,
        physical_device: vk::PhysicalDevice,
        request: &DeviceRequest<'_>,
    ) -> VulkanResult<vk::Device>;

    /// Destroy a logical device
    fn destroy_device(&mut self, device: vk::Device);

    /// Fetch queue `queue_index` of `family_index` from a created device
    fn device_queue(&self, device: vk::Device, family_index: u32, queue_index: u32) -> VulkanResult<vk::Queue>;
}
