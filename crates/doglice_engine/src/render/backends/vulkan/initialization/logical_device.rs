//! Logical device creation

use ash::vk;

use super::device_selection::CompleteQueueFamilies;
use crate::render::backends::vulkan::error::{VulkanError, VulkanResult};
use crate::render::backends::vulkan::host::{DeviceRequest, GraphicsHost, QueueRequest};

/// Priority given to every requested queue
pub const QUEUE_PRIORITY: f32 = 1.0;

/// A created logical device and its queues
///
/// Queue handles are only valid while `device` lives. When graphics and
/// present share a family both fields hold the same queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalDevice {
    /// Logical device handle
    pub device: vk::Device,
    /// Queue used for graphics work
    pub graphics_queue: vk::Queue,
    /// Queue used for presentation
    pub present_queue: vk::Queue,
    /// Families the queues came from
    pub queue_families: CompleteQueueFamilies,
}

/// One queue request per distinct family
pub fn queue_requests(families: &CompleteQueueFamilies) -> Vec<QueueRequest> {
    families
        .unique_families()
        .into_iter()
        .map(|family_index| QueueRequest {
            family_index,
            priority: QUEUE_PRIORITY,
        })
        .collect()
}

/// Create the logical device and fetch the graphics and present queues
///
/// `layers` should repeat the instance layers; modern loaders ignore device
/// layers but older ones only validate device calls when they are set. If
/// fetching a queue fails the new device is destroyed before returning.
pub fn create_logical_device<H: GraphicsHost + ?Sized>(
    host: &mut H,
    physical_device: vk::PhysicalDevice,
    queue_families: CompleteQueueFamilies,
    extensions: &[String],
    layers: &[String],
) -> VulkanResult<LogicalDevice> {
    let queues = queue_requests(&queue_families);
    let request = DeviceRequest {
        queues: &queues,
        extensions,
        layers,
    };

    let device = host.create_device(physical_device, &request)?;
    log::info!("Logical device created with {} queue family request(s)", queues.len());

    let fetched = host
        .device_queue(device, queue_families.graphics_family, 0)
        .and_then(|graphics| Ok((graphics, host.device_queue(device, queue_families.present_family, 0)?)));

    match fetched {
        Ok((graphics_queue, present_queue)) => Ok(LogicalDevice {
            device,
            graphics_queue,
            present_queue,
            queue_families,
        }),
        Err(e) => {
            host.destroy_device(device);
            Err(e.within(VulkanError::LogicalContextCreationFailed))
        }
    }
}
