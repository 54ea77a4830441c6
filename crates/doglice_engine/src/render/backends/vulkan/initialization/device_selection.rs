//! Physical device selection
//!
//! Candidates are checked in the order the driver enumerates them and the
//! first one that passes wins. There is no scoring: a device is suitable when
//! it has a graphics queue family, a family that can present to the surface,
//! and every required device extension.

use std::collections::BTreeSet;

use ash::vk;

use crate::render::backends::vulkan::error::{VulkanError, VulkanResult};
use crate::render::backends::vulkan::host::GraphicsHost;

/// Queue family indices discovered for one device and surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueFamilyIndices {
    /// First family with `QueueFlags::GRAPHICS`
    pub graphics_family: Option<u32>,
    /// First family that can present to the surface
    pub present_family: Option<u32>,
}

impl QueueFamilyIndices {
    /// Both roles found
    pub fn is_complete(&self) -> bool {
        self.graphics_family.is_some() && self.present_family.is_some()
    }

    /// Both indices, if complete
    pub fn complete(&self) -> Option<CompleteQueueFamilies> {
        Some(CompleteQueueFamilies {
            graphics_family: self.graphics_family?,
            present_family: self.present_family?,
        })
    }
}

/// Queue family indices of a selected device; both roles are known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteQueueFamilies {
    /// Graphics queue family index
    pub graphics_family: u32,
    /// Present queue family index, may equal `graphics_family`
    pub present_family: u32,
}

impl CompleteQueueFamilies {
    /// Distinct family indices, ascending
    pub fn unique_families(&self) -> Vec<u32> {
        [self.graphics_family, self.present_family]
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Find the graphics and present queue families of `physical_device`
///
/// Families are scanned in index order. The first match for each role is
/// kept, and scanning stops as soon as both roles are filled.
pub fn find_queue_families<H: GraphicsHost + ?Sized>(
    host: &H,
    physical_device: vk::PhysicalDevice,
    surface: vk::SurfaceKHR,
) -> VulkanResult<QueueFamilyIndices> {
    let mut indices = QueueFamilyIndices::default();

    for (index, family) in host.queue_family_properties(physical_device)?.iter().enumerate() {
        let index = u32::try_from(index).map_err(|_| VulkanError::Api(vk::Result::ERROR_UNKNOWN))?;

        if indices.graphics_family.is_none() && family.queue_flags.contains(vk::QueueFlags::GRAPHICS) {
            indices.graphics_family = Some(index);
        }

        if indices.present_family.is_none() && host.present_support(physical_device, index, surface)? {
            indices.present_family = Some(index);
        }

        if indices.is_complete() {
            break;
        }
    }

    Ok(indices)
}

/// Outcome of checking one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suitability {
    /// Device can be used
    Suitable(CompleteQueueFamilies),
    /// Graphics or present family missing
    IncompleteQueueFamilies(QueueFamilyIndices),
    /// Queue families fine but extensions missing
    MissingExtensions(Vec<String>),
}

/// Check one candidate against the queue family and extension requirements
pub fn evaluate_device<H: GraphicsHost + ?Sized>(
    host: &H,
    physical_device: vk::PhysicalDevice,
    surface: vk::SurfaceKHR,
    required_extensions: &[String],
) -> VulkanResult<Suitability> {
    let indices = find_queue_families(host, physical_device, surface)?;
    let Some(families) = indices.complete() else {
        return Ok(Suitability::IncompleteQueueFamilies(indices));
    };

    let available = host.device_extensions(physical_device)?;
    let missing: Vec<String> = required_extensions
        .iter()
        .filter(|required| !available.contains(required))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(Suitability::Suitable(families))
    } else {
        Ok(Suitability::MissingExtensions(missing))
    }
}

/// Whether a candidate passes [`evaluate_device`]
pub fn is_suitable<H: GraphicsHost + ?Sized>(
    host: &H,
    physical_device: vk::PhysicalDevice,
    surface: vk::SurfaceKHR,
    required_extensions: &[String],
) -> VulkanResult<bool> {
    Ok(matches!(
        evaluate_device(host, physical_device, surface, required_extensions)?,
        Suitability::Suitable(_)
    ))
}

/// The chosen physical device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDevice {
    /// Physical device handle (not owned)
    pub physical_device: vk::PhysicalDevice,
    /// Device name as reported by the driver
    pub name: String,
    /// Queue families found during selection
    pub queue_families: CompleteQueueFamilies,
}

/// Select the first suitable physical device
pub fn select_physical_device<H: GraphicsHost + ?Sized>(
    host: &H,
    instance: vk::Instance,
    surface: vk::SurfaceKHR,
    required_extensions: &[String],
) -> VulkanResult<SelectedDevice> {
    let devices = host
        .enumerate_physical_devices(instance)
        .map_err(|e| e.within(VulkanError::DeviceEnumerationFailed))?;
    if devices.is_empty() {
        return Err(VulkanError::NoAcceleratorsFound);
    }

    log::debug!("Evaluating {} physical device(s)", devices.len());

    for physical_device in devices {
        let name = host.physical_device_name(physical_device);

        match evaluate_device(host, physical_device, surface, required_extensions) {
            Ok(Suitability::Suitable(queue_families)) => {
                log::info!(
                    "Selected GPU: {} (graphics family {}, present family {})",
                    name,
                    queue_families.graphics_family,
                    queue_families.present_family
                );
                return Ok(SelectedDevice {
                    physical_device,
                    name,
                    queue_families,
                });
            }
            Ok(Suitability::IncompleteQueueFamilies(indices)) => {
                log::debug!("Skipping {name}: incomplete queue families {indices:?}");
            }
            Ok(Suitability::MissingExtensions(missing)) => {
                log::debug!("Skipping {name}: missing device extensions {}", missing.join(", "));
            }
            Err(e) => {
                log::warn!("Skipping {name}: {e}");
            }
        }
    }

    Err(VulkanError::NoSuitableAccelerator)
}
