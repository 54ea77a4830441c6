//! Recording host and window used by the pipeline tests

use std::cell::RefCell;
use std::rc::Rc;

use ash::vk::{self, Handle};

use crate::render::backends::vulkan::error::{VulkanError, VulkanResult};
use crate::render::backends::vulkan::host::{
    CreateMessengerFn, DestroyMessengerFn, DeviceRequest, GraphicsHost, InstanceRequest, QueueRequest,
};
use crate::render::backends::vulkan::initialization::diagnostics::DiagnosticsDescriptor;
use crate::render::window::{WindowError, WindowResult, WindowSystem};

pub const INSTANCE: u64 = 0x1000;
pub const MESSENGER: u64 = 0x2000;
pub const SURFACE: u64 = 0x3000;
pub const DEVICE: u64 = 0x4000;

/// Every call the pipeline made, in order
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    EnumerateLayers,
    EnumerateInstanceExtensions,
    CreateInstance {
        extensions: Vec<String>,
        layers: Vec<String>,
        chained_severity: Option<vk::DebugUtilsMessageSeverityFlagsEXT>,
    },
    DestroyInstance(vk::Instance),
    CreateMessenger(vk::DebugUtilsMessageSeverityFlagsEXT),
    DestroyMessenger(vk::DebugUtilsMessengerEXT),
    DestroySurface(vk::SurfaceKHR),
    EnumeratePhysicalDevices,
    QueueFamilies(vk::PhysicalDevice),
    PresentSupport(vk::PhysicalDevice, u32),
    DeviceExtensions(vk::PhysicalDevice),
    CreateDevice {
        physical_device: vk::PhysicalDevice,
        queues: Vec<QueueRequest>,
        extensions: Vec<String>,
        layers: Vec<String>,
    },
    DestroyDevice(vk::Device),
    DeviceQueue(vk::Device, u32, u32),
}

pub type CallLog = Rc<RefCell<Vec<HostCall>>>;

/// One queue family of a fake GPU
#[derive(Debug, Clone, Copy)]
pub struct MockFamily {
    pub graphics: bool,
    pub present: bool,
}

pub const GRAPHICS: MockFamily = MockFamily {
    graphics: true,
    present: false,
};
pub const PRESENT: MockFamily = MockFamily {
    graphics: false,
    present: true,
};
pub const BOTH: MockFamily = MockFamily {
    graphics: true,
    present: true,
};
pub const COMPUTE: MockFamily = MockFamily {
    graphics: false,
    present: false,
};

#[derive(Debug, Clone)]
pub struct MockGpu {
    pub name: String,
    pub families: Vec<MockFamily>,
    pub extensions: Vec<String>,
    pub present_query_result: Option<vk::Result>,
}

impl MockGpu {
    pub fn new(name: &str, families: &[MockFamily]) -> Self {
        Self {
            name: name.to_string(),
            families: families.to_vec(),
            extensions: vec!["VK_KHR_swapchain".to_string()],
            present_query_result: None,
        }
    }

    pub fn without_extensions(mut self) -> Self {
        self.extensions.clear();
        self
    }

    /// Every surface support query on this GPU fails with `result`
    pub fn failing_present_query(mut self, result: vk::Result) -> Self {
        self.present_query_result = Some(result);
        self
    }
}

/// Handle the mock assigns to GPU number `index`
pub fn gpu_handle(index: usize) -> vk::PhysicalDevice {
    vk::PhysicalDevice::from_raw(index as u64 + 1)
}

/// Queue handle the mock returns for a family/index pair
pub fn queue_handle(family: u32, index: u32) -> vk::Queue {
    vk::Queue::from_raw(0x5000 + u64::from(family) * 0x10 + u64::from(index))
}

pub struct MockHost {
    pub layers: Vec<String>,
    pub instance_extensions: Vec<String>,
    pub gpus: Vec<MockGpu>,
    pub create_messenger_available: bool,
    pub destroy_messenger_available: bool,
    pub layers_result: Option<vk::Result>,
    pub instance_result: Option<vk::Result>,
    pub physical_devices_result: Option<vk::Result>,
    pub device_result: Option<vk::Result>,
    pub queue_result: Option<vk::Result>,
    calls: CallLog,
}

impl MockHost {
    /// Host with the Khronos validation layer, debug utils, and the given GPUs
    pub fn new(gpus: Vec<MockGpu>) -> Self {
        Self {
            layers: vec!["VK_LAYER_KHRONOS_validation".to_string()],
            instance_extensions: vec![
                "VK_KHR_surface".to_string(),
                "VK_KHR_xcb_surface".to_string(),
                "VK_EXT_debug_utils".to_string(),
            ],
            gpus,
            create_messenger_available: true,
            destroy_messenger_available: true,
            layers_result: None,
            instance_result: None,
            physical_devices_result: None,
            device_result: None,
            queue_result: None,
            calls: CallLog::default(),
        }
    }

    /// Shared view of the call log that survives the host being dropped
    pub fn log(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    fn record(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }

    fn gpu(&self, physical_device: vk::PhysicalDevice) -> VulkanResult<&MockGpu> {
        usize::try_from(physical_device.as_raw())
            .ok()
            .and_then(|raw| raw.checked_sub(1))
            .and_then(|index| self.gpus.get(index))
            .ok_or(VulkanError::Api(vk::Result::ERROR_DEVICE_LOST))
    }
}

impl GraphicsHost for MockHost {
    fn enumerate_layers(&self) -> VulkanResult<Vec<String>> {
        self.record(HostCall::EnumerateLayers);
        match self.layers_result {
            Some(result) => Err(VulkanError::Api(result)),
            None => Ok(self.layers.clone()),
        }
    }

    fn enumerate_instance_extensions(&self) -> VulkanResult<Vec<String>> {
        self.record(HostCall::EnumerateInstanceExtensions);
        Ok(self.instance_extensions.clone())
    }

    fn create_instance(&mut self, request: &InstanceRequest<'_>) -> VulkanResult<vk::Instance> {
        self.record(HostCall::CreateInstance {
            extensions: request.extensions.to_vec(),
            layers: request.layers.to_vec(),
            chained_severity: request.diagnostics.map(|descriptor| descriptor.severity),
        });

        match self.instance_result {
            Some(result) => Err(VulkanError::ContextCreationFailed(result)),
            None => Ok(vk::Instance::from_raw(INSTANCE)),
        }
    }

    fn destroy_instance(&mut self, instance: vk::Instance) {
        self.record(HostCall::DestroyInstance(instance));
    }

    fn resolve_create_messenger(&self, _instance: vk::Instance) -> Option<CreateMessengerFn<'_>> {
        if !self.create_messenger_available {
            return None;
        }
        let calls = Rc::clone(&self.calls);
        Some(Box::new(move |descriptor: &DiagnosticsDescriptor| {
            calls.borrow_mut().push(HostCall::CreateMessenger(descriptor.severity));
            Ok(vk::DebugUtilsMessengerEXT::from_raw(MESSENGER))
        }))
    }

    fn resolve_destroy_messenger(&self, _instance: vk::Instance) -> Option<DestroyMessengerFn<'_>> {
        if !self.destroy_messenger_available {
            return None;
        }
        let calls = Rc::clone(&self.calls);
        Some(Box::new(move |messenger: vk::DebugUtilsMessengerEXT| {
            calls.borrow_mut().push(HostCall::DestroyMessenger(messenger));
        }))
    }

    fn destroy_surface(&mut self, _instance: vk::Instance, surface: vk::SurfaceKHR) {
        self.record(HostCall::DestroySurface(surface));
    }

    fn enumerate_physical_devices(&self, _instance: vk::Instance) -> VulkanResult<Vec<vk::PhysicalDevice>> {
        self.record(HostCall::EnumeratePhysicalDevices);
        match self.physical_devices_result {
            Some(result) => Err(VulkanError::Api(result)),
            None => Ok((0..self.gpus.len()).map(gpu_handle).collect()),
        }
    }

    fn physical_device_name(&self, physical_device: vk::PhysicalDevice) -> String {
        self.gpu(physical_device)
            .map_or_else(|_| "<unknown>".to_string(), |gpu| gpu.name.clone())
    }

    fn queue_family_properties(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> VulkanResult<Vec<vk::QueueFamilyProperties>> {
        self.record(HostCall::QueueFamilies(physical_device));
        Ok(self
            .gpu(physical_device)?
            .families
            .iter()
            .map(|family| vk::QueueFamilyProperties {
                queue_flags: if family.graphics {
                    vk::QueueFlags::GRAPHICS | vk::QueueFlags::TRANSFER
                } else {
                    vk::QueueFlags::COMPUTE
                },
                queue_count: 1,
                ..Default::default()
            })
            .collect())
    }

    fn present_support(
        &self,
        physical_device: vk::PhysicalDevice,
        family_index: u32,
        _surface: vk::SurfaceKHR,
    ) -> VulkanResult<bool> {
        self.record(HostCall::PresentSupport(physical_device, family_index));
        let gpu = self.gpu(physical_device)?;
        if let Some(result) = gpu.present_query_result {
            return Err(VulkanError::Api(result));
        }
        Ok(gpu
            .families
            .get(family_index as usize)
            .is_some_and(|family| family.present))
    }

    fn device_extensions(&self, physical_device: vk::PhysicalDevice) -> VulkanResult<Vec<String>> {
        self.record(HostCall::DeviceExtensions(physical_device));
        Ok(self.gpu(physical_device)?.extensions.clone())
    }

    fn create_device(
        &mut self,
        physical_device: vk::PhysicalDevice,
        request: &DeviceRequest<'_>,
    ) -> VulkanResult<vk::Device> {
        self.record(HostCall::CreateDevice {
            physical_device,
            queues: request.queues.to_vec(),
            extensions: request.extensions.to_vec(),
            layers: request.layers.to_vec(),
        });

        match self.device_result {
            Some(result) => Err(VulkanError::LogicalContextCreationFailed(result)),
            None => Ok(vk::Device::from_raw(DEVICE)),
        }
    }

    fn destroy_device(&mut self, device: vk::Device) {
        self.record(HostCall::DestroyDevice(device));
    }

    fn device_queue(&self, device: vk::Device, family_index: u32, queue_index: u32) -> VulkanResult<vk::Queue> {
        self.record(HostCall::DeviceQueue(device, family_index, queue_index));
        match self.queue_result {
            Some(result) => Err(VulkanError::Api(result)),
            None => Ok(queue_handle(family_index, queue_index)),
        }
    }
}

/// Window that closes itself after a fixed number of polls
pub struct MockWindow {
    pub extensions: Vec<String>,
    pub surface_result: Option<vk::Result>,
    pub close_after_polls: u32,
    pub polls: u32,
    pub surfaces_created: u32,
}

impl MockWindow {
    pub fn new() -> Self {
        Self {
            extensions: vec!["VK_KHR_surface".to_string(), "VK_KHR_xcb_surface".to_string()],
            surface_result: None,
            close_after_polls: 0,
            polls: 0,
            surfaces_created: 0,
        }
    }
}

impl WindowSystem for MockWindow {
    fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        Ok(self.extensions.clone())
    }

    fn create_surface(&mut self, _instance: vk::Instance) -> WindowResult<vk::SurfaceKHR> {
        match self.surface_result {
            Some(result) => Err(WindowError::SurfaceCreationFailed(result)),
            None => {
                self.surfaces_created += 1;
                Ok(vk::SurfaceKHR::from_raw(SURFACE))
            }
        }
    }

    fn should_close(&self) -> bool {
        self.polls >= self.close_after_polls
    }

    fn poll_events(&mut self) {
        self.polls += 1;
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        (800, 600)
    }
}
