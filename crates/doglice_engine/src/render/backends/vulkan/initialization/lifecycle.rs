//! Startup sequence and ordered teardown
//!
//! Construction order is instance, debug messenger, surface, physical device
//! selection, logical device. Every created handle is pushed on a
//! [`ResourceStack`]; dropping the stack releases them in exact reverse order.
//! A failing stage returns early and drops the partial stack, so whatever was
//! created so far is still released exactly once.

use ash::vk;

use super::context::create_context;
use super::device_selection::{select_physical_device, SelectedDevice};
use super::diagnostics::{self, DiagnosticsChannel, DiagnosticsDescriptor};
use super::logical_device::{create_logical_device, LogicalDevice};
use super::surface;
use crate::core::config::BootstrapConfig;
use crate::render::backends::vulkan::error::{VulkanError, VulkanResult};
use crate::render::backends::vulkan::host::GraphicsHost;
use crate::render::window::WindowSystem;

/// A handle whose release the stack is responsible for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Vulkan instance
    Instance(vk::Instance),
    /// Debug messenger
    Diagnostics(DiagnosticsChannel),
    /// Window surface, destroyed through its instance
    Surface {
        /// Owning instance
        instance: vk::Instance,
        /// Surface handle
        surface: vk::SurfaceKHR,
    },
    /// Logical device
    Device(vk::Device),
}

/// Owns the host and every handle created through it
pub struct ResourceStack<H: GraphicsHost> {
    host: H,
    resources: Vec<Resource>,
}

impl<H: GraphicsHost> ResourceStack<H> {
    /// Empty stack around `host`
    pub fn new(host: H) -> Self {
        Self {
            host,
            resources: Vec::new(),
        }
    }

    /// Shared access to the host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Record a freshly created handle
    pub fn push(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Handles still held, in creation order
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Release everything, newest first
    pub fn release_all(&mut self) {
        while let Some(resource) = self.resources.pop() {
            log::debug!("Releasing {resource:?}");
            match resource {
                Resource::Device(device) => self.host.destroy_device(device),
                Resource::Surface { instance, surface } => self.host.destroy_surface(instance, surface),
                Resource::Diagnostics(channel) => diagnostics::detach(&self.host, channel),
                Resource::Instance(instance) => self.host.destroy_instance(instance),
            }
        }
    }
}

impl<H: GraphicsHost> Drop for ResourceStack<H> {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// Plain copies of the live handles, valid while the owning context lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicsHandles {
    /// Vulkan instance
    pub instance: vk::Instance,
    /// Window surface
    pub surface: vk::SurfaceKHR,
    /// Selected physical device
    pub physical_device: vk::PhysicalDevice,
    /// Logical device
    pub device: vk::Device,
    /// Graphics queue
    pub graphics_queue: vk::Queue,
    /// Present queue
    pub present_queue: vk::Queue,
    /// Graphics queue family index
    pub graphics_family: u32,
    /// Present queue family index
    pub present_family: u32,
}

/// Everything the startup sequence built
pub struct VulkanContext<H: GraphicsHost> {
    resources: ResourceStack<H>,
    instance: vk::Instance,
    diagnostics: Option<DiagnosticsChannel>,
    surface: vk::SurfaceKHR,
    physical_device: SelectedDevice,
    device: LogicalDevice,
}

impl<H: GraphicsHost> VulkanContext<H> {
    /// Run the startup sequence against `window`
    ///
    /// Any failure aborts the sequence; handles created before the failing
    /// stage are released before the error is returned.
    pub fn new<W: WindowSystem + ?Sized>(host: H, window: &mut W, config: &BootstrapConfig) -> VulkanResult<Self> {
        let mut resources = ResourceStack::new(host);

        let descriptor = config.diagnostics.is_enabled().then(DiagnosticsDescriptor::default);
        let layers = config.diagnostics.active_layers();

        let platform_extensions = window.required_instance_extensions().map_err(|e| {
            log::error!("Windowing toolkit cannot report instance extensions: {e}");
            VulkanError::ContextCreationFailed(vk::Result::ERROR_EXTENSION_NOT_PRESENT)
        })?;

        let instance = create_context(resources.host_mut(), config, &platform_extensions, descriptor.as_ref())?;
        resources.push(Resource::Instance(instance));

        let diagnostics = match descriptor {
            Some(descriptor) => {
                let channel = diagnostics::attach(resources.host(), instance, &descriptor)?;
                resources.push(Resource::Diagnostics(channel));
                Some(channel)
            }
            None => None,
        };

        let surface = surface::bind(window, instance)?;
        resources.push(Resource::Surface { instance, surface });

        let physical_device = select_physical_device(resources.host(), instance, surface, &config.device_extensions)?;

        let device = create_logical_device(
            resources.host_mut(),
            physical_device.physical_device,
            physical_device.queue_families,
            &config.device_extensions,
            layers,
        )?;
        resources.push(Resource::Device(device.device));

        log::info!("Vulkan initialized on {}", physical_device.name);

        Ok(Self {
            resources,
            instance,
            diagnostics,
            surface,
            physical_device,
            device,
        })
    }

    /// Vulkan instance handle
    pub fn instance(&self) -> vk::Instance {
        self.instance
    }

    /// Debug messenger, present only in diagnostics mode
    pub fn diagnostics(&self) -> Option<DiagnosticsChannel> {
        self.diagnostics
    }

    /// Window surface handle
    pub fn surface(&self) -> vk::SurfaceKHR {
        self.surface
    }

    /// The selected physical device
    pub fn physical_device(&self) -> &SelectedDevice {
        &self.physical_device
    }

    /// The logical device and its queues
    pub fn device(&self) -> &LogicalDevice {
        &self.device
    }

    /// The host runtime the context was built on
    pub fn host(&self) -> &H {
        self.resources.host()
    }

    /// Copies of every live handle
    pub fn handles(&self) -> GraphicsHandles {
        GraphicsHandles {
            instance: self.instance,
            surface: self.surface,
            physical_device: self.physical_device.physical_device,
            device: self.device.device,
            graphics_queue: self.device.graphics_queue,
            present_queue: self.device.present_queue,
            graphics_family: self.device.queue_families.graphics_family,
            present_family: self.device.queue_families.present_family,
        }
    }

    /// Release all handles now instead of at drop
    pub fn shutdown(mut self) {
        log::info!("Shutting down Vulkan");
        self.resources.release_all();
    }
}
