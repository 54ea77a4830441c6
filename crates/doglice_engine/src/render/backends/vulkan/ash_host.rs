//! ash-backed host runtime
//!
//! Loads the system Vulkan loader and keeps the function tables for the one
//! instance and the one logical device the bootstrap creates. Destruction is
//! only ever requested by the lifecycle stack, which guarantees ordering.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use ash::extensions::khr;
use ash::{vk, Device, Entry, Instance};

use super::error::{VulkanError, VulkanResult};
use super::host::{CreateMessengerFn, DestroyMessengerFn, DeviceRequest, GraphicsHost, InstanceRequest};
use super::initialization::diagnostics::DiagnosticsDescriptor;

const CREATE_MESSENGER_FN: &[u8] = b"vkCreateDebugUtilsMessengerEXT\0";
const DESTROY_MESSENGER_FN: &[u8] = b"vkDestroyDebugUtilsMessengerEXT\0";

/// Vulkan runtime reached through ash
pub struct AshHost {
    entry: Entry,
    instance: Option<Instance>,
    surface_loader: Option<khr::Surface>,
    device: Option<Device>,
}

impl AshHost {
    /// Load the Vulkan loader library
    pub fn new() -> VulkanResult<Self> {
        let entry = unsafe { Entry::load() }.map_err(|e| VulkanError::LoaderUnavailable(e.to_string()))?;

        Ok(Self {
            entry,
            instance: None,
            surface_loader: None,
            device: None,
        })
    }

    fn instance(&self) -> VulkanResult<&Instance> {
        self.instance
            .as_ref()
            .ok_or(VulkanError::Api(vk::Result::ERROR_INITIALIZATION_FAILED))
    }

    fn surface_loader(&self) -> VulkanResult<&khr::Surface> {
        self.surface_loader
            .as_ref()
            .ok_or(VulkanError::Api(vk::Result::ERROR_INITIALIZATION_FAILED))
    }

    fn lookup(&self, instance: vk::Instance, name: &[u8]) -> vk::PFN_vkVoidFunction {
        unsafe { self.entry.get_instance_proc_addr(instance, name.as_ptr().cast::<c_char>()) }
    }
}

fn to_cstrings(names: &[String]) -> VulkanResult<Vec<CString>> {
    names
        .iter()
        .map(|name| CString::new(name.as_str()).map_err(|_| VulkanError::InvalidName(name.clone())))
        .collect()
}

fn as_ptrs(names: &[CString]) -> Vec<*const c_char> {
    names.iter().map(|name| name.as_ptr()).collect()
}

fn fixed_name(raw: &[c_char]) -> String {
    unsafe { CStr::from_ptr(raw.as_ptr()) }.to_string_lossy().into_owned()
}

impl GraphicsHost for AshHost {
    fn enumerate_layers(&self) -> VulkanResult<Vec<String>> {
        let layers = unsafe { self.entry.enumerate_instance_layer_properties() }.map_err(VulkanError::Api)?;
        Ok(layers.iter().map(|layer| fixed_name(&layer.layer_name)).collect())
    }

    fn enumerate_instance_extensions(&self) -> VulkanResult<Vec<String>> {
        let extensions =
            unsafe { self.entry.enumerate_instance_extension_properties(None) }.map_err(VulkanError::Api)?;
        Ok(extensions.iter().map(|ext| fixed_name(&ext.extension_name)).collect())
    }

    fn create_instance(&mut self, request: &InstanceRequest<'_>) -> VulkanResult<vk::Instance> {
        let app_name = CString::new(request.application_name)
            .map_err(|_| VulkanError::InvalidName(request.application_name.to_string()))?;
        let engine_name = CString::new(request.engine_name)
            .map_err(|_| VulkanError::InvalidName(request.engine_name.to_string()))?;

        let app_info = vk::ApplicationInfo::builder()
            .application_name(&app_name)
            .application_version(request.application_version)
            .engine_name(&engine_name)
            .engine_version(request.engine_version)
            .api_version(request.api_version);

        let extensions = to_cstrings(request.extensions)?;
        let extension_ptrs = as_ptrs(&extensions);
        let layers = to_cstrings(request.layers)?;
        let layer_ptrs = as_ptrs(&layers);

        // Chained so that instance creation itself is covered by the messenger
        let mut debug_info = request.diagnostics.map(DiagnosticsDescriptor::create_info);

        let mut create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extension_ptrs)
            .enabled_layer_names(&layer_ptrs);

        if let Some(debug_info) = debug_info.as_mut() {
            create_info = create_info.push_next(debug_info);
        }

        let instance = unsafe {
            self.entry
                .create_instance(&create_info, None)
                .map_err(VulkanError::ContextCreationFailed)?
        };

        let handle = instance.handle();
        self.surface_loader = Some(khr::Surface::new(&self.entry, &instance));
        self.instance = Some(instance);

        Ok(handle)
    }

    fn destroy_instance(&mut self, instance: vk::Instance) {
        self.surface_loader = None;
        match self.instance.take() {
            Some(loaded) if loaded.handle() == instance => unsafe { loaded.destroy_instance(None) },
            Some(loaded) => {
                log::warn!("Asked to destroy unknown instance {instance:?}");
                self.instance = Some(loaded);
            }
            None => log::warn!("Asked to destroy instance {instance:?} but none is loaded"),
        }
    }

    fn resolve_create_messenger(&self, instance: vk::Instance) -> Option<CreateMessengerFn<'_>> {
        let raw = self.lookup(instance, CREATE_MESSENGER_FN)?;
        let create: vk::PFN_vkCreateDebugUtilsMessengerEXT = unsafe { std::mem::transmute(raw) };

        Some(Box::new(move |descriptor: &DiagnosticsDescriptor| {
            let info = descriptor.create_info();
            let mut messenger = vk::DebugUtilsMessengerEXT::null();
            let result = unsafe { create(instance, &info, std::ptr::null(), &mut messenger) };
            if result == vk::Result::SUCCESS {
                Ok(messenger)
            } else {
                Err(result)
            }
        }))
    }

    fn resolve_destroy_messenger(&self, instance: vk::Instance) -> Option<DestroyMessengerFn<'_>> {
        let raw = self.lookup(instance, DESTROY_MESSENGER_FN)?;
        let destroy: vk::PFN_vkDestroyDebugUtilsMessengerEXT = unsafe { std::mem::transmute(raw) };

        Some(Box::new(move |messenger: vk::DebugUtilsMessengerEXT| unsafe {
            destroy(instance, messenger, std::ptr::null());
        }))
    }

    fn destroy_surface(&mut self, _instance: vk::Instance, surface: vk::SurfaceKHR) {
        match self.surface_loader.as_ref() {
            Some(loader) => unsafe { loader.destroy_surface(surface, None) },
            None => log::warn!("Surface {surface:?} outlived its instance"),
        }
    }

    fn enumerate_physical_devices(&self, _instance: vk::Instance) -> VulkanResult<Vec<vk::PhysicalDevice>> {
        unsafe { self.instance()?.enumerate_physical_devices().map_err(VulkanError::Api) }
    }

    fn physical_device_name(&self, physical_device: vk::PhysicalDevice) -> String {
        self.instance().map_or_else(
            |_| format!("{physical_device:?}"),
            |instance| {
                let properties = unsafe { instance.get_physical_device_properties(physical_device) };
                fixed_name(&properties.device_name)
            },
        )
    }

    fn queue_family_properties(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> VulkanResult<Vec<vk::QueueFamilyProperties>> {
        Ok(unsafe { self.instance()?.get_physical_device_queue_family_properties(physical_device) })
    }

    fn present_support(
        &self,
        physical_device: vk::PhysicalDevice,
        family_index: u32,
        surface: vk::SurfaceKHR,
    ) -> VulkanResult<bool> {
        unsafe {
            self.surface_loader()?
                .get_physical_device_surface_support(physical_device, family_index, surface)
                .map_err(VulkanError::Api)
        }
    }

    fn device_extensions(&self, physical_device: vk::PhysicalDevice) -> VulkanResult<Vec<String>> {
        let extensions = unsafe {
            self.instance()?
                .enumerate_device_extension_properties(physical_device)
                .map_err(VulkanError::Api)?
        };
        Ok(extensions.iter().map(|ext| fixed_name(&ext.extension_name)).collect())
    }

    fn create_device(
        &mut self,
        physical_device: vk::PhysicalDevice,
        request: &DeviceRequest<'_>,
    ) -> VulkanResult<vk::Device> {
        let priorities: Vec<[f32; 1]> = request.queues.iter().map(|queue| [queue.priority]).collect();
        let queue_infos: Vec<vk::DeviceQueueCreateInfo> = request
            .queues
            .iter()
            .zip(&priorities)
            .map(|(queue, priority)| {
                vk::DeviceQueueCreateInfo::builder()
                    .queue_family_index(queue.family_index)
                    .queue_priorities(priority)
                    .build()
            })
            .collect();

        let extensions = to_cstrings(request.extensions)?;
        let extension_ptrs = as_ptrs(&extensions);
        let layers = to_cstrings(request.layers)?;
        let layer_ptrs = as_ptrs(&layers);

        let features = vk::PhysicalDeviceFeatures::default();

        #[allow(deprecated)]
        let create_info = vk::DeviceCreateInfo::builder()
            .queue_create_infos(&queue_infos)
            .enabled_extension_names(&extension_ptrs)
            .enabled_layer_names(&layer_ptrs)
            .enabled_features(&features);

        let device = unsafe {
            self.instance()?
                .create_device(physical_device, &create_info, None)
                .map_err(VulkanError::LogicalContextCreationFailed)?
        };

        let handle = device.handle();
        self.device = Some(device);
        Ok(handle)
    }

    fn destroy_device(&mut self, device: vk::Device) {
        match self.device.take() {
            Some(loaded) if loaded.handle() == device => unsafe {
                // Ensure device is idle before destruction
                let _ = loaded.device_wait_idle();
                loaded.destroy_device(None);
            },
            Some(loaded) => {
                log::warn!("Asked to destroy unknown device {device:?}");
                self.device = Some(loaded);
            }
            None => log::warn!("Asked to destroy device {device:?} but none is loaded"),
        }
    }

    fn device_queue(&self, device: vk::Device, family_index: u32, queue_index: u32) -> VulkanResult<vk::Queue> {
        match self.device.as_ref() {
            Some(loaded) if loaded.handle() == device => {
                Ok(unsafe { loaded.get_device_queue(family_index, queue_index) })
            }
            _ => Err(VulkanError::Api(vk::Result::ERROR_DEVICE_LOST)),
        }
    }
}
