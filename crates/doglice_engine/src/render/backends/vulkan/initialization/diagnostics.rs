//! Debug messenger bridge
//!
//! The debug utils entry points are optional runtime capabilities, so both
//! attach and detach resolve them through the host at call time. A missing
//! create entry point is an error; a missing destroy entry point is ignored,
//! since cleanup must never fail.

use std::ffi::{c_void, CStr};

use ash::vk;

use crate::render::backends::vulkan::error::{VulkanError, VulkanResult};
use crate::render::backends::vulkan::host::GraphicsHost;

/// Signature of the user callback handed to the runtime
pub type DiagnosticsCallback = unsafe extern "system" fn(
    vk::DebugUtilsMessageSeverityFlagsEXT,
    vk::DebugUtilsMessageTypeFlagsEXT,
    *const vk::DebugUtilsMessengerCallbackDataEXT,
    *mut c_void,
) -> vk::Bool32;

/// What the debug messenger listens for and where it reports
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticsDescriptor {
    /// Severities forwarded to the callback
    pub severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    /// Message categories forwarded to the callback
    pub categories: vk::DebugUtilsMessageTypeFlagsEXT,
    /// Callback invoked by the runtime
    pub callback: DiagnosticsCallback,
}

impl DiagnosticsDescriptor {
    /// Create a descriptor with explicit masks
    pub fn new(
        severity: vk::DebugUtilsMessageSeverityFlagsEXT,
        categories: vk::DebugUtilsMessageTypeFlagsEXT,
        callback: DiagnosticsCallback,
    ) -> Self {
        Self {
            severity,
            categories,
            callback,
        }
    }

    /// Build the raw create info, also used when chaining into instance creation
    pub fn create_info(&self) -> vk::DebugUtilsMessengerCreateInfoEXT {
        vk::DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(self.severity)
            .message_type(self.categories)
            .pfn_user_callback(Some(self.callback))
            .build()
    }
}

impl Default for DiagnosticsDescriptor {
    /// Warnings and errors of every category, reported through `log`
    fn default() -> Self {
        Self::new(
            vk::DebugUtilsMessageSeverityFlagsEXT::WARNING | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
            vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
            debug_callback,
        )
    }
}

/// An attached debug messenger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticsChannel {
    /// Instance the messenger belongs to
    pub instance: vk::Instance,
    /// Messenger handle
    pub messenger: vk::DebugUtilsMessengerEXT,
}

/// Create a debug messenger on `instance`
pub fn attach<H: GraphicsHost + ?Sized>(
    host: &H,
    instance: vk::Instance,
    descriptor: &DiagnosticsDescriptor,
) -> VulkanResult<DiagnosticsChannel> {
    let create = host
        .resolve_create_messenger(instance)
        .ok_or(VulkanError::DiagnosticsUnavailable)?;

    let messenger = create(descriptor).map_err(VulkanError::DiagnosticsAttachFailed)?;
    log::info!("Debug messenger attached");

    Ok(DiagnosticsChannel { instance, messenger })
}

/// Destroy a debug messenger; silently does nothing if the entry point is gone
pub fn detach<H: GraphicsHost + ?Sized>(host: &H, channel: DiagnosticsChannel) {
    match host.resolve_destroy_messenger(channel.instance) {
        Some(destroy) => {
            destroy(channel.messenger);
            log::debug!("Debug messenger detached");
        }
        None => log::debug!("vkDestroyDebugUtilsMessengerEXT unavailable, skipping messenger teardown"),
    }
}

fn severity_level(severity: vk::DebugUtilsMessageSeverityFlagsEXT) -> log::Level {
    if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR) {
        log::Level::Error
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING) {
        log::Level::Warn
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::INFO) {
        log::Level::Info
    } else {
        log::Level::Debug
    }
}

/// Forward one runtime message to the log sink
pub fn report(
    severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    categories: vk::DebugUtilsMessageTypeFlagsEXT,
    message: &str,
) {
    log::log!(severity_level(severity), "[Vulkan] {:?} - {}", categories, message);
}

/// Debug callback for validation layers
///
/// Only reports; always returns `VK_FALSE` so the triggering call proceeds.
pub unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _user_data: *mut c_void,
) -> vk::Bool32 {
    let message = if callback_data.is_null() || (*callback_data).p_message.is_null() {
        std::borrow::Cow::Borrowed("<no message>")
    } else {
        CStr::from_ptr((*callback_data).p_message).to_string_lossy()
    };

    report(message_severity, message_type, &message);

    vk::FALSE
}
