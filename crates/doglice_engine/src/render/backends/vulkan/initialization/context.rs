//! Vulkan instance creation
//!
//! Builds the root context from the bootstrap configuration and the
//! extensions the windowing toolkit needs. With diagnostics on, the layers
//! are checked first and the debug messenger descriptor is chained into
//! `vkCreateInstance` itself, so problems during instance creation are
//! reported too.

use ash::vk;

use super::capabilities::CapabilityProber;
use super::diagnostics::DiagnosticsDescriptor;
use crate::core::config::BootstrapConfig;
use crate::render::backends::vulkan::error::{VulkanError, VulkanResult};
use crate::render::backends::vulkan::host::{GraphicsHost, InstanceRequest};

/// Instance extension carrying the debug messenger
pub const DEBUG_UTILS_EXTENSION: &str = "VK_EXT_debug_utils";

/// Platform extensions plus, in diagnostics mode, the debug utils extension
pub fn required_extensions(platform_extensions: &[String], diagnostics: bool) -> Vec<String> {
    let mut extensions = platform_extensions.to_vec();
    if diagnostics {
        extensions.push(DEBUG_UTILS_EXTENSION.to_string());
    }
    extensions
}

/// Create the Vulkan instance
///
/// `diagnostics` switches diagnostics mode on: validation layers from the
/// config are required (missing ones fail with `LayerUnavailable` before any
/// creation call) and the descriptor travels with the creation request.
pub fn create_context<H: GraphicsHost + ?Sized>(
    host: &mut H,
    config: &BootstrapConfig,
    platform_extensions: &[String],
    diagnostics: Option<&DiagnosticsDescriptor>,
) -> VulkanResult<vk::Instance> {
    let extensions = required_extensions(platform_extensions, diagnostics.is_some());

    let layers: &[String] = if diagnostics.is_some() {
        let capabilities =
            CapabilityProber::probe(&*host).map_err(|e| e.within(VulkanError::ContextCreationFailed))?;
        let layers = &config.diagnostics.validation_layers;
        if let Some(layer) = capabilities.missing_layer(layers) {
            log::error!("Validation layer {layer} requested, but not available");
            return Err(VulkanError::LayerUnavailable { layer: layer.to_string() });
        }
        warn_missing_extensions(&capabilities, &extensions);
        layers
    } else {
        // Layers are not consulted without diagnostics; the extension check only warns
        match CapabilityProber::probe_extensions(&*host) {
            Ok(capabilities) => warn_missing_extensions(&capabilities, &extensions),
            Err(e) => log::warn!("Could not enumerate instance extensions: {e}"),
        }
        &[]
    };

    let request = InstanceRequest {
        application_name: &config.application_name,
        application_version: config.application_version.to_vk(),
        engine_name: &config.engine_name,
        engine_version: config.engine_version.to_vk(),
        api_version: config.api_version.to_vk(),
        extensions: &extensions,
        layers,
        diagnostics,
    };

    let instance = host.create_instance(&request)?;
    log::info!(
        "Vulkan instance created (api {}, {} extensions, {} layers)",
        config.api_version,
        extensions.len(),
        layers.len()
    );

    Ok(instance)
}

fn warn_missing_extensions(capabilities: &CapabilityProber, extensions: &[String]) {
    let missing = capabilities.missing_extensions(extensions);
    if !missing.is_empty() {
        log::warn!("Instance extensions not reported by the host: {}", missing.join(", "));
    }
}
