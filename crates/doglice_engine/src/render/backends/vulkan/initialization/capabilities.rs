//! Instance layer and extension support queries

use crate::render::backends::vulkan::error::VulkanResult;
use crate::render::backends::vulkan::host::GraphicsHost;

/// Snapshot of what the host offers at instance level
///
/// Each list is enumerated once at construction; queries are exact,
/// case-sensitive name matches.
#[derive(Debug, Clone, Default)]
pub struct CapabilityProber {
    layers: Vec<String>,
    extensions: Vec<String>,
}

impl CapabilityProber {
    /// Enumerate the host's layers and instance extensions
    pub fn probe<H: GraphicsHost + ?Sized>(host: &H) -> VulkanResult<Self> {
        let layers = host.enumerate_layers()?;
        let extensions = host.enumerate_instance_extensions()?;
        log::debug!("Host offers {} instance layers, {} instance extensions", layers.len(), extensions.len());
        Ok(Self { layers, extensions })
    }

    /// Enumerate only the instance extensions, leaving the layer list empty
    pub fn probe_extensions<H: GraphicsHost + ?Sized>(host: &H) -> VulkanResult<Self> {
        let extensions = host.enumerate_instance_extensions()?;
        Ok(Self {
            layers: Vec::new(),
            extensions,
        })
    }

    /// First requested layer the host does not have
    pub fn missing_layer<'a>(&self, requested: &'a [String]) -> Option<&'a str> {
        first_missing(&self.layers, requested)
    }

    /// True iff every requested layer is installed
    pub fn supports_layers(&self, requested: &[String]) -> bool {
        self.missing_layer(requested).is_none()
    }

    /// Requested instance extensions the host does not offer
    pub fn missing_extensions<'a>(&self, requested: &'a [String]) -> Vec<&'a str> {
        requested
            .iter()
            .filter(|name| !self.extensions.contains(name))
            .map(String::as_str)
            .collect()
    }

    /// True iff every requested instance extension is available
    pub fn supports_extensions(&self, requested: &[String]) -> bool {
        self.missing_extensions(requested).is_empty()
    }
}

fn first_missing<'a>(available: &[String], requested: &'a [String]) -> Option<&'a str> {
    requested
        .iter()
        .find(|name| !available.contains(name))
        .map(String::as_str)
}
