//! Vulkan bootstrap errors

use ash::vk;
use thiserror::Error;

/// Failures of the Vulkan startup pipeline
///
/// Every variant aborts startup. [`VulkanError::stage`] names the pipeline
/// stage for the single message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VulkanError {
    /// The Vulkan loader library could not be loaded
    #[error("Vulkan loader unavailable: {0}")]
    LoaderUnavailable(String),

    /// A requested instance layer is not installed on this host
    #[error("Requested layer not available: {layer}")]
    LayerUnavailable {
        /// First layer found missing
        layer: String,
    },

    /// `vkCreateInstance` reported failure
    #[error("Failed to create Vulkan instance: {0:?}")]
    ContextCreationFailed(vk::Result),

    /// The debug messenger entry points could not be resolved
    #[error("Debug utils entry points not available on this instance")]
    DiagnosticsUnavailable,

    /// The debug messenger entry point exists but creation failed
    #[error("Failed to create debug messenger: {0:?}")]
    DiagnosticsAttachFailed(vk::Result),

    /// The windowing toolkit could not create a surface
    #[error("Failed to create window surface: {0}")]
    SurfaceCreationFailed(String),

    /// The instance sees no physical devices at all
    #[error("Failed to find GPUs with Vulkan support")]
    NoAcceleratorsFound,

    /// No physical device met the queue family and extension requirements
    #[error("Failed to find a suitable GPU")]
    NoSuitableAccelerator,

    /// Enumerating the physical devices failed
    #[error("Failed to enumerate physical devices: {0:?}")]
    DeviceEnumerationFailed(vk::Result),

    /// `vkCreateDevice` reported failure
    #[error("Failed to create logical device: {0:?}")]
    LogicalContextCreationFailed(vk::Result),

    /// A layer or extension name contained an interior NUL byte
    #[error("Invalid name for Vulkan: {0:?}")]
    InvalidName(String),

    /// Any other Vulkan API call failed
    #[error("Vulkan API error: {0:?}")]
    Api(vk::Result),
}

impl VulkanError {
    /// Pipeline stage this error aborted
    pub fn stage(&self) -> &'static str {
        match self {
            Self::LoaderUnavailable(_) => "loader",
            Self::LayerUnavailable { .. } | Self::ContextCreationFailed(_) | Self::InvalidName(_) => {
                "instance creation"
            }
            Self::DiagnosticsUnavailable | Self::DiagnosticsAttachFailed(_) => "debug messenger setup",
            Self::SurfaceCreationFailed(_) => "surface creation",
            Self::NoAcceleratorsFound | Self::NoSuitableAccelerator | Self::DeviceEnumerationFailed(_) => {
                "physical device selection"
            }
            Self::LogicalContextCreationFailed(_) => "logical device creation",
            Self::Api(_) => "vulkan call",
        }
    }

    /// Attribute a bare [`VulkanError::Api`] failure to a pipeline stage
    ///
    /// Errors that already name their stage pass through unchanged.
    #[must_use]
    pub fn within(self, stage: fn(vk::Result) -> Self) -> Self {
        match self {
            Self::Api(result) => stage(result),
            other => other,
        }
    }
}

/// Result type for Vulkan operations
pub type VulkanResult<T> = Result<T, VulkanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(
            VulkanError::LayerUnavailable { layer: "x".into() }.stage(),
            "instance creation"
        );
        assert_eq!(VulkanError::NoAcceleratorsFound.stage(), "physical device selection");
        assert_eq!(VulkanError::NoSuitableAccelerator.stage(), "physical device selection");
        assert_eq!(
            VulkanError::LogicalContextCreationFailed(vk::Result::ERROR_INITIALIZATION_FAILED).stage(),
            "logical device creation"
        );
    }

    #[test]
    fn test_within_attributes_api_errors_only() {
        let api = VulkanError::Api(vk::Result::ERROR_OUT_OF_HOST_MEMORY);
        assert_eq!(
            api.within(VulkanError::DeviceEnumerationFailed),
            VulkanError::DeviceEnumerationFailed(vk::Result::ERROR_OUT_OF_HOST_MEMORY)
        );
        assert_eq!(
            VulkanError::NoSuitableAccelerator.within(VulkanError::ContextCreationFailed),
            VulkanError::NoSuitableAccelerator
        );
    }

    #[test]
    fn test_display_mentions_layer() {
        let err = VulkanError::LayerUnavailable { layer: "VK_LAYER_KHRONOS_validation".into() };
        assert!(err.to_string().contains("VK_LAYER_KHRONOS_validation"));
    }
}
