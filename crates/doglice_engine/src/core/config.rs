//! # Bootstrap Configuration
//!
//! Everything the startup pipeline needs to know before it touches the
//! windowing toolkit or the Vulkan loader: application identity, window
//! geometry, diagnostics mode, and the layer and device extension names.
//!
//! Defaults reproduce the stock DoGlIce setup, so an application only has to
//! load a file (TOML or RON) when it wants to change something.

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};

/// Khronos validation layer requested when diagnostics are enabled
pub const KHRONOS_VALIDATION_LAYER: &str = "VK_LAYER_KHRONOS_validation";

/// Swapchain device extension every selected GPU must support
pub const SWAPCHAIN_EXTENSION: &str = "VK_KHR_swapchain";

/// Semantic version triple, packed with `vk::make_api_version` at instance creation
///
/// Omitted components read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionTriple {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    pub patch: u32,
}

impl VersionTriple {
    /// Create a version triple
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Pack into the Vulkan version encoding (variant 0)
    pub fn to_vk(self) -> u32 {
        ash::vk::make_api_version(0, self.major, self.minor, self.patch)
    }
}

impl std::fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Title bar text
    pub title: String,
    /// Whether the user may resize the window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Doglice_v.0.0.1".to_string(),
            resizable: false,
        }
    }
}

/// # Diagnostics Configuration
///
/// Controls the validation layers and the debug messenger. When `enabled`
/// is `None` the build profile decides: on in debug builds, off in release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Explicit on/off switch, `None` follows `cfg!(debug_assertions)`
    pub enabled: Option<bool>,
    /// Instance layers requested while diagnostics are on
    pub validation_layers: Vec<String>,
}

impl DiagnosticsConfig {
    /// Resolve the effective diagnostics mode
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(cfg!(debug_assertions))
    }

    /// Layers to enable, empty when diagnostics are off
    pub fn active_layers(&self) -> &[String] {
        if self.is_enabled() {
            &self.validation_layers
        } else {
            &[]
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            validation_layers: vec![KHRONOS_VALIDATION_LAYER.to_string()],
        }
    }
}

/// # Bootstrap Configuration
///
/// Top-level settings for bringing up the window, the Vulkan instance and
/// the logical device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Application name reported to the driver
    pub application_name: String,
    /// Application version reported to the driver
    pub application_version: VersionTriple,
    /// Engine name reported to the driver
    pub engine_name: String,
    /// Engine version reported to the driver
    pub engine_version: VersionTriple,
    /// Highest Vulkan API version the application targets
    pub api_version: VersionTriple,
    /// Window settings
    pub window: WindowConfig,
    /// Validation and debug messenger settings
    pub diagnostics: DiagnosticsConfig,
    /// Device extensions a GPU must support to be selected
    pub device_extensions: Vec<String>,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl BootstrapConfig {
    /// Force diagnostics on or off regardless of build profile
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics.enabled = Some(enabled);
        self
    }

    /// Replace the window size
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set the application name and use it as window title
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = name.into();
        self.window.title.clone_from(&self.application_name);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application_name.is_empty() {
            return Err(ConfigError::Invalid("Application name cannot be empty".to_string()));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "Window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        if self.diagnostics.is_enabled() && self.diagnostics.validation_layers.is_empty() {
            return Err(ConfigError::Invalid(
                "Diagnostics enabled but no validation layers listed".to_string(),
            ));
        }

        if self.device_extensions.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "Device extension list cannot be empty (expected at least {SWAPCHAIN_EXTENSION})"
            )));
        }

        Ok(())
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            application_name: "Doglice_v.0.0.1".to_string(),
            application_version: VersionTriple::new(0, 0, 1),
            engine_name: "DoGlIce Engine".to_string(),
            engine_version: VersionTriple::new(0, 0, 1),
            api_version: VersionTriple::new(1, 3, 0),
            window: WindowConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
            device_extensions: vec![SWAPCHAIN_EXTENSION.to_string()],
            log_level: "info".to_string(),
        }
    }
}

impl Config for BootstrapConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_setup() {
        let config = BootstrapConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.diagnostics.validation_layers, vec![KHRONOS_VALIDATION_LAYER]);
        assert_eq!(config.device_extensions, vec![SWAPCHAIN_EXTENSION]);
        assert_eq!(config.api_version.to_vk(), ash::vk::API_VERSION_1_3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_diagnostics_toggle() {
        let off = BootstrapConfig::default().with_diagnostics(false);
        assert!(!off.diagnostics.is_enabled());
        assert!(off.diagnostics.active_layers().is_empty());

        let on = BootstrapConfig::default().with_diagnostics(true);
        assert!(on.diagnostics.is_enabled());
        assert_eq!(on.diagnostics.active_layers().len(), 1);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(BootstrapConfig::default().with_window_size(0, 600).validate().is_err());
        assert!(BootstrapConfig::default().with_application_name("").validate().is_err());

        let mut no_layers = BootstrapConfig::default().with_diagnostics(true);
        no_layers.diagnostics.validation_layers.clear();
        assert!(no_layers.validate().is_err());

        // Without diagnostics the empty layer list is irrelevant
        no_layers.diagnostics.enabled = Some(false);
        assert!(no_layers.validate().is_ok());

        let mut no_extensions = BootstrapConfig::default();
        no_extensions.device_extensions.clear();
        assert!(no_extensions.validate().is_err());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: BootstrapConfig = toml::from_str(
            r#"
            application_name = "Viewer"

            [window]
            width = 1024
            height = 768
            title = "Viewer"
            resizable = true
            "#,
        )
        .unwrap();

        assert_eq!(config.application_name, "Viewer");
        assert_eq!(config.window.width, 1024);
        assert!(config.window.resizable);
        assert_eq!(config.engine_name, "DoGlIce Engine");
        assert_eq!(config.device_extensions, vec![SWAPCHAIN_EXTENSION]);
    }

    #[test]
    fn test_partial_nested_sections_fall_back_to_defaults() {
        let window_only: BootstrapConfig = toml::from_str("[window]\nwidth = 1024\n").unwrap();
        assert_eq!(window_only.window.width, 1024);
        assert_eq!(window_only.window.height, 600);
        assert_eq!(window_only.window.title, "Doglice_v.0.0.1");
        assert!(!window_only.window.resizable);

        let diagnostics_on: BootstrapConfig = toml::from_str("[diagnostics]\nenabled = true\n").unwrap();
        assert!(diagnostics_on.diagnostics.is_enabled());
        assert_eq!(diagnostics_on.diagnostics.validation_layers, vec![KHRONOS_VALIDATION_LAYER]);
        assert!(diagnostics_on.validate().is_ok());

        let api: BootstrapConfig = toml::from_str("[api_version]\nmajor = 1\nminor = 2\n").unwrap();
        assert_eq!(api.api_version, VersionTriple::new(1, 2, 0));
    }

    #[test]
    fn test_ron_round_trip() {
        let config = BootstrapConfig::default().with_diagnostics(true);
        let text = ron::ser::to_string(&config).unwrap();
        let parsed: BootstrapConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
