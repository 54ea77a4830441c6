//! Tests for the Vulkan startup sequence that need a fake runtime

pub mod mock_host;
