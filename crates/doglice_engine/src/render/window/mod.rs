//! Window management subsystem
//!
//! The bootstrap only needs a handful of things from the windowing toolkit:
//! the instance extensions it requires, a surface for an instance, and the
//! event pump. Those are the [`WindowSystem`] trait; [`GlfwWindow`] is the
//! GLFW implementation.
//!
//! # Module Organization
//!
//! - **`backend`**: the trait the rest of the engine talks to
//! - **`glfw_window`**: GLFW-backed window

pub mod backend;
pub mod glfw_window;

pub use backend::{WindowError, WindowResult, WindowSystem};
pub use glfw_window::GlfwWindow;
