//! Core engine implementation
//!
//! [`Engine`] ties the window and the Vulkan context together and runs the
//! event loop. [`launch`] is the whole program: validate the configuration,
//! open the window, bring up Vulkan, loop, and map the outcome to an exit
//! code.

use thiserror::Error;

use crate::application::{AppError, Application, FrameContext};
use crate::config::ConfigError;
use crate::core::config::BootstrapConfig;
use crate::render::{AshHost, GlfwWindow, GraphicsHost, VulkanContext, VulkanError, WindowError, WindowSystem};

/// Exit code after the window was closed normally
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code when startup failed
pub const EXIT_INIT_FAILURE: i32 = -1;

/// Exit code when the application failed after a successful startup
pub const EXIT_RUNTIME_FAILURE: i32 = 1;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Windowing toolkit failure
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Vulkan bootstrap failure
    #[error("Vulkan error: {0}")]
    Vulkan(#[from] VulkanError),

    /// Error returned by the application's frame hook
    #[error("Application error: {0}")]
    Application(#[from] AppError),
}

impl EngineError {
    /// Stage of the program this error aborted
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Window(_) => "window creation",
            Self::Vulkan(e) => e.stage(),
            Self::Application(_) => "main loop",
        }
    }
}

/// Main engine struct
///
/// Field order matters: the Vulkan context (device, surface, messenger,
/// instance) is dropped before the window it presents to.
pub struct Engine<W: WindowSystem, H: GraphicsHost> {
    context: VulkanContext<H>,
    window: W,
    frame_index: u64,
}

impl<W: WindowSystem, H: GraphicsHost> Engine<W, H> {
    /// Bring up Vulkan for `window`
    pub fn new(mut window: W, host: H, config: &BootstrapConfig) -> Result<Self, EngineError> {
        log::info!("Initializing {} ({})", config.application_name, config.application_version);
        let context = VulkanContext::new(host, &mut window, config)?;

        Ok(Self {
            context,
            window,
            frame_index: 0,
        })
    }

    /// Run the main loop until the window asks to close
    pub fn run<A: Application + ?Sized>(&mut self, app: &mut A) -> Result<(), EngineError> {
        log::info!("Starting main loop...");

        while !self.window.should_close() {
            self.window.poll_events();

            let frame = FrameContext {
                graphics: self.context.handles(),
                framebuffer_size: self.window.framebuffer_size(),
                frame_index: self.frame_index,
            };
            app.update(&frame)?;
            self.frame_index += 1;
        }

        log::info!("Main loop finished after {} frame(s)", self.frame_index);
        Ok(())
    }

    /// The Vulkan context
    pub fn context(&self) -> &VulkanContext<H> {
        &self.context
    }

    /// The window
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Mutable access to the window
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// Frames completed so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Tear down Vulkan, then close the window
    pub fn shutdown(self) {
        let Self { context, window, .. } = self;
        context.shutdown();
        drop(window);
        log::info!("Engine shutdown complete");
    }
}

/// Run an application with a GLFW window and the system Vulkan loader
///
/// Returns [`EXIT_SUCCESS`] when the window is closed normally,
/// [`EXIT_INIT_FAILURE`] when any startup stage fails, and
/// [`EXIT_RUNTIME_FAILURE`] when the application's frame hook errors.
pub fn launch<A: Application + ?Sized>(config: &BootstrapConfig, app: &mut A) -> i32 {
    let mut engine = match start(config) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Initialization failed during {}: {}", e.stage(), e);
            return EXIT_INIT_FAILURE;
        }
    };

    let outcome = engine.run(app);
    engine.shutdown();

    match outcome {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            log::error!("Application error during {}: {}", e.stage(), e);
            EXIT_RUNTIME_FAILURE
        }
    }
}

fn start(config: &BootstrapConfig) -> Result<Engine<GlfwWindow, AshHost>, EngineError> {
    config.validate()?;
    let window = GlfwWindow::new(&config.window)?;
    let host = AshHost::new()?;
    Engine::new(window, host, config)
}
