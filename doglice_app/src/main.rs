//! DoGlIce demo application
//!
//! Opens an 800x600 window, brings up Vulkan and idles until the window is
//! closed. Usage: `doglice [config.toml|config.ron]`. Set
//! `DOGLICE_DIAGNOSTICS=1` or `0` to force validation on or off.

use doglice_engine::foundation::logging;
use doglice_engine::prelude::*;
use doglice_engine::EXIT_INIT_FAILURE;

const DIAGNOSTICS_ENV: &str = "DOGLICE_DIAGNOSTICS";

/// Per-frame hook of the demo; rendering is not wired up yet
struct DogliceApp {
    frames: u64,
}

impl Application for DogliceApp {
    fn update(&mut self, frame: &FrameContext) -> Result<(), AppError> {
        if frame.frame_index == 0 {
            log::debug!(
                "First frame: graphics queue {:?} (family {}), present queue {:?} (family {}), framebuffer {:?}",
                frame.graphics.graphics_queue,
                frame.graphics.graphics_family,
                frame.graphics.present_queue,
                frame.graphics.present_family,
                frame.framebuffer_size
            );
        }
        self.frames = frame.frame_index + 1;
        Ok(())
    }
}

fn load_config() -> Result<BootstrapConfig, doglice_engine::config::ConfigError> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => BootstrapConfig::load_from_file(path)?,
        None => BootstrapConfig::default(),
    };

    match std::env::var(DIAGNOSTICS_ENV).as_deref() {
        Ok("1" | "true" | "on") => config.diagnostics.enabled = Some(true),
        Ok("0" | "false" | "off") => config.diagnostics.enabled = Some(false),
        _ => {}
    }

    Ok(config)
}

fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            log::error!("Initialization failed during configuration: {e}");
            std::process::exit(EXIT_INIT_FAILURE);
        }
    };

    logging::init(&config.log_level);
    log::info!(
        "Starting {} (diagnostics {})",
        config.application_name,
        if config.diagnostics.is_enabled() { "on" } else { "off" }
    );

    let mut app = DogliceApp { frames: 0 };
    let code = launch(&config, &mut app);

    log::info!("Exiting with code {code} after {} frame(s)", app.frames);
    std::process::exit(code);
}
