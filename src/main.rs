//! Triangle rasterization demo
//!
//! Spins a red/green/blue triangle in a 320x240 software frame buffer and
//! presents it through a scaled-up texture.
//!
//! Keys: Escape quits, Space pauses, L toggles the outline, F12 saves a PNG.

mod input;

use log::{info, warn};
use macroquad::prelude::*;

use span_raster::app::DemoState;
use span_raster::config::{load_or_default, DemoConfig, CONFIG_PATH};
use span_raster::rasterizer::Rasterizer;
use span_raster::screenshot::{save_png, screenshot_path};
use span_raster::VERSION;
use input::{process_input, InputResult};

fn window_conf(config: &DemoConfig) -> Conf {
    Conf {
        window_title: "Triangle Rasterization Demo".to_owned(),
        window_width: scaled(config.width, config.window_scale),
        window_height: scaled(config.height, config.window_scale),
        window_resizable: true,
        ..Default::default()
    }
}

fn scaled(size: usize, scale: u32) -> i32 {
    let size = u32::try_from(size).unwrap_or(u32::MAX);
    i32::try_from(size.saturating_mul(scale)).unwrap_or(i32::MAX)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("=== Span Raster v{} ===", VERSION);
    let config = load_or_default(CONFIG_PATH);

    macroquad::Window::from_config(window_conf(&config), run(config));
}

async fn run(config: DemoConfig) {
    prevent_quit();

    let (width, height) = (config.width, config.height);
    let mut state = DemoState::new(&config);
    let mut pixels = vec![0u32; width * height];

    info!("Frame buffer {}x{} ({:?})", width, height, config.pixel_format);

    while state.is_running() {
        let input = process_input(&mut state);

        // The rasterizer only borrows the pixels for the duration of the draw
        {
            let mut rast = Rasterizer::with_buffer(&mut pixels, width, height)
                .with_format(config.pixel_format);
            state.render(&mut rast);
        }

        if input == InputResult::Screenshot {
            take_screenshot(&mut state, &pixels, &config);
        }

        // Present
        let bytes = config.pixel_format.to_rgba8(&pixels);
        let texture = Texture2D::from_rgba8(width as u16, height as u16, &bytes);
        texture.set_filter(FilterMode::Nearest);

        clear_background(BLACK);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        if let Some(fps) = state.timer.fps() {
            draw_text(&format!("FPS: {}", fps), 8.0, 20.0, 20.0, WHITE);
        }
        if state.paused {
            draw_text("PAUSED", 8.0, 40.0, 20.0, YELLOW);
        }

        if let Some(fps) = state.advance(get_frame_time()) {
            info!("Frames per second: {}", fps);
        }

        next_frame().await;
    }

    info!("Quit requested, shutting down");
}

fn take_screenshot(state: &mut DemoState, pixels: &[u32], config: &DemoConfig) {
    let path = screenshot_path(&config.screenshot_dir, state.screenshots);
    match save_png(pixels, config.width, config.height, config.pixel_format, &path) {
        Ok(()) => {
            state.screenshots += 1;
            info!("Saved screenshot {}", path.display());
        }
        Err(e) => warn!("Screenshot failed: {}", e),
    }
}
