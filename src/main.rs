use anyhow::Result;
use log::info;
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetLoader;
use engine::clock::FrameClock;
use engine::config::GameConfig;
use engine::input::InputState;
use engine::renderer::Renderer;
use game::Game;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting spoodle client...");

    let config = GameConfig::default();
    let (width, height) = config.screen_size();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("spoodle")
            .with_inner_size(winit::dpi::LogicalSize::new(width, height))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let loader = AssetLoader::new(&config.image_directory, &config.spritesheet_directory);
    let mut game = Game::new(&config, &mut renderer, &loader)?;
    let mut clock = FrameClock::new(config.frame_rate);
    let mut input = InputState::new();

    // Main event loop: one update/draw tick per redraw
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                }
                WindowEvent::Focused(false) => {
                    // Don't keep keys held across focus loss
                    input.reset();
                }
                WindowEvent::RedrawRequested => {
                    let delta_ms = clock.tick();

                    if let Err(e) = game.update(delta_ms, &input) {
                        log::error!("Update failed: {e}");
                        elwt.exit();
                        return;
                    }
                    if game.quit_requested() {
                        info!("Quit requested, shutting down...");
                        elwt.exit();
                        return;
                    }

                    let commands = game.draw_list();
                    if let Err(e) = renderer.render(&commands) {
                        match e.downcast_ref::<wgpu::SurfaceError>() {
                            Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                log::warn!("Surface lost, reconfiguring");
                                let size = renderer.size();
                                renderer.resize(size);
                            }
                            Some(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("Out of GPU memory, shutting down");
                                elwt.exit();
                            }
                            _ => log::warn!("Render failed: {e}"),
                        }
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Drive the next tick
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
