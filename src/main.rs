use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::FrameClock;
use engine::input::{Action, InputManager};
use engine::renderer::Renderer;
use game::player::AnimationCatalog;
use game::{Game, GameConfig};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Adventurer...");

    let config = GameConfig::default();

    // A bad catalog must abort before the first tick
    let catalog = AnimationCatalog::standard();
    catalog
        .validate(config.sheet_columns, config.sheet_rows)
        .context("animation catalog failed validation")?;

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Platformer")
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.screen_width,
                config.screen_height,
            ))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    let mut renderer = pollster::block_on(Renderer::new(window.clone(), config.sheet_path))?;

    // The configured grid must fit on the sheet that actually loaded,
    // otherwise frames would silently sample the wrong region
    let (sheet_width, sheet_height) = renderer.sheet_size();
    ensure!(
        sheet_width >= config.sheet_columns * config.cell_width
            && sheet_height >= config.sheet_rows * config.cell_height,
        "sprite sheet is {}x{} but the configured grid needs {}x{}",
        sheet_width,
        sheet_height,
        config.sheet_columns * config.cell_width,
        config.sheet_rows * config.cell_height,
    );

    let ground_y = config.ground_y;
    let mut game = Game::new(config, catalog);
    let mut input = InputManager::new();
    let mut clock = FrameClock::new();

    info!("Entering main loop");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            info!("Close requested, shutting down...");
            elwt.exit();
        }
        Event::WindowEvent {
            event: WindowEvent::KeyboardInput {
                event: key_event, ..
            },
            ..
        } => {
            input.process_keyboard_event(&key_event);
            if input.is_pressed(Action::Quit) {
                info!("Quit requested, shutting down...");
                elwt.exit();
            }
        }
        Event::WindowEvent {
            event: WindowEvent::Focused(false),
            ..
        } => {
            // Release-events never arrive for keys held across a focus loss
            input.reset();
        }
        Event::WindowEvent {
            event: WindowEvent::Resized(physical_size),
            ..
        } => {
            renderer.resize(physical_size);
        }
        Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } => {
            let delta_ms = clock.tick();
            game.advance(&input.snapshot(), delta_ms);

            let frame = game.current_frame();
            if let Err(e) = renderer.render(&frame, ground_y) {
                log::error!("Render error: {e}");
            }
        }
        Event::AboutToWait => {
            // Next tick as soon as the surface is ready; Fifo paces us
            window.request_redraw();
        }
        _ => {}
    })?;

    Ok(())
}
