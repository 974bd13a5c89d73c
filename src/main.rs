use anyhow::Result;
use log::info;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::{AssetLoader, SpriteCatalog};
use engine::input::{Action, InputManager};
use engine::renderer::{Renderer, Scene, CANVAS_HEIGHT, CANVAS_WIDTH};
use game::session::GameSession;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Runner...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Rusted Runner")
            .with_inner_size(winit::dpi::LogicalSize::new(CANVAS_WIDTH, CANVAS_HEIGHT))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    // Renderer and sprite assets (missing files degrade to skipped blits)
    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let loader = AssetLoader::new("assets");
    let catalog = SpriteCatalog::load(&loader, &mut renderer);

    // Input and the one game session
    let mut input = InputManager::new();
    let mut session = GameSession::new(rand::random::<u64>(), Instant::now());
    let mut scene = Scene::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                renderer.resize(physical_size);
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                // Input lands between frames, never inside a tick
                for action in [Action::Jump, Action::ToggleRun, Action::Restart] {
                    if input.just_pressed(action) {
                        session.apply(action);
                    }
                }
                input.update();

                session.advance(Instant::now());

                scene.clear();
                session.draw(&mut scene);
                if let Err(e) = renderer.render(&scene, &catalog) {
                    log::error!("Render error: {}", e);
                }
            }
            Event::AboutToWait => {
                // The frame loop perpetuates itself; stopping the game only
                // freezes the simulation, frames keep rendering
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
