mod app;
mod export;
mod orbit;
mod ribbon;

use anyhow::Result;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use flower_core::{FlowerParams, ParamUpdate};

use crate::app::App;

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("flower")
        .with_inner_size(LogicalSize::new(1280.0, 800.0))
        .build(&event_loop)?;

    let mut app = pollster::block_on(App::new(&window))?;
    log::info!(
        "keys: space/G regenerate, R randomize, S save PNG, I invert, \
         arrows adjust lines/stems, drag to orbit, wheel to zoom, Q/esc quit"
    );

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => app.resize(size.width, size.height),
            WindowEvent::CursorMoved { position, .. } => {
                app.orbit_mut().on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                app.orbit_mut().set_dragging(state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                app.orbit_mut().on_scroll(amount);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => handle_key(&mut app, code, elwt),
            _ => {}
        },
        Event::AboutToWait => {
            match app.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => app.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    elwt.exit();
                }
                Err(e) => log::warn!("surface error: {e:?}"),
            }
            app.window.request_redraw();
        }
        _ => {}
    })?;
    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, elwt: &winit::event_loop::EventLoopWindowTarget<()>) {
    match code {
        KeyCode::Space | KeyCode::KeyG => app.regenerate(),
        KeyCode::KeyR => {
            let params = FlowerParams::randomized(&mut rand::thread_rng());
            log::info!("randomized: {params:?}");
            app.set_params(params);
        }
        KeyCode::KeyS => match app.export_image() {
            Ok(path) => log::info!("saved {}", path.display()),
            Err(e) => log::error!("export failed: {e:#}"),
        },
        KeyCode::KeyI => {
            let invert = !app.params().invert;
            app.update_params(&ParamUpdate {
                invert: Some(invert),
                ..ParamUpdate::default()
            });
        }
        KeyCode::ArrowUp => {
            let lines = app.params().lines + 1;
            app.update_params(&ParamUpdate {
                lines: Some(lines),
                ..ParamUpdate::default()
            });
        }
        KeyCode::ArrowDown => {
            let lines = app.params().lines.saturating_sub(1);
            app.update_params(&ParamUpdate {
                lines: Some(lines),
                ..ParamUpdate::default()
            });
        }
        KeyCode::ArrowRight => {
            let stems = app.params().stems + 1;
            app.update_params(&ParamUpdate {
                stems: Some(stems),
                ..ParamUpdate::default()
            });
        }
        KeyCode::ArrowLeft => {
            let stems = app.params().stems.saturating_sub(1).max(1);
            app.update_params(&ParamUpdate {
                stems: Some(stems),
                ..ParamUpdate::default()
            });
        }
        KeyCode::KeyQ | KeyCode::Escape => elwt.exit(),
        _ => {}
    }
}
