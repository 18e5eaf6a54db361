use std::any::Any;
use std::panic;
use std::process;

use anyhow::{anyhow, Context, Result};
use winit::{
    dpi::PhysicalSize,
    event::Event,
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use crate::config::AppConfig;
use crate::frame_loop::{FrameLoop, WindowAction};
use crate::gpu::{GpuContext, SurfaceErrorAction};
use crate::logging::init_logging;
use crate::renderer::Renderer;

/// Process exit code for any failure during startup.
pub const EXIT_FAILURE: i32 = -1;

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

/// Runs `f`, turning a panic into its message. The default hook is swapped out
/// for the call so the panic is not also printed to stderr.
fn catch_panic_quietly<F, R>(f: F) -> Result<R, String>
where
    F: FnOnce() -> R + panic::UnwindSafe,
{
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(f);
    panic::set_hook(previous);
    result.map_err(|payload| panic_message(&*payload).to_owned())
}

fn create_event_loop() -> Result<EventLoop<()>> {
    // winit 0.28 panics instead of returning an error when no display is usable.
    catch_panic_quietly(EventLoop::new).map_err(|message| anyhow!(message))
}

fn create_window(event_loop: &EventLoop<()>, config: &AppConfig) -> Result<Window> {
    WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .build(event_loop)
        .context("window creation failed")
}

fn or_exit<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            log::error!("{:#}", err);
            process::exit(EXIT_FAILURE)
        }
    }
}

/// Opens the window, builds the renderer and draws until the window closes.
///
/// Exits the process with 0 on a normal close and `EXIT_FAILURE` when any
/// startup step fails.
pub fn run(config: AppConfig) -> ! {
    init_logging(config.logging.clone());

    let event_loop = or_exit(create_event_loop().context("windowing initialization failed"));
    let window = or_exit(create_window(&event_loop, &config));
    let mut gpu = or_exit(
        pollster::block_on(GpuContext::new(&window, &config.gpu))
            .context("graphics context initialization failed"),
    );

    let renderer = match Renderer::new(gpu.device(), gpu.surface_format(), config.clear_color) {
        Ok(renderer) => renderer,
        Err(err) => {
            log::error!("{}", err);
            process::exit(EXIT_FAILURE)
        }
    };

    let mut frame_loop = FrameLoop::new(gpu.size());
    log::info!("renderer ready, {:?}", renderer.counters());

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                if let WindowAction::SetViewport(viewport) = frame_loop.handle_window_event(event) {
                    log::debug!("viewport {}x{}", viewport.width, viewport.height);
                    gpu.resize(viewport.size());
                }
            }
            Event::RedrawRequested(window_id) if window_id == window.id() => {
                if !frame_loop.should_render() {
                    return;
                }
                match gpu.begin_frame() {
                    Ok(mut frame) => {
                        renderer.draw(&mut frame.encoder, &frame.view, frame_loop.viewport());
                        gpu.present(frame);
                        frame_loop.frame_presented();
                    }
                    Err(err) => {
                        if gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                            frame_loop.request_close();
                        }
                    }
                }
            }
            Event::MainEventsCleared => {
                if frame_loop.terminate_if_requested() {
                    *control_flow = ControlFlow::Exit;
                } else {
                    window.request_redraw();
                }
            }
            Event::LoopDestroyed => {
                log::info!(
                    "terminated after {} frames, {:?}",
                    frame_loop.frames(),
                    renderer.counters()
                );
            }
            _ => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_are_readable() {
        let payload: Box<dyn Any + Send> = Box::new("Failed to initialize any backend!");
        assert_eq!(panic_message(&*payload), "Failed to initialize any backend!");

        let payload: Box<dyn Any + Send> = Box::new(String::from("no display"));
        assert_eq!(panic_message(&*payload), "no display");

        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(&*payload), "unknown panic");
    }

    #[test]
    fn quiet_catch_returns_value_or_message() {
        assert_eq!(catch_panic_quietly(|| 42), Ok(42));
        assert_eq!(
            catch_panic_quietly(|| -> u32 { panic!("no display") }),
            Err(String::from("no display"))
        );
        assert_eq!(
            catch_panic_quietly(|| -> u32 { panic!("backend {} missing", 3) }),
            Err(String::from("backend 3 missing"))
        );
    }
}
