use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode, WindowEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Full-framebuffer viewport anchored at the origin.
    pub fn from_size(size: PhysicalSize<u32>) -> Self {
        Self {
            x: 0,
            y: 0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    CloseRequested,
    Terminated,
}

/// What the event loop must do in response to one window event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    None,
    RequestClose,
    SetViewport(Viewport),
}

/// Escape press closes the window; every other key and every release is ignored.
pub fn is_close_key(input: &KeyboardInput) -> bool {
    input.state == ElementState::Pressed && input.virtual_keycode == Some(VirtualKeyCode::Escape)
}

pub fn dispatch(event: &WindowEvent<'_>) -> WindowAction {
    match event {
        WindowEvent::CloseRequested => WindowAction::RequestClose,
        WindowEvent::KeyboardInput { input, .. } if is_close_key(input) => {
            WindowAction::RequestClose
        }
        WindowEvent::Resized(size) => WindowAction::SetViewport(Viewport::from_size(*size)),
        WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
            WindowAction::SetViewport(Viewport::from_size(**new_inner_size))
        }
        _ => WindowAction::None,
    }
}

/// Close flag and viewport tracking for the render loop.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    viewport: Viewport,
    frames: u64,
}

impl FrameLoop {
    pub fn new(initial_size: PhysicalSize<u32>) -> Self {
        Self {
            state: LoopState::Running,
            viewport: Viewport::from_size(initial_size),
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn should_render(&self) -> bool {
        self.state == LoopState::Running && !self.viewport.is_empty()
    }

    /// Applies a window event to the loop state and returns the action for the caller.
    pub fn handle_window_event(&mut self, event: &WindowEvent<'_>) -> WindowAction {
        let action = dispatch(event);
        match action {
            WindowAction::RequestClose => self.request_close(),
            WindowAction::SetViewport(viewport) => self.viewport = viewport,
            WindowAction::None => {}
        }
        action
    }

    pub fn request_close(&mut self) {
        if self.state == LoopState::Running {
            log::info!("close requested after {} frames", self.frames);
            self.state = LoopState::CloseRequested;
        }
    }

    pub fn frame_presented(&mut self) {
        self.frames += 1;
    }

    /// Moves a close-requested loop to its final state. Returns true when the
    /// event loop should exit.
    pub fn terminate_if_requested(&mut self) -> bool {
        match self.state {
            LoopState::Running => false,
            LoopState::CloseRequested => {
                self.state = LoopState::Terminated;
                true
            }
            LoopState::Terminated => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::{DeviceId, ModifiersState};

    #[allow(deprecated)]
    fn key_event(key: VirtualKeyCode, state: ElementState) -> WindowEvent<'static> {
        WindowEvent::KeyboardInput {
            device_id: unsafe { DeviceId::dummy() },
            input: KeyboardInput {
                scancode: 0,
                state,
                virtual_keycode: Some(key),
                modifiers: ModifiersState::empty(),
            },
            is_synthetic: false,
        }
    }

    #[test]
    fn escape_press_requests_close() {
        let mut frame_loop = FrameLoop::new(PhysicalSize::new(1920, 1080));
        let action =
            frame_loop.handle_window_event(&key_event(VirtualKeyCode::Escape, ElementState::Pressed));
        assert_eq!(action, WindowAction::RequestClose);
        assert_eq!(frame_loop.state(), LoopState::CloseRequested);
    }

    #[test]
    fn other_keys_and_releases_are_ignored() {
        let mut frame_loop = FrameLoop::new(PhysicalSize::new(1920, 1080));
        for event in [
            key_event(VirtualKeyCode::Escape, ElementState::Released),
            key_event(VirtualKeyCode::Space, ElementState::Pressed),
            key_event(VirtualKeyCode::Q, ElementState::Pressed),
            key_event(VirtualKeyCode::Return, ElementState::Pressed),
        ] {
            assert_eq!(frame_loop.handle_window_event(&event), WindowAction::None);
        }
        assert_eq!(frame_loop.state(), LoopState::Running);
    }

    #[test]
    fn os_close_requests_close() {
        let mut frame_loop = FrameLoop::new(PhysicalSize::new(800, 600));
        frame_loop.handle_window_event(&WindowEvent::CloseRequested);
        assert_eq!(frame_loop.state(), LoopState::CloseRequested);
    }

    #[test]
    fn resize_sets_viewport_once() {
        let mut frame_loop = FrameLoop::new(PhysicalSize::new(1920, 1080));
        let action = frame_loop.handle_window_event(&WindowEvent::Resized(PhysicalSize::new(640, 480)));

        let expected = Viewport {
            x: 0,
            y: 0,
            width: 640,
            height: 480,
        };
        assert_eq!(action, WindowAction::SetViewport(expected));
        assert_eq!(frame_loop.viewport(), expected);
    }

    #[test]
    fn scale_factor_change_resizes_to_new_inner_size() {
        let mut size = PhysicalSize::new(2560, 1440);
        let event = WindowEvent::ScaleFactorChanged {
            scale_factor: 2.0,
            new_inner_size: &mut size,
        };
        assert_eq!(
            dispatch(&event),
            WindowAction::SetViewport(Viewport::from_size(PhysicalSize::new(2560, 1440)))
        );
    }

    #[test]
    fn minimized_window_skips_rendering() {
        let mut frame_loop = FrameLoop::new(PhysicalSize::new(1920, 1080));
        assert!(frame_loop.should_render());
        frame_loop.handle_window_event(&WindowEvent::Resized(PhysicalSize::new(0, 0)));
        assert!(!frame_loop.should_render());
        frame_loop.handle_window_event(&WindowEvent::Resized(PhysicalSize::new(300, 200)));
        assert!(frame_loop.should_render());
    }

    #[test]
    fn state_only_moves_forward() {
        let mut frame_loop = FrameLoop::new(PhysicalSize::new(1920, 1080));
        assert!(!frame_loop.terminate_if_requested());
        assert_eq!(frame_loop.state(), LoopState::Running);

        frame_loop.request_close();
        assert!(frame_loop.terminate_if_requested());
        assert_eq!(frame_loop.state(), LoopState::Terminated);

        frame_loop.request_close();
        assert_eq!(frame_loop.state(), LoopState::Terminated);
        assert!(!frame_loop.should_render());
    }

    #[test]
    fn presented_frames_are_counted() {
        let mut frame_loop = FrameLoop::new(PhysicalSize::new(1, 1));
        for _ in 0..5 {
            frame_loop.frame_presented();
        }
        assert_eq!(frame_loop.frames(), 5);
    }
}
