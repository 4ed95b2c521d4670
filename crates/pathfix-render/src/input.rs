//! Pointer and wheel input for the orbit camera

use crate::camera::OrbitCamera;
use winit::event::{MouseButton, MouseScrollDelta};

/// Radians of orbit per pixel of primary drag
const ROTATE_SPEED: f64 = 0.01;
/// Pixel scroll units per wheel line
const PIXELS_PER_LINE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    pub fn from_winit(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Self::Primary),
            MouseButton::Right => Some(Self::Secondary),
            MouseButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}

/// Input forwarded by a surface, in surface pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    PointerDown { button: PointerButton, x: f64, y: f64 },
    PointerUp { button: PointerButton, x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    /// Positive scrolls away from the user
    Wheel { delta: f64 },
}

/// Normalize a winit scroll delta to wheel lines
pub fn wheel_delta(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(pos) => pos.y / PIXELS_PER_LINE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Rotating,
    Panning,
}

/// Turns pointer gestures into camera moves
#[derive(Debug, Clone, Default)]
pub struct OrbitController {
    gesture: Option<Gesture>,
    last_position: Option<(f64, f64)>,
}

impl OrbitController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Apply one event to `camera`. Returns `true` when the camera moved.
    pub fn handle(&mut self, event: SurfaceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            SurfaceEvent::PointerDown { button, x, y } => {
                self.gesture = match button {
                    PointerButton::Primary => Some(Gesture::Rotating),
                    PointerButton::Secondary => Some(Gesture::Panning),
                    PointerButton::Middle => self.gesture,
                };
                self.last_position = Some((x, y));
                false
            }
            SurfaceEvent::PointerUp { .. } => {
                self.gesture = None;
                false
            }
            SurfaceEvent::PointerMove { x, y } => {
                let previous = self.last_position.replace((x, y));
                let (Some(gesture), Some((last_x, last_y))) = (self.gesture, previous) else {
                    return false;
                };
                let dx = x - last_x;
                let dy = y - last_y;
                if dx == 0.0 && dy == 0.0 {
                    return false;
                }
                match gesture {
                    Gesture::Rotating => camera.rotate(dx * ROTATE_SPEED, dy * ROTATE_SPEED),
                    Gesture::Panning => camera.pan(dx, dy),
                }
                true
            }
            SurfaceEvent::Wheel { delta } => {
                if delta == 0.0 {
                    return false;
                }
                camera.zoom(delta);
                true
            }
        }
    }
}
