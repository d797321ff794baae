//! Input events, decoupled from the DOM so demos can be driven from tests.

use glam::Vec2;

/// Window size in CSS pixels plus the device pixel ratio
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
        }
    }

    /// Width over height, `None` for a collapsed window
    pub fn aspect(&self) -> Option<f32> {
        (self.height > 0.0 && self.width > 0.0).then(|| self.width / self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    /// Drawing buffer size in device pixels
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round().max(1.0) as u32,
            (self.height * self.pixel_ratio).round().max(1.0) as u32,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer position in CSS pixels relative to the viewport
    PointerMove { x: f32, y: f32 },
    PointerDown { x: f32, y: f32 },
    /// Button released or pointer left the page
    PointerUp,
    /// Positive when scrolling down (zoom out)
    Wheel { delta_y: f32 },
    Resize(Viewport),
}

/// DOM pointer events the page listens for on the window
pub const POINTER_EVENTS: [&str; 4] = ["pointermove", "pointerdown", "pointerup", "pointercancel"];

impl InputEvent {
    /// Map a DOM pointer event by name. A cancelled pointer ends a drag the
    /// same way a released button does.
    pub fn from_pointer(name: &str, x: f32, y: f32) -> Option<Self> {
        match name {
            "pointermove" => Some(InputEvent::PointerMove { x, y }),
            "pointerdown" => Some(InputEvent::PointerDown { x, y }),
            "pointerup" | "pointercancel" => Some(InputEvent::PointerUp),
            _ => None,
        }
    }
}
