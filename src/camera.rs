//! Perspective camera and the input-driven controllers that move it.

use glam::{Mat4, Vec2, Vec3};

use crate::motion::damp;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
        }
    }

    /// Aspect changes from a collapsed window are ignored
    pub fn set_aspect(&mut self, aspect: Option<f32>) {
        if let Some(aspect) = aspect.filter(|a| a.is_finite() && *a > 0.0) {
            self.aspect = aspect;
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Eases a 2D value towards a pointer-derived target instead of snapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerFollow {
    pub target: Vec2,
    pub factor: f32,
}

impl PointerFollow {
    pub fn new(factor: f32) -> Self {
        Self {
            target: Vec2::ZERO,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    /// Advance `current` by `frames` reference frames of smoothing
    pub fn step(&self, current: Vec2, frames: f32) -> Vec2 {
        // Repeated application of `damp` over `frames` steps
        let keep = (1.0 - self.factor).powf(frames.max(0.0));
        Vec2::new(
            damp(current.x, self.target.x, 1.0 - keep),
            damp(current.y, self.target.y, 1.0 - keep),
        )
    }
}

/// Camera distance driven by the mouse wheel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zoom {
    distance: f32,
    min: f32,
    max: f32,
    /// Distance units per wheel delta unit
    pub sensitivity: f32,
}

impl Zoom {
    pub fn new(distance: f32, min: f32, max: f32, sensitivity: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            distance: distance.clamp(min, max),
            min,
            max,
            sensitivity,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Closest allowed distance
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Farthest allowed distance
    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn apply_wheel(&mut self, delta_y: f32) -> f32 {
        if delta_y.is_finite() {
            self.distance = (self.distance + delta_y * self.sensitivity).clamp(self.min, self.max);
        }
        self.distance
    }
}

/// Drag-to-rotate with inertia after release.
///
/// `x` of the returned rotation follows horizontal pointer motion (yaw),
/// `y` follows vertical motion (pitch).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragRotate {
    dragging: bool,
    last: Option<Vec2>,
    /// Radians per reference frame carried after release
    velocity: Vec2,
    pub damping: f32,
    /// Radians per CSS pixel
    pub sensitivity: f32,
}

impl DragRotate {
    pub fn new(sensitivity: f32, damping: f32) -> Self {
        Self {
            dragging: false,
            last: None,
            velocity: Vec2::ZERO,
            damping: damping.clamp(0.0, 1.0),
            sensitivity,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn press(&mut self, at: Vec2) {
        self.dragging = true;
        self.last = Some(at);
        self.velocity = Vec2::ZERO;
    }

    /// Rotation produced by moving the pointer to `at`; zero unless pressed
    pub fn drag(&mut self, at: Vec2) -> Vec2 {
        if !self.dragging {
            return Vec2::ZERO;
        }
        let delta = match self.last {
            Some(last) => (at - last) * self.sensitivity,
            None => Vec2::ZERO,
        };
        self.last = Some(at);
        self.velocity = delta;
        delta
    }

    pub fn release(&mut self) {
        self.dragging = false;
        self.last = None;
    }

    /// Inertial rotation for `frames` reference frames after release
    pub fn coast(&mut self, frames: f32) -> Vec2 {
        if self.dragging {
            return Vec2::ZERO;
        }
        let rotation = self.velocity * frames;
        self.velocity *= self.damping.powf(frames.max(0.0));
        if self.velocity.length_squared() < 1e-12 {
            self.velocity = Vec2::ZERO;
        }
        rotation
    }
}
