//! Square grid of cubes with a wave rippling outward from the centre,
//! seen through fog by an orbiting camera the user can drag and zoom.

use glam::{Vec2, Vec3};

use super::{CountRange, Demo, Stage};
use crate::camera::{DragRotate, PerspectiveCamera, Zoom};
use crate::clock::FrameTime;
use crate::config::DemoKind;
use crate::error::DemoResult;
use crate::geometry::Shape;
use crate::input::{InputEvent, Viewport};
use crate::motion::{frames, remap_unit, wave, wrap_angle};
use crate::scene::{Background, Color, Lights, Material, Scene, Transform};

pub const COUNT: CountRange = CountRange {
    default: 625,
    min: 16,
    max: 625,
};

const SPACING: f32 = 0.6;
const CUBE_SIZE: f32 = 0.4;
const FREQUENCY: f32 = 0.8;
const SPEED: f32 = 2.0;
const AMPLITUDE: f32 = 0.6;
/// World units between colour bands
const BAND_WIDTH: f32 = 1.5;
const COLORS: [u32; 3] = [0x4cc9f0, 0x4361ee, 0x7209b7];

/// Radians per second the camera circles on its own
const AUTO_ROTATE: f32 = 0.1;
const ELEVATION: f32 = 0.6;
const ELEVATION_RANGE: (f32, f32) = (0.15, 1.3);

/// Grid-derived constants for one cube
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    pub origin: Vec3,
    /// Distance from the grid centre in the XZ plane
    pub distance: f32,
}

pub struct Wave {
    stage: Stage,
    params: Vec<WaveParams>,
    side: usize,
    azimuth: f32,
    elevation: f32,
    zoom: Zoom,
    drag: DragRotate,
}

impl Wave {
    pub fn new(count: Option<usize>, viewport: Viewport) -> DemoResult<Self> {
        let side = grid_side(COUNT.resolve(count));

        let mut scene = Scene::new(Background::Fog {
            color: Color::from_hex(0x0b1020),
            near: 10.0,
            far: 50.0,
        });
        scene.lights = Lights {
            ambient: 0.35,
            directional_from: Vec3::new(5.0, 10.0, 7.0),
            directional: 0.9,
        };
        let cube = scene.add_shape(Shape::Cube { size: CUBE_SIZE });
        let materials: Vec<usize> = COLORS
            .iter()
            .map(|&hex| scene.add_material(Material::solid(hex)))
            .collect();

        let half = (side - 1) as f32 * SPACING * 0.5;
        let mut params = Vec::with_capacity(side * side);
        for row in 0..side {
            for col in 0..side {
                let origin = Vec3::new(col as f32 * SPACING - half, 0.0, row as f32 * SPACING - half);
                let distance = Vec2::new(origin.x, origin.z).length();
                let band = (distance / BAND_WIDTH) as usize % materials.len();
                scene.add_object(cube, materials[band], Transform::at(origin))?;
                params.push(WaveParams { origin, distance });
            }
        }

        let camera = PerspectiveCamera::new(60.0, 1.0, 0.1, 200.0);
        let mut wave = Self {
            stage: Stage::new(scene, camera, viewport),
            params,
            side,
            azimuth: 0.0,
            elevation: ELEVATION,
            zoom: Zoom::new(22.0, 8.0, 40.0, 0.02),
            drag: DragRotate::new(0.005, 0.9),
        };
        wave.place_camera();
        Ok(wave)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn params(&self) -> &[WaveParams] {
        &self.params
    }

    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    /// Camera angle around the Y axis, in `[0, 2π)`
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// Camera angle above the grid plane
    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    fn rotate(&mut self, rotation: Vec2) {
        self.azimuth = wrap_angle(self.azimuth - rotation.x);
        self.elevation = (self.elevation + rotation.y).clamp(ELEVATION_RANGE.0, ELEVATION_RANGE.1);
    }

    fn place_camera(&mut self) {
        let d = self.zoom.distance();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let camera = &mut self.stage.camera;
        camera.position = Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az) * d;
        camera.look_at(Vec3::ZERO);
    }
}

/// Side of the largest square grid not exceeding `count` cells, at least 4
fn grid_side(count: usize) -> usize {
    ((count as f32).sqrt().floor() as usize).max(4)
}

impl Demo for Wave {
    fn kind(&self) -> DemoKind {
        DemoKind::Wave
    }

    fn stage(&self) -> &Stage {
        &self.stage
    }

    fn update(&mut self, frame: FrameTime) {
        let t = frame.elapsed;

        for (object, p) in self.stage.scene.objects.iter_mut().zip(&self.params) {
            let s = wave(p.distance, t, FREQUENCY, SPEED, 1.0);
            let transform = &mut object.transform;
            transform.position = p.origin + Vec3::Y * s * AMPLITUDE;
            transform.scale = Vec3::new(1.0, remap_unit(s, 1.0, 1.5), 1.0);
        }

        let coast = self.drag.coast(frames(frame.delta));
        self.rotate(coast);
        self.azimuth = wrap_angle(self.azimuth + AUTO_ROTATE * frame.delta);
        self.place_camera();
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => self.drag.press(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => {
                let rotation = self.drag.drag(Vec2::new(x, y));
                self.rotate(rotation);
            }
            InputEvent::PointerUp => self.drag.release(),
            InputEvent::Wheel { delta_y } => {
                self.zoom.apply_wheel(delta_y);
            }
            InputEvent::Resize(viewport) => self.stage.resize(viewport),
        }
        self.place_camera();
    }
}
