//! A few large shapes hanging in space. They bob, wobble and breathe; the
//! whole group leans towards the pointer.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::Rng;

use super::{CountRange, Demo, Stage};
use crate::camera::{PerspectiveCamera, PointerFollow};
use crate::clock::FrameTime;
use crate::config::DemoKind;
use crate::error::DemoResult;
use crate::geometry::Shape;
use crate::input::{InputEvent, Viewport};
use crate::motion::{breath, frames, phase};
use crate::scene::{Background, Color, Lights, Material, Scene, Transform};

pub const COUNT: CountRange = CountRange {
    default: 10,
    min: 3,
    max: 30,
};

const SOLID_COLORS: [u32; 3] = [0xe76f51, 0xf4a261, 0x2a9d8f];
const WIRE_COLORS: [u32; 3] = [0xe9c46a, 0x8ecae6, 0xffffff];
const BOUNDS_MIN: Vec3 = Vec3::new(-8.0, -3.0, -6.0);
const BOUNDS_MAX: Vec3 = Vec3::new(8.0, 3.0, 2.0);
/// Largest lean of the group in radians
const MAX_TILT: f32 = 0.4;

/// Per-shape motion constants
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Monolith {
    pub origin: Vec3,
    pub bob_speed: f32,
    pub bob_amplitude: f32,
    pub phase: f32,
    pub wobble_speed: f32,
    pub breath_scale: f32,
}

impl Monolith {
    /// Full transform at time `t`
    pub fn transform(&self, t: f64) -> Transform {
        Transform {
            position: self.origin
                + Vec3::Y * phase(t, self.bob_speed, self.phase).sin() * self.bob_amplitude,
            rotation: Vec3::new(
                phase(t, self.wobble_speed, self.phase).sin() * 0.6,
                phase(t, self.wobble_speed, 0.0),
                phase(t, self.wobble_speed * 0.7, self.phase).cos() * 0.3,
            ),
            scale: Vec3::splat(breath(t, self.phase, self.breath_scale)),
        }
    }
}

pub struct Monoliths {
    stage: Stage,
    params: Vec<Monolith>,
    tilt: PointerFollow,
}

impl Monoliths {
    pub fn new<R: Rng>(count: Option<usize>, rng: &mut R, viewport: Viewport) -> DemoResult<Self> {
        let mut scene = Scene::new(Background::Solid(Color::from_hex(0x101418)));
        scene.lights = Lights {
            ambient: 0.3,
            directional_from: Vec3::new(-3.0, 5.0, 6.0),
            directional: 1.0,
        };
        let shapes = [
            scene.add_shape(Shape::Icosahedron { radius: 1.2 }),
            scene.add_shape(Shape::Octahedron { radius: 1.2 }),
            scene.add_shape(Shape::Tetrahedron { radius: 1.4 }),
            scene.add_shape(Shape::Cube { size: 1.6 }),
        ];
        let mut materials: Vec<usize> = SOLID_COLORS
            .iter()
            .map(|&hex| scene.add_material(Material::solid(hex)))
            .collect();
        materials.extend(
            WIRE_COLORS
                .iter()
                .map(|&hex| scene.add_material(Material::wireframe(hex, 0.6))),
        );

        let count = COUNT.resolve(count);
        let mut params = Vec::with_capacity(count);
        for _ in 0..count {
            let unit = Vec3::new(rng.gen(), rng.gen(), rng.gen());
            let m = Monolith {
                origin: BOUNDS_MIN + (BOUNDS_MAX - BOUNDS_MIN) * unit,
                bob_speed: rng.gen::<f32>() * 0.6 + 0.4,
                bob_amplitude: rng.gen::<f32>() * 0.5 + 0.3,
                phase: rng.gen::<f32>() * TAU,
                wobble_speed: rng.gen::<f32>() * 0.3 + 0.2,
                breath_scale: rng.gen::<f32>() * 0.5 + 0.5,
            };
            let shape = shapes[rng.gen_range(0..shapes.len())];
            let material = materials[rng.gen_range(0..materials.len())];
            scene.add_object(shape, material, m.transform(0.0))?;
            params.push(m);
        }

        let mut camera = PerspectiveCamera::new(60.0, 1.0, 0.1, 200.0);
        camera.position = Vec3::new(0.0, 0.0, 14.0);
        camera.look_at(Vec3::ZERO);

        Ok(Self {
            stage: Stage::new(scene, camera, viewport),
            params,
            tilt: PointerFollow::new(0.05),
        })
    }

    pub fn params(&self) -> &[Monolith] {
        &self.params
    }
}

impl Demo for Monoliths {
    fn kind(&self) -> DemoKind {
        DemoKind::Monoliths
    }

    fn stage(&self) -> &Stage {
        &self.stage
    }

    fn update(&mut self, frame: FrameTime) {
        let t = frame.elapsed;
        for (object, m) in self.stage.scene.objects.iter_mut().zip(&self.params) {
            object.transform = m.transform(t);
        }

        // x leans about the X axis (pitch), y about Y (yaw)
        let group = &mut self.stage.scene.group;
        let lean = self
            .tilt
            .step(Vec2::new(group.rotation.x, group.rotation.y), frames(frame.delta));
        group.rotation.x = lean.x;
        group.rotation.y = lean.y;
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => {
                let ndc = self.stage.pointer_ndc(x, y);
                self.tilt.target = Vec2::new(-ndc.y, ndc.x) * MAX_TILT;
            }
            InputEvent::Resize(viewport) => self.stage.resize(viewport),
            _ => {}
        }
    }
}
