//! Dense swarm of wireframe polyhedra scattered over a sphere. Each one
//! spins, breathes and wanders a little around its starting point while
//! the camera drifts after the pointer.

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
use crate::motion::{breath, frames, jitter, spin};
use crate::scene::{Background, Color, Material, Scene, Transform};

pub const COUNT: CountRange = CountRange {
    default: 300,
    min: 10,
    max: 625,
};

const SPHERE_RADIUS: f32 = 10.0;
const SHAPE_RADIUS: f32 = 0.3;
const DISTURBANCE: f32 = 0.5;
const COLORS: [u32; 5] = [0xff0051, 0x00ff83, 0x2ecc71, 0x3498db, 0x9b59b6];
const CAMERA_DISTANCE: f32 = 15.0;
/// CSS pixels per unit of pointer offset
const POINTER_SCALE: f32 = 100.0;
const POINTER_GAIN: f32 = 0.05;
const FOLLOW_FACTOR: f32 = 0.05;

/// Constants attached to each polyhedron when it is created
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwarmParams {
    pub origin: Vec3,
    /// Radians per reference frame on each axis
    pub rotation_speed: Vec3,
    pub breath_offset: f32,
    pub breath_scale: f32,
}

pub struct Swarm {
    stage: Stage,
    params: Vec<SwarmParams>,
    follow: PointerFollow,
}

impl Swarm {
    pub fn new<R: Rng>(count: Option<usize>, rng: &mut R, viewport: Viewport) -> DemoResult<Self> {
        let mut scene = Scene::new(Background::Solid(Color::BLACK));
        let shapes = [
            scene.add_shape(Shape::Icosahedron { radius: SHAPE_RADIUS }),
            scene.add_shape(Shape::Octahedron { radius: SHAPE_RADIUS }),
            scene.add_shape(Shape::Tetrahedron { radius: SHAPE_RADIUS }),
        ];
        let materials: Vec<usize> = COLORS
            .iter()
            .map(|&hex| scene.add_material(Material::wireframe(hex, 0.8)))
            .collect();

        let count = COUNT.resolve(count);
        let mut params = Vec::with_capacity(count);
        for _ in 0..count {
            let shape = shapes[rng.gen_range(0..shapes.len())];
            let material = materials[rng.gen_range(0..materials.len())];

            // Uniform over the sphere surface
            let theta = rng.gen::<f32>() * TAU;
            let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
            let origin = Vec3::new(
                phi.sin() * theta.cos(),
                phi.sin() * theta.sin(),
                phi.cos(),
            ) * SPHERE_RADIUS;

            scene.add_object(shape, material, Transform::at(origin))?;
            params.push(SwarmParams {
                origin,
                rotation_speed: Vec3::new(
                    rng.gen::<f32>() * 0.02,
                    rng.gen::<f32>() * 0.02,
                    rng.gen::<f32>() * 0.02,
                ),
                breath_offset: rng.gen::<f32>() * TAU,
                breath_scale: rng.gen::<f32>() * 0.5 + 0.5,
            });
        }

        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 0.0, CAMERA_DISTANCE);

        Ok(Self {
            stage: Stage::new(scene, camera, viewport),
            params,
            follow: PointerFollow::new(FOLLOW_FACTOR),
        })
    }

    pub fn params(&self) -> &[SwarmParams] {
        &self.params
    }

    /// Where the camera is easing towards
    pub fn camera_target(&self) -> Vec2 {
        self.follow.target
    }
}

impl Demo for Swarm {
    fn kind(&self) -> DemoKind {
        DemoKind::Swarm
    }

    fn stage(&self) -> &Stage {
        &self.stage
    }

    fn update(&mut self, frame: FrameTime) {
        let t = frame.elapsed;
        let n = frames(frame.delta);

        for (object, p) in self.stage.scene.objects.iter_mut().zip(&self.params) {
            let transform = &mut object.transform;
            transform.rotation = spin(transform.rotation, p.rotation_speed, n);
            transform.scale = Vec3::splat(breath(t, p.breath_offset, p.breath_scale));
            transform.position = jitter(p.origin, t, p.breath_offset, DISTURBANCE);
        }

        let camera = &mut self.stage.camera;
        let eased = self.follow.step(camera.position.truncate(), n);
        camera.position.x = eased.x;
        camera.position.y = eased.y;
        camera.look_at(Vec3::ZERO);
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => {
                let offset = (Vec2::new(x, y) - self.stage.viewport.center()) / POINTER_SCALE;
                self.follow.target = Vec2::new(offset.x, -offset.y) * POINTER_GAIN;
            }
            InputEvent::Resize(viewport) => self.stage.resize(viewport),
            _ => {}
        }
    }
}
