//! Two intertwined strands of small shapes. The helix twists over time and
//! its radius pulses; the camera follows the pointer and zooms with the
//! wheel.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use rand::Rng;

use super::{CountRange, Demo, Stage};
use crate::camera::{PerspectiveCamera, PointerFollow, Zoom};
use crate::clock::FrameTime;
use crate::config::DemoKind;
use crate::error::DemoResult;
use crate::geometry::Shape;
use crate::input::{InputEvent, Viewport};
use crate::motion::{breath, frames, phase, spin};
use crate::scene::{Background, Color, Material, Scene, Transform};

pub const COUNT: CountRange = CountRange {
    default: 200,
    min: 20,
    max: 600,
};

const STRAND_COLORS: [u32; 2] = [0x00ff83, 0xff0051];
const STEP_ANGLE: f32 = 0.3;
const STEP_HEIGHT: f32 = 0.12;
const TWIST_SPEED: f32 = 0.5;
const BASE_RADIUS: f32 = 3.0;
const RADIUS_PULSE: f32 = 0.5;
/// World units the camera may drift from the axis
const PAN_RANGE: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelixParams {
    pub index: usize,
    /// 0 or 1
    pub strand: usize,
    /// Height of this object on the axis
    pub height: f32,
    /// Radians per reference frame on each axis
    pub spin: Vec3,
}

impl HelixParams {
    pub fn radius(&self, t: f64) -> f32 {
        BASE_RADIUS + RADIUS_PULSE * phase(t, 1.0, 0.1 * self.index as f32).sin()
    }

    pub fn position(&self, t: f64) -> Vec3 {
        let step = (self.index / 2) as f32;
        let angle = step * STEP_ANGLE + self.strand as f32 * PI + phase(t, TWIST_SPEED, 0.0);
        let r = self.radius(t);
        Vec3::new(r * angle.cos(), self.height, r * angle.sin())
    }

    pub fn scale(&self, t: f64) -> f32 {
        breath(t, self.index as f32 * 0.15, 1.0)
    }
}

pub struct Helix {
    stage: Stage,
    params: Vec<HelixParams>,
    follow: PointerFollow,
    zoom: Zoom,
}

impl Helix {
    pub fn new<R: Rng>(count: Option<usize>, rng: &mut R, viewport: Viewport) -> DemoResult<Self> {
        let mut scene = Scene::new(Background::Gradient {
            top: Color::from_hex(0x0f2027),
            bottom: Color::from_hex(0x203a43),
        });
        let shapes = [
            scene.add_shape(Shape::Tetrahedron { radius: 0.18 }),
            scene.add_shape(Shape::Octahedron { radius: 0.18 }),
        ];
        let materials: Vec<usize> = STRAND_COLORS
            .iter()
            .map(|&hex| scene.add_material(Material::wireframe(hex, 0.9)))
            .collect();

        let count = COUNT.resolve(count);
        let steps = count.div_ceil(2);
        let mut params = Vec::with_capacity(count);
        for index in 0..count {
            let strand = index % 2;
            let p = HelixParams {
                index,
                strand,
                height: ((index / 2) as f32 - steps as f32 / 2.0) * STEP_HEIGHT,
                spin: Vec3::new(
                    rng.gen::<f32>() * 0.03,
                    rng.gen::<f32>() * 0.03,
                    rng.gen::<f32>() * 0.03,
                ),
            };
            let shape = shapes[rng.gen_range(0..shapes.len())];
            scene.add_object(shape, materials[strand], Transform::at(p.position(0.0)))?;
            params.push(p);
        }

        let zoom = Zoom::new(14.0, 6.0, 30.0, 0.01);
        let mut camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 200.0);
        camera.position = Vec3::new(0.0, 0.0, zoom.distance());
        camera.look_at(Vec3::ZERO);

        Ok(Self {
            stage: Stage::new(scene, camera, viewport),
            params,
            follow: PointerFollow::new(0.05),
            zoom,
        })
    }

    pub fn params(&self) -> &[HelixParams] {
        &self.params
    }

    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }
}

impl Demo for Helix {
    fn kind(&self) -> DemoKind {
        DemoKind::Helix
    }

    fn stage(&self) -> &Stage {
        &self.stage
    }

    fn update(&mut self, frame: FrameTime) {
        let t = frame.elapsed;
        let n = frames(frame.delta);

        for (object, p) in self.stage.scene.objects.iter_mut().zip(&self.params) {
            let transform = &mut object.transform;
            transform.position = p.position(t);
            transform.rotation = spin(transform.rotation, p.spin, n);
            transform.scale = Vec3::splat(p.scale(t));
        }

        let camera = &mut self.stage.camera;
        let eased = self.follow.step(camera.position.truncate(), n);
        camera.position = Vec3::new(eased.x, eased.y, self.zoom.distance());
        camera.look_at(Vec3::ZERO);
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => {
                self.follow.target = self.stage.pointer_ndc(x, y) * PAN_RANGE;
            }
            InputEvent::Wheel { delta_y } => {
                let distance = self.zoom.apply_wheel(delta_y);
                self.stage.camera.position.z = distance;
            }
            InputEvent::Resize(viewport) => self.stage.resize(viewport),
            _ => {}
        }
    }
}
