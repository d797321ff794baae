//! Concentric rings of shapes orbiting inside one group. The group turns
//! slowly on its own and can be spun by dragging; it keeps spinning after
//! release and slows down.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::Rng;

use super::{CountRange, Demo, Stage};
use crate::camera::{DragRotate, PerspectiveCamera};
use crate::clock::FrameTime;
use crate::config::DemoKind;
use crate::error::DemoResult;
use crate::geometry::Shape;
use crate::input::{InputEvent, Viewport};
use crate::motion::{frames, phase, spin, wrap_angle};
use crate::scene::{Background, Color, Lights, Material, Scene, Transform};

pub const COUNT: CountRange = CountRange {
    default: 120,
    min: 12,
    max: 480,
};

const RINGS: [f32; 4] = [3.0, 4.5, 6.0, 7.5];
const COLORS: [u32; 4] = [0xf72585, 0xb5179e, 0x4895ef, 0x4cc9f0];
const BOB_AMPLITUDE: f32 = 0.3;
const BOB_RATE: f32 = 1.5;
/// Radians per second the group turns about Y on its own
const GROUP_SPIN: f32 = 0.15;
const TILT_LIMIT: f32 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitParams {
    pub ring: usize,
    pub radius: f32,
    pub base_angle: f32,
    /// Radians per second, negative on alternate rings
    pub angular_speed: f32,
    pub bob_phase: f32,
    /// Radians per reference frame on each axis
    pub spin: Vec3,
}

impl OrbitParams {
    /// Position within the group at time `t`
    pub fn position(&self, t: f64) -> Vec3 {
        let angle = phase(t, self.angular_speed, self.base_angle);
        Vec3::new(
            self.radius * angle.cos(),
            phase(t, BOB_RATE, self.bob_phase).sin() * BOB_AMPLITUDE,
            self.radius * angle.sin(),
        )
    }
}

pub struct Orbit {
    stage: Stage,
    params: Vec<OrbitParams>,
    drag: DragRotate,
}

impl Orbit {
    pub fn new<R: Rng>(count: Option<usize>, rng: &mut R, viewport: Viewport) -> DemoResult<Self> {
        let mut scene = Scene::new(Background::Gradient {
            top: Color::from_hex(0x1a1a40),
            bottom: Color::from_hex(0x000010),
        });
        scene.lights = Lights {
            ambient: 0.4,
            directional_from: Vec3::new(2.0, 6.0, 4.0),
            directional: 0.9,
        };
        let shapes = [
            scene.add_shape(Shape::Icosahedron { radius: 0.25 }),
            scene.add_shape(Shape::Octahedron { radius: 0.25 }),
            scene.add_shape(Shape::Tetrahedron { radius: 0.3 }),
            scene.add_shape(Shape::Cube { size: 0.3 }),
        ];
        let materials: Vec<usize> = COLORS
            .iter()
            .map(|&hex| scene.add_material(Material::solid(hex)))
            .collect();

        let count = COUNT.resolve(count);
        let mut params = Vec::with_capacity(count);
        for i in 0..count {
            let ring = i % RINGS.len();
            let direction = if ring % 2 == 0 { 1.0 } else { -1.0 };
            let p = OrbitParams {
                ring,
                radius: RINGS[ring],
                base_angle: rng.gen::<f32>() * TAU,
                angular_speed: (rng.gen::<f32>() * 0.4 + 0.2) * direction,
                bob_phase: rng.gen::<f32>() * TAU,
                spin: Vec3::new(
                    rng.gen::<f32>() * 0.02,
                    rng.gen::<f32>() * 0.02,
                    rng.gen::<f32>() * 0.02,
                ),
            };
            let shape = shapes[rng.gen_range(0..shapes.len())];
            scene.add_object(shape, materials[ring], Transform::at(p.position(0.0)))?;
            params.push(p);
        }

        let mut camera = PerspectiveCamera::new(60.0, 1.0, 0.1, 500.0);
        camera.position = Vec3::new(0.0, 4.0, 16.0);
        camera.look_at(Vec3::ZERO);

        Ok(Self {
            stage: Stage::new(scene, camera, viewport),
            params,
            drag: DragRotate::new(0.005, 0.92),
        })
    }

    pub fn params(&self) -> &[OrbitParams] {
        &self.params
    }

    pub fn drag(&self) -> &DragRotate {
        &self.drag
    }

    fn turn_group(&mut self, rotation: Vec2) {
        let group = &mut self.stage.scene.group;
        group.rotation.y = wrap_angle(group.rotation.y + rotation.x);
        group.rotation.x = (group.rotation.x + rotation.y).clamp(-TILT_LIMIT, TILT_LIMIT);
    }
}

impl Demo for Orbit {
    fn kind(&self) -> DemoKind {
        DemoKind::Orbit
    }

    fn stage(&self) -> &Stage {
        &self.stage
    }

    fn update(&mut self, frame: FrameTime) {
        let t = frame.elapsed;
        let n = frames(frame.delta);

        for (object, p) in self.stage.scene.objects.iter_mut().zip(&self.params) {
            object.transform.position = p.position(t);
            object.transform.rotation = spin(object.transform.rotation, p.spin, n);
        }

        let coast = self.drag.coast(n);
        self.turn_group(coast + Vec2::new(GROUP_SPIN * frame.delta, 0.0));
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => self.drag.press(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => {
                let rotation = self.drag.drag(Vec2::new(x, y));
                self.turn_group(rotation);
            }
            InputEvent::PointerUp => self.drag.release(),
            InputEvent::Resize(viewport) => self.stage.resize(viewport),
            InputEvent::Wheel { .. } => {}
        }
    }
}
