//! Scene graph: background, lights, palettes, one root group and a flat
//! list of objects drawn relative to that group.

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

use crate::error::{DemoError, DemoResult};
use crate::geometry::Shape;

/// Linear RGB colour in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Surface description shared by many objects
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    /// Draw edges only
    pub wireframe: bool,
    /// Shade with ambient + directional light; unlit materials use the flat colour
    pub lit: bool,
}

impl Material {
    pub fn wireframe(hex: u32, opacity: f32) -> Self {
        Self {
            color: Color::from_hex(hex),
            opacity,
            wireframe: true,
            lit: false,
        }
    }

    pub fn solid(hex: u32) -> Self {
        Self {
            color: Color::from_hex(hex),
            opacity: 1.0,
            wireframe: false,
            lit: true,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Background {
    Solid(Color),
    /// Vertical gradient from the top of the viewport to the bottom
    Gradient { top: Color, bottom: Color },
    /// Linear fog fading objects into `color` between `near` and `far`
    Fog { color: Color, near: f32, far: f32 },
}

impl Background {
    /// Colour the frame is cleared with before anything is drawn
    pub fn clear_color(&self) -> Color {
        match *self {
            Background::Solid(color) => color,
            Background::Gradient { bottom, .. } => bottom,
            Background::Fog { color, .. } => color,
        }
    }

    /// How far an object `depth` units in front of the camera is blended
    /// into the fog colour: 0 up to `near`, rising linearly to 1 at `far`.
    /// Always 0 without fog.
    pub fn fog_amount(&self, depth: f32) -> f32 {
        match *self {
            Background::Fog { near, far, .. } if far > near => {
                ((depth - near) / (far - near)).clamp(0.0, 1.0)
            }
            Background::Fog { far, .. } => {
                if depth >= far {
                    1.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lights {
    pub ambient: f32,
    /// Position the directional light shines from, towards the origin
    pub directional_from: Vec3,
    pub directional: f32,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient: 0.6,
            directional_from: Vec3::ONE,
            directional: 0.8,
        }
    }
}

impl Lights {
    /// Unit vector pointing from the surface towards the light
    pub fn direction(&self) -> Vec3 {
        self.directional_from.normalize_or_zero()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// One mesh instance: palette references plus its current transform
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    pub shape: usize,
    pub material: usize,
    pub transform: Transform,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub background: Background,
    pub lights: Lights,
    shapes: Vec<Shape>,
    materials: Vec<Material>,
    /// Root group every object hangs off
    pub group: Transform,
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new(background: Background) -> Self {
        Self {
            background,
            lights: Lights::default(),
            shapes: Vec::new(),
            materials: Vec::new(),
            group: Transform::default(),
            objects: Vec::new(),
        }
    }

    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Add an object, returning its index. Palette indices must exist.
    pub fn add_object(
        &mut self,
        shape: usize,
        material: usize,
        transform: Transform,
    ) -> DemoResult<usize> {
        if shape >= self.shapes.len() {
            return Err(DemoError::Palette {
                kind: "shape",
                index: shape,
                len: self.shapes.len(),
            });
        }
        if material >= self.materials.len() {
            return Err(DemoError::Palette {
                kind: "material",
                index: material,
                len: self.materials.len(),
            });
        }
        self.objects.push(SceneObject {
            shape,
            material,
            transform,
        });
        Ok(self.objects.len() - 1)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn material_of(&self, object: &SceneObject) -> &Material {
        &self.materials[object.material]
    }

    pub fn world_matrix(&self, object: &SceneObject) -> Mat4 {
        self.group.matrix() * object.transform.matrix()
    }

    /// Inverse-transpose of the world matrix's linear part, which keeps
    /// normals perpendicular to surfaces under non-uniform scale
    pub fn normal_matrix(&self, object: &SceneObject) -> Mat3 {
        let linear = Mat3::from_mat4(self.world_matrix(object));
        if linear.determinant().abs() > f32::EPSILON {
            linear.inverse().transpose()
        } else {
            linear
        }
    }
}
