//! Procedural polyhedra.
//!
//! Every shape is described as a convex polyhedron (corner list plus
//! polygonal faces) and flattened into a flat-shaded triangle list for
//! solid drawing and a line list for wireframe drawing.

use std::collections::BTreeSet;

use glam::Vec3;

/// Shapes the demos can place in a scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Icosahedron { radius: f32 },
    Octahedron { radius: f32 },
    Tetrahedron { radius: f32 },
    Cube { size: f32 },
}

/// Vertex as uploaded to the GPU: position followed by normal
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// GPU-ready geometry for one shape
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Three vertices per triangle, normals are per face
    pub triangles: Vec<Vertex>,
    /// Two points per edge
    pub lines: Vec<Vec3>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn edge_count(&self) -> usize {
        self.lines.len() / 2
    }

    /// Interleaved `[px, py, pz, nx, ny, nz]` floats
    pub fn triangle_floats(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.triangles.len() * 6);
        for v in &self.triangles {
            out.extend_from_slice(&v.position);
            out.extend_from_slice(&v.normal);
        }
        out
    }

    /// Line points as `[x, y, z]` floats
    pub fn line_floats(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.lines.len() * 3);
        for p in &self.lines {
            out.extend_from_slice(&p.to_array());
        }
        out
    }
}

impl Shape {
    pub fn mesh(&self) -> MeshData {
        let (corners, faces) = self.polyhedron();
        flatten(&corners, &faces)
    }

    /// Distance from the centre to every corner
    pub fn circumradius(&self) -> f32 {
        match *self {
            Shape::Icosahedron { radius }
            | Shape::Octahedron { radius }
            | Shape::Tetrahedron { radius } => radius,
            Shape::Cube { size } => size * 0.5 * 3f32.sqrt(),
        }
    }

    fn polyhedron(&self) -> (Vec<Vec3>, Vec<Vec<usize>>) {
        match *self {
            Shape::Tetrahedron { radius } => {
                let corners = [
                    Vec3::new(1.0, 1.0, 1.0),
                    Vec3::new(-1.0, -1.0, 1.0),
                    Vec3::new(-1.0, 1.0, -1.0),
                    Vec3::new(1.0, -1.0, -1.0),
                ];
                let faces = vec![vec![2, 1, 0], vec![0, 3, 2], vec![1, 3, 0], vec![2, 3, 1]];
                (on_sphere(&corners, radius), faces)
            }
            Shape::Octahedron { radius } => {
                let corners = [
                    Vec3::X,
                    Vec3::NEG_X,
                    Vec3::Y,
                    Vec3::NEG_Y,
                    Vec3::Z,
                    Vec3::NEG_Z,
                ];
                let faces = vec![
                    vec![0, 2, 4],
                    vec![0, 4, 3],
                    vec![0, 3, 5],
                    vec![0, 5, 2],
                    vec![1, 2, 5],
                    vec![1, 5, 3],
                    vec![1, 3, 4],
                    vec![1, 4, 2],
                ];
                (on_sphere(&corners, radius), faces)
            }
            Shape::Icosahedron { radius } => {
                let t = (1.0 + 5f32.sqrt()) / 2.0;
                let corners = [
                    Vec3::new(-1.0, t, 0.0),
                    Vec3::new(1.0, t, 0.0),
                    Vec3::new(-1.0, -t, 0.0),
                    Vec3::new(1.0, -t, 0.0),
                    Vec3::new(0.0, -1.0, t),
                    Vec3::new(0.0, 1.0, t),
                    Vec3::new(0.0, -1.0, -t),
                    Vec3::new(0.0, 1.0, -t),
                    Vec3::new(t, 0.0, -1.0),
                    Vec3::new(t, 0.0, 1.0),
                    Vec3::new(-t, 0.0, -1.0),
                    Vec3::new(-t, 0.0, 1.0),
                ];
                let faces = [
                    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
                    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
                    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
                    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
                ];
                (
                    on_sphere(&corners, radius),
                    faces.iter().map(|f| f.to_vec()).collect(),
                )
            }
            Shape::Cube { size } => {
                let h = size * 0.5;
                let mut corners = Vec::with_capacity(8);
                for i in 0..8 {
                    let x = if i & 1 == 0 { -h } else { h };
                    let y = if i & 2 == 0 { -h } else { h };
                    let z = if i & 4 == 0 { -h } else { h };
                    corners.push(Vec3::new(x, y, z));
                }
                let faces = vec![
                    vec![0, 2, 3, 1], // -z
                    vec![4, 5, 7, 6], // +z
                    vec![0, 1, 5, 4], // -y
                    vec![2, 6, 7, 3], // +y
                    vec![0, 4, 6, 2], // -x
                    vec![1, 3, 7, 5], // +x
                ];
                (corners, faces)
            }
        }
    }
}

fn on_sphere(corners: &[Vec3], radius: f32) -> Vec<Vec3> {
    corners.iter().map(|c| c.normalize() * radius).collect()
}

/// Fan-triangulate convex faces with outward winding and collect the
/// unique face-boundary edges.
fn flatten(corners: &[Vec3], faces: &[Vec<usize>]) -> MeshData {
    let mut mesh = MeshData::default();
    let mut edges = BTreeSet::new();

    for face in faces {
        let centroid = face.iter().map(|&i| corners[i]).sum::<Vec3>() / face.len() as f32;
        for k in 1..face.len() - 1 {
            let (a, mut b, mut c) = (corners[face[0]], corners[face[k]], corners[face[k + 1]]);
            let mut normal = (b - a).cross(c - a).normalize();
            if normal.dot(centroid) < 0.0 {
                std::mem::swap(&mut b, &mut c);
                normal = -normal;
            }
            for p in [a, b, c] {
                mesh.triangles.push(Vertex {
                    position: p.to_array(),
                    normal: normal.to_array(),
                });
            }
        }
        for k in 0..face.len() {
            let (i, j) = (face[k], face[(k + 1) % face.len()]);
            edges.insert((i.min(j), i.max(j)));
        }
    }

    for (i, j) in edges {
        mesh.lines.push(corners[i]);
        mesh.lines.push(corners[j]);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platonic_counts() {
        let cases = [
            (Shape::Tetrahedron { radius: 1.0 }, 4, 6),
            (Shape::Octahedron { radius: 1.0 }, 8, 12),
            (Shape::Icosahedron { radius: 1.0 }, 20, 30),
            (Shape::Cube { size: 1.0 }, 12, 12),
        ];
        for (shape, triangles, edges) in cases {
            let mesh = shape.mesh();
            assert_eq!(mesh.triangle_count(), triangles, "{:?}", shape);
            assert_eq!(mesh.edge_count(), edges, "{:?}", shape);
        }
    }

    #[test]
    fn corners_sit_on_circumsphere() {
        for shape in [
            Shape::Tetrahedron { radius: 0.3 },
            Shape::Octahedron { radius: 1.2 },
            Shape::Icosahedron { radius: 0.25 },
            Shape::Cube { size: 1.6 },
        ] {
            let r = shape.circumradius();
            for p in shape.mesh().lines {
                assert!((p.length() - r).abs() < 1e-5, "{:?}", shape);
            }
        }
    }

    #[test]
    fn normals_point_outward() {
        let mesh = Shape::Icosahedron { radius: 0.3 }.mesh();
        for tri in mesh.triangles.chunks(3) {
            let centre = tri
                .iter()
                .map(|v| Vec3::from_array(v.position))
                .sum::<Vec3>();
            let normal = Vec3::from_array(tri[0].normal);
            assert!(normal.dot(centre) > 0.0);
        }
    }
}
