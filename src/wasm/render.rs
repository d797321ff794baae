use js_sys::Float32Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::camera::PerspectiveCamera;
use crate::input::Viewport;
use crate::scene::{Background, Scene, SceneObject};

const MESH_VERT: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform mat3 u_normal;
out vec3 v_normal;
out float v_depth;
void main() {
    vec4 view = u_view * u_model * vec4(a_position, 1.0);
    v_normal = u_normal * a_normal;
    v_depth = -view.z;
    gl_Position = u_projection * view;
}
"#;

const MESH_FRAG: &str = r#"#version 300 es
precision mediump float;
in vec3 v_normal;
in float v_depth;
uniform vec4 u_color;
uniform float u_lit;
uniform float u_ambient;
uniform vec3 u_light_dir;
uniform float u_light;
uniform float u_fog;
uniform vec3 u_fog_color;
uniform vec2 u_fog_range;
out vec4 out_color;
void main() {
    vec3 color = u_color.rgb;
    if (u_lit > 0.5) {
        float diffuse = max(dot(normalize(v_normal), u_light_dir), 0.0);
        color *= min(u_ambient + diffuse * u_light, 1.0);
    }
    if (u_fog > 0.5) {
        float span = max(u_fog_range.y - u_fog_range.x, 1e-4);
        float fog = clamp((v_depth - u_fog_range.x) / span, 0.0, 1.0);
        color = mix(color, u_fog_color, fog);
    }
    out_color = vec4(color, u_color.a);
}
"#;

// Fullscreen triangle from gl_VertexID, no attributes
const GRADIENT_VERT: &str = r#"#version 300 es
out float v_t;
void main() {
    vec2 p = vec2(float((gl_VertexID << 1) & 2), float(gl_VertexID & 2)) * 2.0 - 1.0;
    v_t = p.y * 0.5 + 0.5;
    gl_Position = vec4(p, 0.999, 1.0);
}
"#;

const GRADIENT_FRAG: &str = r#"#version 300 es
precision mediump float;
in float v_t;
uniform vec3 u_top;
uniform vec3 u_bottom;
out vec4 out_color;
void main() {
    out_color = vec4(mix(u_bottom, u_top, clamp(v_t, 0.0, 1.0)), 1.0);
}
"#;

struct MeshUniforms {
    model: Option<WebGlUniformLocation>,
    normal: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    lit: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    light_dir: Option<WebGlUniformLocation>,
    light: Option<WebGlUniformLocation>,
    fog: Option<WebGlUniformLocation>,
    fog_color: Option<WebGlUniformLocation>,
    fog_range: Option<WebGlUniformLocation>,
}

/// One palette shape on the GPU
struct GpuShape {
    triangles: WebGlVertexArrayObject,
    triangle_vertices: i32,
    lines: WebGlVertexArrayObject,
    line_vertices: i32,
    // Kept alive for as long as the VAOs reference them
    _buffers: [WebGlBuffer; 2],
}

/// WebGL2 renderer for a [`Scene`]. Shapes are uploaded once; each frame
/// only uniforms change.
pub struct Renderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    mesh: WebGlProgram,
    uniforms: MeshUniforms,
    gradient: WebGlProgram,
    gradient_top: Option<WebGlUniformLocation>,
    gradient_bottom: Option<WebGlUniformLocation>,
    gradient_vao: WebGlVertexArrayObject,
    shapes: Vec<GpuShape>,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement, scene: &Scene) -> Result<Self, JsValue> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or("WebGL2 not supported")?
            .dyn_into()?;

        let mesh = link_program(&gl, MESH_VERT, MESH_FRAG)?;
        let uniform = |name: &str| gl.get_uniform_location(&mesh, name);
        let uniforms = MeshUniforms {
            model: uniform("u_model"),
            normal: uniform("u_normal"),
            view: uniform("u_view"),
            projection: uniform("u_projection"),
            color: uniform("u_color"),
            lit: uniform("u_lit"),
            ambient: uniform("u_ambient"),
            light_dir: uniform("u_light_dir"),
            light: uniform("u_light"),
            fog: uniform("u_fog"),
            fog_color: uniform("u_fog_color"),
            fog_range: uniform("u_fog_range"),
        };

        let gradient = link_program(&gl, GRADIENT_VERT, GRADIENT_FRAG)?;
        let gradient_top = gl.get_uniform_location(&gradient, "u_top");
        let gradient_bottom = gl.get_uniform_location(&gradient, "u_bottom");
        let gradient_vao = gl.create_vertex_array().ok_or("failed to create VAO")?;

        let shapes = scene
            .shapes()
            .iter()
            .map(|shape| upload_shape(&gl, &shape.mesh()))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("uploaded {} shapes", shapes.len());

        gl.enable(GL::DEPTH_TEST);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);

        Ok(Self {
            canvas,
            gl,
            mesh,
            uniforms,
            gradient,
            gradient_top,
            gradient_bottom,
            gradient_vao,
            shapes,
        })
    }

    /// Match the drawing buffer to the window, in device pixels
    pub fn resize(&self, viewport: Viewport) -> Result<(), JsValue> {
        let (width, height) = viewport.physical_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", viewport.width))?;
        style.set_property("height", &format!("{}px", viewport.height))?;
        self.gl.viewport(0, 0, width as i32, height as i32);
        Ok(())
    }

    pub fn render(&self, scene: &Scene, camera: &PerspectiveCamera) {
        let gl = &self.gl;
        let clear = scene.background.clear_color();
        gl.clear_color(clear.r, clear.g, clear.b, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        if let Background::Gradient { top, bottom } = scene.background {
            gl.disable(GL::DEPTH_TEST);
            gl.use_program(Some(&self.gradient));
            gl.uniform3fv_with_f32_array(self.gradient_top.as_ref(), &top.to_array());
            gl.uniform3fv_with_f32_array(self.gradient_bottom.as_ref(), &bottom.to_array());
            gl.bind_vertex_array(Some(&self.gradient_vao));
            gl.draw_arrays(GL::TRIANGLES, 0, 3);
            gl.enable(GL::DEPTH_TEST);
        }

        gl.use_program(Some(&self.mesh));
        let u = &self.uniforms;
        gl.uniform_matrix4fv_with_f32_array(u.view.as_ref(), false, &camera.view().to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(
            u.projection.as_ref(),
            false,
            &camera.projection().to_cols_array(),
        );
        gl.uniform1f(u.ambient.as_ref(), scene.lights.ambient);
        gl.uniform3fv_with_f32_array(u.light_dir.as_ref(), &scene.lights.direction().to_array());
        gl.uniform1f(u.light.as_ref(), scene.lights.directional);
        match scene.background {
            Background::Fog { color, near, far } => {
                gl.uniform1f(u.fog.as_ref(), 1.0);
                gl.uniform3fv_with_f32_array(u.fog_color.as_ref(), &color.to_array());
                gl.uniform2f(u.fog_range.as_ref(), near, far);
            }
            _ => gl.uniform1f(u.fog.as_ref(), 0.0),
        }

        // Opaque first with depth writes, then blended objects on top
        let (blended, opaque): (Vec<&SceneObject>, Vec<&SceneObject>) = scene
            .objects
            .iter()
            .partition(|o| scene.material_of(o).is_transparent());

        gl.disable(GL::BLEND);
        gl.depth_mask(true);
        for object in opaque {
            self.draw_object(scene, object);
        }
        gl.enable(GL::BLEND);
        gl.depth_mask(false);
        for object in blended {
            self.draw_object(scene, object);
        }
        gl.depth_mask(true);
        gl.bind_vertex_array(None);
    }

    fn draw_object(&self, scene: &Scene, object: &SceneObject) {
        let gl = &self.gl;
        let u = &self.uniforms;
        let material = scene.material_of(object);
        let Some(shape) = self.shapes.get(object.shape) else {
            return;
        };

        gl.uniform_matrix4fv_with_f32_array(
            u.model.as_ref(),
            false,
            &scene.world_matrix(object).to_cols_array(),
        );
        gl.uniform_matrix3fv_with_f32_array(
            u.normal.as_ref(),
            false,
            &scene.normal_matrix(object).to_cols_array(),
        );
        let c = material.color;
        gl.uniform4f(u.color.as_ref(), c.r, c.g, c.b, material.opacity);
        gl.uniform1f(u.lit.as_ref(), if material.lit { 1.0 } else { 0.0 });

        if material.wireframe {
            gl.bind_vertex_array(Some(&shape.lines));
            gl.draw_arrays(GL::LINES, 0, shape.line_vertices);
        } else {
            gl.bind_vertex_array(Some(&shape.triangles));
            gl.draw_arrays(GL::TRIANGLES, 0, shape.triangle_vertices);
        }
    }
}

fn upload_shape(gl: &GL, mesh: &crate::geometry::MeshData) -> Result<GpuShape, JsValue> {
    const STRIDE: i32 = 6 * 4;

    let triangles = gl.create_vertex_array().ok_or("failed to create VAO")?;
    gl.bind_vertex_array(Some(&triangles));
    let triangle_buffer = upload_floats(gl, &mesh.triangle_floats())?;
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, STRIDE, 0);
    gl.enable_vertex_attrib_array(1);
    gl.vertex_attrib_pointer_with_i32(1, 3, GL::FLOAT, false, STRIDE, 3 * 4);

    let lines = gl.create_vertex_array().ok_or("failed to create VAO")?;
    gl.bind_vertex_array(Some(&lines));
    let line_buffer = upload_floats(gl, &mesh.line_floats())?;
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, 0, 0);
    // Lines are unlit; the normal attribute reads a constant
    gl.disable_vertex_attrib_array(1);
    gl.vertex_attrib3f(1, 0.0, 0.0, 1.0);

    gl.bind_vertex_array(None);

    Ok(GpuShape {
        triangles,
        triangle_vertices: mesh.triangles.len() as i32,
        lines,
        line_vertices: mesh.lines.len() as i32,
        _buffers: [triangle_buffer, line_buffer],
    })
}

fn upload_floats(gl: &GL, data: &[f32]) -> Result<WebGlBuffer, JsValue> {
    let buffer = gl.create_buffer().ok_or("failed to create buffer")?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let array = Float32Array::from(data);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
    Ok(buffer)
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl.create_shader(kind).ok_or("failed to create shader")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(JsValue::from_str(&format!("shader compile failed: {}", info)))
    }
}

fn link_program(gl: &GL, vert: &str, frag: &str) -> Result<WebGlProgram, JsValue> {
    let vs = compile_shader(gl, GL::VERTEX_SHADER, vert)?;
    let fs = compile_shader(gl, GL::FRAGMENT_SHADER, frag)?;
    let program = gl.create_program().ok_or("failed to create program")?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        Err(JsValue::from_str(&format!("program link failed: {}", info)))
    }
}
