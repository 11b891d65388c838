use glam::{Vec3, Vec4};

// Shared by the Rust constant and the WGSL source.
macro_rules! border_threshold {
    () => {
        0.85
    };
}

/// Coordinate magnitude past which a fragment counts as part of an edge.
pub const BORDER_THRESHOLD: f32 = border_threshold!();

/// Opaque black, written on cube edges.
pub const BORDER_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// A WGSL program with its stage entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSource {
    pub label: &'static str,
    pub wgsl: &'static str,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
}

/// Color cube with darkened edges.
///
/// The vertex stage forwards the object-space position so the fragment stage
/// can find the edges: a fragment is on an edge when two of its three
/// coordinate magnitudes are both past the threshold.
pub const BORDER_SHADER: ShaderSource = ShaderSource {
    label: "border_cube_shader",
    wgsl: BORDER_CUBE_WGSL,
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
};

const BORDER_CUBE_WGSL: &str = concat!(
    r#"
struct Transforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> transforms: Transforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = transforms.projection * transforms.view * transforms.model
        * vec4<f32>(vertex.position, 1.0);
    out.position = vertex.position;
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let p = abs(in.position);
    let xy = min(p.x, p.y);
    let xz = min(p.x, p.z);
    let yz = min(p.y, p.z);
    let b = "#,
    border_threshold!(),
    r#";

    if (xy > b || xz > b || yz > b) {
        return vec4<f32>(0.0, 0.0, 0.0, 1.0);
    }
    return in.color;
}
"#
);

/// CPU mirror of the fragment stage of [`BORDER_SHADER`].
pub fn shade(position: Vec3, color: Vec4) -> Vec4 {
    if on_border(position) {
        BORDER_COLOR
    } else {
        color
    }
}

/// True when at least two coordinate magnitudes exceed the threshold.
pub fn on_border(position: Vec3) -> bool {
    let p = position.abs();
    let xy = p.x.min(p.y);
    let xz = p.x.min(p.z);
    let yz = p.y.min(p.z);
    xy > BORDER_THRESHOLD || xz > BORDER_THRESHOLD || yz > BORDER_THRESHOLD
}
