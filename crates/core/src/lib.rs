//! Rotating color cube with darkened edges.
//!
//! Backend-agnostic core: cube geometry, the border shading program, the
//! transform math and a renderer that drives any [`GraphicsApi`] through the
//! [`FrameHooks`] callbacks an event loop invokes.
//!
//! # Invariants
//! - Geometry and the shader program are created once and never mutated.
//! - The model matrix is rebuilt from identity each frame from the
//!   accumulated angles, never composed incrementally.
//! - No draw is issued once the frame budget is spent.

pub mod gfx;
pub mod mesh;
pub mod recording;
pub mod renderer;
pub mod run;
pub mod shader;
pub mod transform;

pub use gfx::{BackendError, FrameHooks, GraphicsApi, PendingClear, Uniform};
pub use mesh::{CUBE_INDICES, CUBE_VERTICES, CubeMesh, MeshError, Vertex};
pub use recording::{DrawRecord, GraphicsCall, RecordingBackend};
pub use renderer::{RenderError, RotatingCubeRenderer};
pub use run::{FrameLoop, FramePacer, LoopState, RunConfig};
pub use shader::{BORDER_SHADER, ShaderSource};
pub use transform::{Rotation, Transforms};
