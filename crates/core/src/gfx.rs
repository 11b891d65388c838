use crate::mesh::Vertex;
use crate::shader::ShaderSource;
use glam::Mat4;

/// Matrix uniforms of the cube program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Uniform {
    Model,
    View,
    Projection,
}

impl Uniform {
    /// Size of one `mat4x4<f32>` in the uniform block.
    pub const MATRIX_SIZE: u64 = std::mem::size_of::<[[f32; 4]; 4]>() as u64;

    pub fn name(self) -> &'static str {
        match self {
            Uniform::Model => "u_model",
            Uniform::View => "u_view",
            Uniform::Projection => "u_projection",
        }
    }

    /// Byte offset of the matrix inside the uniform block.
    pub fn offset(self) -> u64 {
        let slot = match self {
            Uniform::Model => 0,
            Uniform::View => 1,
            Uniform::Projection => 2,
        };
        slot * Self::MATRIX_SIZE
    }
}

/// Errors raised by a graphics backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("failed to create surface: {0}")]
    Surface(String),
    #[error("failed to request device: {0}")]
    Device(String),
    #[error("shader compilation failed: {0}")]
    ShaderCompilation(String),
    #[error("no program compiled before draw")]
    MissingProgram,
    #[error("no geometry uploaded before draw")]
    MissingGeometry,
    #[error("failed to acquire frame: {0}")]
    Frame(String),
}

/// Clear request held until the next draw that actually runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PendingClear(bool);

impl PendingClear {
    pub fn request(&mut self) {
        self.0 = true;
    }

    pub fn is_requested(&self) -> bool {
        self.0
    }

    /// Check the draw preconditions, then consume the request. A draw that
    /// fails its checks leaves the request in place.
    pub fn begin_draw(
        &mut self,
        has_program: bool,
        has_geometry: bool,
    ) -> Result<bool, BackendError> {
        if !has_program {
            return Err(BackendError::MissingProgram);
        }
        if !has_geometry {
            return Err(BackendError::MissingGeometry);
        }
        Ok(std::mem::take(&mut self.0))
    }
}

/// The graphics collaborator the renderer issues calls against.
///
/// Calls mirror a small immediate-mode API: state set here applies to the
/// next `draw_indexed`.
pub trait GraphicsApi {
    fn compile_program(&mut self, source: &ShaderSource) -> Result<(), BackendError>;

    fn upload_geometry(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Result<(), BackendError>;

    fn enable_depth_test(&mut self);

    fn set_viewport(&mut self, width: u32, height: u32);

    fn set_uniform(&mut self, uniform: Uniform, value: Mat4);

    /// Clear color and depth before the next draw.
    fn clear(&mut self);

    /// Draw the uploaded indices as a triangle list.
    fn draw_indexed(&mut self) -> Result<(), BackendError>;
}

/// Window event callbacks, invoked by the event loop.
pub trait FrameHooks {
    type Error;

    /// Called once before the first frame.
    fn on_init(&mut self) -> Result<(), Self::Error>;

    fn on_resize(&mut self, width: u32, height: u32) -> Result<(), Self::Error>;

    /// Called once per frame; `dt` is seconds since the previous frame.
    fn on_draw(&mut self, dt: f32) -> Result<(), Self::Error>;
}
