use crate::gfx::{BackendError, GraphicsApi, PendingClear, Uniform};
use crate::mesh::Vertex;
use crate::shader::ShaderSource;
use glam::Mat4;
use std::collections::BTreeMap;

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsCall {
    CompileProgram { label: &'static str },
    UploadGeometry { vertices: usize, indices: usize },
    EnableDepthTest,
    SetViewport { width: u32, height: u32 },
    SetUniform { uniform: Uniform, value: Mat4 },
    Clear,
    Draw(DrawRecord),
}

/// State captured at a draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub index_count: usize,
    pub cleared: bool,
    pub depth_test: bool,
    pub uniforms: BTreeMap<Uniform, Mat4>,
}

impl DrawRecord {
    pub fn uniform(&self, uniform: Uniform) -> Option<Mat4> {
        self.uniforms.get(&uniform).copied()
    }
}

/// Graphics backend that records calls instead of touching a GPU.
///
/// Used for headless runs and tests. State rules follow the wgpu backend:
/// drawing needs a compiled program and uploaded geometry.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<GraphicsCall>,
    uniforms: BTreeMap<Uniform, Mat4>,
    program: Option<&'static str>,
    index_count: Option<usize>,
    depth_test: bool,
    pending_clear: PendingClear,
    viewport: Option<(u32, u32)>,
    compile_error: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose shader compilation always fails with `message`.
    pub fn failing_compile(message: impl Into<String>) -> Self {
        Self {
            compile_error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[GraphicsCall] {
        &self.calls
    }

    pub fn draws(&self) -> impl Iterator<Item = &DrawRecord> {
        self.calls.iter().filter_map(|c| match c {
            GraphicsCall::Draw(d) => Some(d),
            _ => None,
        })
    }

    pub fn draw_count(&self) -> usize {
        self.draws().count()
    }

    pub fn uniform(&self, uniform: Uniform) -> Option<Mat4> {
        self.uniforms.get(&uniform).copied()
    }

    pub fn depth_test(&self) -> bool {
        self.depth_test
    }

    pub fn viewport(&self) -> Option<(u32, u32)> {
        self.viewport
    }
}

impl GraphicsApi for RecordingBackend {
    fn compile_program(&mut self, source: &ShaderSource) -> Result<(), BackendError> {
        if let Some(message) = &self.compile_error {
            return Err(BackendError::ShaderCompilation(message.clone()));
        }
        self.program = Some(source.label);
        self.calls.push(GraphicsCall::CompileProgram {
            label: source.label,
        });
        Ok(())
    }

    fn upload_geometry(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Result<(), BackendError> {
        self.index_count = Some(indices.len());
        self.calls.push(GraphicsCall::UploadGeometry {
            vertices: vertices.len(),
            indices: indices.len(),
        });
        Ok(())
    }

    fn enable_depth_test(&mut self) {
        self.depth_test = true;
        self.calls.push(GraphicsCall::EnableDepthTest);
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
        self.calls.push(GraphicsCall::SetViewport { width, height });
    }

    fn set_uniform(&mut self, uniform: Uniform, value: Mat4) {
        tracing::trace!(uniform = uniform.name(), "uniform recorded");
        self.uniforms.insert(uniform, value);
        self.calls.push(GraphicsCall::SetUniform { uniform, value });
    }

    fn clear(&mut self) {
        self.pending_clear.request();
        self.calls.push(GraphicsCall::Clear);
    }

    fn draw_indexed(&mut self) -> Result<(), BackendError> {
        let cleared = self
            .pending_clear
            .begin_draw(self.program.is_some(), self.index_count.is_some())?;
        let record = DrawRecord {
            index_count: self.index_count.unwrap_or_default(),
            cleared,
            depth_test: self.depth_test,
            uniforms: self.uniforms.clone(),
        };
        self.calls.push(GraphicsCall::Draw(record));
        Ok(())
    }
}
