use crate::gfx::{BackendError, FrameHooks, GraphicsApi, Uniform};
use crate::mesh::{CubeMesh, MeshError};
use crate::shader::BORDER_SHADER;
use crate::transform::{Rotation, Transforms, window_projection};

/// Errors from the cube renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),
    #[error("graphics backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("draw requested before the first resize set a projection")]
    ProjectionUnset,
}

/// Draws the border-shaded color cube and spins it one step per frame.
///
/// Owns the geometry, the rotation angles and the three transform matrices.
/// All state changes happen through the [`FrameHooks`] callbacks.
pub struct RotatingCubeRenderer<G: GraphicsApi> {
    gfx: G,
    mesh: CubeMesh,
    rotation: Rotation,
    transforms: Transforms,
    frames_drawn: u64,
}

impl<G: GraphicsApi> RotatingCubeRenderer<G> {
    /// Compile the program, upload the cube and set the initial uniforms.
    pub fn new(gfx: G) -> Result<Self, RenderError> {
        Self::with_mesh(gfx, CubeMesh::color_cube())
    }

    pub fn with_mesh(mut gfx: G, mesh: CubeMesh) -> Result<Self, RenderError> {
        mesh.validate()?;
        gfx.compile_program(&BORDER_SHADER)?;
        gfx.upload_geometry(mesh.vertices(), mesh.indices())?;

        let transforms = Transforms::default();
        gfx.set_uniform(Uniform::Model, transforms.model);
        gfx.set_uniform(Uniform::View, transforms.view);

        tracing::debug!(
            vertices = mesh.vertices().len(),
            triangles = mesh.triangle_count(),
            "cube renderer initialized"
        );

        Ok(Self {
            gfx,
            mesh,
            rotation: Rotation::default(),
            transforms,
            frames_drawn: 0,
        })
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn transforms(&self) -> &Transforms {
        &self.transforms
    }

    pub fn mesh(&self) -> &CubeMesh {
        &self.mesh
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn gfx(&self) -> &G {
        &self.gfx
    }
}

impl<G: GraphicsApi> FrameHooks for RotatingCubeRenderer<G> {
    type Error = RenderError;

    fn on_init(&mut self) -> Result<(), RenderError> {
        self.gfx.enable_depth_test();
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        let projection = window_projection(width, height);
        self.gfx.set_viewport(width, height);
        self.gfx.set_uniform(Uniform::Projection, projection);
        self.transforms.projection = Some(projection);
        tracing::debug!(width, height, "projection updated");
        Ok(())
    }

    fn on_draw(&mut self, _dt: f32) -> Result<(), RenderError> {
        if self.transforms.projection.is_none() {
            return Err(RenderError::ProjectionUnset);
        }

        self.gfx.clear();
        self.gfx.draw_indexed()?;
        self.frames_drawn += 1;

        self.rotation.step();
        self.transforms.model = self.rotation.model_matrix();
        self.gfx.set_uniform(Uniform::Model, self.transforms.model);

        tracing::trace!(
            frame = self.frames_drawn,
            theta = self.rotation.theta,
            phi = self.rotation.phi,
            "frame drawn"
        );
        Ok(())
    }
}
