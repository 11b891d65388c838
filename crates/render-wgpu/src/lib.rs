//! wgpu backend for the border cube.
//!
//! Implements [`bordercube_core::GraphicsApi`] on a window surface: one
//! triangle-list pipeline, a uniform block holding the model, view and
//! projection matrices, and an optional depth buffer.
//!
//! # Invariants
//! - The surface and depth texture always share the configured size.
//! - A lost or outdated surface skips the frame instead of failing.

mod gpu;

pub use gpu::WgpuBackend;
