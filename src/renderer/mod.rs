//! WebGPU rendering module
//!
//! The scene is built as a flat-colored triangle list in court coordinates
//! and mapped to NDC on upload.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
