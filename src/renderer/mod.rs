//! WebGPU rendering module
//!
//! Mission state becomes a `Scene` of draw commands, the scene is tessellated
//! into colored triangles, and the pipeline uploads and presents them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, playfield_to_ndc};
pub use scene::{DrawCommand, Scene, build};
pub use shapes::{TessellateOptions, tessellate};
pub use vertex::Vertex;
