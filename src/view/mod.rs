// VIEW: GPU setup and drawing
pub mod gpu_init;
pub mod render;
pub mod shader;

pub use gpu_init::{GpuContext, SurfaceErrorAction};
pub use render::{ModelUniform, TriangleRenderer};
pub use shader::ShaderSources;
