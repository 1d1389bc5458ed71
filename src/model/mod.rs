// MODEL: Pose, geometry and transform math
pub mod pose;
pub mod geometry;
pub mod transform;

pub use pose::Pose;
pub use geometry::{Vertex, TRIANGLE, max_extent, margin};
pub use transform::Mat4;
