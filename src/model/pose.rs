use super::transform::Mat4;

/// Position and orientation of the triangle in normalized device coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    /// Rotation about Z in radians. Unbounded; it is never wrapped.
    pub angle: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self { x, y, angle }
    }

    /// Saturating clamp of both position axes into `[-margin, margin]`.
    pub fn clamp_position(&mut self, margin: f32) {
        self.x = self.x.clamp(-margin, margin);
        self.y = self.y.clamp(-margin, margin);
    }

    /// `Translation(x, y, 0) * RotationZ(angle)`: spin about the local origin, then move.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::translation(self.x, self.y, 0.0) * Mat4::rotation_z(self.angle)
    }
}
