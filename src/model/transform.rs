use std::ops::Mul;

/// 4x4 model transform. Storage is glam's column-major matrix; `row` reads it
/// back in row-major order, with translation in the last column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat4(pub glam::Mat4);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4(glam::Mat4::IDENTITY);

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        Self(glam::Mat4::from_translation(glam::Vec3::new(tx, ty, tz)))
    }

    /// Counter-clockwise rotation about +Z by `theta` radians.
    pub fn rotation_z(theta: f32) -> Self {
        Self(glam::Mat4::from_rotation_z(theta))
    }

    pub fn row(&self, r: usize) -> [f32; 4] {
        self.0.row(r).to_array()
    }

    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Applies the matrix to a point (w = 1).
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        self.0.transform_point3(glam::Vec3::from(p)).to_array()
    }

    /// Column-major layout expected by WGSL `mat4x4<f32>` uniforms.
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.0.to_cols_array_2d()
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4(self.0 * rhs.0)
    }
}
