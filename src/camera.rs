use crate::matrix::{Matrix4, identity_4, multiply_4, translation_3d};
use crate::vector::{cross_product, normalize_vector, subtract_vectors};

/// Projection kind. `None` is the explicit fallback for unrecognized kinds
/// and produces the identity matrix instead of an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Perspective,
    Orthographic,
    None,
}

/// Pure source of view/projection matrices; owns no render state. The
/// combined view-projection matrix is rebuilt by the scene context whenever
/// the camera changes and reused for every object after that.
pub struct Camera {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    pub ortho_bounds: Option<[f32; 4]>, // left, right, bottom, top
}

impl Camera {
    /// Look-at view matrix: an orthonormal camera basis combined with the
    /// negated camera position, rotation applied after translation so points
    /// are first moved into camera-relative space and then axis-aligned.
    pub fn view_matrix(&self) -> Matrix4 {
        let forward = normalize_vector(&subtract_vectors(&self.target, &self.position));
        let right = normalize_vector(&cross_product(&forward, &self.up));
        let up = cross_product(&right, &forward);

        let rotation = [
            [right[0], right[1], right[2], 0.0],
            [up[0], up[1], up[2], 0.0],
            [-forward[0], -forward[1], -forward[2], 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];

        let translation = translation_3d(-self.position[0], -self.position[1], -self.position[2]);

        multiply_4(&rotation, &translation)
    }

    pub fn projection_matrix(&self, projection: Projection) -> Matrix4 {
        match projection {
            Projection::Perspective => {
                let f = 1.0 / (self.fov.to_radians() / 2.0).tan();
                let depth_scale = (self.far + self.near) / (self.near - self.far);
                let depth_offset = (2.0 * self.far * self.near) / (self.near - self.far);
                [
                    [f / self.aspect_ratio, 0.0, 0.0, 0.0],
                    [0.0, f, 0.0, 0.0],
                    [0.0, 0.0, depth_scale, depth_offset],
                    [0.0, 0.0, -1.0, 0.0],
                ]
            }

            Projection::Orthographic => {
                // symmetric box derived from the aspect ratio unless the
                // scene supplies explicit bounds
                let [left, right, bottom, top] = self.ortho_bounds.unwrap_or_else(|| {
                    let right = self.aspect_ratio * 10.0;
                    let top = 10.0;
                    [-right, right, -top, top]
                });

                [
                    [2.0 / (right - left), 0.0, 0.0, -(right + left) / (right - left)],
                    [0.0, 2.0 / (top - bottom), 0.0, -(top + bottom) / (top - bottom)],
                    [0.0, 0.0, -2.0 / (self.far - self.near), -(self.far + self.near) / (self.far - self.near)],
                    [0.0, 0.0, 0.0, 1.0],
                ]
            }

            Projection::None => identity_4(),
        }
    }
}
