pub type Matrix3 = [[f32; 3]; 3];
pub type Matrix4 = [[f32; 4]; 4];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rotation {
    X,
    Y,
    Z,
}

// a transform list is authored first-applied-first; see compose_2d/compose_3d
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform2d {
    Translate(f32, f32),
    Scale(f32, f32),
    Rotate(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform3d {
    Translate(f32, f32, f32),
    Scale(f32, f32, f32),
    Rotate(Rotation, f32),
}

pub fn identity_3() -> Matrix3 {
    [
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]
}

pub fn identity_4() -> Matrix4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

pub fn translation(tx: f32, ty: f32) -> Matrix3 {
    [
        [1.0, 0.0, tx],
        [0.0, 1.0, ty],
        [0.0, 0.0, 1.0],
    ]
}

pub fn scaling(sx: f32, sy: f32) -> Matrix3 {
    [
        [sx, 0.0, 0.0],
        [0.0, sy, 0.0],
        [0.0, 0.0, 1.0],
    ]
}

pub fn rotation(degrees: f32) -> Matrix3 {
    let radians = degrees.to_radians();
    let c = radians.cos();
    let s = radians.sin();
    [
        [c, -s, 0.0],
        [s, c, 0.0],
        [0.0, 0.0, 1.0],
    ]
}

pub fn translation_3d(tx: f32, ty: f32, tz: f32) -> Matrix4 {
    [
        [1.0, 0.0, 0.0, tx],
        [0.0, 1.0, 0.0, ty],
        [0.0, 0.0, 1.0, tz],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

pub fn scaling_3d(sx: f32, sy: f32, sz: f32) -> Matrix4 {
    [
        [sx, 0.0, 0.0, 0.0],
        [0.0, sy, 0.0, 0.0],
        [0.0, 0.0, sz, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

pub fn rotation_3d(axis: Rotation, degrees: f32) -> Matrix4 {
    let radians = degrees.to_radians();
    let c = radians.cos();
    let s = radians.sin();
    match axis {
        Rotation::X => [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
        Rotation::Y => [
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
        Rotation::Z => [
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    }
}

pub fn multiply_3(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut product = [[0.0; 3]; 3];
    for row in 0..3 {
        for col in 0..3 {
            for k in 0..3 {
                product[row][col] += a[row][k] * b[k][col];
            }
        }
    }
    product
}

pub fn multiply_4(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let mut product = [[0.0; 4]; 4];
    for row in 0..4 {
        for col in 0..4 {
            for k in 0..4 {
                product[row][col] += a[row][k] * b[k][col];
            }
        }
    }
    product
}

// column-vector convention: points transform as m * v
pub fn apply_3(m: &Matrix3, v: &[f32; 3]) -> [f32; 3] {
    let mut result = [0.0; 3];
    for row in 0..3 {
        for k in 0..3 {
            result[row] += m[row][k] * v[k];
        }
    }
    result
}

pub fn apply_4(m: &Matrix4, v: &[f32; 4]) -> [f32; 4] {
    let mut result = [0.0; 4];
    for row in 0..4 {
        for k in 0..4 {
            result[row] += m[row][k] * v[k];
        }
    }
    result
}

/// Composes an authored transform list into one net matrix.
///
/// The list is walked in reverse and each step's matrix is right-multiplied,
/// so `[scale, rotate, translate]` produces `T * R * S` and the first listed
/// step is the first one applied to a vertex. Walking forward instead would
/// silently invert the authored order.
pub fn compose_2d(steps: &[Transform2d]) -> Matrix3 {
    let mut net = identity_3();
    for step in steps.iter().rev() {
        let m = match *step {
            Transform2d::Translate(tx, ty) => translation(tx, ty),
            Transform2d::Scale(sx, sy) => scaling(sx, sy),
            Transform2d::Rotate(degrees) => rotation(degrees),
        };
        net = multiply_3(&net, &m);
    }
    net
}

pub fn compose_3d(steps: &[Transform3d]) -> Matrix4 {
    let mut net = identity_4();
    for step in steps.iter().rev() {
        let m = match *step {
            Transform3d::Translate(tx, ty, tz) => translation_3d(tx, ty, tz),
            Transform3d::Scale(sx, sy, sz) => scaling_3d(sx, sy, sz),
            Transform3d::Rotate(axis, degrees) => rotation_3d(axis, degrees),
        };
        net = multiply_4(&net, &m);
    }
    net
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{} != {}", a, b);
    }

    #[test]
    fn translation_moves_a_point() {
        let p = apply_3(&translation(3.0, -2.0), &[1.0, 1.0, 1.0]);
        assert_close(p[0], 4.0);
        assert_close(p[1], -1.0);
        assert_close(p[2], 1.0);
    }

    #[test]
    fn rotation_by_90_degrees_sends_x_to_y() {
        let p = apply_3(&rotation(90.0), &[1.0, 0.0, 1.0]);
        assert_close(p[0], 0.0);
        assert_close(p[1], 1.0);
    }

    #[test]
    fn multiplying_by_identity_changes_nothing() {
        let m = rotation_3d(Rotation::Y, 37.0);
        assert_eq!(multiply_4(&m, &identity_4()), m);
        assert_eq!(multiply_4(&identity_4(), &m), m);
    }

    #[test]
    fn compose_applies_steps_in_authored_order() {
        // scale first, then translate: (1, 0) -> (2, 0) -> (7, 0)
        let net = compose_2d(&[Transform2d::Scale(2.0, 2.0), Transform2d::Translate(5.0, 0.0)]);
        let p = apply_3(&net, &[1.0, 0.0, 1.0]);
        assert_close(p[0], 7.0);
        assert_close(p[1], 0.0);

        // the opposite order translates first and scales the offset too
        let net = compose_2d(&[Transform2d::Translate(5.0, 0.0), Transform2d::Scale(2.0, 2.0)]);
        let p = apply_3(&net, &[1.0, 0.0, 1.0]);
        assert_close(p[0], 12.0);
    }

    #[test]
    fn compose_3d_matches_manual_multiplication() {
        let steps = [
            Transform3d::Scale(2.0, 2.0, 2.0),
            Transform3d::Rotate(Rotation::Z, 90.0),
            Transform3d::Translate(1.0, 0.0, 0.0),
        ];
        let net = compose_3d(&steps);
        // scale then rotate then translate: (1, 0, 0) -> (2, 0, 0) -> (0, 2, 0) -> (1, 2, 0)
        let p = apply_4(&net, &[1.0, 0.0, 0.0, 1.0]);
        assert_close(p[0], 1.0);
        assert_close(p[1], 2.0);
        assert_close(p[2], 0.0);
        assert_close(p[3], 1.0);
    }

    #[test]
    fn empty_transform_list_composes_to_identity() {
        assert_eq!(compose_2d(&[]), identity_3());
        assert_eq!(compose_3d(&[]), identity_4());
    }
}
