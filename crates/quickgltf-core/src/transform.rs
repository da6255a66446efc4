//! Node transforms.
//!
//! Matrices are 4x4, column-major, as stored in glTF.

use serde::Serialize;

pub type Matrix4 = [f32; 16];

pub const IDENTITY_MATRIX: Matrix4 = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Decomposed transform. Rotation is a unit quaternion `[x, y, z, w]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trs {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl Default for Trs {
    fn default() -> Self {
        Self {
            translation: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

impl Trs {
    /// Composes `T * R * S`.
    pub fn to_matrix(&self) -> Matrix4 {
        let t = self.translation;
        let s = self.scale;
        let [qx, qy, qz, qw] = self.rotation;

        let xx = qx * qx;
        let yy = qy * qy;
        let zz = qz * qz;
        let xy = qx * qy;
        let xz = qx * qz;
        let yz = qy * qz;
        let wx = qw * qx;
        let wy = qw * qy;
        let wz = qw * qz;

        // rot[row][col]
        let rot = [
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy)],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx)],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy)],
        ];

        [
            rot[0][0] * s[0], rot[1][0] * s[0], rot[2][0] * s[0], 0.0, //
            rot[0][1] * s[1], rot[1][1] * s[1], rot[2][1] * s[1], 0.0, //
            rot[0][2] * s[2], rot[1][2] * s[2], rot[2][2] * s[2], 0.0, //
            t[0], t[1], t[2], 1.0,
        ]
    }
}

/// Local transform of a node: a raw matrix or a decomposed TRS, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum NodeTransform {
    Matrix(Matrix4),
    Trs(Trs),
}

impl Default for NodeTransform {
    fn default() -> Self {
        NodeTransform::Trs(Trs::default())
    }
}

impl NodeTransform {
    pub fn to_matrix(&self) -> Matrix4 {
        match self {
            NodeTransform::Matrix(m) => *m,
            NodeTransform::Trs(trs) => trs.to_matrix(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.to_matrix() == IDENTITY_MATRIX
    }
}

/// Returns `a * b`.
pub fn multiply(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let mut out = [0.0f32; 16];
    for col in 0..4 {
        for row in 0..4 {
            out[col * 4 + row] = (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum();
        }
    }
    out
}
