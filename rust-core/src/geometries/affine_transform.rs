// 3D transformation module: Contains the homogeneous pose used by every placed object
// This module provides rigid (plus uniform zoom) affine transformations in 3D

use std::ops::Mul;

use nalgebra::{Matrix3, Matrix4, Rotation3, Unit, Vector3, Vector4};
use serde::{Deserialize, Serialize};

use crate::config::TRANSFORM_TOLERANCE;
use crate::errors::RowlandError;
use crate::Result;

/// 3D affine transformation stored as a 4x4 homogeneous matrix
///
/// Represents a rotation, an optional uniform positive zoom and a translation.
/// Applied to a point in the order: zoom -> rotate -> translate. The last row is
/// always `(0, 0, 0, 1)` and the linear block is a positive multiple of a proper
/// rotation, so the inverse always exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Matrix4<f64>", into = "Matrix4<f64>")]
pub struct AffineTransform {
    matrix: Matrix4<f64>,
}

impl TryFrom<Matrix4<f64>> for AffineTransform {
    type Error = RowlandError;

    fn try_from(matrix: Matrix4<f64>) -> Result<Self> {
        Self::from_matrix(matrix)
    }
}

impl From<AffineTransform> for Matrix4<f64> {
    fn from(transform: AffineTransform) -> Self {
        transform.matrix
    }
}

impl AffineTransform {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation-only transformation
    ///
    /// # Arguments
    /// * `offset` - Translation offset
    pub fn translation(offset: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&offset),
        }
    }

    /// Create a rotation-only transformation from a rotation matrix
    ///
    /// # Arguments
    /// * `rotation` - Proper orthonormal 3x3 matrix
    pub fn rotation(rotation: Matrix3<f64>) -> Result<Self> {
        Self::compose(Vector3::zeros(), rotation, 1.0)
    }

    /// Create a rotation by `angle` (radians, right-hand rule) about `axis`
    ///
    /// # Arguments
    /// * `axis` - Rotation axis, does not need to be normalized
    /// * `angle` - Rotation angle in radians
    pub fn from_axis_angle(axis: Vector3<f64>, angle: f64) -> Result<Self> {
        if axis.norm() < TRANSFORM_TOLERANCE || !axis.iter().all(|c| c.is_finite()) {
            return Err(RowlandError::malformed(
                "Rotation axis must be a finite, non-zero vector.",
            ));
        }
        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(axis), angle);
        Ok(Self {
            matrix: rotation.to_homogeneous(),
        })
    }

    /// Compose a pose from translation, rotation and uniform zoom
    ///
    /// The resulting matrix is `[rotation * zoom | translation]`, i.e. a point in the
    /// local frame is first zoomed, then rotated and finally translated.
    ///
    /// # Arguments
    /// * `translation` - Position of the local origin in the global frame
    /// * `rotation` - Orientation; columns are the local axes in global coordinates
    /// * `zoom` - Uniform positive scale factor
    pub fn compose(translation: Vector3<f64>, rotation: Matrix3<f64>, zoom: f64) -> Result<Self> {
        if !(zoom > 0.0 && zoom.is_finite()) {
            return Err(RowlandError::malformed(format!(
                "Zoom must be a positive finite number, got {}.",
                zoom
            )));
        }
        if !translation.iter().all(|c| c.is_finite()) {
            return Err(RowlandError::malformed("Translation must be finite."));
        }
        check_rotation(&rotation)?;

        let mut matrix = Matrix4::identity();
        matrix
            .fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&(rotation * zoom));
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        Ok(Self { matrix })
    }

    /// Create a transformation from a 4x4 homogeneous matrix
    ///
    /// The matrix must have `(0, 0, 0, 1)` as last row and its linear block must be a
    /// positive uniform scale times a proper rotation.
    pub fn from_matrix(matrix: Matrix4<f64>) -> Result<Self> {
        let last_row = matrix.fixed_view::<1, 4>(3, 0);
        let expected = Vector4::new(0.0, 0.0, 0.0, 1.0).transpose();
        if (last_row - expected).norm() > TRANSFORM_TOLERANCE {
            return Err(RowlandError::malformed(
                "Last row of a homogeneous pose must be (0, 0, 0, 1).",
            ));
        }

        let linear: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into();
        let zoom = linear.determinant().cbrt();
        if !(zoom > 0.0 && zoom.is_finite()) {
            return Err(RowlandError::malformed(
                "Pose must have a positive determinant (no mirroring, no collapse).",
            ));
        }
        let translation: Vector3<f64> = matrix.fixed_view::<3, 1>(0, 3).into();
        Self::compose(translation, linear / zoom, zoom)
    }

    /// The homogeneous 4x4 matrix
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Translation part (position of the local origin in the global frame)
    pub fn translation_vector(&self) -> Vector3<f64> {
        self.matrix.fixed_view::<3, 1>(0, 3).into()
    }

    /// Linear 3x3 block (rotation times zoom)
    pub fn linear_part(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into()
    }

    /// Uniform zoom factor
    pub fn zoom(&self) -> f64 {
        self.linear_part().determinant().cbrt()
    }

    /// Rotation part with the zoom divided out
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        self.linear_part() / self.zoom()
    }

    /// Inverse transformation
    ///
    /// Computed in closed form from the rotation/zoom structure, which every
    /// constructor guarantees.
    pub fn inverse(&self) -> AffineTransform {
        let zoom = self.zoom();
        let inv_linear = self.rotation_matrix().transpose() / zoom;
        let inv_translation = -(inv_linear * self.translation_vector());

        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&inv_linear);
        matrix
            .fixed_view_mut::<3, 1>(0, 3)
            .copy_from(&inv_translation);
        AffineTransform { matrix }
    }

    /// Compose this transformation with another transformation
    ///
    /// The resulting transformation applies this transformation first,
    /// then the other transformation.
    pub fn then(&self, other: &AffineTransform) -> AffineTransform {
        AffineTransform {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Apply the transformation to a point (w = 1)
    pub fn apply_to_point(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.linear_part() * point + self.translation_vector()
    }

    /// Apply the transformation to a direction (w = 0, translation ignored)
    pub fn apply_to_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.linear_part() * vector
    }

    /// Map a point from the global frame back into the local frame
    pub fn apply_inverse_to_point(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.inverse().apply_to_point(point)
    }

    /// Map a direction from the global frame back into the local frame
    pub fn apply_inverse_to_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.inverse().apply_to_vector(vector)
    }

    /// Check if this is an identity transformation
    pub fn is_identity(&self) -> bool {
        (self.matrix - Matrix4::identity()).norm() < TRANSFORM_TOLERANCE
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Matrix product: `a * b` applies `b` first, then `a`
impl Mul for &AffineTransform {
    type Output = AffineTransform;

    fn mul(self, rhs: &AffineTransform) -> AffineTransform {
        AffineTransform {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

impl Mul for AffineTransform {
    type Output = AffineTransform;

    fn mul(self, rhs: AffineTransform) -> AffineTransform {
        &self * &rhs
    }
}

fn check_rotation(rotation: &Matrix3<f64>) -> Result<()> {
    if !rotation.iter().all(|c| c.is_finite()) {
        return Err(RowlandError::malformed("Rotation matrix must be finite."));
    }
    let deviation = (rotation.transpose() * rotation - Matrix3::identity()).norm();
    if deviation > TRANSFORM_TOLERANCE {
        return Err(RowlandError::malformed(format!(
            "Rotation matrix is not orthonormal (deviation {:e}).",
            deviation
        )));
    }
    if rotation.determinant() < 0.0 {
        return Err(RowlandError::malformed(
            "Rotation matrix must be a proper rotation (determinant +1).",
        ));
    }
    Ok(())
}
