// Geometries module: Contains the pose representation shared by all placed objects
// This module provides homogeneous 3D affine transformations (rotation, uniform zoom, translation)

// ======================== MODULE DECLARATIONS ========================
pub mod affine_transform;

// Test modules
mod _tests_affine_transform;

// ======================== GEOMETRIC UTILITIES ========================
pub use affine_transform::AffineTransform; // struct - 4x4 homogeneous pose
// AffineTransform impl methods:
//   identity() -> Self                                          - creates identity transformation
//   translation(offset: Vector3<f64>) -> Self                   - creates pure translation transform
//   rotation(rotation: Matrix3<f64>) -> Result<Self>            - creates pure rotation transform
//   from_axis_angle(axis: Vector3<f64>, angle: f64) -> Result<Self> - rotation about axis (radians)
//   compose(t: Vector3<f64>, r: Matrix3<f64>, zoom: f64) -> Result<Self> - general pose [r*zoom | t]
//   from_matrix(matrix: Matrix4<f64>) -> Result<Self>           - validated pose from 4x4 matrix
//   matrix(&self) -> &Matrix4<f64>                              - homogeneous matrix
//   translation_vector(&self) -> Vector3<f64>                   - translation part
//   linear_part(&self) -> Matrix3<f64>                          - rotation times zoom
//   rotation_matrix(&self) -> Matrix3<f64>                      - rotation with zoom removed
//   zoom(&self) -> f64                                          - uniform scale factor
//   inverse(&self) -> AffineTransform                           - returns inverse transformation
//   then(&self, other: &AffineTransform) -> AffineTransform     - applies self, then other
//   apply_to_point(&self, p: &Vector3<f64>) -> Vector3<f64>     - maps local point to global
//   apply_to_vector(&self, v: &Vector3<f64>) -> Vector3<f64>    - maps local direction to global
//   apply_inverse_to_point(&self, p: &Vector3<f64>) -> Vector3<f64>  - maps global point to local
//   apply_inverse_to_vector(&self, v: &Vector3<f64>) -> Vector3<f64> - maps global direction to local
//   is_identity(&self) -> bool                                  - checks for identity
