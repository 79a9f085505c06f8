/// Utility functions for the rowland-torus Python module
use nalgebra::{Matrix3, Matrix4, Vector3};
use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyValueError};
use pyo3::prelude::*;
use rowland_torus::geometries::AffineTransform;
use rowland_torus::RowlandError;

create_exception!(
    rowland_torus_py,
    ElementPlacementError,
    PyException,
    "No intersection with the Rowland torus in the search range of an element array."
);

/// Get the version of the rowland-torus library
#[pyfunction]
pub fn version() -> &'static str {
    rowland_torus::VERSION
}

/// Map library errors onto Python exceptions
pub fn to_py_err(error: RowlandError) -> PyErr {
    match error {
        RowlandError::ElementPlacement { .. } => ElementPlacementError::new_err(error.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Pose from a row-major 4x4 nested list
pub fn pose_from_rows(rows: [[f64; 4]; 4]) -> PyResult<AffineTransform> {
    AffineTransform::from_matrix(Matrix4::from_fn(|i, j| rows[i][j])).map_err(to_py_err)
}

/// Pose as a row-major 4x4 nested list
pub fn pose_to_rows(pose: &AffineTransform) -> [[f64; 4]; 4] {
    let m = pose.matrix();
    let mut rows = [[0.0; 4]; 4];
    for (i, row) in rows.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            *value = m[(i, j)];
        }
    }
    rows
}

pub fn matrix3_from_rows(rows: [[f64; 3]; 3]) -> Matrix3<f64> {
    Matrix3::from_fn(|i, j| rows[i][j])
}

pub fn to_vector(v: [f64; 3]) -> Vector3<f64> {
    Vector3::new(v[0], v[1], v[2])
}

pub fn from_vector(v: &Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}
