//! Python bindings for RowlandTorus and the torus designer

use nalgebra::Vector3;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rowland_torus::interfaces::{DegenerateNormal, Frame};
use rowland_torus::rowland::{design_tilted_torus, RowlandTorus};

use crate::utils::{from_vector, matrix3_from_rows, pose_from_rows, pose_to_rows, to_py_err, to_vector};

fn frame(transform: bool) -> Frame {
    if transform {
        Frame::Global
    } else {
        Frame::Local
    }
}

/// Python wrapper for RowlandTorus
#[pyclass(name = "RowlandTorus")]
#[derive(Clone)]
pub struct PyRowlandTorus {
    pub(crate) inner: RowlandTorus,
}

#[pymethods]
impl PyRowlandTorus {
    /// Create a torus with major radius R and minor radius r
    ///
    /// Args:
    ///     R: Distance of the Rowland circle centre from the symmetry axis
    ///     r: Radius of the Rowland circle
    ///     pos4d: Full 4x4 pose (row-major); excludes the other placement keywords
    ///     position: Translation [x, y, z]
    ///     orientation: 3x3 rotation matrix (row-major)
    ///     zoom: Uniform scale
    #[new]
    #[pyo3(signature = (R, r, pos4d=None, position=None, orientation=None, zoom=1.0))]
    #[allow(non_snake_case)]
    fn new(
        R: f64,
        r: f64,
        pos4d: Option<[[f64; 4]; 4]>,
        position: Option<[f64; 3]>,
        orientation: Option<[[f64; 3]; 3]>,
        zoom: f64,
    ) -> PyResult<Self> {
        let inner = match pos4d {
            Some(rows) => {
                if position.is_some() || orientation.is_some() {
                    return Err(PyValueError::new_err(
                        "pos4d cannot be combined with position or orientation",
                    ));
                }
                RowlandTorus::new(R, r, pose_from_rows(rows)?)
            }
            None => RowlandTorus::from_position(
                R,
                r,
                position.map(to_vector).unwrap_or_else(Vector3::zeros),
                orientation
                    .map(matrix3_from_rows)
                    .unwrap_or_else(nalgebra::Matrix3::identity),
                zoom,
            ),
        };
        inner.map(|inner| PyRowlandTorus { inner }).map_err(to_py_err)
    }

    #[getter(R)]
    fn major_radius(&self) -> f64 {
        self.inner.major_radius()
    }

    #[getter(r)]
    fn minor_radius(&self) -> f64 {
        self.inner.minor_radius()
    }

    /// 4x4 pose of the torus (row-major)
    #[getter]
    fn pos4d(&self) -> [[f64; 4]; 4] {
        pose_to_rows(self.inner.pose())
    }

    /// Quartic torus equation, zero on the surface
    ///
    /// Args:
    ///     xyz: List of points [x, y, z]
    ///     transform: If True, points are in the global frame
    #[pyo3(signature = (xyz, transform=true))]
    fn quartic(&self, xyz: Vec<[f64; 3]>, transform: bool) -> Vec<f64> {
        let points: Vec<Vector3<f64>> = xyz.into_iter().map(to_vector).collect();
        self.inner.quartic_many(&points, frame(transform))
    }

    /// Solve the quartic for the one coordinate given as None
    #[pyo3(signature = (x=None, y=None, z=None, interval=[0.0, 1.0], transform=true))]
    fn solve_quartic(
        &self,
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
        interval: [f64; 2],
        transform: bool,
    ) -> PyResult<f64> {
        self.inner
            .solve_quartic(x, y, z, interval, frame(transform))
            .map_err(to_py_err)
    }

    /// Global point on the torus for the angles theta (Rowland circle) and phi (symmetry axis)
    fn parametric(&self, theta: f64, phi: f64) -> [f64; 3] {
        from_vector(&self.inner.parametric(theta, phi))
    }

    /// Outward unit normals at points on the surface
    ///
    /// Args:
    ///     xyz: List of global points on the torus
    ///     origin: Normal used where the gradient vanishes (local frame), default [-1, 0, 0]
    ///     raise_on_ambiguous: Raise instead of using ``origin`` at such points
    #[pyo3(signature = (xyz, origin=None, raise_on_ambiguous=false))]
    fn normal(
        &self,
        xyz: Vec<[f64; 3]>,
        origin: Option<[f64; 3]>,
        raise_on_ambiguous: bool,
    ) -> PyResult<Vec<[f64; 3]>> {
        let degenerate = match (raise_on_ambiguous, origin) {
            (true, _) => DegenerateNormal::Fail,
            (false, Some(direction)) => DegenerateNormal::UseFixedDirection(to_vector(direction)),
            (false, None) => DegenerateNormal::default(),
        };
        let points: Vec<Vector3<f64>> = xyz.into_iter().map(to_vector).collect();
        self.inner
            .normals(&points, degenerate)
            .map(|normals| normals.iter().map(from_vector).collect())
            .map_err(to_py_err)
    }

    /// Global point on the torus from polar coordinates in the local yz-plane
    fn xyz_from_radiusangle(&self, radius: f64, angle: f64, interval: [f64; 2]) -> PyResult<[f64; 3]> {
        self.inner
            .xyz_from_radiusangle(radius, angle, interval)
            .map(|p| from_vector(&p))
            .map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!(
            "RowlandTorus(R={}, r={})",
            self.inner.major_radius(),
            self.inner.minor_radius()
        )
    }
}

/// Design a torus for a tilted spectrometer
///
/// Returns:
///     (R, r, pos4d) with pos4d a row-major 4x4 pose
#[pyfunction(name = "design_tilted_torus")]
pub fn py_design_tilted_torus(f: f64, alpha: f64, beta: f64) -> PyResult<(f64, f64, [[f64; 4]; 4])> {
    let design = design_tilted_torus(f, alpha, beta).map_err(to_py_err)?;
    Ok((
        design.major_radius,
        design.minor_radius,
        pose_to_rows(&design.pose),
    ))
}
