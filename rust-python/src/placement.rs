//! Python bindings for element arrays and the photon-shell radius query

use std::f64::consts::PI;

use pyo3::prelude::*;
use rowland_torus::config::DEFAULT_PERCENTILES;
use rowland_torus::interfaces::Orientation;
use rowland_torus::photons::{find_radius_of_photon_shell, PhotonBatch};
use rowland_torus::placement::ElementArray;

use crate::rowland::PyRowlandTorus;
use crate::utils::{from_vector, pose_to_rows, to_py_err, to_vector};

fn orientation(tangent_to_torus: bool) -> Orientation {
    if tangent_to_torus {
        Orientation::TangentToTorus
    } else {
        Orientation::FocusedRay
    }
}

fn element_positions(array: &ElementArray) -> PyResult<Vec<[[f64; 4]; 4]>> {
    let poses = array.compute_poses().map_err(to_py_err)?;
    Ok(poses.iter().map(|p| pose_to_rows(&p.pose)).collect())
}

/// Row of elements (e.g. CCDs) on a Rowland torus
#[pyclass(name = "LinearCCDArray")]
#[derive(Clone)]
pub struct PyLinearCCDArray {
    inner: ElementArray,
}

#[pymethods]
impl PyLinearCCDArray {
    /// Args:
    ///     rowland: RowlandTorus
    ///     d_element: Edge length of a square element
    ///     x_range: Local x interval searched for the torus intersection
    ///     radius: [inner, outer] radius, may be negative
    ///     phi: Direction of the line of centres (radian)
    ///     tangent_to_torus: Element orientation, tangent (default) or perpendicular to focused rays
    #[new]
    #[pyo3(signature = (rowland, d_element, x_range, radius, phi, tangent_to_torus=true))]
    fn new(
        rowland: PyRef<'_, PyRowlandTorus>,
        d_element: f64,
        x_range: [f64; 2],
        radius: [f64; 2],
        phi: f64,
        tangent_to_torus: bool,
    ) -> PyResult<Self> {
        ElementArray::linear_ccd_array(rowland.inner.clone(), d_element, x_range, radius, phi)
            .map(|array| PyLinearCCDArray {
                inner: array.with_orientation(orientation(tangent_to_torus)),
            })
            .map_err(to_py_err)
    }

    #[getter]
    fn id_col(&self) -> &str {
        self.inner.id_column()
    }

    fn max_elements_on_radius(&self) -> usize {
        self.inner.max_elements_on_radius()
    }

    fn distribute_elements_on_radius(&self) -> Vec<f64> {
        self.inner.distribute_elements_on_radius()
    }

    /// 4x4 poses (row-major) of all elements, recomputed on every call
    fn elem_pos(&self) -> PyResult<Vec<[[f64; 4]; 4]>> {
        element_positions(&self.inner)
    }
}

/// Grating array structure on a Rowland torus
#[pyclass(name = "GratingArrayStructure")]
#[derive(Clone)]
pub struct PyGratingArrayStructure {
    inner: ElementArray,
}

#[pymethods]
impl PyGratingArrayStructure {
    /// Args:
    ///     rowland: RowlandTorus
    ///     d_element: Edge length of a square facet
    ///     x_range: Local x interval searched for the torus intersection
    ///     radius: [inner, outer] radius, non-negative
    ///     phi: Bounding angles of the segment, counter-clockwise (radian)
    ///     tangent_to_torus: Facet orientation, perpendicular to focused rays by default
    #[new]
    #[pyo3(signature = (rowland, d_element, x_range, radius, phi=[0.0, 2.0 * PI], tangent_to_torus=false))]
    fn new(
        rowland: PyRef<'_, PyRowlandTorus>,
        d_element: f64,
        x_range: [f64; 2],
        radius: [f64; 2],
        phi: [f64; 2],
        tangent_to_torus: bool,
    ) -> PyResult<Self> {
        ElementArray::grating_array_structure(
            rowland.inner.clone(),
            d_element,
            x_range,
            radius,
            Some(phi),
        )
        .map(|array| PyGratingArrayStructure {
            inner: array.with_orientation(orientation(tangent_to_torus)),
        })
        .map_err(to_py_err)
    }

    #[getter]
    fn id_col(&self) -> &str {
        self.inner.id_column()
    }

    fn max_elements_on_radius(&self) -> usize {
        self.inner.max_elements_on_radius()
    }

    fn distribute_elements_on_radius(&self) -> Vec<f64> {
        self.inner.distribute_elements_on_radius()
    }

    fn max_elements_on_arc(&self, radius: f64) -> usize {
        self.inner.max_elements_on_arc(radius)
    }

    fn distribute_elements_on_arc(&self, radius: f64) -> Vec<f64> {
        self.inner.distribute_elements_on_arc(radius)
    }

    /// Position of the centre of the segment on the torus
    fn calc_ideal_center(&self) -> PyResult<[f64; 3]> {
        self.inner
            .calc_ideal_center()
            .map(|p| from_vector(&p))
            .map_err(to_py_err)
    }

    /// 4x4 poses (row-major) of all facets, recomputed on every call
    fn elem_pos(&self) -> PyResult<Vec<[[f64; 4]; 4]>> {
        element_positions(&self.inner)
    }
}

/// Radius percentiles of the photons of one mirror shell at distance x
#[pyfunction(name = "find_radius_of_photon_shell")]
#[pyo3(signature = (pos, dir, probability, mirror_shell, shell, x, percentile=DEFAULT_PERCENTILES.to_vec()))]
pub fn py_find_radius_of_photon_shell(
    pos: Vec<[f64; 3]>,
    dir: Vec<[f64; 3]>,
    probability: Vec<f64>,
    mirror_shell: Vec<i64>,
    shell: i64,
    x: f64,
    percentile: Vec<f64>,
) -> PyResult<Vec<f64>> {
    let batch = PhotonBatch::new(
        pos.into_iter().map(to_vector).collect(),
        dir.into_iter().map(to_vector).collect(),
        probability,
        mirror_shell,
    )
    .map_err(to_py_err)?;
    find_radius_of_photon_shell(&batch, shell, x, &percentile).map_err(to_py_err)
}
