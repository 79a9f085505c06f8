use pyo3::prelude::*;

// Module declarations
mod placement;
mod rowland;
mod utils;

use placement::{py_find_radius_of_photon_shell, PyGratingArrayStructure, PyLinearCCDArray};
use rowland::{py_design_tilted_torus, PyRowlandTorus};
use utils::{version, ElementPlacementError};

/// Python module definition
#[pymodule]
fn rowland_torus_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Torus
    m.add_class::<PyRowlandTorus>()?;
    m.add_function(wrap_pyfunction!(py_design_tilted_torus, m)?)?;

    // Element arrays
    m.add_class::<PyLinearCCDArray>()?;
    m.add_class::<PyGratingArrayStructure>()?;
    m.add_function(wrap_pyfunction!(py_find_radius_of_photon_shell, m)?)?;

    // Errors
    m.add("ElementPlacementError", m.py().get_type::<ElementPlacementError>())?;

    // Utility functions
    m.add_function(wrap_pyfunction!(version, m)?)?;

    // Module metadata
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
