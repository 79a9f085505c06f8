// Photons module: Columnar photon lists and the mirror-shell radius query used for grating layout

// ======================== MODULE DECLARATIONS ========================
pub mod photon_batch;
pub mod photon_shell;


// ======================== PHOTON LISTS ========================
pub use photon_batch::{
    PhotonBatch,  // struct - pos, dir, probability, mirror_shell columns
    PhotonRecord, // struct - one row of a PhotonBatch
};

// ======================== SHELL ANALYSIS ========================
pub use photon_shell::{
    find_radius_of_photon_shell, // fn(batch, mirror_shell, x, percentiles) -> Result<Vec<f64>>
    percentiles,                 // fn(values, percentiles) -> Result<Vec<f64>> - linear interpolation
    project_onto_plane,          // fn(batch, x) -> Vec<Option<[f64; 2]>> - (y, z) on the plane x = const
};
