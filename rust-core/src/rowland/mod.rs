// Rowland module: The torus surface, its numerical solver and the tilted-torus designer
// The torus is stored as radii plus a pose; all queries accept global coordinates

// ======================== MODULE DECLARATIONS ========================
pub mod root_finding;
pub mod rowland_design;
pub mod rowland_torus;

mod _tests_rowland_torus;

// ======================== ROOT FINDING ========================
pub use root_finding::{
    brentq,           // fn(f, a, b, xtol, rtol, max_iter) -> Result<RootEstimate, RootFindingError>
    find_root,        // fn(f, interval) -> Result<RootEstimate, RootFindingError> - default tolerances
    RootEstimate,     // struct - root, iterations, function_calls
    RootFindingError, // enum - NotBracketed, NoConvergence, NonFinite
};

// ======================== TORUS ========================
pub use rowland_torus::RowlandTorus; // struct - radii and pose of a torus with local y symmetry axis
// RowlandTorus impl methods:
//   new(R, r, pose: AffineTransform) -> Result<Self>                 - validated torus
//   at_origin(R, r) -> Result<Self>                                  - torus with identity pose
//   from_position(R, r, position, orientation, zoom) -> Result<Self> - pose from components
//   quartic(&self, p, frame: Frame) -> f64                           - implicit surface function
//   quartic_many(&self, ps, frame: Frame) -> Vec<f64>                - batch version of quartic
//   solve_quartic(&self, x, y, z, interval, frame) -> Result<f64>    - solve for the one None coordinate
//   parametric(&self, theta, phi) -> Vector3<f64>                    - global surface point
//   sample_surface(&self, n_theta, n_phi) -> Vec<Vector3<f64>>       - regular surface grid
//   normal(&self, p, degenerate: DegenerateNormal) -> Result<Vector3<f64>> - outward unit normal
//   normals(&self, ps, degenerate) -> Result<Vec<Vector3<f64>>>      - batch version of normal
//   xyz_from_radiusangle(&self, radius, angle, interval) -> Result<Vector3<f64>> - polar -> torus point
//   to_local / to_global(&self, p) -> Vector3<f64>                   - frame conversion

// ======================== DESIGN ========================
pub use rowland_design::{
    design_tilted_torus, // fn(f, alpha, beta) -> Result<TorusDesign> - torus for a tilted spectrometer
    TorusDesign,         // struct - major_radius, minor_radius, pose
};
