// Constants

// Root finding (bracketing solver along one coordinate of the torus)
pub const ROOT_XTOL: f64 = 2e-12; // Absolute tolerance on the root position
pub const ROOT_RTOL: f64 = 4.0 * f64::EPSILON; // Relative tolerance on the root position
pub const ROOT_MAX_ITER: usize = 100; // Hard iteration budget, failure beyond this

// Tolerances
pub const SURFACE_TOLERANCE: f64 = 1e-8; // |quartic| / R^4 below this counts as "on the surface"
pub const TRANSFORM_TOLERANCE: f64 = 1e-9; // Orthonormality / homogeneous row checks for poses
pub const GRADIENT_TOLERANCE: f64 = 1e-12; // |gradient| / R^3 below this counts as a vanishing gradient

// Input guards
pub const MAX_ANGLE_RADIANS: f64 = 10.0; // Larger angles are almost certainly degrees

// Defaults
pub const DEFAULT_DEGENERATE_DIRECTION: [f64; 3] = [-1.0, 0.0, 0.0]; // Normal at the R == r centre, local frame
pub const DEFAULT_PERCENTILES: [f64; 2] = [1.0, 99.0]; // Excludes stray rays in the far PSF wings
