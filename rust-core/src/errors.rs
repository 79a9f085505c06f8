// Error types for the Rowland torus kernel, the torus designer and element placement
//
// The variants follow the failure classes callers react to differently:
// malformed input, numerical non-convergence, geometric ambiguity and
// placement infeasibility.

use thiserror::Error;

use crate::rowland::root_finding::RootFindingError;

/// Error type shared by all modules of this crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowlandError {
    /// Input rejected at call time (shapes, bounds, units, sizes)
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The bracketing solver found no intersection with the torus in the interval
    #[error("Intersection with torus not found in interval [{min}, {max}]")]
    NoIntersection { min: f64, max: f64 },

    /// Any other failure of the root finder
    #[error("Root finding failed: {0}")]
    RootFinding(RootFindingError),

    /// Normal requested for a point that does not lie on the torus surface
    #[error(
        "Gradient vector field is only defined for points on torus surface \
         (point {point:?}, normalized residual {residual:e})"
    )]
    NotOnSurface { point: [f64; 3], residual: f64 },

    /// Normal requested at the self-intersection point of a torus with R == r
    #[error("Ambiguous normal at {point:?}")]
    AmbiguousNormal { point: [f64; 3] },

    /// Element frame cannot be completed because the normal is parallel to the fixed axis
    #[error("Cannot build element frame: normal {normal:?} is parallel to the fixed axis")]
    DegenerateOrientation { normal: [f64; 3] },

    /// An element could not be placed on the torus with the configured search range
    #[error("No intersection with Rowland torus in range [{min}, {max}]")]
    ElementPlacement { min: f64, max: f64 },

    /// No photon passed the filters of a photon-shell query
    #[error("No photons with positive probability from mirror shell {mirror_shell} reach the plane")]
    EmptySelection { mirror_shell: i64 },
}

impl RowlandError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        RowlandError::MalformedInput(msg.into())
    }

    /// True for the re-labelled placement failure and its lower-level origin
    pub fn is_no_intersection(&self) -> bool {
        matches!(
            self,
            RowlandError::NoIntersection { .. } | RowlandError::ElementPlacement { .. }
        )
    }
}
