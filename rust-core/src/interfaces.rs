// Definitions that are used throughout all modules

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DEGENERATE_DIRECTION;

// Enumeration for the Cartesian axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

// Enumeration to track in which frame coordinates are given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frame {
    /// Coordinates in the local frame of the object (torus centre at the origin)
    Local,
    /// Coordinates in the global frame, mapped through the object's pose
    Global,
}

/// What to return for a normal where the torus gradient vanishes.
///
/// Only relevant for tori with `R == r`, which touch themselves in their centre.
/// Every Rowland circle passes through that point, so the normal there has no
/// unique direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DegenerateNormal {
    /// Report the ambiguity as an error
    Fail,
    /// Use this direction (local torus frame, normalised on use)
    UseFixedDirection(Vector3<f64>),
}

impl Default for DegenerateNormal {
    fn default() -> Self {
        DegenerateNormal::UseFixedDirection(Vector3::from(DEFAULT_DEGENERATE_DIRECTION))
    }
}

/// Default orientation of a placed element before any blaze or misalignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Element plane is tangent to the torus at the element centre
    TangentToTorus,
    /// Element plane is perpendicular to a perfectly focused ray through its centre
    FocusedRay,
}
