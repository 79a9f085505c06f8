use std::f64::consts::PI;

use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::MAX_ANGLE_RADIANS;
use crate::errors::RowlandError;
use crate::geometries::AffineTransform;
use crate::rowland::rowland_torus::RowlandTorus;
use crate::Result;

/// Radii and pose of a designed Rowland torus.
///
/// Kept separate from [`RowlandTorus`] so a design can be inspected, serialized
/// or tweaked before the torus is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorusDesign {
    pub major_radius: f64,
    pub minor_radius: f64,
    pub pose: AffineTransform,
}

impl TorusDesign {
    /// Build the torus described by this design
    pub fn torus(&self) -> Result<RowlandTorus> {
        RowlandTorus::new(self.major_radius, self.minor_radius, self.pose.clone())
    }

    /// Consume the design and build the torus
    pub fn into_torus(self) -> Result<RowlandTorus> {
        RowlandTorus::new(self.major_radius, self.minor_radius, self.pose)
    }
}

/// Design a Rowland torus for an off-axis (tilted) spectrometer.
///
/// The focal point sits at the global origin and the optical axis is the global
/// x axis; the on-axis grating is at distance `f` along it. `alpha` is the angle
/// between the optical axis and the line from the on-axis grating to the centre
/// of the Rowland circle, `beta` the angle between the optical axis and the line
/// from the on-axis grating to the hinge point. With `beta == 2 * alpha` the
/// focal point and `(f, 0, 0)` both lie on the torus. With `alpha == 0` the
/// result is the symmetric `R == r` torus whose centre is the focal point.
///
/// # Arguments
/// * `f` - Distance between the focal point and the on-axis grating, must be positive
/// * `alpha` - Angle to the Rowland circle centre in radians, `|alpha| < π/2`
/// * `beta` - Angle to the hinge point in radians
///
/// # Returns
/// Radii of the torus and its pose (zoom 1)
pub fn design_tilted_torus(f: f64, alpha: f64, beta: f64) -> Result<TorusDesign> {
    if !(f > 0.0 && f.is_finite()) {
        return Err(RowlandError::malformed(format!(
            "Distance f must be positive and finite, got {}.",
            f
        )));
    }
    for (name, angle) in [("alpha", alpha), ("beta", beta)] {
        if !angle.is_finite() {
            return Err(RowlandError::malformed(format!("{} must be finite.", name)));
        }
        if angle.abs() > MAX_ANGLE_RADIANS {
            return Err(RowlandError::malformed(format!(
                "|{}| = {} is larger than {}. Angles are in radians; did you use degrees?",
                name,
                angle.abs(),
                MAX_ANGLE_RADIANS
            )));
        }
    }
    if alpha.abs() >= PI / 2.0 {
        return Err(RowlandError::malformed(format!(
            "Tilt angle alpha must satisfy |alpha| < pi/2, got {}.",
            alpha
        )));
    }

    let r = f / (2.0 * alpha.cos());
    // Chord from the on-axis grating to the hinge point
    let cat_h = r * (2.0 * (1.0 + (2.0 * (beta - alpha)).cos())).sqrt();
    let hf = (f * f + cat_h * cat_h - 2.0 * f * cat_h * beta.cos()).max(0.0).sqrt();
    let sign = if alpha >= 0.0 { 1.0 } else { -1.0 };
    // Rounding can push the ratio just past 1
    let gamma = (hf / (2.0 * r)).clamp(-1.0, 1.0).acos() * sign;

    let opposite = (PI - alpha - (alpha + gamma)).sin();
    let major_radius = f / opposite * (alpha + gamma).sin() - r;
    if !(major_radius > 0.0 && major_radius.is_finite()) {
        return Err(RowlandError::malformed(format!(
            "Parameters f={}, alpha={}, beta={} give major radius {}; no torus with R > 0 exists.",
            f, alpha, beta, major_radius
        )));
    }
    let f_ct = f / opposite * alpha.sin();

    let centre = Vector3::new(f_ct * (alpha + gamma).cos(), f_ct * (alpha + gamma).sin(), 0.0);
    let orientation = AffineTransform::from_axis_angle(-Vector3::z(), PI / 2.0 - alpha - gamma)?;
    let pose = AffineTransform::compose(centre, orientation.rotation_matrix(), 1.0)?;

    debug!(
        "Designed tilted torus: f={}, alpha={}, beta={} -> R={}, r={}, centre={:?}",
        f,
        alpha,
        beta,
        major_radius,
        r,
        [centre.x, centre.y, centre.z]
    );

    Ok(TorusDesign {
        major_radius,
        minor_radius: r,
        pose,
    })
}
