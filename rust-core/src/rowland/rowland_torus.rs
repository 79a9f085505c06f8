use std::f64::consts::PI;

use nalgebra::{Matrix3, Vector3};
use serde::Serialize;

use crate::config::{GRADIENT_TOLERANCE, SURFACE_TOLERANCE};
use crate::errors::RowlandError;
use crate::geometries::AffineTransform;
use crate::interfaces::{Axis, DegenerateNormal, Frame};
use crate::rowland::root_finding::{find_root, RootFindingError};
use crate::Result;

/// Torus with the local y axis as symmetry axis.
///
/// The torus is generated by rotating the Rowland circle (radius `r`) about the
/// local y axis, with the circle centre at distance `R` from that axis. In local
/// coordinates the surface is the zero set of
///
/// ```text
/// (x² + y² + z² + R² − r²)² − 4R²(x² + z²)
/// ```
///
/// The pose places the local frame in the global frame. The design convention puts
/// the focal point at the global origin, which may or may not coincide with the
/// centre of the torus.
///
/// A torus is immutable once built; anything derived from it (element positions)
/// has to be recomputed for a different torus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowlandTorus {
    /// Major radius R: distance of the Rowland circle centre from the symmetry axis
    major_radius: f64,
    /// Minor radius r: radius of the Rowland circle
    minor_radius: f64,
    /// Local -> global
    pose: AffineTransform,
    /// Global -> local, cached
    inverse_pose: AffineTransform,
}

impl RowlandTorus {
    /// Construct a torus from its radii and pose.
    ///
    /// # Arguments
    /// * `major_radius` - R, must be positive
    /// * `minor_radius` - r, must be non-negative
    /// * `pose` - Transformation from the local torus frame into the global frame
    pub fn new(major_radius: f64, minor_radius: f64, pose: AffineTransform) -> Result<Self> {
        if !(major_radius > 0.0 && major_radius.is_finite()) {
            return Err(RowlandError::malformed(format!(
                "Major radius R must be positive and finite, got {}.",
                major_radius
            )));
        }
        if !(minor_radius >= 0.0 && minor_radius.is_finite()) {
            return Err(RowlandError::malformed(format!(
                "Minor radius r must be non-negative and finite, got {}.",
                minor_radius
            )));
        }
        let inverse_pose = pose.inverse();
        Ok(RowlandTorus {
            major_radius,
            minor_radius,
            pose,
            inverse_pose,
        })
    }

    /// Torus whose local frame coincides with the global frame.
    pub fn at_origin(major_radius: f64, minor_radius: f64) -> Result<Self> {
        Self::new(major_radius, minor_radius, AffineTransform::identity())
    }

    /// Torus placed by position, orientation and zoom instead of a full pose.
    pub fn from_position(
        major_radius: f64,
        minor_radius: f64,
        position: Vector3<f64>,
        orientation: Matrix3<f64>,
        zoom: f64,
    ) -> Result<Self> {
        let pose = AffineTransform::compose(position, orientation, zoom)?;
        Self::new(major_radius, minor_radius, pose)
    }

    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }

    pub fn pose(&self) -> &AffineTransform {
        &self.pose
    }

    /// Map a global point into the local torus frame
    pub fn to_local(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.inverse_pose.apply_to_point(point)
    }

    /// Map a local point into the global frame
    pub fn to_global(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.pose.apply_to_point(point)
    }

    /// Quartic torus equation.
    ///
    /// Roots of this function are points on the torus. It is negative inside the
    /// tube and positive outside.
    ///
    /// # Arguments
    /// * `point` - Coordinates of the point
    /// * `frame` - Frame of `point`; global points are mapped through the inverse pose first
    pub fn quartic(&self, point: &Vector3<f64>, frame: Frame) -> f64 {
        let local = match frame {
            Frame::Local => *point,
            Frame::Global => self.to_local(point),
        };
        let r2 = self.major_radius * self.major_radius;
        let s = local.norm_squared() + r2 - self.minor_radius * self.minor_radius;
        s * s - 4.0 * r2 * (local.x * local.x + local.z * local.z)
    }

    /// Evaluate [`RowlandTorus::quartic`] for many points
    pub fn quartic_many(&self, points: &[Vector3<f64>], frame: Frame) -> Vec<f64> {
        points.iter().map(|p| self.quartic(p, frame)).collect()
    }

    /// Solve the quartic for the one Cartesian coordinate that is not fixed.
    ///
    /// Exactly one of `x`, `y`, `z` must be `None`; the others are held fixed and the
    /// free coordinate is searched in `interval`. A line can cut a torus up to four
    /// times, so the interval must bracket one and only one of those intersections.
    ///
    /// # Errors
    /// * `MalformedInput` - not exactly one free coordinate, or a degenerate interval
    /// * `NoIntersection` - no sign change in the interval or no convergence
    /// * `RootFinding` - other numerical failures of the solver
    pub fn solve_quartic(
        &self,
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
        interval: [f64; 2],
        frame: Frame,
    ) -> Result<f64> {
        let coords = [x, y, z];
        let free: Vec<usize> = (0..3).filter(|&i| coords[i].is_none()).collect();
        if free.len() != 1 {
            return Err(RowlandError::malformed(
                "Exactly one of the input numbers for x, y, z must be None.",
            ));
        }
        let axis = match free[0] {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        };
        check_interval(interval)?;

        let mut point = Vector3::new(x.unwrap_or(0.0), y.unwrap_or(0.0), z.unwrap_or(0.0));
        if !point.iter().all(|c| c.is_finite()) {
            return Err(RowlandError::malformed("Fixed coordinates must be finite."));
        }

        let slice = |value: f64| {
            point[axis.index()] = value;
            self.quartic(&point, frame)
        };
        match find_root(slice, interval) {
            Ok(estimate) => Ok(estimate.root),
            Err(RootFindingError::NotBracketed { .. })
            | Err(RootFindingError::NoConvergence { .. }) => Err(RowlandError::NoIntersection {
                min: interval[0],
                max: interval[1],
            }),
            Err(other) => Err(RowlandError::RootFinding(other)),
        }
    }

    /// Parametric description of the torus in the global frame.
    ///
    /// # Arguments
    /// * `theta` - Angle on the Rowland circle; 0 is the point furthest from the symmetry axis
    /// * `phi` - Rotation of the Rowland circle about the symmetry axis
    pub fn parametric(&self, theta: f64, phi: f64) -> Vector3<f64> {
        let ring = self.major_radius + self.minor_radius * theta.cos();
        let local = Vector3::new(
            ring * phi.cos(),
            self.minor_radius * theta.sin(),
            ring * phi.sin(),
        );
        self.to_global(&local)
    }

    /// Sample the surface on a regular `n_theta` x `n_phi` grid over [0, 2π)².
    ///
    /// Points are ordered with `phi` varying fastest.
    pub fn sample_surface(&self, n_theta: usize, n_phi: usize) -> Vec<Vector3<f64>> {
        let mut points = Vec::with_capacity(n_theta * n_phi);
        for i in 0..n_theta {
            let theta = 2.0 * PI * (i as f64) / (n_theta as f64);
            for j in 0..n_phi {
                let phi = 2.0 * PI * (j as f64) / (n_phi as f64);
                points.push(self.parametric(theta, phi));
            }
        }
        points
    }

    /// Outward unit normal of the torus at a global point on its surface.
    ///
    /// The normal is the normalized analytic gradient of the quartic, rotated into
    /// the global frame. For `R == r` the gradient vanishes in the torus centre;
    /// `degenerate` decides what happens there.
    ///
    /// # Errors
    /// * `NotOnSurface` - `|quartic| / R⁴` exceeds the surface tolerance
    /// * `AmbiguousNormal` - zero gradient with `DegenerateNormal::Fail`
    /// * `MalformedInput` - zero-length fixed direction
    pub fn normal(&self, point: &Vector3<f64>, degenerate: DegenerateNormal) -> Result<Vector3<f64>> {
        let local = self.to_local(point);

        // For r, R >> 1 even marginal differences give large quartic values, hence R^4
        let residual = self.quartic(&local, Frame::Local) / self.major_radius.powi(4);
        if !(residual.abs() <= SURFACE_TOLERANCE) {
            return Err(RowlandError::NotOnSurface {
                point: [point.x, point.y, point.z],
                residual,
            });
        }

        let gradient = self.local_gradient(&local);
        // Pose round trips leave ~1e-16 noise on the centre, so compare against a scale
        let vanishing = gradient.norm() <= GRADIENT_TOLERANCE * self.major_radius.powi(3);
        let direction = if vanishing {
            match degenerate {
                DegenerateNormal::Fail => {
                    return Err(RowlandError::AmbiguousNormal {
                        point: [point.x, point.y, point.z],
                    })
                }
                DegenerateNormal::UseFixedDirection(fixed) => {
                    if fixed.norm() == 0.0 || !fixed.iter().all(|c| c.is_finite()) {
                        return Err(RowlandError::malformed(
                            "Degenerate normal direction must be a finite, non-zero vector.",
                        ));
                    }
                    fixed
                }
            }
        } else {
            gradient
        };

        Ok(self.pose.apply_to_vector(&direction.normalize()).normalize())
    }

    /// Outward unit normals for many points
    pub fn normals(
        &self,
        points: &[Vector3<f64>],
        degenerate: DegenerateNormal,
    ) -> Result<Vec<Vector3<f64>>> {
        points.iter().map(|p| self.normal(p, degenerate)).collect()
    }

    /// Partial derivatives of the quartic in the local frame
    fn local_gradient(&self, local: &Vector3<f64>) -> Vector3<f64> {
        let r2 = self.major_radius * self.major_radius;
        let factor =
            4.0 * (local.norm_squared() + r2 - self.minor_radius * self.minor_radius);
        Vector3::new(
            factor * local.x - 8.0 * r2 * local.x,
            factor * local.y,
            factor * local.z - 8.0 * r2 * local.z,
        )
    }

    /// Global Cartesian point on the torus from polar coordinates.
    ///
    /// `radius` and `angle` are polar coordinates in the local yz-plane, which is
    /// perpendicular to the optical axis; `angle = 0` points along the local y axis.
    /// The local x coordinate is then found on the torus inside `interval` (a local
    /// x interval).
    pub fn xyz_from_radiusangle(
        &self,
        radius: f64,
        angle: f64,
        interval: [f64; 2],
    ) -> Result<Vector3<f64>> {
        let y = radius * angle.cos();
        let z = radius * angle.sin();
        let x = self.solve_quartic(None, Some(y), Some(z), interval, Frame::Local)?;
        Ok(self.to_global(&Vector3::new(x, y, z)))
    }
}

fn check_interval(interval: [f64; 2]) -> Result<()> {
    if !(interval[0].is_finite() && interval[1].is_finite()) || interval[0] == interval[1] {
        return Err(RowlandError::malformed(format!(
            "Search interval must have two distinct finite ends, got [{}, {}].",
            interval[0], interval[1]
        )));
    }
    Ok(())
}
