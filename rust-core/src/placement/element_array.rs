use std::f64::consts::PI;

use log::{debug, info};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::MAX_ANGLE_RADIANS;
use crate::errors::RowlandError;
use crate::geometries::AffineTransform;
use crate::interfaces::{DegenerateNormal, Orientation};
use crate::placement::packing;
use crate::rowland::RowlandTorus;
use crate::Result;

/// Norm below which a projected frame axis counts as vanished
const FRAME_TOLERANCE: f64 = 1e-12;

/// How elements tile the coverage region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PackingStrategy {
    /// One element per radius, all on the line through the torus axis at angle `phi`
    Radial { phi: f64 },
    /// Several elements per radius, spread over the arc from `phi[0]` to `phi[1]`
    /// (counter-clockwise, may wrap through zero)
    Arc { phi: [f64; 2] },
}

/// Placed element: where the element sits and how it is oriented.
///
/// `pose` maps an element centred on the origin with its active plane in the
/// local yz-plane onto its place on the torus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementPose {
    pub id: usize,
    pub radius: f64,
    pub angle: f64,
    pub center: Vector3<f64>,
    pub pose: AffineTransform,
}

/// Output handed to the compound-element assembler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementLayout {
    pub id_column: String,
    pub d_element: f64,
    pub elements: Vec<ElementPose>,
}

/// Array of flat, square elements placed on a Rowland torus.
///
/// The same engine covers CCD rows ([`ElementArray::linear_ccd_array`]) and
/// grating array structures ([`ElementArray::grating_array_structure`]); the two
/// differ in their [`PackingStrategy`] and default [`Orientation`].
///
/// Poses are never cached. Every call to [`ElementArray::compute_poses`]
/// recomputes them from the current configuration.
#[derive(Debug, Clone)]
pub struct ElementArray {
    rowland: RowlandTorus,
    d_element: f64,
    x_range: [f64; 2],
    radius: [f64; 2],
    packing: PackingStrategy,
    orientation: Orientation,
    id_column: String,
    degenerate: DegenerateNormal,
}

impl ElementArray {
    /// Row of elements (e.g. CCDs) along a line through the torus axis.
    ///
    /// # Arguments
    /// * `rowland` - Torus the elements are placed on
    /// * `d_element` - Edge length of a (square) element, may include mounting margins
    /// * `x_range` - Local x interval searched for the torus intersection
    /// * `radius` - Inner and outer radius in the local yz-plane; negative values
    ///   place elements on both sides of the axis
    /// * `phi` - Direction of the line of centres, 0 is the local +y axis (radians)
    pub fn linear_ccd_array(
        rowland: RowlandTorus,
        d_element: f64,
        x_range: [f64; 2],
        radius: [f64; 2],
        phi: f64,
    ) -> Result<Self> {
        check_common(d_element, x_range, radius, &[phi])?;
        Ok(ElementArray {
            rowland,
            d_element,
            x_range,
            radius,
            packing: PackingStrategy::Radial { phi },
            orientation: Orientation::TangentToTorus,
            id_column: "CCD_ID".to_string(),
            degenerate: DegenerateNormal::default(),
        })
    }

    /// Grating array structure filling a ring segment of the torus.
    ///
    /// `phi` bounds the segment counter-clockwise and defaults to the full
    /// circle `[0, 2π]`. Radii must be non-negative.
    pub fn grating_array_structure(
        rowland: RowlandTorus,
        d_element: f64,
        x_range: [f64; 2],
        radius: [f64; 2],
        phi: Option<[f64; 2]>,
    ) -> Result<Self> {
        let phi = phi.unwrap_or([0.0, 2.0 * PI]);
        if radius[0] < 0.0 || radius[1] < 0.0 {
            return Err(RowlandError::malformed(format!(
                "Radius must be positive, got [{}, {}].",
                radius[0], radius[1]
            )));
        }
        check_common(d_element, x_range, radius, &phi)?;
        Ok(ElementArray {
            rowland,
            d_element,
            x_range,
            radius,
            packing: PackingStrategy::Arc { phi },
            orientation: Orientation::FocusedRay,
            id_column: "facet".to_string(),
            degenerate: DegenerateNormal::default(),
        })
    }

    /// Override the default element orientation
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Normal to use at the self-intersection of an `R == r` torus
    pub fn with_degenerate_normal(mut self, degenerate: DegenerateNormal) -> Self {
        self.degenerate = degenerate;
        self
    }

    pub fn rowland(&self) -> &RowlandTorus {
        &self.rowland
    }

    pub fn d_element(&self) -> f64 {
        self.d_element
    }

    pub fn x_range(&self) -> [f64; 2] {
        self.x_range
    }

    pub fn radius(&self) -> [f64; 2] {
        self.radius
    }

    pub fn packing(&self) -> PackingStrategy {
        self.packing
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn max_elements_on_radius(&self) -> usize {
        packing::max_elements_on_radius(self.radius, self.d_element)
    }

    pub fn distribute_elements_on_radius(&self) -> Vec<f64> {
        packing::distribute_on_radius(self.radius, self.d_element)
    }

    /// Maximal number of elements on the arc at `radius`. Zero for radial packing.
    pub fn max_elements_on_arc(&self, radius: f64) -> usize {
        match self.packing {
            PackingStrategy::Arc { phi } => packing::max_elements_on_arc(radius, phi, self.d_element),
            PackingStrategy::Radial { .. } => 0,
        }
    }

    /// Centre angles of the elements at `radius`.
    ///
    /// Radial packing always has exactly one element per radius, at its fixed `phi`.
    pub fn distribute_elements_on_arc(&self, radius: f64) -> Vec<f64> {
        match self.packing {
            PackingStrategy::Arc { phi } => packing::distribute_on_arc(radius, phi, self.d_element),
            PackingStrategy::Radial { phi } => vec![phi],
        }
    }

    /// Ordered `(radius, angle)` pairs of all element centres.
    ///
    /// Radii are the outer loop, angles the inner one. Element ids are positions
    /// in this list.
    pub fn element_targets(&self) -> Vec<(f64, f64)> {
        self.distribute_elements_on_radius()
            .into_iter()
            .flat_map(|r| {
                self.distribute_elements_on_arc(r)
                    .into_iter()
                    .map(move |a| (r, a))
            })
            .collect()
    }

    /// Torus point at the middle radius and middle angle of the covered segment.
    ///
    /// Only defined for arc packing. Errors of the torus solver are passed on
    /// unchanged.
    pub fn calc_ideal_center(&self) -> Result<Vector3<f64>> {
        let phi = match self.packing {
            PackingStrategy::Arc { phi } => phi,
            PackingStrategy::Radial { .. } => {
                return Err(RowlandError::malformed(
                    "Ideal centre is only defined for arc packing.",
                ))
            }
        };
        let angle = (phi[0] + packing::angle_diff(phi) / 2.0).rem_euclid(2.0 * PI);
        let radius = 0.5 * (self.radius[0] + self.radius[1]);
        self.rowland.xyz_from_radiusangle(radius, angle, self.x_range)
    }

    /// Compute the pose of every element.
    ///
    /// # Errors
    /// * `ElementPlacement` - a target does not intersect the torus in `x_range`
    /// * `DegenerateOrientation` - an element frame cannot be completed
    /// * any other torus error (e.g. `AmbiguousNormal`) unchanged
    pub fn compute_poses(&self) -> Result<Vec<ElementPose>> {
        let targets = self.element_targets();
        self.place_all(&targets).map_err(|e| self.relabel(e))
    }

    /// Poses wrapped with the element label and size
    pub fn layout(&self) -> Result<ElementLayout> {
        Ok(ElementLayout {
            id_column: self.id_column.clone(),
            d_element: self.d_element,
            elements: self.compute_poses()?,
        })
    }

    fn place_all(&self, targets: &[(f64, f64)]) -> Result<Vec<ElementPose>> {
        let line = match self.packing {
            PackingStrategy::Radial { phi } => Some(self.line_of_centres(phi)?),
            PackingStrategy::Arc { .. } => None,
        };

        #[cfg(feature = "parallel")]
        let poses: Result<Vec<ElementPose>> = targets
            .par_iter()
            .enumerate()
            .map(|(id, &(radius, angle))| self.place_one(id, radius, angle, line.as_ref()))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let poses: Result<Vec<ElementPose>> = targets
            .iter()
            .enumerate()
            .map(|(id, &(radius, angle))| self.place_one(id, radius, angle, line.as_ref()))
            .collect();

        let poses = poses?;
        info!(
            "Placed {} elements ({}) on torus R={}, r={}",
            poses.len(),
            self.id_column,
            self.rowland.major_radius(),
            self.rowland.minor_radius()
        );
        Ok(poses)
    }

    fn place_one(
        &self,
        id: usize,
        radius: f64,
        angle: f64,
        line: Option<&Vector3<f64>>,
    ) -> Result<ElementPose> {
        let center = self.rowland.xyz_from_radiusangle(radius, angle, self.x_range)?;
        let normal = self.element_normal(&center)?;
        // Linear rows keep one edge along the row, gratings keep their grooves along e_y
        let fixed = line.copied().unwrap_or_else(Vector3::y);
        let rotation = frame_with_fixed_axis(&normal, &fixed)?;
        let pose = AffineTransform::compose(center, rotation, 1.0)?;
        debug!("Element {} at radius {}, angle {}: {:?}", id, radius, angle, center);
        Ok(ElementPose {
            id,
            radius,
            angle,
            center,
            pose,
        })
    }

    fn element_normal(&self, center: &Vector3<f64>) -> Result<Vector3<f64>> {
        match self.orientation {
            Orientation::TangentToTorus => self.rowland.normal(center, self.degenerate),
            Orientation::FocusedRay => {
                // Rays focus in the global origin
                let norm = center.norm();
                if norm == 0.0 {
                    return Err(RowlandError::DegenerateOrientation {
                        normal: [0.0, 0.0, 0.0],
                    });
                }
                Ok(center / norm)
            }
        }
    }

    /// Unit vector from the first to the second element centre of a radial row.
    ///
    /// A single element has no neighbour, so a virtual one is placed one element
    /// size further out.
    fn line_of_centres(&self, phi: f64) -> Result<Vector3<f64>> {
        let radii = self.distribute_elements_on_radius();
        let (r0, r1) = match radii.as_slice() {
            [r0, r1, ..] => (*r0, *r1),
            [r0] => (*r0, *r0 + self.d_element),
            [] => return Err(RowlandError::malformed("No elements to place.")),
        };
        let p0 = self.rowland.xyz_from_radiusangle(r0, phi, self.x_range)?;
        let p1 = self.rowland.xyz_from_radiusangle(r1, phi, self.x_range)?;
        let line = p1 - p0;
        let norm = line.norm();
        if norm == 0.0 {
            return Err(RowlandError::malformed("Element centres coincide."));
        }
        Ok(line / norm)
    }

    fn relabel(&self, error: RowlandError) -> RowlandError {
        match error {
            RowlandError::NoIntersection { .. } => RowlandError::ElementPlacement {
                min: self.x_range[0],
                max: self.x_range[1],
            },
            other => other,
        }
    }
}

/// Rotation with the normal as first column and the second column as close to
/// `fixed` as the normal allows.
fn frame_with_fixed_axis(normal: &Vector3<f64>, fixed: &Vector3<f64>) -> Result<Matrix3<f64>> {
    let y = fixed - normal * normal.dot(fixed);
    let norm = y.norm();
    if norm < FRAME_TOLERANCE {
        return Err(RowlandError::DegenerateOrientation {
            normal: [normal.x, normal.y, normal.z],
        });
    }
    let y = y / norm;
    let z = normal.cross(&y);
    Ok(Matrix3::from_columns(&[*normal, y, z]))
}

fn check_common(d_element: f64, x_range: [f64; 2], radius: [f64; 2], phi: &[f64]) -> Result<()> {
    if !(d_element > 0.0 && d_element.is_finite()) {
        return Err(RowlandError::malformed(format!(
            "Element size must be positive, got {}.",
            d_element
        )));
    }
    if !(x_range[0].is_finite() && x_range[1].is_finite() && x_range[0] < x_range[1]) {
        return Err(RowlandError::malformed(format!(
            "x_range must be finite and increasing, got [{}, {}].",
            x_range[0], x_range[1]
        )));
    }
    if !(radius[0].is_finite() && radius[1].is_finite()) {
        return Err(RowlandError::malformed("Radius limits must be finite."));
    }
    if !(radius[1] > radius[0]) {
        return Err(RowlandError::malformed(
            "Outer radius must be larger than inner radius.",
        ));
    }
    if phi.iter().any(|p| !p.is_finite()) {
        return Err(RowlandError::malformed("Angles must be finite."));
    }
    if phi.iter().any(|p| p.abs() > MAX_ANGLE_RADIANS) {
        return Err(RowlandError::malformed(
            "Input angles >> 2 pi. Did you use degrees (radian expected)?",
        ));
    }
    Ok(())
}
