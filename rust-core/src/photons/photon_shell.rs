use log::debug;

use crate::errors::RowlandError;
use crate::photons::photon_batch::PhotonBatch;
use crate::Result;

/// Intersect every photon with the plane `x = const`.
///
/// Returns the `(y, z)` coordinates at the plane. Photons travelling parallel to
/// the plane or away from it never reach it and give `None`.
pub fn project_onto_plane(batch: &PhotonBatch, x: f64) -> Vec<Option<[f64; 2]>> {
    batch
        .pos()
        .iter()
        .zip(batch.dir())
        .map(|(pos, dir)| {
            if dir.x == 0.0 {
                return None;
            }
            let t = (x - pos.x) / dir.x;
            if !(t >= 0.0) {
                return None;
            }
            Some([pos.y + t * dir.y, pos.z + t * dir.z])
        })
        .collect()
}

/// Radius range that the photons of one mirror shell cover at distance `x`.
///
/// Photons reflected by one shell of a nested Wolter mirror form a thin cone
/// with its tip in the focal point (global origin). This returns percentiles of
/// the distance from the optical axis (global x axis) in the plane at `x`, e.g.
/// to decide where to place gratings.
///
/// # Arguments
/// * `batch` - Photons leaving the mirror
/// * `mirror_shell` - Shell to select
/// * `x` - Position of the plane on the optical axis
/// * `percentiles` - Requested percentiles in `[0, 100]`; `[1, 99]` excludes stray rays
///
/// # Errors
/// * `MalformedInput` - percentile outside `[0, 100]` or non-finite `x`
/// * `EmptySelection` - no photon passes the filters
pub fn find_radius_of_photon_shell(
    batch: &PhotonBatch,
    mirror_shell: i64,
    x: f64,
    percentiles: &[f64],
) -> Result<Vec<f64>> {
    check_percentiles(percentiles)?;
    if !x.is_finite() {
        return Err(RowlandError::malformed("Plane position x must be finite."));
    }

    let projected = project_onto_plane(batch, x);
    let missed = projected.iter().filter(|p| p.is_none()).count();
    if missed > 0 {
        debug!("{} of {} photons do not reach the plane x = {}", missed, batch.len(), x);
    }

    let mut radii: Vec<f64> = projected
        .iter()
        .zip(batch.probability())
        .zip(batch.mirror_shell())
        .filter_map(|((point, &prob), &shell)| match point {
            Some([y, z]) if prob > 0.0 && shell == mirror_shell => Some(y.hypot(*z)),
            _ => None,
        })
        .collect();
    if radii.is_empty() {
        return Err(RowlandError::EmptySelection { mirror_shell });
    }

    radii.sort_by(|a, b| a.total_cmp(b));
    Ok(percentiles
        .iter()
        .map(|&q| interpolate_sorted(&radii, q))
        .collect())
}

/// Percentiles of `values` with linear interpolation between order statistics.
pub fn percentiles(values: &[f64], percentiles: &[f64]) -> Result<Vec<f64>> {
    check_percentiles(percentiles)?;
    if values.is_empty() {
        return Err(RowlandError::malformed("Cannot take percentiles of an empty list."));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(percentiles
        .iter()
        .map(|&q| interpolate_sorted(&sorted, q))
        .collect())
}

fn interpolate_sorted(sorted: &[f64], q: f64) -> f64 {
    let position = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

fn check_percentiles(percentiles: &[f64]) -> Result<()> {
    match percentiles.iter().find(|q| !(0.0..=100.0).contains(*q)) {
        Some(q) => Err(RowlandError::malformed(format!(
            "Percentiles must be in the range [0, 100], got {}.",
            q
        ))),
        None => Ok(()),
    }
}
