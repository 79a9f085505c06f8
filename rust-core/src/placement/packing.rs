use std::f64::consts::PI;

/// Counter-clockwise angular span from `phi[0]` to `phi[1]`.
///
/// The result is in `[0, 2π]`; a segment that crosses zero (`phi[1] < phi[0]`)
/// wraps around.
pub fn angle_diff(phi: [f64; 2]) -> f64 {
    let diff = phi[1] - phi[0];
    if diff < 0.0 {
        diff + 2.0 * PI
    } else {
        diff
    }
}

/// Number of elements of size `d_element` needed to cover `radius`.
///
/// Rounds up, so elements may reach beyond the radius limits.
pub fn max_elements_on_radius(radius: [f64; 2], d_element: f64) -> usize {
    ((radius[1] - radius[0]) / d_element).ceil().max(0.0) as usize
}

/// Radii of the element centres, spaced by `d_element` and centred on the
/// middle of `radius`.
pub fn distribute_on_radius(radius: [f64; 2], d_element: f64) -> Vec<f64> {
    let n = max_elements_on_radius(radius, d_element);
    let mean = 0.5 * (radius[0] + radius[1]);
    (0..n)
        .map(|k| mean + (k as f64 - n as f64 / 2.0 + 0.5) * d_element)
        .collect()
}

/// Maximal number of elements whose footprint fits on the arc `phi` at `radius`.
pub fn max_elements_on_arc(radius: f64, phi: [f64; 2], d_element: f64) -> usize {
    (radius * angle_diff(phi) / d_element).floor().max(0.0) as usize
}

/// Centre angles of the elements on the arc `phi` at `radius`.
///
/// The element count is taken at the inner edge of the footprint
/// (`radius - d_element / 2`), where the arc is most crowded. The spacing
/// counts each element as `d_element / (2π radius)` of the arc, and gaps
/// between elements and at both ends of the arc are equal. Centres never
/// leave the arc; an arc too short for one element stays empty.
///
/// Angles are returned in `[0, 2π)`.
pub fn distribute_on_arc(radius: f64, phi: [f64; 2], d_element: f64) -> Vec<f64> {
    let n = max_elements_on_arc(radius - d_element / 2.0, phi, d_element);
    if n == 0 {
        return Vec::new();
    }
    let span = angle_diff(phi);
    let element_angle = d_element / (2.0 * PI * radius);
    let d_between = (span - n as f64 * element_angle) / (n as f64 + 1.0);
    (0..n)
        .map(|k| {
            let centre = d_between + 0.5 * element_angle + k as f64 * (d_between + element_angle);
            let angle = (phi[0] + centre).rem_euclid(2.0 * PI);
            // rem_euclid rounds tiny negative angles up to exactly 2π
            if angle >= 2.0 * PI {
                0.0
            } else {
                angle
            }
        })
        .collect()
}
