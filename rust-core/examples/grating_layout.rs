/// Example laying out a grating spectrometer on a Rowland torus
///
/// Designs a tilted torus, fills a segment of it with grating facets and puts a
/// row of CCDs close to the focal point. Run with
/// `cargo run --example grating_layout`.
use rowland_torus::interfaces::Orientation;
use rowland_torus::placement::ElementArray;
use rowland_torus::rowland::design_tilted_torus;
use rowland_torus::RowlandError;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Rowland torus grating layout ===\n");

    // 1. Design the torus
    let focal_length = 12000.0;
    let alpha = 0.02;
    let design = design_tilted_torus(focal_length, alpha, 2.0 * alpha)?;
    println!("1. Designed torus for f = {}, alpha = {}:", focal_length, alpha);
    println!("   R = {:.3}", design.major_radius);
    println!("   r = {:.3}", design.minor_radius);
    let centre = design.pose.translation_vector();
    println!("   centre = ({:.3}, {:.3}, {:.3})\n", centre.x, centre.y, centre.z);
    let torus = design.into_torus()?;

    // 2. Grating facets on a segment above the optical axis
    let gas = ElementArray::grating_array_structure(
        torus.clone(),
        30.0,
        [11000.0, 12500.0],
        [300.0, 600.0],
        Some([0.3, 1.2]),
    )?;
    let facets = gas.compute_poses()?;
    println!("2. Grating array structure:");
    println!("   radii: {:?}", gas.distribute_elements_on_radius());
    println!("   facets placed: {}", facets.len());
    let ideal = gas.calc_ideal_center()?;
    println!("   ideal centre: ({:.2}, {:.2}, {:.2})", ideal.x, ideal.y, ideal.z);
    if let Some(first) = facets.first() {
        let normal = first.pose.rotation_matrix().column(0).into_owned();
        println!(
            "   facet {} at radius {:.1}, angle {:.3}, normal ({:.4}, {:.4}, {:.4})\n",
            first.id, first.radius, first.angle, normal.x, normal.y, normal.z
        );
    }

    // 3. Same segment with facets tangent to the torus
    let tangent = gas.clone().with_orientation(Orientation::TangentToTorus);
    let tilted = tangent.compute_poses()?;
    let max_tilt = facets
        .iter()
        .zip(&tilted)
        .map(|(a, b)| {
            let na = a.pose.rotation_matrix().column(0).into_owned();
            let nb = b.pose.rotation_matrix().column(0).into_owned();
            na.angle(&nb)
        })
        .fold(0.0_f64, f64::max);
    println!("3. Largest angle between focused and tangent facets: {:.2e} rad\n", max_tilt);

    // 4. CCD row next to the focal point
    let ccds = ElementArray::linear_ccd_array(torus, 25.0, [0.0, 50.0], [10.0, 160.0], 0.0)?;
    match ccds.layout() {
        Ok(layout) => {
            println!("4. Linear CCD array ({}):", layout.id_column);
            for ccd in &layout.elements {
                let p = ccd.center;
                println!("   CCD {} at ({:.3}, {:.3}, {:.3})", ccd.id, p.x, p.y, p.z);
            }
        }
        Err(RowlandError::ElementPlacement { min, max }) => {
            println!("4. CCDs do not fit: no torus intersection in x = [{}, {}]", min, max);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
