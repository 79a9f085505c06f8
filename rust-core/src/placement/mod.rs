// Placement module: Tiles flat, square elements (CCDs, grating facets) over a Rowland torus
// Packing helpers are pure functions; ElementArray turns their targets into element poses

// ======================== MODULE DECLARATIONS ========================
pub mod element_array;
pub mod packing;


// ======================== PACKING ========================
pub use packing::{
    angle_diff,             // fn(phi: [f64; 2]) -> f64 - counter-clockwise span, wraps through zero
    distribute_on_arc,      // fn(radius, phi, d) -> Vec<f64> - centre angles, never beyond phi
    distribute_on_radius,   // fn(radius: [f64; 2], d) -> Vec<f64> - centre radii, may overhang
    max_elements_on_arc,    // fn(radius, phi, d) -> usize - floor(radius * span / d)
    max_elements_on_radius, // fn(radius: [f64; 2], d) -> usize - ceil(span / d)
};

// ======================== ELEMENT ARRAYS ========================
pub use element_array::{
    ElementArray,    // struct - placement engine for one array of elements
    ElementLayout,   // struct - poses plus label and element size for the assembler
    ElementPose,     // struct - id, radius, angle, centre and pose of one element
    PackingStrategy, // enum - Radial { phi } or Arc { phi: [f64; 2] }
};

// ElementArray impl methods:
//   linear_ccd_array(rowland, d_element, x_range, radius, phi: f64) -> Result<Self>      - CCD row, tangent, "CCD_ID"
//   grating_array_structure(rowland, d_element, x_range, radius, phi: Option<[f64; 2]>) -> Result<Self> - GAS, focused, "facet"
//   with_orientation(self, orientation: Orientation) -> Self                           - override default orientation
//   with_degenerate_normal(self, degenerate: DegenerateNormal) -> Self                 - normal at the R == r centre
//   max_elements_on_radius(&self) -> usize                                             - elements along the radius
//   distribute_elements_on_radius(&self) -> Vec<f64>                                   - centre radii
//   max_elements_on_arc(&self, radius) -> usize                                        - elements on the arc at radius
//   distribute_elements_on_arc(&self, radius) -> Vec<f64>                              - centre angles at radius
//   element_targets(&self) -> Vec<(f64, f64)>                                          - ordered (radius, angle) pairs
//   calc_ideal_center(&self) -> Result<Vector3<f64>>                                   - centre of an arc segment
//   compute_poses(&self) -> Result<Vec<ElementPose>>                                   - poses, recomputed every call
//   layout(&self) -> Result<ElementLayout>                                             - poses for the assembler
