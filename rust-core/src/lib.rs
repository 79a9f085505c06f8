//! Rowland torus geometry library
//!
//! This library provides the geometric kernel for X-ray grating spectrometers built
//! around a Rowland torus: the implicit torus surface with its intersections and
//! normals, a constructive designer for tilted tori, and a placement engine that
//! tiles flat elements (gratings, CCDs) over the torus.

pub mod config;
pub mod errors;
pub mod geometries;
pub mod interfaces;
pub mod photons;
pub mod placement;
pub mod rowland;

pub use errors::RowlandError;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, RowlandError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A convenience prelude for importing common items.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::geometries::AffineTransform;
    #[doc(no_inline)]
    pub use crate::interfaces::{DegenerateNormal, Frame, Orientation};
    #[doc(no_inline)]
    pub use crate::placement::{ElementArray, ElementPose, PackingStrategy};
    #[doc(no_inline)]
    pub use crate::rowland::{design_tilted_torus, RowlandTorus, TorusDesign};
    #[doc(no_inline)]
    pub use crate::{Result, RowlandError};
}
