//! Generation - procedural layout of one facility instance.
//!
//! [`Facility`] owns the validated parameters and templates; each step
//! (boundaries, interior, auxiliary solids, dressing) is an `impl Facility`
//! block in its own module.

mod boolean;
mod boundary;
mod dressing;
mod facility;
mod grid;
mod interior;

pub use boolean::*;
pub use boundary::*;
pub use facility::{
    Facility, FacilityParams, FacilityType, Templates, COMPLEX_CALIBRATION_FOOTPRINT,
};
pub use grid::{linspace, pinned_layers};
pub use interior::*;
