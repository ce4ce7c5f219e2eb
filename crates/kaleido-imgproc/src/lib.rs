#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// background dimming module.
pub mod dim;

/// rotate-and-composite kaleidoscope module.
pub mod kaleidoscope;

/// triangular wedge extraction module.
pub mod slice;

pub use crate::dim::{dim_background, DimTarget};
pub use crate::kaleidoscope::{kaleidoscope, KaleidoscopeParams};
pub use crate::slice::{slice_triangle, SampledPoint, WedgeGeometry};
