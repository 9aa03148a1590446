//! pixelpad painting core - grid surfaces, strokes and the camera
//!
//! This crate provides everything between host input and pixels:
//! - [`color`] - Color parsing and the RGBA8 [`ColorValue`]
//! - [`palette`] - Named palettes with host-value validation
//! - [`raster`] - Gap-free line rasterization between pointer samples
//! - [`surface`] - RGBA8 grid surfaces, blitting and the scratch/visible pair
//! - [`viewport`] - Camera offset/scale and screen <-> grid mapping
//! - [`session`] - The interaction state machine driving all of the above

pub mod color;
pub mod constants;
pub mod palette;
pub mod raster;
pub mod session;
pub mod surface;
pub mod types;
pub mod viewport;

pub use color::*;
pub use constants::*;
pub use palette::*;
pub use raster::*;
pub use session::*;
pub use surface::*;
pub use types::*;
pub use viewport::*;
