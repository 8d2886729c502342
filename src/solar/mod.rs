//! Solar disk geometry: orientation from the observation time and the
//! heliographic grid drawn over full-disk images and rectified patches.

mod grid;
mod orientation;
mod projection;

pub use grid::{PatchRegion, SolarGrid, SolarGridLine};
pub use orientation::{SolarOrientation, julian_ephemeris_day};
pub use projection::{SolarDisk, heliographic_to_image};
