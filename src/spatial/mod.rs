//! Pixel buffers, coordinates, and selection masks

/// Integer coordinates and displacement arithmetic
pub mod coord;
/// Boolean per-pixel selections for healing
pub mod mask;
/// Flat 8-bit raster buffers
pub mod pixmap;

pub use coord::Coord;
pub use mask::Mask;
pub use pixmap::{MAX_CHANNELS, Pixmap};
