//! Exemplar-based texture synthesis and inpainting
//!
//! The engine grows a raster image by stitching together pixels sampled
//! from a reference image (the corpus), matching each output pixel's
//! neighborhood against the corpus and committing the best fit. The same
//! machinery heals masked regions of an image using its unmasked pixels
//! as the corpus.

#![forbid(unsafe_code)]

/// Core synthesis engine: visit planning, candidate search, and scoring
pub mod engine;
/// Input/output operations and error handling
pub mod io;
/// Run parameters with range-clamped setters
pub mod params;
/// Pixel buffers, coordinates, and selection masks
pub mod spatial;

pub use engine::{CancelToken, Synthesizer};
pub use io::error::{Result, SynthError};
pub use params::Parameters;
pub use spatial::{Coord, Mask, Pixmap};
