//! Boolean selection masks for the healing front-end

use ndarray::Array2;

use crate::io::error::{Result, SynthError};
use crate::spatial::Coord;

/// A per-pixel selection over an image
///
/// The healing front-end uses one mask to mark pixels that must be
/// synthesized and another to mark pixels that may be read as sources.
/// The engine core never interprets masks itself; they only decide which
/// coordinates become data points versus corpus points.
#[derive(Clone, Debug)]
pub struct Mask {
    cells: Array2<bool>,
}

impl Mask {
    /// A mask with every pixel selected
    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), true),
        }
    }

    /// A mask with no pixel selected
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), false),
        }
    }

    /// Build a mask from a row-major byte buffer; nonzero bytes select
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length does not match the dimensions.
    pub fn from_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != width * height {
            return Err(SynthError::InvalidInput {
                reason: format!(
                    "mask buffer holds {} bytes, expected {} for {width}x{height}",
                    bytes.len(),
                    width * height
                ),
            });
        }
        let cells = Array2::from_shape_fn((height, width), |(y, x)| bytes[y * width + x] != 0);
        Ok(Self { cells })
    }

    /// Mask width in pixels
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Mask height in pixels
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Whether the pixel at `point` is selected
    pub fn get(&self, point: Coord) -> bool {
        self.cells[[point.y as usize, point.x as usize]]
    }

    /// Select or deselect the pixel at `point`
    pub fn set(&mut self, point: Coord, selected: bool) {
        self.cells[[point.y as usize, point.x as usize]] = selected;
    }

    /// The mask with every selection inverted
    pub fn complement(&self) -> Self {
        Self {
            cells: self.cells.mapv(|v| !v),
        }
    }

    /// Number of selected pixels
    pub fn count_selected(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }
}
