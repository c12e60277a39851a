//! Distance-sorted neighborhood offsets

use crate::spatial::Coord;

/// Build the list of displacements searched around each output pixel
///
/// The rectangle spans `(-W+1..W-1) x (-H+1..H-1)` where `W` and `H` are
/// the per-axis minima of the corpus and output dimensions, so offsets
/// never reach further than either image extends. Offsets are sorted by
/// squared distance from the zero point; scanning them in order means the
/// closest already-assigned neighbors are collected first and the
/// neighborhood cap drops only the least informative candidates. The sort
/// is stable and `(0,0)` is the unique offset at distance zero, so it
/// always stays first.
pub fn sorted_offsets(
    corpus_width: usize,
    corpus_height: usize,
    data_width: usize,
    data_height: usize,
) -> Vec<Coord> {
    let width = corpus_width.min(data_width) as i32;
    let height = corpus_height.min(data_height) as i32;
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let capacity = (2 * width as usize - 1) * (2 * height as usize - 1);
    let mut offsets = Vec::with_capacity(capacity);
    for y in (1 - height)..height {
        for x in (1 - width)..width {
            offsets.push(Coord::new(x, y));
        }
    }

    offsets.sort_by_key(|offset| offset.distance_squared());
    offsets
}
