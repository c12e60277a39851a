//! Randomized visit order with a polishing tail

use crate::engine::random::Sampler;
use crate::spatial::Coord;

/// Shuffle the visit order in place
///
/// Every position is swapped with a draw over the full range, matching the
/// historical shuffle this engine inherits. The bias is slight and does
/// not affect correctness, only which permutation a given seed produces.
pub fn shuffle(points: &mut [Coord], sampler: &mut Sampler) {
    if points.is_empty() {
        return;
    }
    for i in 0..points.len() {
        let j = sampler.index(points.len());
        points.swap(i, j);
    }
}

/// Append the polishing tail to a shuffled visit plan
///
/// The first pixels synthesized have little or no context and come out the
/// worst; appending a geometrically shrinking prefix of the plan lets them
/// be reconsidered once the rest of the image is filled. The revisit count
/// decays by `magic/256` per round until it reaches zero; a `magic` of
/// zero disables polishing entirely.
pub fn append_polish_tail(points: &mut Vec<Coord>, magic: u8) {
    if magic == 0 {
        return;
    }
    let mut n = points.len();
    loop {
        n = n * magic as usize / 256;
        if n == 0 {
            break;
        }
        for i in 0..n {
            let revisit = points[i];
            points.push(revisit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: i32, height: i32) -> Vec<Coord> {
        let mut points = Vec::new();
        for y in 0..height {
            for x in 0..width {
                points.push(Coord::new(x, y));
            }
        }
        points
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut points = grid(16, 16);
        let mut sampler = Sampler::new(5);
        shuffle(&mut points, &mut sampler);

        let mut sorted = points.clone();
        sorted.sort_by_key(|c| (c.y, c.x));
        assert_eq!(sorted, grid(16, 16));
    }

    #[test]
    fn test_shuffle_is_seed_deterministic() {
        let mut a = grid(8, 8);
        let mut b = grid(8, 8);
        shuffle(&mut a, &mut Sampler::new(77));
        shuffle(&mut b, &mut Sampler::new(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_polish_tail_decays_geometrically() {
        let mut points = grid(16, 16);
        append_polish_tail(&mut points, 128);
        // 256 -> 128 -> 64 -> ... -> 1 revisits, then zero
        assert_eq!(points.len(), 256 + 128 + 64 + 32 + 16 + 8 + 4 + 2 + 1);
        // the tail revisits the plan's own prefix
        assert_eq!(&points[256..384], &points[..128]);
    }

    #[test]
    fn test_zero_magic_appends_nothing() {
        let mut points = grid(8, 8);
        append_polish_tail(&mut points, 0);
        assert_eq!(points.len(), 64);
    }

    #[test]
    fn test_empty_plan_is_left_alone() {
        let mut points: Vec<Coord> = Vec::new();
        shuffle(&mut points, &mut Sampler::new(1));
        append_polish_tail(&mut points, 192);
        assert!(points.is_empty());
    }
}
