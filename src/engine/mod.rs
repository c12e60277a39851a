//! Neighborhood-matching synthesis engine
//!
//! Grows an output image pixel by pixel, committing for each position the
//! corpus pixel whose surroundings best match the already-synthesized
//! neighborhood. Candidates come from two sources: coordinates inherited
//! from neighbors that already carry a corpus source, and uniform random
//! probes into the corpus. Positions are visited in a seeded random order
//! with a polishing tail that revisits the earliest, worst-informed pixels
//! once the rest of the image exists as context.

/// Perceptual penalty lookup per channel delta
pub mod difference;
/// Distance-sorted neighborhood offsets
pub mod offsets;
/// Randomized visit order construction
pub mod plan;
/// Seeded random sampling
pub mod random;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ndarray::Array2;

use crate::engine::difference::DiffTable;
use crate::engine::random::Sampler;
use crate::io::configuration::DEFAULT_OUTPUT_EDGE;
use crate::io::error::{Result, SynthError};
use crate::params::Parameters;
use crate::spatial::pixmap::MAX_CHANNELS;
use crate::spatial::{Coord, Mask, Pixmap};

/// Per-pixel synthesis bookkeeping
///
/// `source` is only meaningful while `has_source` is set. A committed
/// source is never cleared; polishing revisits may overwrite it.
#[derive(Clone, Copy, Debug, Default)]
struct Status {
    has_value: bool,
    has_source: bool,
    source: Coord,
}

/// A collected neighbor: its offset from the current position, its status
/// at collection time, and its channel values
#[derive(Clone, Copy)]
struct Neighbor {
    offset: Coord,
    status: Status,
    value: [u8; MAX_CHANNELS],
}

/// Shareable flag for cancelling a run between output pixels
///
/// The engine samples the flag once per outer-loop iteration; when set,
/// the run stops with [`SynthError::Cancelled`] and the output buffer
/// holds a partial but well-formed image.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create an unset token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of any run holding a clone of this token
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

type ProgressFn = Box<dyn FnMut(usize, usize)>;

/// Texture synthesis engine state
///
/// Owns the corpus, the output buffer, and every per-run table. A single
/// instance runs one job at a time; `run` may be called repeatedly and
/// reinitializes all per-run state, so identical parameters and seed
/// reproduce identical output.
pub struct Synthesizer {
    channels: usize,
    corpus: Pixmap,
    data: Pixmap,
    /// Healing only: pixels to synthesize; everything else is context
    fill: Option<Mask>,
    data_points: Vec<Coord>,
    corpus_points: Vec<Coord>,

    status: Array2<Status>,
    tried: Array2<i32>,
    sorted_offsets: Vec<Coord>,
    diff_table: DiffTable,
    neighbors: Vec<Neighbor>,
    best: i32,
    best_point: Coord,
    sampler: Sampler,

    cancel: Option<CancelToken>,
    progress: Option<ProgressFn>,
    float_cache: Option<Vec<f32>>,
}

impl std::fmt::Debug for Synthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synthesizer")
            .field("channels", &self.channels)
            .field("data_points", &self.data_points.len())
            .field("corpus_points", &self.corpus_points.len())
            .field("best", &self.best)
            .field("best_point", &self.best_point)
            .finish_non_exhaustive()
    }
}

impl Synthesizer {
    /// Create a texture-synthesis job with an explicit output size
    ///
    /// The output buffer is allocated zeroed and shares the corpus channel
    /// count.
    ///
    /// # Errors
    ///
    /// Returns an error if the corpus channel count is outside 1–4.
    pub fn new(corpus: Pixmap, data_width: usize, data_height: usize) -> Result<Self> {
        let data = Pixmap::new(data_width, data_height, corpus.depth());
        Self::from_parts(corpus, data, None, None)
    }

    /// Create a texture-synthesis job sized by a scale factor
    ///
    /// A positive scale multiplies the corpus dimensions. A negative scale
    /// requests a square output with an edge of `-scale` pixels regardless
    /// of the corpus aspect. A scale of zero falls back to the historical
    /// 256x256 default.
    ///
    /// # Errors
    ///
    /// Returns an error if the corpus channel count is outside 1–4.
    pub fn with_scale(corpus: Pixmap, scale: i32) -> Result<Self> {
        let mut data_width = DEFAULT_OUTPUT_EDGE;
        let mut data_height = DEFAULT_OUTPUT_EDGE;
        if scale > 0 {
            data_width = corpus.width() * scale as usize;
            data_height = corpus.height() * scale as usize;
        }
        if scale < 0 {
            data_width = scale.unsigned_abs() as usize;
            data_height = data_width;
        }
        Self::new(corpus, data_width, data_height)
    }

    /// Create a healing job that fills masked pixels of `image` from its
    /// unmasked pixels
    ///
    /// `fill` selects the pixels to synthesize; `source` selects the
    /// pixels that may be read as corpus samples. A missing `source`
    /// defaults to the complement of `fill`; when neither mask is given
    /// the whole image is both refilled and readable. Pixels outside
    /// `fill` keep their values and serve as matching context. The engine
    /// core itself never interprets masks; they only choose which
    /// coordinates are synthesized versus sampled.
    ///
    /// # Errors
    ///
    /// Returns an error if a mask's dimensions differ from the image's or
    /// the channel count is outside 1–4.
    pub fn healing(image: Pixmap, fill: Option<Mask>, source: Option<Mask>) -> Result<Self> {
        for mask in fill.iter().chain(source.iter()) {
            if mask.width() != image.width() || mask.height() != image.height() {
                return Err(SynthError::InvalidInput {
                    reason: format!(
                        "mask is {}x{} but the image is {}x{}",
                        mask.width(),
                        mask.height(),
                        image.width(),
                        image.height()
                    ),
                });
            }
        }

        let (fill, source) = match (fill, source) {
            (None, None) => (
                Mask::filled(image.width(), image.height()),
                Mask::filled(image.width(), image.height()),
            ),
            (Some(fill), None) => {
                let source = fill.complement();
                (fill, source)
            }
            (None, Some(source)) => (Mask::filled(image.width(), image.height()), source),
            (Some(fill), Some(source)) => (fill, source),
        };

        let corpus = image.clone();
        Self::from_parts(corpus, image, Some(fill), Some(source))
    }

    fn from_parts(
        corpus: Pixmap,
        data: Pixmap,
        fill: Option<Mask>,
        source: Option<Mask>,
    ) -> Result<Self> {
        let channels = corpus.depth();
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(SynthError::UnsupportedChannels { channels });
        }

        let mut data_points = Vec::new();
        for y in 0..data.height() {
            for x in 0..data.width() {
                let point = Coord::new(x as i32, y as i32);
                if fill.as_ref().map_or(true, |mask| mask.get(point)) {
                    data_points.push(point);
                }
            }
        }

        let mut corpus_points = Vec::new();
        for y in 0..corpus.height() {
            for x in 0..corpus.width() {
                let point = Coord::new(x as i32, y as i32);
                if source.as_ref().map_or(true, |mask| mask.get(point)) {
                    corpus_points.push(point);
                }
            }
        }

        let status = Array2::from_elem((data.height(), data.width()), Status::default());
        let tried = Array2::from_elem((corpus.height(), corpus.width()), -1);

        Ok(Self {
            channels,
            corpus,
            data,
            fill,
            data_points,
            corpus_points,
            status,
            tried,
            sorted_offsets: Vec::new(),
            diff_table: DiffTable::new(0.0),
            neighbors: Vec::new(),
            best: i32::MAX,
            best_point: Coord::ZERO,
            sampler: Sampler::new(0),
            cancel: None,
            progress: None,
            float_cache: None,
        })
    }

    /// Install a token checked between output pixels
    pub fn set_cancel_token(&mut self, token: CancelToken) {
        self.cancel = Some(token);
    }

    /// Install a callback invoked as `(done, total)` once per output pixel
    pub fn set_progress<F>(&mut self, callback: F)
    where
        F: FnMut(usize, usize) + 'static,
    {
        self.progress = Some(Box::new(callback));
    }

    /// Output width in pixels
    pub fn width(&self) -> usize {
        self.data.width()
    }

    /// Output height in pixels
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Channels per pixel
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// The synthesized image
    pub const fn output(&self) -> &Pixmap {
        &self.data
    }

    /// The synthesized pixels, row-major
    pub fn pixels(&self) -> &[u8] {
        self.data.pixels()
    }

    /// The synthesized pixels as floats in `[0, 1]`, computed as byte/255
    ///
    /// Built lazily on first access and cached until the next `run`.
    pub fn pixels_float(&mut self) -> &[f32] {
        let data = &self.data;
        self.float_cache
            .get_or_insert_with(|| {
                data.pixels()
                    .iter()
                    .map(|&byte| f32::from(byte) / 255.0)
                    .collect()
            })
            .as_slice()
    }

    /// Synthesize the output in place
    ///
    /// Reinitializes every per-run table from `params`, so repeated runs
    /// with identical parameters and seed are byte-identical. On
    /// cancellation the output keeps the partial result.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidInput`] when there are no corpus
    /// points to sample or no data points to synthesize, and
    /// [`SynthError::Cancelled`] when the cancel token fires mid-run; the
    /// former leaves the output untouched.
    pub fn run(&mut self, params: &Parameters) -> Result<()> {
        if self.corpus_points.is_empty() || self.data_points.is_empty() {
            return Err(SynthError::InvalidInput {
                reason: format!(
                    "nothing to synthesize (corpus points: {}, data points: {})",
                    self.corpus_points.len(),
                    self.data_points.len()
                ),
            });
        }

        self.float_cache = None;
        self.sampler.reseed(params.random_seed());
        self.diff_table = DiffTable::new(params.outlier_sensitivity());
        self.sorted_offsets = offsets::sorted_offsets(
            self.corpus.width(),
            self.corpus.height(),
            self.data.width(),
            self.data.height(),
        );
        self.neighbors.clear();
        self.neighbors.reserve(params.neighbors());
        self.best = i32::MAX;
        self.best_point = Coord::ZERO;

        self.status.fill(Status::default());
        if let Some(fill) = &self.fill {
            // unmasked pixels keep their values and act as context
            for y in 0..self.data.height() {
                for x in 0..self.data.width() {
                    let point = Coord::new(x as i32, y as i32);
                    if !fill.get(point) {
                        self.status[[y, x]].has_value = true;
                    }
                }
            }
        }
        self.tried.fill(-1);

        let mut plan = self.data_points.clone();
        plan::shuffle(&mut plan, &mut self.sampler);
        plan::append_polish_tail(&mut plan, params.magic());

        // The plan is walked in reverse: the polishing tail runs first and
        // the shuffled prefix is committed last, so the earliest positions
        // end up synthesized with the freshest context.
        let total = plan.len();
        for index in (0..total).rev() {
            if let Some(token) = &self.cancel {
                if token.is_cancelled() {
                    return Err(SynthError::Cancelled {
                        remaining: index + 1,
                    });
                }
            }

            self.synthesize_pixel(plan[index], index as i32, params);

            if let Some(callback) = &mut self.progress {
                callback(total - index, total);
            }
        }

        Ok(())
    }

    /// Choose and commit the best corpus pixel for one output position
    fn synthesize_pixel(&mut self, position: Coord, iteration: i32, params: &Parameters) {
        // this position is guaranteed to hold a value once we return
        self.status[[position.y as usize, position.x as usize]].has_value = true;

        self.collect_neighbors(position, params);

        self.best = i32::MAX;

        // candidates inherited from neighbors that already carry a source:
        // shifting a neighbor's source by its offset proposes the corpus
        // pixel that would extend the same patch over this position
        for i in 0..self.neighbors.len() {
            if self.best == 0 {
                break;
            }
            let neighbor = self.neighbors[i];
            if !neighbor.status.has_source {
                continue;
            }
            let candidate = neighbor.status.source - neighbor.offset;
            if !self.corpus.contains(candidate) {
                continue;
            }
            // skip candidates already scored this iteration
            if self.tried[[candidate.y as usize, candidate.x as usize]] == iteration {
                continue;
            }
            self.try_point(candidate);
            self.tried[[candidate.y as usize, candidate.x as usize]] = iteration;
        }

        // random probes seed the first pixels, which have no neighbors,
        // and add variety afterwards; they are cheap enough that running
        // them through the tried table is not worth it
        for _ in 0..params.tries() {
            if self.best == 0 {
                break;
            }
            let pick = self.sampler.index(self.corpus_points.len());
            self.try_point(self.corpus_points[pick]);
        }

        let best_point = self.best_point;
        let corpus = &self.corpus;
        let data = &mut self.data;
        data.at_mut(position).copy_from_slice(corpus.at(best_point));

        let status = &mut self.status[[position.y as usize, position.x as usize]];
        status.has_source = true;
        status.source = best_point;
    }

    /// Gather up to `neighbors` valid, already-assigned pixels around
    /// `position`, nearest first
    ///
    /// The zero offset is first in the list and the current position was
    /// just marked as having a value, so slot 0 is always the position
    /// itself; scoring reserves that slot and never charges it.
    fn collect_neighbors(&mut self, position: Coord, params: &Parameters) {
        self.neighbors.clear();
        let extent = (self.data.width() as i32, self.data.height() as i32);
        for &offset in &self.sorted_offsets {
            if self.neighbors.len() >= params.neighbors() {
                break;
            }
            let Some(point) = wrap_or_clip(params.h_tile(), params.v_tile(), extent, position + offset)
            else {
                continue;
            };
            let status = self.status[[point.y as usize, point.x as usize]];
            if !status.has_value {
                continue;
            }
            let mut value = [0u8; MAX_CHANNELS];
            value[..self.channels].copy_from_slice(self.data.at(point));
            self.neighbors.push(Neighbor {
                offset,
                status,
                value,
            });
        }
    }

    /// Score a candidate corpus coordinate against the collected
    /// neighborhood, keeping it if it beats the current best
    ///
    /// Neighbors are charged in collection order (nearest first), which
    /// maximizes how early the `sum >= best` cutoff can fire. A neighbor
    /// falling outside the corpus is charged the maximum per-channel
    /// penalty, so corpus edges are avoided unless nothing better exists.
    fn try_point(&mut self, candidate: Coord) {
        let mut sum: i32 = 0;
        for (i, neighbor) in self.neighbors.iter().enumerate() {
            let point = candidate + neighbor.offset;
            let mut diff = 0i32;
            if !self.corpus.contains(point) {
                diff = self.diff_table.edge_penalty() * self.channels as i32;
            } else if i > 0 {
                let corpus_pixel = self.corpus.at(point);
                for channel in 0..self.channels {
                    diff += self.diff_table.penalty(
                        i32::from(neighbor.value[channel]) - i32::from(corpus_pixel[channel]),
                    );
                }
            }

            sum = if cfg!(debug_assertions) {
                sum.checked_add(diff)
                    .expect("candidate difference sum overflowed")
            } else {
                // wrapping is benign here: best-so-far pruning stays sound
                sum.wrapping_add(diff)
            };
            if sum >= self.best {
                return;
            }
        }

        self.best = sum;
        self.best_point = candidate;
    }
}

/// Adjust a coordinate for tiling, or reject it
///
/// Tileable axes wrap by repeated addition or subtraction of the extent,
/// which handles displacements larger than the image itself. An
/// out-of-range coordinate on a non-tileable axis is rejected and the
/// neighbor skipped.
fn wrap_or_clip(h_tile: bool, v_tile: bool, extent: (i32, i32), mut point: Coord) -> Option<Coord> {
    let (width, height) = extent;
    while point.x < 0 {
        if !h_tile {
            return None;
        }
        point.x += width;
    }
    while point.x >= width {
        if !h_tile {
            return None;
        }
        point.x -= width;
    }
    while point.y < 0 {
        if !v_tile {
            return None;
        }
        point.y += height;
    }
    while point.y >= height {
        if !v_tile {
            return None;
        }
        point.y -= height;
    }
    Some(point)
}
