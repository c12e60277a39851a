//! Engine constants and runtime configuration defaults

// Perceptual difference table layout
/// Number of entries in the difference table (one per signed channel delta)
pub const DIFF_TABLE_SIZE: usize = 512;
/// Index of the zero delta within the difference table
pub const DIFF_TABLE_CENTER: usize = 256;
/// Penalty assigned to a full-range channel mismatch
pub const MAX_PENALTY: i32 = 65536;

// Parameter ranges
/// Largest usable neighborhood; the tail of OEIS A057961, the number of
/// lattice points inside discs of increasing radius
pub const MAX_NEIGHBORS: usize = 1093;
/// Upper bound on random corpus probes per output pixel
pub const MAX_TRIES: usize = 65536;

// Default values for configurable parameters
/// Default sensitivity to outliers (32 on the CLI's 0-256 scale)
pub const DEFAULT_AUTISM: f64 = 32.0 / 256.0;
/// Default neighborhood size
pub const DEFAULT_NEIGHBORS: usize = 29;
/// Default random corpus probes per output pixel
pub const DEFAULT_TRIES: usize = 192;
/// Default polishing decay constant (3/4 in units of 1/256)
pub const DEFAULT_MAGIC: u8 = 192;
/// Default CLI output size multiplier
pub const DEFAULT_SCALE: i32 = 1;

// Output settings
/// Edge length used when no scale is given
pub const DEFAULT_OUTPUT_EDGE: usize = 256;
/// Extension replacing the input's own on output files
pub const OUTPUT_EXTENSION: &str = "resynth.png";
