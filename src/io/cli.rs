//! Command-line interface for batch texture resynthesis

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::engine::Synthesizer;
use crate::io::configuration::{
    DEFAULT_MAGIC, DEFAULT_NEIGHBORS, DEFAULT_SCALE, DEFAULT_TRIES, OUTPUT_EXTENSION,
};
use crate::io::error::Result;
use crate::io::image::{load_pixmap, save_pixmap_png};
use crate::io::progress::ProgressManager;
use crate::params::Parameters;

#[derive(Parser)]
#[command(name = "texweave")]
#[command(
    author,
    version,
    about = "Resynthesize textures from example images"
)]
/// Command-line arguments for the resynthesis tool
pub struct Cli {
    /// Image files to open, resynthesize, and save as {name}.resynth.png
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Sensitivity to outliers, on a 0-256 scale
    #[arg(short = 'a', long, default_value_t = 32)]
    pub autism: u32,

    /// Neighboring points to use when sampling
    #[arg(short = 'N', long, default_value_t = DEFAULT_NEIGHBORS)]
    pub neighbors: usize,

    /// Random corpus points added to the candidates per pixel
    #[arg(short = 'M', long, default_value_t = DEFAULT_TRIES)]
    pub tries: usize,

    /// Polishing decay constant; 0 disables polishing
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAGIC)]
    pub magic: u8,

    /// Output size multiplier; negative values set width and height
    #[arg(short = 's', long, default_value_t = DEFAULT_SCALE, allow_negative_numbers = true)]
    pub scale: i32,

    /// Initial RNG value; 0 seeds from the current time
    #[arg(short = 'S', long, default_value_t = 0)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Assemble engine parameters from the flag values
    pub fn parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        params
            .set_outlier_sensitivity(f64::from(self.autism) / 256.0)
            .set_neighbors(self.neighbors)
            .set_tries(self.tries)
            .set_magic(self.magic);
        if self.seed != 0 {
            params.set_random_seed(self.seed);
        }
        params
    }
}

/// Orchestrates batch resynthesis of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process every file named on the command line
    ///
    /// Returns the number of files whose output could not be written;
    /// the caller folds that count into the process exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be loaded or the engine
    /// rejects its inputs; write failures are counted, not fatal.
    pub fn process(&mut self) -> Result<u8> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.files.len());
        }

        let params = self.cli.parameters();
        let mut failures = 0u8;

        for file in self.cli.files.clone() {
            if !self.process_file(&file, &params)? {
                failures = failures.wrapping_add(1);
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(failures)
    }

    // Allow print for parity with the historical tool, which names each
    // output file on stdout
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path, params: &Parameters) -> Result<bool> {
        let corpus = load_pixmap(input_path)?;
        let mut synthesizer = Synthesizer::with_scale(corpus, self.cli.scale)?;

        if let Some(ref mut pm) = self.progress_manager {
            let bar = pm.start_file(input_path);
            synthesizer.set_progress(move |done, total| {
                if bar.length() != Some(total as u64) {
                    bar.set_length(total as u64);
                }
                bar.set_position(done as u64);
            });
        }

        synthesizer.run(params)?;

        let output_path = Self::get_output_path(input_path);
        if !self.cli.quiet {
            println!("{}", output_path.display());
        }

        let written = match save_pixmap_png(synthesizer.output(), &output_path) {
            Ok(()) => true,
            Err(error) => {
                eprintln!("{error}");
                false
            }
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file();
        }

        Ok(written)
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        input_path.with_extension(OUTPUT_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_replaces_the_extension() {
        assert_eq!(
            FileProcessor::get_output_path(Path::new("textures/moss.png")),
            PathBuf::from("textures/moss.resynth.png")
        );
    }

    #[test]
    fn test_output_path_without_extension() {
        assert_eq!(
            FileProcessor::get_output_path(Path::new("moss")),
            PathBuf::from("moss.resynth.png")
        );
    }
}
