//! Command-line interface driving board generation from a tileset manifest

use std::path::PathBuf;

use clap::Parser;

use crate::algorithm::board::Board;
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_SEED, MAX_BOARD_DIMENSION,
    OUTPUT_SUFFIX,
};
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::io::image::{TileBitmaps, export_board_as_png};
use crate::io::manifest::TilesetManifest;
use crate::io::progress::GenerationProgress;

#[derive(Parser)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate tile patterns with wave function collapse"
)]
/// Command-line arguments for the generation tool
pub struct Cli {
    /// Tileset manifest (RON) describing tiles and adjacency
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Board rows
    #[arg(short = 'r', long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Board columns
    #[arg(short = 'c', long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum generation attempts before giving up
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Output PNG path (defaults to the manifest name plus a suffix)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs generation attempts until a board completes or attempts run out
pub struct GenerationRunner {
    cli: Cli,
}

impl GenerationRunner {
    /// Create a runner from parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the manifest, generate a board, and export the result
    ///
    /// Attempt k builds a fresh board seeded with the base seed plus k; a
    /// board that raises a contradiction is discarded and the next attempt
    /// started, per the engine's fail-fast contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments fail validation, the manifest or a
    /// tile bitmap cannot be loaded, every attempt ends in a contradiction,
    /// or the result cannot be exported.
    pub fn run(&self) -> Result<()> {
        self.validate_arguments()?;

        let manifest = TilesetManifest::from_path(&self.cli.manifest)?;
        let tiles = TileBitmaps::load(&manifest.image_paths(&self.cli.manifest))?;

        let progress =
            GenerationProgress::new(self.cli.rows * self.cli.columns, self.cli.quiet);

        let mut last_contradiction = (0, 0);
        for attempt in 0..self.cli.attempts {
            let seed = self.cli.seed.wrapping_add(attempt as u64);
            progress.start_attempt(attempt + 1, seed);

            let definition = manifest.compile()?;
            let mut board = Board::new(self.cli.rows, self.cli.columns, definition, seed)?;

            match Self::run_to_completion(&mut board, &progress) {
                Ok(()) => {
                    progress.finish();
                    return export_board_as_png(&board, &tiles, &self.output_path());
                }
                Err(GenerationError::ContradictoryBoardState { row, column }) => {
                    progress.abandon(row, column);
                    last_contradiction = (row, column);
                }
                Err(other) => return Err(other),
            }
        }

        let (row, column) = last_contradiction;
        Err(GenerationError::AttemptsExhausted {
            attempts: self.cli.attempts,
            row,
            column,
        })
    }

    /// Step the board until it reports completion
    fn run_to_completion(board: &mut Board, progress: &GenerationProgress) -> Result<()> {
        let mut actualized = board.num_actualized();
        progress.set_actualized(actualized);

        while board.actualize_next_tile()? {
            actualized += 1;
            progress.set_actualized(actualized);
        }

        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        for (parameter, value) in [("rows", self.cli.rows), ("columns", self.cli.columns)] {
            if value == 0 {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &"board dimensions must be positive",
                ));
            }
            if value > MAX_BOARD_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("board dimensions are capped at {MAX_BOARD_DIMENSION}"),
                ));
            }
        }

        if self.cli.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.cli.attempts,
                &"at least one attempt is required",
            ));
        }

        Ok(())
    }

    fn output_path(&self) -> PathBuf {
        self.cli.output.clone().unwrap_or_else(|| {
            let stem = self.cli.manifest.file_stem().unwrap_or_default();
            let name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());

            self.cli.manifest.parent().map_or_else(
                || PathBuf::from(&name),
                |parent| parent.join(&name),
            )
        })
    }
}
