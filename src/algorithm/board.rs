//! Board engine: the possibility tensor, the collapse loop, and the windowed
//! consistency re-check

use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::bitset::CandidateSet;
use crate::algorithm::definition::WaveFunctionDefinition;
use crate::io::error::{GenerationError, Result, invalid_parameter};

/// Resolution state of a single cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileState {
    /// More than one candidate tile id remains
    Undetermined,
    /// Exactly one candidate remains; this is the cell's final value
    Actualized(usize),
}

impl TileState {
    /// The actualized tile id, if the cell has one
    pub const fn actualized(self) -> Option<usize> {
        match self {
            Self::Actualized(tile_id) => Some(tile_id),
            Self::Undetermined => None,
        }
    }
}

/// Stateful collapse engine over a grid of candidate sets
///
/// Owns the possibility tensor and a seeded random stream for its whole
/// lifetime; the random sequence is fully determined by the construction
/// seed and the operations performed, so runs are reproducible. A board that
/// has raised [`GenerationError::ContradictoryBoardState`] is left partially
/// re-checked and must be discarded, never reused.
#[derive(Debug)]
pub struct Board {
    cells: Array2<CandidateSet>,
    rng: StdRng,
    definition: WaveFunctionDefinition,
}

impl Board {
    /// Create a board with every tile id possible in every cell
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn new(
        rows: usize,
        columns: usize,
        definition: WaveFunctionDefinition,
        seed: u64,
    ) -> Result<Self> {
        if rows == 0 {
            return Err(invalid_parameter("rows", &rows, &"board must have rows"));
        }
        if columns == 0 {
            return Err(invalid_parameter(
                "columns",
                &columns,
                &"board must have columns",
            ));
        }

        let cells = Array2::from_elem((rows, columns), CandidateSet::all(definition.num_tiles()));

        Ok(Self {
            cells,
            rng: StdRng::seed_from_u64(seed),
            definition,
        })
    }

    /// Collapse one more cell, or report that the board is complete
    ///
    /// Scans all cells in row-major order, gathers the non-actualized cells
    /// with the fewest remaining candidates, picks one of them uniformly at
    /// random, collapses it to a single uniformly chosen candidate, and
    /// re-checks the propagation window around it. The tie-break draw always
    /// precedes the state draw. Returns `Ok(false)` once every cell is
    /// actualized; further calls keep returning `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::ContradictoryBoardState`] when the window
    /// re-check finds a cell with no viable tile. The board state is then
    /// partial and the board must be discarded.
    pub fn actualize_next_tile(&mut self) -> Result<bool> {
        let mut min_remaining = usize::MAX;
        let mut min_state_cells: Vec<(usize, usize)> = Vec::new();

        for ((row, column), cell) in self.cells.indexed_iter() {
            let remaining = cell.count();
            if remaining == 1 {
                continue;
            }

            if remaining < min_remaining {
                min_remaining = remaining;
                min_state_cells.clear();
                min_state_cells.push((row, column));
            } else if remaining == min_remaining {
                min_state_cells.push((row, column));
            }
        }

        if min_state_cells.is_empty() {
            return Ok(false);
        }

        // Tie-break draw precedes the state draw.
        let pick = self.rng.random_range(0..min_state_cells.len());
        let (row, column) = min_state_cells.get(pick).copied().unwrap_or_default();

        self.collapse_cell(row, column)?;
        self.propagate(row, column)?;

        Ok(true)
    }

    /// Narrow the cell to one uniformly chosen remaining candidate
    fn collapse_cell(&mut self, row: usize, column: usize) -> Result<()> {
        let remaining = self
            .cells
            .get([row, column])
            .map(CandidateSet::to_vec)
            .unwrap_or_default();

        if remaining.is_empty() {
            return Err(GenerationError::ContradictoryBoardState { row, column });
        }

        let pick = self.rng.random_range(0..remaining.len());
        let winning_state = remaining.get(pick).copied().unwrap_or_default();

        if let Some(cell) = self.cells.get_mut([row, column]) {
            cell.retain_only(winning_state);
        }

        Ok(())
    }

    /// Re-check every cell within the propagation window of the collapsed one
    ///
    /// A cell passes when at least one configuration has both its tile-id
    /// bit still set and its predicate satisfied. The pass never clears a
    /// bit whose predicate fails, so it is a validity check with
    /// contradiction detection rather than arc-consistency narrowing.
    /// Contradictions abort the scan immediately, leaving the rest of the
    /// window unvisited; there is no rollback.
    fn propagate(&mut self, row: usize, column: usize) -> Result<()> {
        let last_row = self.num_rows() - 1;
        let last_column = self.num_columns() - 1;

        let start_row = row.saturating_sub(self.definition.row_radius());
        let end_row = last_row.min(row.saturating_add(self.definition.row_radius()));
        let start_column = column.saturating_sub(self.definition.column_radius());
        let end_column = last_column.min(column.saturating_add(self.definition.column_radius()));

        for i in start_row..=end_row {
            for j in start_column..=end_column {
                let viable = self.definition.configurations().iter().any(|configuration| {
                    self.contains_candidate(i, j, configuration.tile_id())
                        && configuration.fits_configuration(self, i, j)
                });

                if !viable {
                    return Err(GenerationError::ContradictoryBoardState { row: i, column: j });
                }
            }
        }

        Ok(())
    }

    fn contains_candidate(&self, row: usize, column: usize, tile_id: usize) -> bool {
        self.cells
            .get([row, column])
            .is_some_and(|cell| cell.contains(tile_id))
    }

    /// Resolution state of the given cell
    ///
    /// Out-of-range coordinates read as undetermined; passing them is a
    /// caller error, not a recoverable condition.
    pub fn tile_state(&self, row: usize, column: usize) -> TileState {
        self.cells
            .get([row, column])
            .and_then(CandidateSet::sole_candidate)
            .map_or(TileState::Undetermined, TileState::Actualized)
    }

    /// Count actualized cells by scanning the whole board
    ///
    /// No incremental counter is kept; safe to call at any point, including
    /// mid-generation.
    pub fn num_actualized(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_singleton()).count()
    }

    /// Total rows on the board
    pub fn num_rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Total columns on the board
    pub fn num_columns(&self) -> usize {
        self.cells.ncols()
    }
}
