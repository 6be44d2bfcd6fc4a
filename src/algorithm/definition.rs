//! Immutable wave function configuration: the rule list, the propagation
//! half-extents, and the read-only position handle handed to rule predicates

use std::fmt;

use crate::algorithm::board::{Board, TileState};
use crate::io::error::{GenerationError, Result, invalid_parameter};

/// Read-only view of one board cell, handed to rule predicates
///
/// Grants exactly the query surface external consumers of the board get:
/// state lookups and dimension queries. The board is borrowed, not copied;
/// the handle is only valid for the duration of the predicate call.
#[derive(Clone, Copy)]
pub struct BoardPosition<'a> {
    board: &'a Board,
    row: usize,
    column: usize,
}

impl<'a> BoardPosition<'a> {
    /// Create a handle for the given coordinates
    pub const fn new(board: &'a Board, row: usize, column: usize) -> Self {
        Self { board, row, column }
    }

    /// Row of the cell under inspection
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Column of the cell under inspection
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Resolution state of the cell itself
    pub fn state(&self) -> TileState {
        self.board.tile_state(self.row, self.column)
    }

    /// Resolution state of an arbitrary cell
    pub fn state_at(&self, row: usize, column: usize) -> TileState {
        self.board.tile_state(row, column)
    }

    /// Resolution state of the cell at a signed offset from this one
    ///
    /// Offsets landing outside the board read as undetermined, so edge
    /// neighbors impose no constraint.
    pub fn state_at_offset(&self, row_offset: i64, column_offset: i64) -> TileState {
        let row = self.row as i64 + row_offset;
        let column = self.column as i64 + column_offset;
        if row < 0 || column < 0 {
            return TileState::Undetermined;
        }
        self.board.tile_state(row as usize, column as usize)
    }

    /// Total rows on the board
    pub fn num_rows(&self) -> usize {
        self.board.num_rows()
    }

    /// Total columns on the board
    pub fn num_columns(&self) -> usize {
        self.board.num_columns()
    }
}

impl fmt::Debug for BoardPosition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardPosition")
            .field("row", &self.row)
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

/// Admissibility predicate evaluated against a board position
///
/// Predicates must be pure reads: they may inspect any cell through the
/// position handle but never mutate the board.
pub type FitsPredicate = Box<dyn Fn(&BoardPosition<'_>) -> bool>;

/// One admissibility rule: a tile id paired with the predicate deciding
/// whether that tile is still viable at a position
pub struct TileConfiguration {
    tile_id: usize,
    fits: FitsPredicate,
}

impl TileConfiguration {
    /// Pair a tile id with its admissibility predicate
    pub fn new(tile_id: usize, fits: impl Fn(&BoardPosition<'_>) -> bool + 'static) -> Self {
        Self {
            tile_id,
            fits: Box::new(fits),
        }
    }

    /// Tile id this rule admits
    pub const fn tile_id(&self) -> usize {
        self.tile_id
    }

    /// Evaluate the predicate at the given coordinates
    pub fn fits_configuration(&self, board: &Board, row: usize, column: usize) -> bool {
        let position = BoardPosition::new(board, row, column);
        (self.fits)(&position)
    }
}

impl fmt::Debug for TileConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileConfiguration")
            .field("tile_id", &self.tile_id)
            .finish_non_exhaustive()
    }
}

/// Immutable bundle of everything defining one wave function: the tile
/// count, the propagation half-extents, and the full rule list
#[derive(Debug)]
pub struct WaveFunctionDefinition {
    num_tiles: usize,
    row_radius: usize,
    column_radius: usize,
    configurations: Vec<TileConfiguration>,
}

impl WaveFunctionDefinition {
    /// Bundle a rule list with its propagation half-extents
    ///
    /// Rule order carries no meaning; every configuration is evaluated for
    /// every cell of a propagation window. Tile ids are taken as given and
    /// never renumbered.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_tiles` is zero, the configuration list is
    /// empty, or a configuration names a tile id outside `0..num_tiles`.
    pub fn new(
        num_tiles: usize,
        row_radius: usize,
        column_radius: usize,
        configurations: Vec<TileConfiguration>,
    ) -> Result<Self> {
        if num_tiles == 0 {
            return Err(invalid_parameter(
                "num_tiles",
                &num_tiles,
                &"at least one tile is required",
            ));
        }
        if configurations.is_empty() {
            return Err(invalid_parameter(
                "configurations",
                &"[]",
                &"at least one tile configuration is required",
            ));
        }
        for configuration in &configurations {
            if configuration.tile_id() >= num_tiles {
                return Err(GenerationError::InvalidTileIndex {
                    index: configuration.tile_id(),
                    max_tiles: num_tiles,
                });
            }
        }

        Ok(Self {
            num_tiles,
            row_radius,
            column_radius,
            configurations,
        })
    }

    /// Number of distinct tile ids
    pub const fn num_tiles(&self) -> usize {
        self.num_tiles
    }

    /// Row half-extent of the propagation window
    pub const fn row_radius(&self) -> usize {
        self.row_radius
    }

    /// Column half-extent of the propagation window
    pub const fn column_radius(&self) -> usize {
        self.column_radius
    }

    /// The full rule list, in declaration order
    pub fn configurations(&self) -> &[TileConfiguration] {
        self.configurations.as_slice()
    }
}
