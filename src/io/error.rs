//! Error types for board generation and tileset handling

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// A cell was left with zero viable tiles by a consistency re-check
    ///
    /// Fatal to the current generation attempt: the board is left partially
    /// re-checked and must be discarded. Callers retry with a fresh board,
    /// typically under a different seed.
    ContradictoryBoardState {
        /// Row of the contradictory cell
        row: usize,
        /// Column of the contradictory cell
        column: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile id exceeds the available tile set
    InvalidTileIndex {
        /// The invalid tile id
        index: usize,
        /// Number of declared tiles
        max_tiles: usize,
    },

    /// Tileset contents don't meet generation requirements
    InvalidTileset {
        /// Description of what's wrong with the tileset
        reason: String,
    },

    /// Failed to parse a tileset manifest
    ManifestParse {
        /// Path to the manifest file
        path: PathBuf,
        /// Underlying RON parse error
        source: ron::error::SpannedError,
    },

    /// Failed to load a tile bitmap from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Every generation attempt ended in a contradiction
    AttemptsExhausted {
        /// Number of attempts made
        attempts: usize,
        /// Row of the last contradictory cell
        row: usize,
        /// Column of the last contradictory cell
        column: usize,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContradictoryBoardState { row, column } => {
                write!(f, "Contradiction created at ({row}, {column})")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile id {index} is out of bounds (tiles: {max_tiles})")
            }
            Self::InvalidTileset { reason } => {
                write!(f, "Invalid tileset: {reason}")
            }
            Self::ManifestParse { path, source } => {
                write!(f, "Failed to parse manifest '{}': {source}", path.display())
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::AttemptsExhausted {
                attempts,
                row,
                column,
            } => {
                write!(
                    f,
                    "Generation failed after {attempts} attempts (last contradiction at ({row}, {column}))"
                )
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::ManifestParse { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<image::ImageError> for GenerationError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
