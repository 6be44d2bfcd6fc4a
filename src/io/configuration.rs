//! Runtime defaults and safety limits

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default board rows
pub const DEFAULT_ROWS: usize = 32;

/// Default board columns
pub const DEFAULT_COLUMNS: usize = 32;

/// Default number of generation attempts before giving up
pub const DEFAULT_ATTEMPTS: usize = 10;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed board dimension
pub const MAX_BOARD_DIMENSION: usize = 10_000;

/// Suffix added to output filenames derived from the manifest
pub const OUTPUT_SUFFIX: &str = "_result";
