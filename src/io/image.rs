//! Tile bitmap loading and assembled board rendering

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use crate::algorithm::board::{Board, TileState};
use crate::io::error::{GenerationError, Result};

/// Loaded per-tile bitmaps, one per tile id, all of identical dimensions
#[derive(Debug, Clone)]
pub struct TileBitmaps {
    images: Vec<RgbaImage>,
    tile_width: u32,
    tile_height: u32,
}

impl TileBitmaps {
    /// Load one bitmap per tile id from the given paths
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be decoded, the list is empty, or
    /// the bitmaps disagree on dimensions.
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            let decoded = image::open(path)
                .map_err(|e| GenerationError::ImageLoad {
                    path: path.clone(),
                    source: e,
                })?
                .to_rgba8();
            images.push(decoded);
        }
        Self::from_images(images)
    }

    /// Wrap pre-decoded bitmaps
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or the bitmaps disagree on
    /// dimensions.
    pub fn from_images(images: Vec<RgbaImage>) -> Result<Self> {
        let Some(first) = images.first() else {
            return Err(GenerationError::InvalidTileset {
                reason: "tileset contains no tile bitmaps".to_string(),
            });
        };

        let (tile_width, tile_height) = first.dimensions();
        for bitmap in &images {
            if bitmap.dimensions() != (tile_width, tile_height) {
                return Err(GenerationError::InvalidTileset {
                    reason: format!(
                        "tile bitmaps disagree on dimensions: expected {tile_width}x{tile_height}, found {}x{}",
                        bitmap.width(),
                        bitmap.height()
                    ),
                });
            }
        }

        Ok(Self {
            images,
            tile_width,
            tile_height,
        })
    }

    /// Number of loaded bitmaps
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Test if no bitmaps are loaded
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Width of every tile bitmap
    pub const fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Height of every tile bitmap
    pub const fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Bitmap for the given tile id
    pub fn get(&self, tile_id: usize) -> Option<&RgbaImage> {
        self.images.get(tile_id)
    }

    /// The average of all tile pixels, used to fill undetermined cells
    fn average_color(&self) -> Rgba<u8> {
        let mut sums = [0u64; 4];
        let mut pixel_count = 0u64;

        for bitmap in &self.images {
            for pixel in bitmap.pixels() {
                for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                    *sum += u64::from(channel);
                }
                pixel_count += 1;
            }
        }

        if pixel_count == 0 {
            return Rgba([128, 128, 128, 255]);
        }

        Rgba(sums.map(|sum| (sum / pixel_count) as u8))
    }
}

/// Assemble the board into a single image
///
/// Each actualized cell blits its tile bitmap; undetermined cells are filled
/// with the average tile color. Works at any point of generation, not just
/// on completion.
///
/// # Errors
///
/// Returns an error if an actualized cell names a tile id without a bitmap.
pub fn render_board(board: &Board, tiles: &TileBitmaps) -> Result<RgbaImage> {
    let width = tiles.tile_width() * board.num_columns() as u32;
    let height = tiles.tile_height() * board.num_rows() as u32;

    let fill = tiles.average_color();
    let mut output = RgbaImage::from_pixel(width, height, fill);

    for row in 0..board.num_rows() {
        for column in 0..board.num_columns() {
            let TileState::Actualized(tile_id) = board.tile_state(row, column) else {
                continue;
            };

            let bitmap = tiles
                .get(tile_id)
                .ok_or(GenerationError::InvalidTileIndex {
                    index: tile_id,
                    max_tiles: tiles.len(),
                })?;

            let origin_x = column as u32 * tiles.tile_width();
            let origin_y = row as u32 * tiles.tile_height();
            for (x, y, pixel) in bitmap.enumerate_pixels() {
                output.put_pixel(origin_x + x, origin_y + y, *pixel);
            }
        }
    }

    Ok(output)
}

/// Render and write the board as a PNG
///
/// # Errors
///
/// Returns an error if rendering fails, the parent directory cannot be
/// created, or the image cannot be saved.
pub fn export_board_as_png(board: &Board, tiles: &TileBitmaps, output_path: &Path) -> Result<()> {
    let output = render_board(board, tiles)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    output
        .save(output_path)
        .map_err(|e| GenerationError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
