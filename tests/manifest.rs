//! Tileset manifest loading, compilation, and render/export round-trips

use image::{Rgba, RgbaImage};
use wavetile::algorithm::board::Board;
use wavetile::io::image::{TileBitmaps, export_board_as_png, render_board};
use wavetile::io::manifest::TilesetManifest;

const UNCONSTRAINED_MANIFEST: &str = r#"(
    row_radius: 1,
    column_radius: 1,
    tiles: [
        (name: "red", image: "red.png"),
        (name: "blue", image: "blue.png"),
    ],
)"#;

fn solid_tile(color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(2, 2, Rgba(color))
}

// A manifest written to disk drives the whole pipeline: parse, compile,
// collapse to completion, render, export
#[test]
fn test_manifest_to_png_round_trip() -> wavetile::Result<()> {
    let dir = tempfile::tempdir()?;
    let manifest_path = dir.path().join("tileset.ron");

    std::fs::write(&manifest_path, UNCONSTRAINED_MANIFEST)?;
    solid_tile([255, 0, 0, 255]).save(dir.path().join("red.png"))?;
    solid_tile([0, 0, 255, 255]).save(dir.path().join("blue.png"))?;

    let manifest = TilesetManifest::from_path(&manifest_path)?;
    let tiles = TileBitmaps::load(&manifest.image_paths(&manifest_path))?;
    assert_eq!(tiles.len(), 2);
    assert_eq!(tiles.tile_width(), 2);
    assert_eq!(tiles.tile_height(), 2);

    let definition = manifest.compile()?;
    let mut board = Board::new(4, 5, definition, 42)?;
    while board.actualize_next_tile()? {}
    assert_eq!(board.num_actualized(), 20);

    let output_path = dir.path().join("out").join("pattern.png");
    export_board_as_png(&board, &tiles, &output_path)?;

    let exported = image::open(&output_path)?.to_rgba8();
    assert_eq!(exported.dimensions(), (2 * 5, 2 * 4));

    // Every pixel comes from one of the two solid tiles
    for pixel in exported.pixels() {
        assert!(pixel.0 == [255, 0, 0, 255] || pixel.0 == [0, 0, 255, 255]);
    }

    Ok(())
}

// An undetermined board renders as the average of all tile colors
#[test]
fn test_render_fills_undetermined_cells_with_average() -> wavetile::Result<()> {
    let tiles = TileBitmaps::from_images(vec![
        solid_tile([255, 0, 0, 255]),
        solid_tile([0, 0, 255, 255]),
    ])?;

    let manifest = TilesetManifest::from_ron(UNCONSTRAINED_MANIFEST)?;
    let board = Board::new(3, 3, manifest.compile()?, 1)?;

    let rendered = render_board(&board, &tiles)?;
    assert_eq!(rendered.dimensions(), (6, 6));
    for pixel in rendered.pixels() {
        assert_eq!(pixel.0, [127, 0, 127, 255]);
    }

    Ok(())
}

// A fully actualized single-tile board renders as that tile everywhere
#[test]
fn test_render_single_tile_board() -> wavetile::Result<()> {
    let source = r#"(
        row_radius: 1,
        column_radius: 1,
        tiles: [
            (name: "only", image: "only.png"),
        ],
    )"#;

    let tiles = TileBitmaps::from_images(vec![solid_tile([10, 200, 30, 255])])?;
    let manifest = TilesetManifest::from_ron(source)?;
    let board = Board::new(2, 3, manifest.compile()?, 5)?;
    assert_eq!(board.num_actualized(), 6);

    let rendered = render_board(&board, &tiles)?;
    assert_eq!(rendered.dimensions(), (6, 4));
    for pixel in rendered.pixels() {
        assert_eq!(pixel.0, [10, 200, 30, 255]);
    }

    Ok(())
}

// Compiled adjacency predicates consult actualized neighbors through the
// position handle: an empty north list forbids any tile above
#[test]
fn test_compiled_adjacency_checks_neighbors() -> wavetile::Result<()> {
    let source = r#"(
        row_radius: 1,
        column_radius: 1,
        tiles: [
            (name: "lonely", image: "lonely.png", north: Some([])),
        ],
    )"#;

    let manifest = TilesetManifest::from_ron(source)?;

    // One tile means the board is born fully actualized
    let board = Board::new(2, 1, manifest.compile()?, 3)?;
    assert_eq!(board.num_actualized(), 2);

    let probe = manifest.compile()?;
    let Some(rule) = probe.configurations().first() else {
        unreachable!("one configuration per tile");
    };

    // No northern neighbor at the top edge; an actualized one below it
    assert!(rule.fits_configuration(&board, 0, 0));
    assert!(!rule.fits_configuration(&board, 1, 0));

    Ok(())
}

// Bitmaps of differing dimensions are rejected up front
#[test]
fn test_mismatched_tile_dimensions_rejected() {
    let result = TileBitmaps::from_images(vec![
        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])),
        RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 255])),
    ]);

    assert!(matches!(
        result,
        Err(wavetile::GenerationError::InvalidTileset { .. })
    ));
}

// An empty bitmap list is rejected rather than producing zero-sized output
#[test]
fn test_empty_tileset_rejected() {
    let result = TileBitmaps::from_images(vec![]);
    assert!(matches!(
        result,
        Err(wavetile::GenerationError::InvalidTileset { .. })
    ));
}

// A missing manifest file surfaces as a path-carrying filesystem error
#[test]
fn test_missing_manifest_file() {
    let result = TilesetManifest::from_path(std::path::Path::new("no/such/manifest.ron"));
    assert!(matches!(
        result,
        Err(wavetile::GenerationError::FileSystem { .. })
    ));
}
