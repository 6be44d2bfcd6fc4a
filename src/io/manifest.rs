//! RON tileset manifests: user-authored adjacency rules compiled into a
//! wave function definition
//!
//! A manifest names each tile, points at its bitmap, and lists which tiles
//! may sit in the four orthogonally adjacent cells. Tile ids follow list
//! position. Adjacency here is declared, never inferred from imagery.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::algorithm::bitset::CandidateSet;
use crate::algorithm::board::TileState;
use crate::algorithm::definition::{BoardPosition, TileConfiguration, WaveFunctionDefinition};
use crate::io::error::{GenerationError, Result};

/// Declared adjacency and bitmap for one tile
///
/// Each neighbor list names the tiles allowed in the adjacent cell of that
/// direction. An absent list leaves the direction unconstrained; an empty
/// list allows no tile there.
#[derive(Debug, Clone, Deserialize)]
pub struct TileSpec {
    /// Unique name referenced by neighbor lists
    pub name: String,
    /// Tile bitmap path, relative to the manifest file
    pub image: PathBuf,
    /// Tiles allowed directly above (row - 1)
    #[serde(default)]
    pub north: Option<Vec<String>>,
    /// Tiles allowed directly to the right (column + 1)
    #[serde(default)]
    pub east: Option<Vec<String>>,
    /// Tiles allowed directly below (row + 1)
    #[serde(default)]
    pub south: Option<Vec<String>>,
    /// Tiles allowed directly to the left (column - 1)
    #[serde(default)]
    pub west: Option<Vec<String>>,
}

/// Top-level tileset manifest
#[derive(Debug, Clone, Deserialize)]
pub struct TilesetManifest {
    /// Row half-extent of the propagation window
    pub row_radius: usize,
    /// Column half-extent of the propagation window
    pub column_radius: usize,
    /// Tile declarations; list position is the tile id
    pub tiles: Vec<TileSpec>,
}

impl TilesetManifest {
    /// Load and parse a manifest file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid RON.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| GenerationError::FileSystem {
            path: path.to_path_buf(),
            operation: "read manifest",
            source: e,
        })?;

        Self::from_ron(&source).map_err(|e| match e {
            GenerationError::ManifestParse { source, .. } => GenerationError::ManifestParse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse a manifest from RON source
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not valid RON for a manifest.
    pub fn from_ron(source: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| GenerationError::ManifestParse {
            path: PathBuf::from("<inline>"),
            source: e,
        })
    }

    /// Tile bitmap paths resolved against the manifest location
    pub fn image_paths(&self, manifest_path: &Path) -> Vec<PathBuf> {
        let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));
        self.tiles.iter().map(|tile| base.join(&tile.image)).collect()
    }

    /// Compile the declared adjacency into a wave function definition
    ///
    /// Each tile becomes one configuration whose predicate checks every
    /// actualized orthogonal neighbor against the allowed set for that
    /// direction. Undetermined and out-of-bounds neighbors impose no
    /// constraint.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty tile list, duplicate tile names, or
    /// neighbor lists naming unknown tiles.
    pub fn compile(&self) -> Result<WaveFunctionDefinition> {
        let num_tiles = self.tiles.len();

        let mut name_to_id = HashMap::new();
        for (tile_id, tile) in self.tiles.iter().enumerate() {
            if name_to_id.insert(tile.name.clone(), tile_id).is_some() {
                return Err(GenerationError::InvalidTileset {
                    reason: format!("duplicate tile name '{}'", tile.name),
                });
            }
        }

        let mut configurations = Vec::with_capacity(num_tiles);
        for (tile_id, tile) in self.tiles.iter().enumerate() {
            let north = allowed_set(tile.north.as_deref(), &name_to_id, num_tiles)?;
            let east = allowed_set(tile.east.as_deref(), &name_to_id, num_tiles)?;
            let south = allowed_set(tile.south.as_deref(), &name_to_id, num_tiles)?;
            let west = allowed_set(tile.west.as_deref(), &name_to_id, num_tiles)?;

            configurations.push(TileConfiguration::new(tile_id, move |position| {
                neighbor_allowed(position, -1, 0, north.as_ref())
                    && neighbor_allowed(position, 0, 1, east.as_ref())
                    && neighbor_allowed(position, 1, 0, south.as_ref())
                    && neighbor_allowed(position, 0, -1, west.as_ref())
            }));
        }

        WaveFunctionDefinition::new(num_tiles, self.row_radius, self.column_radius, configurations)
    }
}

/// Resolve a neighbor name list into a candidate set
fn allowed_set(
    names: Option<&[String]>,
    name_to_id: &HashMap<String, usize>,
    num_tiles: usize,
) -> Result<Option<CandidateSet>> {
    let Some(names) = names else {
        return Ok(None);
    };

    let mut tile_ids = Vec::with_capacity(names.len());
    for name in names {
        let tile_id = name_to_id
            .get(name)
            .copied()
            .ok_or_else(|| GenerationError::InvalidTileset {
                reason: format!("unknown tile name '{name}' in a neighbor list"),
            })?;
        tile_ids.push(tile_id);
    }

    Ok(Some(CandidateSet::from_ids(&tile_ids, num_tiles)))
}

/// Check one orthogonal neighbor against an allowed set
fn neighbor_allowed(
    position: &BoardPosition<'_>,
    row_offset: i64,
    column_offset: i64,
    allowed: Option<&CandidateSet>,
) -> bool {
    let Some(allowed) = allowed else {
        return true;
    };

    match position.state_at_offset(row_offset, column_offset) {
        TileState::Actualized(tile_id) => allowed.contains(tile_id),
        TileState::Undetermined => true,
    }
}

#[cfg(test)]
mod tests {
    use super::TilesetManifest;
    use crate::io::error::GenerationError;

    const TWO_TILE_MANIFEST: &str = r#"(
        row_radius: 1,
        column_radius: 1,
        tiles: [
            (name: "land", image: "land.png", east: Some(["land", "coast"])),
            (name: "coast", image: "coast.png", west: Some(["land"])),
        ],
    )"#;

    #[test]
    fn test_parse_two_tile_manifest() {
        let manifest = TilesetManifest::from_ron(TWO_TILE_MANIFEST)
            .unwrap_or_else(|_| unreachable!("manifest is valid"));

        assert_eq!(manifest.row_radius, 1);
        assert_eq!(manifest.column_radius, 1);
        assert_eq!(manifest.tiles.len(), 2);

        let first = manifest.tiles.first().map(|tile| tile.name.clone());
        assert_eq!(first.as_deref(), Some("land"));
    }

    #[test]
    fn test_parse_rejects_malformed_source() {
        let result = TilesetManifest::from_ron("(row_radius: )");
        assert!(matches!(result, Err(GenerationError::ManifestParse { .. })));
    }

    #[test]
    fn test_compile_rejects_unknown_neighbor() {
        let source = r#"(
            row_radius: 1,
            column_radius: 1,
            tiles: [
                (name: "land", image: "land.png", north: Some(["sea"])),
            ],
        )"#;
        let manifest = TilesetManifest::from_ron(source)
            .unwrap_or_else(|_| unreachable!("manifest is valid"));

        let result = manifest.compile();
        assert!(matches!(
            result,
            Err(GenerationError::InvalidTileset { .. })
        ));
    }

    #[test]
    fn test_compile_rejects_duplicate_names() {
        let source = r#"(
            row_radius: 1,
            column_radius: 1,
            tiles: [
                (name: "land", image: "a.png"),
                (name: "land", image: "b.png"),
            ],
        )"#;
        let manifest = TilesetManifest::from_ron(source)
            .unwrap_or_else(|_| unreachable!("manifest is valid"));

        let result = manifest.compile();
        assert!(matches!(
            result,
            Err(GenerationError::InvalidTileset { .. })
        ));
    }

    #[test]
    fn test_compile_assigns_ids_by_position() {
        let manifest = TilesetManifest::from_ron(TWO_TILE_MANIFEST)
            .unwrap_or_else(|_| unreachable!("manifest is valid"));
        let definition = manifest
            .compile()
            .unwrap_or_else(|_| unreachable!("manifest compiles"));

        assert_eq!(definition.num_tiles(), 2);
        let ids: Vec<usize> = definition
            .configurations()
            .iter()
            .map(crate::algorithm::definition::TileConfiguration::tile_id)
            .collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
