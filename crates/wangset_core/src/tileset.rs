//! Tileset configuration as declared by a TSX asset

use crate::wang::WangCatalog;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// The image source of a tileset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilesetImage {
    /// Path to the image file (relative to the tileset file)
    pub source: String,
    /// Pixel dimensions of the image
    pub width: u32,
    pub height: u32,
}

impl TilesetImage {
    pub fn new(source: String, width: u32, height: u32) -> Self {
        Self {
            source,
            width,
            height,
        }
    }
}

/// A decoded tileset: tile geometry, image source, per-tile selection
/// weights, and the Wang sets used for autotiling.
///
/// Loaded once at startup and treated as immutable afterwards; consumers
/// that hot-reload should swap whole `Arc<Tileset>` snapshots rather than
/// mutate in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tileset {
    pub id: Uuid,
    pub name: String,
    /// Tile size in pixels
    pub tile_width: u32,
    pub tile_height: u32,
    /// Number of tiles declared by the asset
    pub tile_count: u32,
    /// Tiles per atlas row
    pub columns: u32,
    pub image: TilesetImage,
    /// Sparse per-tile probability; tiles absent here default to 1.0
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tile_probabilities: HashMap<u32, f32>,
    #[serde(default)]
    pub wang_sets: WangCatalog,
}

impl Tileset {
    pub fn new(
        name: String,
        tile_width: u32,
        tile_height: u32,
        tile_count: u32,
        columns: u32,
        image: TilesetImage,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            tile_width,
            tile_height,
            tile_count,
            columns,
            image,
            tile_probabilities: HashMap::new(),
            wang_sets: WangCatalog::new(),
        }
    }

    /// Number of atlas rows implied by tile count and columns
    pub fn rows(&self) -> u32 {
        if self.columns == 0 {
            0
        } else {
            self.tile_count.div_ceil(self.columns)
        }
    }

    /// Whether a tile id is within the declared tile count
    pub fn contains_tile(&self, tile_id: u32) -> bool {
        tile_id < self.tile_count
    }

    /// Selection weight for a tile (1.0 unless the asset declares otherwise)
    pub fn tile_probability(&self, tile_id: u32) -> f32 {
        self.tile_probabilities.get(&tile_id).copied().unwrap_or(1.0)
    }

    /// Pixel position of a tile's top-left corner within the atlas image
    pub fn tile_origin(&self, tile_id: u32) -> Option<(u32, u32)> {
        if !self.contains_tile(tile_id) || self.columns == 0 {
            return None;
        }
        let col = tile_id % self.columns;
        let row = tile_id / self.columns;
        Some((col * self.tile_width, row * self.tile_height))
    }
}
