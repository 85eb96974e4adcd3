//! Wang set types and corner data
//!
//! A Wang set is a named family of tiles annotated with the terrain colors
//! they display, plus the rules for matching them against a painted terrain
//! grid. This module models the "corner" flavor used by Tiled: each tile
//! carries up to four corner colors and adjacent tiles blend seamlessly when
//! their touching corners agree.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of Wang set - determines which positions of a tile carry colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SetType {
    /// 4 corners per tile (TL, TR, BL, BR)
    /// Good for basic terrain transitions
    #[default]
    Corner,
    /// 4 edges per tile (Top, Right, Bottom, Left)
    /// Good for roads, platforms, paths
    Edge,
    /// 4 corners + 4 edges per tile
    /// Most flexible, requires more tiles
    Mixed,
}

impl SetType {
    /// Parse the `type` attribute of a `<wangset>` element.
    pub fn from_tsx_name(name: &str) -> Option<Self> {
        match name {
            "corner" => Some(SetType::Corner),
            "edge" => Some(SetType::Edge),
            "mixed" => Some(SetType::Mixed),
            _ => None,
        }
    }
}

/// A terrain color within a Wang set (e.g., "Grass", "DeepGreenGrass")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WangColor {
    pub name: String,
    /// Display color for UI visualization
    pub color: Color,
    /// Representative tile for this color (shown in UI), if any
    pub icon_tile: Option<u32>,
    /// Author-declared bias when several colors compete (1.0 = neutral)
    pub probability: f32,
}

impl WangColor {
    pub fn new(name: String, color: Color) -> Self {
        Self {
            name,
            color,
            icon_tile: None,
            probability: 1.0,
        }
    }
}

/// The four corner colors of a tile, decoded from the raw 8-slot wangid.
///
/// Tiled's wangid positions run clockwise from the top edge:
///   7|0|1
///   6|X|2
///   5|4|3
/// Even slots (0,2,4,6) are edges, odd slots (1,3,5,7) are corners
/// (TopRight, BottomRight, BottomLeft, TopLeft). A raw value of 0 means
/// unconstrained; values 1..=N index the set's color table one-based.
/// Corner colors are stored here as zero-based indices, `None` = unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerWang {
    pub top_left: Option<usize>,
    pub top_right: Option<usize>,
    pub bottom_left: Option<usize>,
    pub bottom_right: Option<usize>,
}

impl CornerWang {
    pub const UNSET: Self = CornerWang {
        top_left: None,
        top_right: None,
        bottom_left: None,
        bottom_right: None,
    };

    /// All four corners set to one color
    pub fn filled(color: usize) -> Self {
        Self {
            top_left: Some(color),
            top_right: Some(color),
            bottom_left: Some(color),
            bottom_right: Some(color),
        }
    }

    /// Decode the corner slots of a raw 8-integer wangid.
    /// Edge slots (even indices) are ignored; corner sets leave them zero.
    pub fn from_wangid(raw: &[u32; 8]) -> Self {
        let decode = |v: u32| -> Option<usize> {
            if v == 0 {
                None
            } else {
                Some(v as usize - 1)
            }
        };
        Self {
            top_right: decode(raw[1]),
            bottom_right: decode(raw[3]),
            bottom_left: decode(raw[5]),
            top_left: decode(raw[7]),
        }
    }

    /// Re-encode into the raw 8-slot form (edge slots zero).
    pub fn to_wangid(&self) -> [u32; 8] {
        let encode = |c: Option<usize>| -> u32 { c.map(|i| i as u32 + 1).unwrap_or(0) };
        let mut raw = [0u32; 8];
        raw[1] = encode(self.top_right);
        raw[3] = encode(self.bottom_right);
        raw[5] = encode(self.bottom_left);
        raw[7] = encode(self.top_left);
        raw
    }

    /// Corners in fixed iteration order: TL, TR, BL, BR.
    pub fn as_array(&self) -> [Option<usize>; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Check if this tile has any corner color assigned
    pub fn has_any_color(&self) -> bool {
        self.as_array().iter().any(|c| c.is_some())
    }

    /// Check if all four corners carry the same color (useful for fill tiles)
    pub fn is_uniform(&self) -> Option<usize> {
        let [a, b, c, d] = self.as_array();
        let first = a?;
        if b == Some(first) && c == Some(first) && d == Some(first) {
            Some(first)
        } else {
            None
        }
    }

    /// Largest color index referenced by any corner, for load-time bounds checks
    pub fn max_color(&self) -> Option<usize> {
        self.as_array().iter().flatten().copied().max()
    }

    /// Whether this tile's corners are compatible with the corners derived
    /// from a terrain grid: every set corner must equal the derived corner,
    /// an unset corner matches anything.
    pub fn matches(&self, derived: &CornerWang) -> bool {
        fn slot(want: Option<usize>, got: Option<usize>) -> bool {
            match want {
                None => true,
                Some(_) => want == got,
            }
        }
        slot(self.top_left, derived.top_left)
            && slot(self.top_right, derived.top_right)
            && slot(self.bottom_left, derived.bottom_left)
            && slot(self.bottom_right, derived.bottom_right)
    }
}

/// A tile within a Wang set: its catalog index, selection weight, and corners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangTile {
    /// Tile index within the owning tileset
    pub tile_id: u32,
    /// Random-selection weight among equally valid candidates (default 1.0),
    /// taken from the tileset's per-tile `probability`
    pub weight: f32,
    pub corners: CornerWang,
}

impl WangTile {
    pub fn new(tile_id: u32, corners: CornerWang) -> Self {
        Self {
            tile_id,
            weight: 1.0,
            corners,
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}

/// A named Wang set: a color table plus the annotated tiles that use it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WangSet {
    pub id: Uuid,
    pub name: String,
    pub set_type: SetType,
    /// Color table; wangid codes 1..=N index into this, zero-based here
    pub colors: Vec<WangColor>,
    /// Annotated tiles in declaration order
    pub tiles: Vec<WangTile>,
}

impl WangSet {
    pub fn new(name: String, set_type: SetType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            set_type,
            colors: Vec::new(),
            tiles: Vec::new(),
        }
    }

    /// Add a color to the table, returning its zero-based index
    pub fn add_color(&mut self, name: String, color: Color) -> usize {
        self.colors.push(WangColor::new(name, color));
        self.colors.len() - 1
    }

    /// Get color index by name
    pub fn color_index(&self, name: &str) -> Option<usize> {
        self.colors.iter().position(|c| c.name == name)
    }

    /// Get the annotation for a tile, if the tile is part of this set
    pub fn get_tile(&self, tile_id: u32) -> Option<&WangTile> {
        self.tiles.iter().find(|t| t.tile_id == tile_id)
    }

    /// Find all tiles whose four corners are the given color
    /// (the "fill" tiles for a uniform region)
    pub fn uniform_tiles(&self, color: usize) -> Vec<u32> {
        self.tiles
            .iter()
            .filter(|t| t.corners.is_uniform() == Some(color))
            .map(|t| t.tile_id)
            .collect()
    }
}

/// All Wang sets declared by one tileset, in declaration order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WangCatalog {
    pub sets: Vec<WangSet>,
}

impl WangCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, set: WangSet) {
        self.sets.push(set);
    }

    /// Get a Wang set by name
    pub fn get(&self, name: &str) -> Option<&WangSet> {
        self.sets.iter().find(|s| s.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }
}
