//! Corner derivation, candidate filtering, and weighted tile selection

use rand::Rng;
use thiserror::Error;
use wangset_core::{CornerWang, SetType, TerrainGrid, WangSet, WangTile};

/// Errors raised by tile resolution.
///
/// `NoMatchingTile` is recoverable: the caller decides whether to place a
/// blank tile, fall back to a heuristic, or surface a warning to the map
/// author.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no tile in wangset '{wang_set}' matches the terrain corners at ({x}, {y})")]
    NoMatchingTile { wang_set: String, x: u32, y: u32 },
    #[error("wangset '{wang_set}' is a {set_type:?} set; only corner sets can be resolved")]
    UnsupportedSetType {
        wang_set: String,
        set_type: SetType,
    },
}

/// Derive the four corner terrain colors for a cell.
///
/// Cell (x, y)'s corners sample the 2x2 block of terrain nodes anchored at
/// the cell: top-left = (x, y), top-right = (x+1, y), bottom-left = (x, y+1),
/// bottom-right = (x+1, y+1). Adjacent cells therefore share corner values by
/// construction, which is what makes the chosen tiles seamless. Nodes outside
/// the grid read as unset boundary terrain.
pub fn derive_corners(grid: &TerrainGrid, x: u32, y: u32) -> CornerWang {
    let (x, y) = (x as i64, y as i64);
    CornerWang {
        top_left: grid.get(x, y),
        top_right: grid.get(x + 1, y),
        bottom_left: grid.get(x, y + 1),
        bottom_right: grid.get(x + 1, y + 1),
    }
}

/// The tiles compatible with the derived corners, narrowed to the most
/// specific matches, in declaration order.
///
/// Compatibility: a tile's set corner must equal the derived value exactly
/// (an unset derived corner satisfies nothing), a tile's unset corner matches
/// anything. Among compatible tiles, those leaving the fewest derived corners
/// uncovered win, so a fully-uniform region selects the uniform fill tile
/// rather than a transition tile with wildcard corners. Ties are left for the
/// weighted draw.
pub fn candidates<'a>(set: &'a WangSet, corners: &CornerWang) -> Vec<&'a WangTile> {
    let compatible: Vec<(&WangTile, u32)> = set
        .tiles
        .iter()
        .filter(|tile| tile.corners.has_any_color() && tile.corners.matches(corners))
        .map(|tile| (tile, uncovered_corners(&tile.corners, corners)))
        .collect();

    let Some(best) = compatible.iter().map(|&(_, p)| p).min() else {
        return Vec::new();
    };
    compatible
        .into_iter()
        .filter(|&(_, p)| p == best)
        .map(|(tile, _)| tile)
        .collect()
}

/// Number of derived corners a tile leaves to its wildcard positions
fn uncovered_corners(tile: &CornerWang, derived: &CornerWang) -> u32 {
    tile.as_array()
        .iter()
        .zip(derived.as_array())
        .filter(|(t, d)| t.is_none() && d.is_some())
        .count() as u32
}

/// Resolve the tile for one cell.
///
/// A unique candidate is returned directly; several candidates are decided by
/// a weighted draw over their declared weights, normalized over the matching
/// subset. Pure apart from the rng: identical grid, set, and seed give an
/// identical tile.
pub fn resolve<'a>(
    grid: &TerrainGrid,
    x: u32,
    y: u32,
    set: &'a WangSet,
    rng: &mut impl Rng,
) -> Result<&'a WangTile, ResolveError> {
    if set.set_type != SetType::Corner {
        return Err(ResolveError::UnsupportedSetType {
            wang_set: set.name.clone(),
            set_type: set.set_type,
        });
    }

    let corners = derive_corners(grid, x, y);
    let matches = candidates(set, &corners);
    match matches.len() {
        0 => Err(ResolveError::NoMatchingTile {
            wang_set: set.name.clone(),
            x,
            y,
        }),
        1 => Ok(matches[0]),
        _ => Ok(select_weighted(&matches, rng)),
    }
}

/// Weighted draw over candidate tiles. All-zero weights degrade to a uniform
/// draw so authored low-probability variants never leave a cell unresolvable.
fn select_weighted<'a>(tiles: &[&'a WangTile], rng: &mut impl Rng) -> &'a WangTile {
    let total: f64 = tiles.iter().map(|t| t.weight as f64).sum();
    if total <= 0.0 {
        return tiles[rng.gen_range(0..tiles.len())];
    }

    let mut pick = rng.gen_range(0.0..total);
    for tile in tiles {
        if pick < tile.weight as f64 {
            return tile;
        }
        pick -= tile.weight as f64;
    }

    // Floating-point accumulation can leave pick marginally above the last
    // bucket; the last candidate absorbs it
    tiles[tiles.len() - 1]
}

/// Result of a batch resolution
#[derive(Debug, Clone, PartialEq)]
pub struct FillReport {
    /// Chosen tile id per cell, row-major over the grid.
    /// `None` for cells whose derived corners are entirely unset
    /// (nothing painted nearby) and for unresolved cells.
    pub tiles: Vec<Option<u32>>,
    /// Cells that derived at least one corner but matched no tile
    pub unresolved: Vec<(u32, u32)>,
}

/// Resolve a specific list of cells into a full-grid tile buffer
pub fn resolve_region(
    grid: &TerrainGrid,
    set: &WangSet,
    positions: &[(u32, u32)],
    rng: &mut impl Rng,
) -> Result<FillReport, ResolveError> {
    if set.set_type != SetType::Corner {
        return Err(ResolveError::UnsupportedSetType {
            wang_set: set.name.clone(),
            set_type: set.set_type,
        });
    }

    let mut tiles = vec![None; grid.width() as usize * grid.height() as usize];
    let mut unresolved = Vec::new();

    for &(x, y) in positions {
        if x >= grid.width() || y >= grid.height() {
            continue;
        }

        let corners = derive_corners(grid, x, y);
        if !corners.has_any_color() {
            continue; // nothing painted near this cell
        }

        let matches = candidates(set, &corners);
        if matches.is_empty() {
            unresolved.push((x, y));
        } else {
            let tile = if matches.len() == 1 {
                matches[0]
            } else {
                select_weighted(&matches, rng)
            };
            tiles[y as usize * grid.width() as usize + x as usize] = Some(tile.tile_id);
        }
    }

    Ok(FillReport { tiles, unresolved })
}

/// Resolve every cell of the grid
pub fn resolve_all(
    grid: &TerrainGrid,
    set: &WangSet,
    rng: &mut impl Rng,
) -> Result<FillReport, ResolveError> {
    let positions: Vec<(u32, u32)> = grid.positions().collect();
    resolve_region(grid, set, &positions, rng)
}
