//! The painted terrain layer read by the resolver

use serde::{Deserialize, Serialize};

/// A 2D grid of terrain color indices, one per cell.
///
/// Cells hold zero-based indices into the active Wang set's color table;
/// `None` means unpainted. The grid is produced by map-editing code and is
/// read-only to the resolver; reads outside the bounds return `None`, which
/// the resolver treats as unset boundary terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainGrid {
    width: u32,
    height: u32,
    /// Row-major, `width * height` entries
    cells: Vec<Option<usize>>,
}

impl TerrainGrid {
    /// Create an unpainted grid
    pub fn new(width: u32, height: u32) -> Self {
        // widen before multiplying; u32 arithmetic wraps for large grids
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![None; size],
        }
    }

    /// Create a grid with every cell set to one color
    pub fn filled(width: u32, height: u32, color: usize) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Some(color); size],
        }
    }

    /// Build from an existing row-major buffer.
    /// Returns `None` if the buffer length does not match `width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<Option<usize>>) -> Option<Self> {
        if cells.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Terrain at a cell; out-of-bounds coordinates read as `None`
    pub fn get(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Paint a cell; ignored when out of bounds
    pub fn set(&mut self, x: u32, y: u32, color: Option<usize>) {
        if x < self.width && y < self.height {
            self.cells[y as usize * self.width as usize + x as usize] = color;
        }
    }

    /// Iterate all cell coordinates in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_unset() {
        let grid = TerrainGrid::filled(2, 2, 0);
        assert_eq!(grid.get(0, 0), Some(0));
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.get(2, 1), None);
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut grid = TerrainGrid::new(3, 2);
        assert_eq!(grid.get(1, 1), None);
        grid.set(1, 1, Some(4));
        assert_eq!(grid.get(1, 1), Some(4));
        grid.set(1, 1, None);
        assert_eq!(grid.get(1, 1), None);
    }

    #[test]
    fn from_cells_enforces_length() {
        assert!(TerrainGrid::from_cells(2, 2, vec![None; 3]).is_none());
        assert!(TerrainGrid::from_cells(2, 2, vec![None; 4]).is_some());
    }

    #[test]
    fn huge_dimensions_do_not_wrap_buffer_length() {
        // 65536 * 65536 wraps to zero in u32 arithmetic; an empty buffer
        // must not pass the length check
        assert!(TerrainGrid::from_cells(65_536, 65_536, Vec::new()).is_none());
    }

    #[test]
    fn positions_cover_grid_row_major() {
        let grid = TerrainGrid::new(2, 2);
        let all: Vec<_> = grid.positions().collect();
        assert_eq!(all, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
