//! Core data structures for Wang set autotiling
//!
//! This crate provides the types shared by the TSX loader and the resolver:
//! - `Tileset` - Tileset metadata with per-tile selection weights
//! - `WangSet` / `WangCatalog` - Named families of corner-annotated tiles
//! - `WangTile` / `CornerWang` - A tile and its decoded corner colors
//! - `TerrainGrid` - The painted terrain layer the resolver reads

mod color;
mod grid;
mod tileset;
mod wang;

pub use color::Color;
pub use grid::TerrainGrid;
pub use tileset::{Tileset, TilesetImage};
pub use wang::{CornerWang, SetType, WangCatalog, WangColor, WangSet, WangTile};
