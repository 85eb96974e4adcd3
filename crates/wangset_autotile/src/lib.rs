//! Corner-Wang tile resolver
//!
//! Given a painted terrain grid and a corner-type Wang set, this crate picks,
//! for each cell, a tile whose corner colors match the terrain around that
//! cell, so adjacent terrain types blend without visible seams.
//!
//! Resolution is a pure query: no internal state, no side effects beyond the
//! caller-supplied random source used to break ties between equally valid
//! candidates. The same grid, set, and seed always produce the same tiles,
//! and a shared `&WangSet` / `&TerrainGrid` can be resolved from any number
//! of threads at once.
//!
//! # Example
//!
//! ```rust,ignore
//! use rand::{rngs::SmallRng, SeedableRng};
//! use wangset_autotile::resolve;
//! use wangset_core::TerrainGrid;
//!
//! let grid = TerrainGrid::filled(10, 10, grass);
//! let mut rng = SmallRng::seed_from_u64(7);
//! let tile = resolve(&grid, 4, 4, wang_set, &mut rng)?;
//! ```

mod resolve;

pub use resolve::{
    candidates, derive_corners, resolve, resolve_all, resolve_region, FillReport, ResolveError,
};
