//! Loader for Tiled TSX tileset files
//!
//! This crate parses the XML tileset format written by the Tiled editor and
//! produces the decoded `wangset_core::Tileset` the resolver consumes. Only
//! the declarative data is handled here: tile geometry, the image reference,
//! per-tile probabilities, and Wang set metadata. Image decoding and map
//! (TMX) parsing are out of scope.
//!
//! # Example
//!
//! ```rust,ignore
//! use wangset_tsx::load_tileset;
//!
//! let tileset = load_tileset("assets/spring_outdoors.tsx".as_ref())?;
//! let ground = tileset.wang_sets.get("DeepGreenGrass").unwrap();
//! ```

mod parse;

use std::path::Path;
use thiserror::Error;
use wangset_core::Tileset;

/// Errors raised while loading or validating a TSX asset.
///
/// Every structural problem aborts the load; nothing is silently skipped.
#[derive(Debug, Error)]
pub enum TsxError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error: {0}")]
    Xml(String),
    #[error("missing <{element}> element")]
    MissingElement { element: &'static str },
    #[error("missing attribute '{attribute}' in <{element}>")]
    MissingAttribute { element: String, attribute: String },
    #[error("invalid value '{value}' for attribute '{attribute}' in <{element}>: {reason}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
        reason: String,
    },
    #[error(
        "tileset declares {declared} tiles but the {columns}-column image holds {computed}"
    )]
    InconsistentTileCount {
        declared: u32,
        columns: u32,
        computed: u32,
    },
    #[error("bad wangid '{value}' for tile {tile_id} in wangset '{wang_set}': {reason}")]
    BadWangId {
        wang_set: String,
        tile_id: u32,
        value: String,
        reason: String,
    },
    #[error(
        "wangid for tile {tile_id} in wangset '{wang_set}' references color {color} \
         but the set declares only {color_count}"
    )]
    UnknownColor {
        wang_set: String,
        tile_id: u32,
        color: u32,
        color_count: usize,
    },
    #[error(
        "wangtile {tile_id} in wangset '{wang_set}' is outside the declared \
         tile count {tile_count}"
    )]
    OutOfRangeTileId {
        wang_set: String,
        tile_id: u32,
        tile_count: u32,
    },
}

/// Load and validate a tileset from a `.tsx` file
pub fn load_tileset(path: &Path) -> Result<Tileset, TsxError> {
    let content = std::fs::read_to_string(path)?;
    parse_tileset(&content)
}

/// Parse and validate a tileset from TSX XML text
pub fn parse_tileset(xml: &str) -> Result<Tileset, TsxError> {
    parse::parse_document(xml)
}
