//! Pull parser for the TSX document structure
//!
//! Walks the XML event stream once, building the tileset as elements arrive,
//! then validates the whole before handing it back.

use crate::TsxError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::str::FromStr;
use wangset_core::{Color, CornerWang, SetType, Tileset, TilesetImage, WangSet, WangTile};

/// Partially parsed document state
#[derive(Default)]
struct Builder {
    header: Option<Header>,
    image: Option<TilesetImage>,
    probabilities: HashMap<u32, f32>,
    sets: Vec<WangSet>,
    /// Wang set currently being filled with colors and tiles
    current_set: Option<WangSet>,
}

struct Header {
    name: String,
    tile_width: u32,
    tile_height: u32,
    tile_count: u32,
    columns: u32,
}

pub fn parse_document(xml: &str) -> Result<Tileset, TsxError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut builder = Builder::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                builder.handle_element(e)?;
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"wangset" {
                    builder.finish_wangset();
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(TsxError::Xml(e.to_string())),
            _ => {} // text, comments, declarations
        }
    }

    builder.finish()
}

impl Builder {
    fn handle_element(&mut self, elem: &BytesStart) -> Result<(), TsxError> {
        let name = element_name(elem)?;
        let attrs = parse_attributes(elem)?;

        match name.as_str() {
            "tileset" => self.handle_tileset(&attrs),
            "image" => self.handle_image(&attrs),
            "tile" => self.handle_tile(&attrs),
            "wangset" => self.handle_wangset(&attrs),
            "wangcolor" => self.handle_wangcolor(&attrs),
            "wangtile" => self.handle_wangtile(&attrs),
            // <wangsets> is a bare container; anything else (properties,
            // animation frames, ...) is outside this loader's scope
            _ => Ok(()),
        }
    }

    fn handle_tileset(&mut self, attrs: &HashMap<String, String>) -> Result<(), TsxError> {
        let name = require(attrs, "tileset", "name")?.to_string();
        let tile_width = parse_attr(attrs, "tileset", "tilewidth")?;
        let tile_height = parse_attr(attrs, "tileset", "tileheight")?;
        let tile_count = parse_attr(attrs, "tileset", "tilecount")?;
        let columns = parse_attr(attrs, "tileset", "columns")?;

        for (attribute, value) in [("tilewidth", tile_width), ("tileheight", tile_height)] {
            if value == 0 {
                return Err(invalid("tileset", attribute, "0", "must be positive"));
            }
        }

        self.header = Some(Header {
            name,
            tile_width,
            tile_height,
            tile_count,
            columns,
        });
        Ok(())
    }

    fn handle_image(&mut self, attrs: &HashMap<String, String>) -> Result<(), TsxError> {
        let source = require(attrs, "image", "source")?.to_string();
        let width = parse_attr(attrs, "image", "width")?;
        let height = parse_attr(attrs, "image", "height")?;
        self.image = Some(TilesetImage::new(source, width, height));
        Ok(())
    }

    fn handle_tile(&mut self, attrs: &HashMap<String, String>) -> Result<(), TsxError> {
        let id: u32 = parse_attr(attrs, "tile", "id")?;
        if let Some(raw) = attrs.get("probability") {
            let probability: f32 = parse_attr(attrs, "tile", "probability")?;
            if !probability.is_finite() || probability < 0.0 {
                return Err(invalid("tile", "probability", raw, "must be non-negative"));
            }
            self.probabilities.insert(id, probability);
        }
        Ok(())
    }

    fn handle_wangset(&mut self, attrs: &HashMap<String, String>) -> Result<(), TsxError> {
        // A wangset opening before the previous one closed means broken
        // nesting, but quick-xml reports that as an XML error first
        self.finish_wangset();

        let name = require(attrs, "wangset", "name")?.to_string();
        let type_name = require(attrs, "wangset", "type")?;
        let set_type = SetType::from_tsx_name(type_name).ok_or_else(|| {
            invalid(
                "wangset",
                "type",
                type_name,
                "expected 'corner', 'edge', or 'mixed'",
            )
        })?;

        self.current_set = Some(WangSet::new(name, set_type));
        Ok(())
    }

    fn handle_wangcolor(&mut self, attrs: &HashMap<String, String>) -> Result<(), TsxError> {
        let Some(set) = self.current_set.as_mut() else {
            return Err(TsxError::Xml("<wangcolor> outside <wangset>".to_string()));
        };

        let name = require(attrs, "wangcolor", "name")?.to_string();
        let hex = require(attrs, "wangcolor", "color")?;
        let color = Color::from_hex(hex)
            .ok_or_else(|| invalid("wangcolor", "color", hex, "expected #rrggbb or #aarrggbb"))?;

        let index = set.add_color(name, color);

        if let Some(raw) = attrs.get("tile") {
            // Tiled writes -1 when no representative tile is chosen
            let icon: i64 = parse_attr(attrs, "wangcolor", "tile")?;
            if icon >= 0 {
                set.colors[index].icon_tile = Some(icon as u32);
            } else if icon < -1 {
                return Err(invalid("wangcolor", "tile", raw, "expected a tile id or -1"));
            }
        }
        if attrs.contains_key("probability") {
            set.colors[index].probability = parse_attr(attrs, "wangcolor", "probability")?;
        }
        Ok(())
    }

    fn handle_wangtile(&mut self, attrs: &HashMap<String, String>) -> Result<(), TsxError> {
        let Some(set) = self.current_set.as_mut() else {
            return Err(TsxError::Xml("<wangtile> outside <wangset>".to_string()));
        };

        let tile_id: u32 = parse_attr(attrs, "wangtile", "tileid")?;
        let raw = require(attrs, "wangtile", "wangid")?;
        let wangid = parse_wangid(raw).map_err(|reason| TsxError::BadWangId {
            wang_set: set.name.clone(),
            tile_id,
            value: raw.to_string(),
            reason,
        })?;

        let corners = CornerWang::from_wangid(&wangid);
        if let Some(max) = corners.max_color() {
            if max >= set.colors.len() {
                return Err(TsxError::UnknownColor {
                    wang_set: set.name.clone(),
                    tile_id,
                    color: max as u32 + 1,
                    color_count: set.colors.len(),
                });
            }
        }

        if let Some(pos) = set.tiles.iter().position(|t| t.tile_id == tile_id) {
            log::warn!(
                "wangset '{}' declares tile {} twice; keeping the last entry",
                set.name,
                tile_id
            );
            set.tiles.remove(pos);
        }

        set.tiles.push(WangTile::new(tile_id, corners));
        Ok(())
    }

    fn finish_wangset(&mut self) {
        if let Some(set) = self.current_set.take() {
            self.sets.push(set);
        }
    }

    /// Final validation and assembly once the document is exhausted
    fn finish(mut self) -> Result<Tileset, TsxError> {
        self.finish_wangset();

        let header = self.header.ok_or(TsxError::MissingElement { element: "tileset" })?;
        let image = self.image.ok_or(TsxError::MissingElement { element: "image" })?;

        let expected_columns = image.width / header.tile_width;
        let rows = image.height / header.tile_height;
        let computed = expected_columns * rows;
        if header.columns != expected_columns || header.tile_count != computed {
            return Err(TsxError::InconsistentTileCount {
                declared: header.tile_count,
                columns: header.columns,
                computed,
            });
        }

        for (&tile_id, _) in &self.probabilities {
            if tile_id >= header.tile_count {
                return Err(invalid(
                    "tile",
                    "id",
                    &tile_id.to_string(),
                    &format!("outside the declared tile count {}", header.tile_count),
                ));
            }
        }

        for set in &self.sets {
            for tile in &set.tiles {
                if tile.tile_id >= header.tile_count {
                    return Err(TsxError::OutOfRangeTileId {
                        wang_set: set.name.clone(),
                        tile_id: tile.tile_id,
                        tile_count: header.tile_count,
                    });
                }
            }
            for color in &set.colors {
                if let Some(icon) = color.icon_tile {
                    if icon >= header.tile_count {
                        return Err(invalid(
                            "wangcolor",
                            "tile",
                            &icon.to_string(),
                            &format!("outside the declared tile count {}", header.tile_count),
                        ));
                    }
                }
            }
        }

        let mut tileset = Tileset::new(
            header.name,
            header.tile_width,
            header.tile_height,
            header.tile_count,
            header.columns,
            image,
        );
        tileset.tile_probabilities = self.probabilities;

        // Selection weights come from the per-tile probability entries
        for mut set in self.sets {
            for tile in &mut set.tiles {
                tile.weight = tileset.tile_probability(tile.tile_id);
            }
            for (a, b, weight) in equal_weight_duplicates(&set) {
                log::warn!(
                    "wangset '{}': tiles {a} and {b} declare identical corners \
                     with equal weight {weight}",
                    set.name
                );
            }
            for index in unreferenced_colors(&set) {
                log::warn!(
                    "wangset '{}': color '{}' is not referenced by any wangtile",
                    set.name,
                    set.colors[index].name
                );
            }
            tileset.wang_sets.push(set);
        }

        Ok(tileset)
    }
}

/// Pairs of tiles whose corner tuples are identical AND carry the same
/// weight. Duplicate tuples are legitimate as weighted random alternatives;
/// at equal weight the duplication is indistinguishable from an authoring
/// mistake, so the loader flags it.
fn equal_weight_duplicates(set: &WangSet) -> Vec<(u32, u32, f32)> {
    let mut pairs = Vec::new();
    for (i, a) in set.tiles.iter().enumerate() {
        for b in &set.tiles[i + 1..] {
            if a.corners == b.corners && a.weight == b.weight {
                pairs.push((a.tile_id, b.tile_id, a.weight));
            }
        }
    }
    pairs
}

/// Indices of colors no wangtile corner refers to
fn unreferenced_colors(set: &WangSet) -> Vec<usize> {
    (0..set.colors.len())
        .filter(|&index| {
            !set.tiles
                .iter()
                .any(|t| t.corners.as_array().contains(&Some(index)))
        })
        .collect()
}

/// Parse a `wangid` attribute: exactly 8 comma-separated non-negative integers
fn parse_wangid(raw: &str) -> Result<[u32; 8], String> {
    let mut out = [0u32; 8];
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 8 {
        return Err(format!("expected 8 comma-separated values, got {}", parts.len()));
    }
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("'{part}' is not a non-negative integer"))?;
    }
    Ok(out)
}

fn element_name(elem: &BytesStart) -> Result<String, TsxError> {
    std::str::from_utf8(elem.name().as_ref())
        .map(str::to_string)
        .map_err(|e| TsxError::Xml(format!("invalid UTF-8 in element name: {e}")))
}

fn parse_attributes(elem: &BytesStart) -> Result<HashMap<String, String>, TsxError> {
    let mut attrs = HashMap::new();
    for attr_result in elem.attributes() {
        let attr = attr_result.map_err(|e| TsxError::Xml(format!("attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| TsxError::Xml(format!("invalid UTF-8 in attribute key: {e}")))?
            .to_string();
        let value = std::str::from_utf8(&attr.value)
            .map_err(|e| TsxError::Xml(format!("invalid UTF-8 in attribute value: {e}")))?
            .to_string();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn require<'a>(
    attrs: &'a HashMap<String, String>,
    element: &str,
    attribute: &str,
) -> Result<&'a str, TsxError> {
    attrs
        .get(attribute)
        .map(String::as_str)
        .ok_or_else(|| TsxError::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        })
}

fn parse_attr<T: FromStr>(
    attrs: &HashMap<String, String>,
    element: &str,
    attribute: &str,
) -> Result<T, TsxError> {
    let raw = require(attrs, element, attribute)?;
    raw.parse()
        .map_err(|_| invalid(element, attribute, raw, "not a valid number"))
}

fn invalid(element: &str, attribute: &str, value: &str, reason: &str) -> TsxError {
    TsxError::InvalidAttribute {
        element: element.to_string(),
        attribute: attribute.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
