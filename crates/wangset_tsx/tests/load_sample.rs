//! Integration test against a real Tiled tileset export

use std::path::PathBuf;
use wangset_core::{CornerWang, SetType};
use wangset_tsx::load_tileset;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/spring_outdoors.tsx")
}

#[test]
fn loads_spring_outdoors() {
    let ts = load_tileset(&fixture_path()).unwrap();

    assert_eq!(ts.name, "spring_outdoors");
    assert_eq!(ts.tile_width, 16);
    assert_eq!(ts.tile_height, 16);
    assert_eq!(ts.tile_count, 1975);
    assert_eq!(ts.columns, 25);
    assert_eq!(ts.rows(), 79);
    assert_eq!(ts.image.source, "spring_outdoors.png");
    assert_eq!(ts.image.width, 400);
    assert_eq!(ts.image.height, 1264);
}

#[test]
fn sample_probabilities_are_decoded() {
    let ts = load_tileset(&fixture_path()).unwrap();

    assert_eq!(ts.tile_probability(181), 0.1);
    assert_eq!(ts.tile_probability(182), 0.1);
    assert_eq!(ts.tile_probability(206), 0.05);
    assert_eq!(ts.tile_probability(207), 0.05);
    assert_eq!(ts.tile_probability(231), 0.05);
    // anything not listed defaults to 1.0
    assert_eq!(ts.tile_probability(275), 1.0);
}

#[test]
fn sample_wangset_is_decoded() {
    let ts = load_tileset(&fixture_path()).unwrap();

    let set = ts.wang_sets.get("DeepGreenGrass").unwrap();
    assert_eq!(set.set_type, SetType::Corner);
    assert_eq!(set.colors.len(), 2);

    let deep = set.color_index("DeepGreenGrass").unwrap();
    let grass = set.color_index("Grass").unwrap();
    assert_eq!(deep, 0);
    assert_eq!(grass, 1);

    // 28 wangtile entries in the sample
    assert_eq!(set.tiles.len(), 28);

    // tile 275: four uniform Grass corners, the base fill tile
    let fill = set.get_tile(275).unwrap();
    assert_eq!(fill.corners, CornerWang::filled(grass));
    assert_eq!(set.uniform_tiles(grass), vec![275]);

    // tile 351: four uniform DeepGreenGrass corners
    assert_eq!(set.uniform_tiles(deep), vec![351]);

    // tile 177: only the top-right corner constrained, to Grass
    let corner = set.get_tile(177).unwrap();
    assert_eq!(
        corner.corners,
        CornerWang {
            top_right: Some(grass),
            ..CornerWang::UNSET
        }
    );
}

#[test]
fn wangtile_weights_come_from_tile_probabilities() {
    let ts = load_tileset(&fixture_path()).unwrap();
    let set = ts.wang_sets.get("DeepGreenGrass").unwrap();

    // none of the sample's probability-tagged tiles carry wang data, so
    // every annotated tile keeps the default weight
    assert!(set.tiles.iter().all(|t| t.weight == 1.0));
}
