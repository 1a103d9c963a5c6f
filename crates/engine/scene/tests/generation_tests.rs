//! Integration tests for scene generation bounds and determinism

use palette::{Palette, PaletteSet};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene::{GeneratorConfig, Preset, SceneGenerator, ShapeKind};

fn remote_like_palettes() -> PaletteSet {
    PaletteSet::new(vec![
        Palette::from_hex(&["69D2E7", "A7DBD8", "E0E4CC", "F38630", "FA6900"]).unwrap(),
        Palette::from_hex(&["FE4365", "FC9D9A", "F9CDAD", "C8C8A9", "83AF9B"]).unwrap(),
        Palette::from_hex(&["ECD078"]).unwrap(),
    ])
    .unwrap()
}

/// Check every draw of every tower against the configured bounds
fn assert_towers_in_bounds(config: &GeneratorConfig, seed: u64, samples: usize) {
    let generator = SceneGenerator::new(config.clone()).unwrap();
    let palettes = remote_like_palettes();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut towers_seen = 0;
    while towers_seen < samples {
        let towers = generator.generate_towers(&palettes, 0, &mut rng);
        assert!(config.tower_count.contains(towers.len() as u32));

        for tower in &towers {
            let count = tower.shapes.len() as u32;
            assert!(
                config.short_shapes.contains(count) || config.tall_shapes.contains(count),
                "shape count {count} outside both ranges"
            );
            assert!(config.origin.contains(tower.origin), "origin {:?}", tower.origin);

            for shape in &tower.shapes {
                assert!(config.offset.contains(shape.offset), "offset {:?}", shape.offset);
                assert!(config.size.contains(shape.size), "size {}", shape.size);
                assert!(palettes
                    .iter()
                    .any(|palette| palette.colors().contains(&shape.color)));
                if let Some(rotation) = shape.rotation {
                    assert!(config.rotation.angles.contains(rotation), "rotation {rotation:?}");
                }
            }
        }
        towers_seen += towers.len();
    }
}

#[test]
fn test_dense_draws_within_bounds() {
    assert_towers_in_bounds(&Preset::Dense.config(), 11, 10_000);
}

#[test]
fn test_sparse_draws_within_bounds() {
    assert_towers_in_bounds(&Preset::Sparse.config(), 12, 10_000);
}

#[test]
fn test_floor_draws_within_bounds() {
    let config = Preset::Dense.config();
    let generator = SceneGenerator::new(config.clone()).unwrap();
    let mut rng = StdRng::seed_from_u64(13);

    for _ in 0..20 {
        for block in generator.generate_floor(&mut rng) {
            assert!(config.floor.x.contains(block.x));
            assert!(config.floor.z.contains(block.z));
            assert!(config.floor.width.contains(block.width));
            assert!(config.floor.depth.contains(block.depth));
            assert!(config.floor.height.contains(block.height));
        }
    }
}

#[test]
fn test_same_seed_same_scene() {
    let generator = SceneGenerator::from_preset(Preset::Dense);
    let palettes = remote_like_palettes();

    let first = generator.generate(1, palettes.clone(), 0, &mut StdRng::seed_from_u64(99));
    let second = generator.generate(1, palettes, 0, &mut StdRng::seed_from_u64(99));

    assert_eq!(first, second);
    assert!(!first.towers.is_empty());
}

#[test]
fn test_different_seed_different_scene() {
    let generator = SceneGenerator::from_preset(Preset::Dense);
    let palettes = remote_like_palettes();

    let first = generator.generate_towers(&palettes, 0, &mut StdRng::seed_from_u64(1));
    let second = generator.generate_towers(&palettes, 0, &mut StdRng::seed_from_u64(2));

    assert_ne!(first, second);
}

#[test]
fn test_tall_towers_are_rare() {
    let config = Preset::Sparse.config();
    let generator = SceneGenerator::new(config.clone()).unwrap();
    let palettes = PaletteSet::fallback();
    let mut rng = StdRng::seed_from_u64(21);

    let mut tall = 0usize;
    let mut total = 0usize;
    for _ in 0..500 {
        for tower in generator.generate_towers(&palettes, 0, &mut rng) {
            total += 1;
            if tower.shapes.len() >= config.tall_shapes.min as usize {
                tall += 1;
            }
        }
    }

    let ratio = tall as f64 / total as f64;
    assert!((ratio - 0.1).abs() < 0.03, "tall ratio {ratio}");
}

#[test]
fn test_kind_mix_follows_weights() {
    let generator = SceneGenerator::from_preset(Preset::Sparse);
    let palettes = PaletteSet::fallback();
    let mut rng = StdRng::seed_from_u64(31);

    let mut shapes = Vec::new();
    while shapes.len() < 20_000 {
        for tower in generator.generate_towers(&palettes, 0, &mut rng) {
            shapes.extend(tower.shapes);
        }
    }

    let share = |kind: ShapeKind| {
        shapes.iter().filter(|shape| shape.kind == kind).count() as f64 / shapes.len() as f64
    };
    assert!((share(ShapeKind::Box) - 0.85).abs() < 0.02);
    assert!((share(ShapeKind::Sphere) - 0.10).abs() < 0.02);
    assert!((share(ShapeKind::Cone) - 0.05).abs() < 0.02);
}

#[test]
fn test_scene_serializes_to_json() {
    let generator = SceneGenerator::from_preset(Preset::Sparse);
    let scene = generator.generate(3, PaletteSet::fallback(), 0, &mut StdRng::seed_from_u64(5));

    let json = serde_json::to_value(&scene).unwrap();
    assert_eq!(json["generation"], 3);
    assert_eq!(json["towers"].as_array().unwrap().len(), 10);
    assert_eq!(json["palettes"][0][1], serde_json::json!({"r": 255, "g": 0, "b": 0}));
    assert_eq!(json["towers"][0]["shapes"][0]["rotation"], serde_json::Value::Null);
}
