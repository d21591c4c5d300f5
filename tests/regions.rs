// Copyright 2025 Lars Brubaker
// Region collection behavior and configuration.

mod helpers;

use geoarea::{ColorGenerator, EngineConfig, Error, LngLat, RegionSet, Rgba};

fn add_square(regions: &mut RegionSet, name: &str, origin: LngLat, side: f64) {
    let region = regions.begin(name);
    for p in helpers::project_all(&helpers::square_at(origin, side)) {
        region.push(p);
    }
    assert!(regions.finish_current(), "{} should close", name);
}

#[test]
fn regions_keep_creation_order() {
    let mut regions = helpers::region_set();
    add_square(&mut regions, "a", LngLat::new(0.0, 0.0), 100.0);
    add_square(&mut regions, "b", LngLat::new(1.0, 0.0), 200.0);
    add_square(&mut regions, "c", LngLat::new(2.0, 0.0), 300.0);

    let names: Vec<String> = regions.info().into_iter().map(|(_, n)| n).collect();
    assert_eq!(names, ["a", "b", "c"]);

    regions.remove("b").unwrap();
    let names: Vec<String> = regions.info().into_iter().map(|(_, n)| n).collect();
    assert_eq!(names, ["a", "c"]);
}

#[test]
fn area_text_for_committed_regions() {
    let mut regions = helpers::region_set();
    add_square(&mut regions, "plot", LngLat::new(0.0, 0.0), 50.0);
    add_square(&mut regions, "farm", LngLat::new(1.0, 0.0), 1000.0);

    assert_eq!(regions.get("plot").unwrap().area_text().to_string(), "2500 m²");
    assert_eq!(regions.get("farm").unwrap().area_text().to_string(), "1.0000 km²");
}

#[test]
fn cancel_discards_draft() {
    let mut regions = helpers::region_set();
    regions.begin("draft").push((0.5, 0.5));
    let dropped = regions.cancel().unwrap();
    assert_eq!(dropped.name(), "draft");
    assert!(regions.current().is_none());
    assert!(!regions.finish_current());
}

#[test]
fn palette_seed_controls_colors() {
    let colors = |seed| {
        let mut regions = helpers::region_set().with_palette(ColorGenerator::new(seed));
        (0..4).map(|i| regions.begin(format!("r{}", i)).color()).collect::<Vec<Rgba>>()
    };
    assert_eq!(colors(11), colors(11));
    assert_ne!(colors(11), colors(12));
}

#[test]
fn custom_radius_scales_area() {
    let config = EngineConfig::new().with_radius(helpers::EARTH_RADIUS / 2.0);
    let mut half = RegionSet::new(config).unwrap();
    let mut full = helpers::region_set();
    // One degree cells so both use the spherical excess.
    let ring = [
        LngLat::new(0.0, 0.0),
        LngLat::new(1.0, 0.0),
        LngLat::new(1.0, 1.0),
        LngLat::new(0.0, 1.0),
    ];
    for regions in [&mut half, &mut full] {
        let region = regions.begin("cell");
        for p in helpers::project_all(&ring) {
            region.push(p);
        }
        assert!(regions.finish_current());
    }
    let ratio = full.get("cell").unwrap().committed_area() / half.get("cell").unwrap().committed_area();
    approx::assert_relative_eq!(ratio, 4.0, max_relative = 1e-9);
}

#[test]
fn zero_downsample_is_rejected() {
    let err = RegionSet::new(EngineConfig::new().with_downsample(0)).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert!(err.to_string().contains("downsample"));
}

#[cfg(feature = "serde")]
#[test]
fn config_from_json() {
    let config = EngineConfig::from_json_str(
        r#"{ "downsample": 2, "sphere": { "radius": 6371000.0 }, "default_alpha": 64 }"#,
    )
    .unwrap();
    assert_eq!(config.downsample, 2);
    assert_eq!(config.sphere.radius, 6_371_000.0);
    assert_eq!(config.sphere.small_side_threshold, 100.0);

    let mut regions = RegionSet::new(config).unwrap();
    assert_eq!(regions.begin("x").color().a, 64);
}
