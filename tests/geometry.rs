#![forbid(unsafe_code)]
use tournee::{parse_zone_geometry, Shape, Zone, ZoneId, ZoneShapeCache};

#[test]
fn circle_swaps_lon_lat_on_output() {
    let shape = parse_zone_geometry("CIRCLE(-58.38 -34.60, 500)").unwrap();
    match shape {
        Shape::Circle { center, radius_m } => {
            // source en lon/lat : x = lon, y = lat
            assert!((center.x() - -58.38).abs() < 1e-9);
            assert!((center.y() - -34.60).abs() < 1e-9);
            assert!((radius_m - 500.0).abs() < 1e-9);
        }
        other => panic!("expected circle, got {other:?}"),
    }
}

#[test]
fn polygon_text_variant() {
    let raw = "POLYGON((-58.4 -34.6, -58.3 -34.6, -58.3 -34.5, -58.4 -34.6))";
    let shape = parse_zone_geometry(raw).unwrap();
    match shape {
        Shape::Polygon(poly) => {
            assert!(poly.exterior().is_closed());
            let first = poly.exterior().0[0];
            assert!((first.x - -58.4).abs() < 1e-9);
            assert!((first.y - -34.6).abs() < 1e-9);
        }
        other => panic!("expected polygon, got {other:?}"),
    }
}

#[test]
fn geojson_polygon_first_ring() {
    let raw = r#"{"type":"Polygon","coordinates":[[[-58.4,-34.6],[-58.3,-34.6],[-58.3,-34.5],[-58.4,-34.6]]]}"#;
    let shape = parse_zone_geometry(raw).unwrap();
    match shape {
        Shape::Polygon(poly) => {
            let first = poly.exterior().0[0];
            assert!((first.x - -58.4).abs() < 1e-9);
            assert!((first.y - -34.6).abs() < 1e-9);
        }
        other => panic!("expected polygon, got {other:?}"),
    }
}

#[test]
fn malformed_inputs_return_none() {
    for raw in [
        "not-a-shape",
        "",
        "CIRCLE(abc def, 10)",
        "CIRCLE(-58.38 -34.60, -5)",
        "POLYGON((1 2, 3 4))",
        r#"{"type":"Point","coordinates":[1,2]}"#,
        r#"{"broken json"#,
    ] {
        assert!(parse_zone_geometry(raw).is_none(), "should reject: {raw}");
    }
}

#[test]
fn cache_reparses_only_on_geometry_change() {
    let mut cache = ZoneShapeCache::new();
    let mut zone = Zone {
        id: ZoneId::new("z1"),
        label: "centre".to_string(),
        geometry: "CIRCLE(-58.38 -34.60, 500)".to_string(),
    };

    let first = cache.resolve(&zone).unwrap();
    let second = cache.resolve(&zone).unwrap();
    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);

    // même id, géométrie modifiée : le cache doit re-parser
    zone.geometry = "CIRCLE(-58.38 -34.60, 900)".to_string();
    match cache.resolve(&zone).unwrap() {
        Shape::Circle { radius_m, .. } => assert!((radius_m - 900.0).abs() < 1e-9),
        other => panic!("expected circle, got {other:?}"),
    }
}

#[test]
fn cache_remembers_failures_without_breaking() {
    let mut cache = ZoneShapeCache::new();
    let zone = Zone {
        id: ZoneId::new("z1"),
        label: "cassée".to_string(),
        geometry: "garbage".to_string(),
    };
    assert!(cache.resolve(&zone).is_none());
    assert!(cache.resolve(&zone).is_none());
    assert_eq!(cache.len(), 1);
}
