use crate::model::{Zone, ZoneId};
use geo_types::{Coord, LineString, Point, Polygon};
use std::collections::HashMap;
use tracing::warn;

/// Forme normalisée d'une zone. Convention geo : x = longitude, y = latitude.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { center: Point<f64>, radius_m: f64 },
    Polygon(Polygon<f64>),
}

/// Normalise une géométrie brute vers une [`Shape`].
///
/// Trois sérialisations acceptées, essayées dans l'ordre :
/// `CIRCLE(<lon> <lat>, <rayon>)`, `POLYGON((<lon> <lat>, ...))`, puis
/// GeoJSON `Polygon` (premier anneau). La source est en lon/lat.
/// Ne panique jamais : `None` sur toute entrée inexploitable.
pub fn parse_zone_geometry(raw: &str) -> Option<Shape> {
    let raw = raw.trim();
    if let Some(shape) = parse_circle(raw) {
        return Some(shape);
    }
    if let Some(shape) = parse_polygon(raw) {
        return Some(shape);
    }
    if raw.starts_with('{') {
        return parse_geojson_polygon(raw);
    }
    None
}

fn parse_circle(raw: &str) -> Option<Shape> {
    let inner = raw
        .strip_prefix("CIRCLE")?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    let (coords, radius) = inner.rsplit_once(',')?;
    let (lon, lat) = parse_lon_lat(coords)?;
    let radius_m = radius.trim().parse::<f64>().ok()?;
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return None;
    }
    Some(Shape::Circle {
        center: Point::new(lon, lat),
        radius_m,
    })
}

fn parse_polygon(raw: &str) -> Option<Shape> {
    let inner = raw
        .strip_prefix("POLYGON")?
        .trim_start()
        .strip_prefix("((")?
        .strip_suffix("))")?;
    let mut ring = Vec::new();
    for pair in inner.split(',') {
        let (lon, lat) = parse_lon_lat(pair)?;
        ring.push(Coord { x: lon, y: lat });
    }
    if ring.len() < 3 {
        return None;
    }
    Some(Shape::Polygon(Polygon::new(LineString::from(ring), vec![])))
}

/// Paire `<lon> <lat>` séparée par du blanc, rien d'autre sur la ligne.
fn parse_lon_lat(pair: &str) -> Option<(f64, f64)> {
    let mut parts = pair.split_whitespace();
    let lon = parts.next()?.parse::<f64>().ok()?;
    let lat = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() || !lon.is_finite() || !lat.is_finite() {
        return None;
    }
    Some((lon, lat))
}

fn parse_geojson_polygon(raw: &str) -> Option<Shape> {
    let parsed = raw.parse::<geojson::GeoJson>().ok()?;
    let geometry = match parsed {
        geojson::GeoJson::Geometry(g) => g,
        geojson::GeoJson::Feature(f) => f.geometry?,
        geojson::GeoJson::FeatureCollection(_) => return None,
    };
    match geometry.value {
        geojson::Value::Polygon(rings) => {
            let first = rings.into_iter().next()?;
            let mut ring = Vec::with_capacity(first.len());
            for position in &first {
                let lon = *position.first()?;
                let lat = *position.get(1)?;
                ring.push(Coord { x: lon, y: lat });
            }
            if ring.len() < 3 {
                return None;
            }
            Some(Shape::Polygon(Polygon::new(LineString::from(ring), vec![])))
        }
        _ => None,
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    raw: String,
    shape: Option<Shape>,
}

/// Cache de formes par zone : les zones sont stables, on ne re-parse que
/// si la géométrie brute a changé (chemin chaud du polling).
#[derive(Debug, Clone, Default)]
pub struct ZoneShapeCache {
    entries: HashMap<ZoneId, CacheEntry>,
}

impl ZoneShapeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forme de la zone, depuis le cache si la géométrie n'a pas changé.
    pub fn resolve(&mut self, zone: &Zone) -> Option<Shape> {
        if let Some(entry) = self.entries.get(&zone.id) {
            if entry.raw == zone.geometry {
                return entry.shape.clone();
            }
        }
        let shape = parse_zone_geometry(&zone.geometry);
        if shape.is_none() {
            warn!(zone = zone.id.as_str(), "unparseable zone geometry");
        }
        self.entries.insert(
            zone.id.clone(),
            CacheEntry {
                raw: zone.geometry.clone(),
                shape: shape.clone(),
            },
        );
        shape
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
