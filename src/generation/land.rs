use std::f64::consts::TAU;

use geojson::{Feature, FeatureCollection, Geometry, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Map;

/// Builds a closed star-shaped ring around `center`.
///
/// Angles are sorted so the ring never crosses itself. Radii stay within
/// `radius_range`; a hole built with a range below the exterior's minimum
/// lies strictly inside it.
fn star_ring(
    rng: &mut StdRng,
    center: (f64, f64),
    radius_range: (f64, f64),
    counter_clockwise: bool,
) -> Vec<Vec<f64>> {
    let num_vertices = rng.gen_range(3..12);
    let mut angles: Vec<f64> = (0..num_vertices)
        .map(|i| (i as f64 + rng.gen_range(0.1..0.9)) * TAU / num_vertices as f64)
        .collect();
    if !counter_clockwise {
        angles.reverse();
    }

    let mut ring: Vec<Vec<f64>> = angles
        .into_iter()
        .map(|angle| {
            let radius = rng.gen_range(radius_range.0..radius_range.1);
            vec![
                center.0 + radius * angle.cos(),
                (center.1 + radius * angle.sin()).clamp(-90.0, 90.0),
            ]
        })
        .collect();
    if let Some(first) = ring.first().cloned() {
        ring.push(first);
    }
    ring
}

/// Exterior ring plus an optional hole, each with random orientation.
fn land_polygon(rng: &mut StdRng) -> Vec<Vec<Vec<f64>>> {
    let center = (rng.gen_range(-170.0..170.0), rng.gen_range(-85.0..85.0));
    let radius = rng.gen_range(2.0..10.0);
    let exterior_ccw = rng.gen_bool(0.5);
    let mut rings = vec![star_ring(rng, center, (radius * 0.6, radius), exterior_ccw)];
    if rng.gen_bool(0.3) {
        let hole_ccw = rng.gen_bool(0.5);
        rings.push(star_ring(rng, center, (radius * 0.1, radius * 0.5), hole_ccw));
    }
    rings
}

/// Generates a seeded synthetic land-mass FeatureCollection.
///
/// Features are a mix of Polygon, MultiPolygon and GeometryCollection
/// geometries spread over every latitude, with rings wound either way. The
/// same seed always produces the same collection.
pub fn generate_land_collection(num_features: usize, seed: u64) -> FeatureCollection {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut features = Vec::with_capacity(num_features);

    for i in 0..num_features {
        let value = match rng.gen_range(0..10) {
            0..=5 => Value::Polygon(land_polygon(&mut rng)),
            6..=8 => {
                let parts = rng.gen_range(1..4);
                Value::MultiPolygon((0..parts).map(|_| land_polygon(&mut rng)).collect())
            }
            _ => Value::GeometryCollection(vec![
                Geometry::new(Value::Polygon(land_polygon(&mut rng))),
                Geometry::new(Value::Point(vec![
                    rng.gen_range(-180.0..180.0),
                    rng.gen_range(-90.0..90.0),
                ])),
            ]),
        };

        let mut properties = Map::new();
        properties.insert("index".to_string(), serde_json::Value::from(i));
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(value)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
