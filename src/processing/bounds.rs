use geo::{Coord, Rect};

use crate::utils::geometry::{LandCollection, Ring};

/// Whole-world extent used when there is nothing to fit.
pub fn world_bounds() -> Rect<f64> {
    Rect::new(
        Coord { x: -180.0, y: -90.0 },
        Coord { x: 180.0, y: 90.0 },
    )
}

/// Longitude/latitude extent of all polygonal vertices in the collection.
///
/// With `clamp_latitude`, southern latitudes below it count as the clamp
/// value, which keeps a map fitted to the clipped area. An empty collection
/// gives [`world_bounds`].
pub fn fit_bounds(collection: &LandCollection, clamp_latitude: Option<f64>) -> Rect<f64> {
    let mut min = Coord {
        x: f64::INFINITY,
        y: f64::INFINITY,
    };
    let mut max = Coord {
        x: f64::NEG_INFINITY,
        y: f64::NEG_INFINITY,
    };

    let mut accumulate = |coord: &Coord<f64>| {
        let lat = match clamp_latitude {
            Some(clamp) => coord.y.max(clamp),
            None => coord.y,
        };
        min.x = min.x.min(coord.x);
        min.y = min.y.min(lat);
        max.x = max.x.max(coord.x);
        max.y = max.y.max(lat);
    };

    for geometry in collection.features.iter().filter_map(|f| f.geometry.as_ref()) {
        geometry.for_each_ring(&mut |ring: &Ring| ring.coords().for_each(&mut accumulate));
    }

    if min.x > max.x || min.y > max.y {
        return world_bounds();
    }
    Rect::new(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::geometry::{LandFeature, LandGeometry};
    use geojson::Value;

    fn feature(geometry: LandGeometry) -> LandFeature {
        LandFeature {
            id: None,
            properties: None,
            geometry: Some(geometry),
        }
    }

    fn ring(coords: &[(f64, f64)]) -> Ring {
        coords.to_vec().into()
    }

    #[test]
    fn test_empty_collection_fits_world() {
        assert_eq!(fit_bounds(&LandCollection::default(), None), world_bounds());
    }

    #[test]
    fn test_only_non_polygonal_geometry_fits_world() {
        let collection = LandCollection {
            features: vec![feature(LandGeometry::Other(Value::Point(vec![1.0, 1.0])))],
        };
        assert_eq!(fit_bounds(&collection, None), world_bounds());
    }

    #[test]
    fn test_bounds_cover_nested_rings() {
        let collection = LandCollection {
            features: vec![
                feature(LandGeometry::Polygon(vec![ring(&[
                    (-10.0, 5.0),
                    (0.0, 5.0),
                    (0.0, 20.0),
                    (-10.0, 5.0),
                ])])),
                feature(LandGeometry::GeometryCollection(vec![LandGeometry::MultiPolygon(
                    vec![vec![ring(&[(30.0, -75.0), (40.0, -75.0), (40.0, -70.0), (30.0, -75.0)])]],
                )])),
            ],
        };

        let bounds = fit_bounds(&collection, None);
        assert_eq!(bounds.min(), Coord { x: -10.0, y: -75.0 });
        assert_eq!(bounds.max(), Coord { x: 40.0, y: 20.0 });

        let clamped = fit_bounds(&collection, Some(-60.0));
        assert_eq!(clamped.min(), Coord { x: -10.0, y: -60.0 });
        assert_eq!(clamped.max(), Coord { x: 40.0, y: 20.0 });
    }
}
