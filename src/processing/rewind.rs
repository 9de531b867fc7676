use geo::Coord;

use crate::utils::geometry::{LandCollection, LandFeature, LandGeometry, PolygonRings, Ring};

/// Shoelace signed area of a ring, wrapping from the last vertex to the first.
///
/// Positive for counter-clockwise rings in (longitude, latitude) space.
pub fn signed_area(ring: &[Coord<f64>]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let twice_area: f64 = (0..n)
        .map(|i| {
            let current = ring[i];
            let next = ring[(i + 1) % n];
            current.x * next.y - next.x * current.y
        })
        .sum();
    twice_area / 2.0
}

/// Close and orient a ring: exterior rings end up positive, holes negative.
pub fn rewind_ring(ring: &Ring, exterior: bool) -> Ring {
    let area = signed_area(&ring.0);
    let mut rewound = ring.clone();
    rewound.close();
    if (exterior && area < 0.0) || (!exterior && area > 0.0) {
        rewound.0.reverse();
    }
    rewound
}

pub fn rewind_polygon(rings: &[Ring]) -> PolygonRings {
    rings
        .iter()
        .enumerate()
        .map(|(index, ring)| rewind_ring(ring, index == 0))
        .collect()
}

/// Rewind any land geometry. Non-polygonal geometry is copied unchanged.
pub fn rewind_geometry(geometry: &LandGeometry) -> LandGeometry {
    match geometry {
        LandGeometry::Polygon(rings) => LandGeometry::Polygon(rewind_polygon(rings)),
        LandGeometry::MultiPolygon(polygons) => LandGeometry::MultiPolygon(
            polygons.iter().map(|rings| rewind_polygon(rings)).collect(),
        ),
        LandGeometry::GeometryCollection(members) => {
            LandGeometry::GeometryCollection(members.iter().map(rewind_geometry).collect())
        }
        LandGeometry::Other(_) => geometry.clone(),
    }
}

pub fn rewind_feature(feature: &LandFeature) -> LandFeature {
    LandFeature {
        id: feature.id.clone(),
        properties: feature.properties.clone(),
        geometry: feature.geometry.as_ref().map(rewind_geometry),
    }
}

/// Rewind every feature of a collection.
pub fn rewind(collection: &LandCollection) -> LandCollection {
    LandCollection {
        features: collection.features.iter().map(rewind_feature).collect(),
    }
}
