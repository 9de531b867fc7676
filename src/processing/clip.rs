//! Latitude clipping of land polygons.
//!
//! Every ring is walked edge by edge and cut against a horizontal line at
//! `min_latitude`. Vertices south of the line are dropped and a vertex is
//! interpolated wherever an edge crosses it, so the clipped ring follows the
//! line between its last northern vertex and its next one. Rings that end up
//! with fewer than four positions are discarded, and so are polygons,
//! multipolygons, collections and finally features left with nothing.

use geo::{Coord, LineString};
use log::debug;

use crate::utils::geometry::{LandCollection, LandFeature, LandGeometry, PolygonRings, Ring};

/// A closed ring needs three distinct vertices plus the closing repeat.
pub const MIN_RING_POSITIONS: usize = 4;

fn is_inside(coord: &Coord<f64>, min_latitude: f64) -> bool {
    coord.y >= min_latitude
}

/// Point where the edge `from -> to` meets `min_latitude`.
fn crossing(from: Coord<f64>, to: Coord<f64>, min_latitude: f64) -> Coord<f64> {
    let delta = to.y - from.y;
    if delta == 0.0 {
        return Coord {
            x: to.x,
            y: min_latitude,
        };
    }
    let t = (min_latitude - from.y) / delta;
    Coord {
        x: from.x + t * (to.x - from.x),
        y: min_latitude,
    }
}

/// Clip a single ring against `min_latitude`.
///
/// Returns `None` when no part of the ring lies north of the threshold. The
/// returned ring is always closed but may hold fewer than
/// [`MIN_RING_POSITIONS`] positions; callers discard those.
pub fn clip_ring(ring: &Ring, min_latitude: f64) -> Option<Ring> {
    let mut closed = ring.clone();
    closed.close();

    let mut output: Vec<Coord<f64>> = Vec::with_capacity(closed.0.len() + 2);
    for edge in closed.0.windows(2) {
        let (current, next) = (edge[0], edge[1]);
        match (is_inside(&current, min_latitude), is_inside(&next, min_latitude)) {
            (true, true) => output.push(next),
            (true, false) => output.push(crossing(current, next, min_latitude)),
            (false, true) => {
                output.push(crossing(current, next, min_latitude));
                output.push(next);
            }
            (false, false) => {}
        }
    }

    let first = *output.first()?;
    if output.last() != Some(&first) {
        output.push(first);
    }
    Some(LineString::new(output))
}

/// Clip every ring of a polygon, keeping only non-degenerate survivors.
pub fn clip_polygon(rings: &[Ring], min_latitude: f64) -> Option<PolygonRings> {
    let clipped: PolygonRings = rings
        .iter()
        .filter_map(|ring| clip_ring(ring, min_latitude))
        .filter(|ring| ring.0.len() >= MIN_RING_POSITIONS)
        .collect();

    if clipped.is_empty() { None } else { Some(clipped) }
}

/// Clip any land geometry. Non-polygonal geometry is copied unchanged.
pub fn clip_geometry(geometry: &LandGeometry, min_latitude: f64) -> Option<LandGeometry> {
    match geometry {
        LandGeometry::Polygon(rings) => clip_polygon(rings, min_latitude).map(LandGeometry::Polygon),
        LandGeometry::MultiPolygon(polygons) => {
            let clipped: Vec<PolygonRings> = polygons
                .iter()
                .filter_map(|rings| clip_polygon(rings, min_latitude))
                .collect();
            if clipped.is_empty() {
                None
            } else {
                Some(LandGeometry::MultiPolygon(clipped))
            }
        }
        LandGeometry::GeometryCollection(members) => {
            let clipped: Vec<LandGeometry> = members
                .iter()
                .filter_map(|member| clip_geometry(member, min_latitude))
                .collect();
            if clipped.is_empty() {
                None
            } else {
                Some(LandGeometry::GeometryCollection(clipped))
            }
        }
        LandGeometry::Other(_) => Some(geometry.clone()),
    }
}

/// Clip a feature, or `None` if nothing of its geometry survives.
pub fn clip_feature(feature: &LandFeature, min_latitude: f64) -> Option<LandFeature> {
    let geometry = feature
        .geometry
        .as_ref()
        .and_then(|geometry| clip_geometry(geometry, min_latitude));

    match geometry {
        Some(geometry) => Some(LandFeature {
            id: feature.id.clone(),
            properties: feature.properties.clone(),
            geometry: Some(geometry),
        }),
        None => {
            debug!(
                "Dropping feature {:?}: nothing left north of latitude {}",
                feature.id, min_latitude
            );
            None
        }
    }
}

/// Clip a whole collection against `min_latitude`.
pub fn clip(collection: &LandCollection, min_latitude: f64) -> LandCollection {
    LandCollection {
        features: collection
            .features
            .iter()
            .filter_map(|feature| clip_feature(feature, min_latitude))
            .collect(),
    }
}
