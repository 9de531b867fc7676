use geo::{Coord, LineString};
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::Map;
use serde_json::Value as JsonValue;

use crate::utils::error::Error;

/// A closed loop of (longitude, latitude) positions.
pub type Ring = LineString<f64>;

/// Rings of a single polygon, exterior first, holes after.
pub type PolygonRings = Vec<Ring>;

/// Land geometry as it flows through the pipeline stages.
#[derive(Debug, Clone, PartialEq)]
pub enum LandGeometry {
    Polygon(PolygonRings),
    MultiPolygon(Vec<PolygonRings>),
    GeometryCollection(Vec<LandGeometry>),
    /// Anything non-polygonal, carried along untouched.
    Other(Value),
}

/// A feature with owned geometry and its original properties.
#[derive(Debug, Clone, PartialEq)]
pub struct LandFeature {
    pub id: Option<Id>,
    pub properties: Option<Map<String, JsonValue>>,
    pub geometry: Option<LandGeometry>,
}

/// Ordered collection of land features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandCollection {
    pub features: Vec<LandFeature>,
}

impl LandCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl LandGeometry {
    /// Visit every ring of every polygon, recursing into collections.
    pub fn for_each_ring<F: FnMut(&Ring)>(&self, f: &mut F) {
        match self {
            LandGeometry::Polygon(rings) => rings.iter().for_each(|ring| f(ring)),
            LandGeometry::MultiPolygon(polygons) => polygons
                .iter()
                .flat_map(|rings| rings.iter())
                .for_each(|ring| f(ring)),
            LandGeometry::GeometryCollection(members) => {
                for member in members {
                    member.for_each_ring(f);
                }
            }
            LandGeometry::Other(_) => {}
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            LandGeometry::Polygon(_) => "Polygon",
            LandGeometry::MultiPolygon(_) => "MultiPolygon",
            LandGeometry::GeometryCollection(_) => "GeometryCollection",
            LandGeometry::Other(value) => value.type_name(),
        }
    }
}

fn position_to_coord(position: &[f64]) -> Result<Coord<f64>, Error> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(Error::InvalidCoordinates),
    }
}

fn ring_from_positions(positions: &[Vec<f64>]) -> Result<Ring, Error> {
    positions
        .iter()
        .map(|p| position_to_coord(p))
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

fn rings_from_positions(rings: &[Vec<Vec<f64>>]) -> Result<PolygonRings, Error> {
    rings.iter().map(|ring| ring_from_positions(ring)).collect()
}

fn ring_to_positions(ring: &Ring) -> Vec<Vec<f64>> {
    ring.coords().map(|c| vec![c.x, c.y]).collect()
}

fn rings_to_positions(rings: &[Ring]) -> Vec<Vec<Vec<f64>>> {
    rings.iter().map(ring_to_positions).collect()
}

/// Deep copy a geojson Geometry into a LandGeometry
impl TryFrom<&Geometry> for LandGeometry {
    type Error = Error;

    fn try_from(geometry: &Geometry) -> Result<Self, Self::Error> {
        match &geometry.value {
            Value::Polygon(rings) => Ok(LandGeometry::Polygon(rings_from_positions(rings)?)),
            Value::MultiPolygon(polygons) => polygons
                .iter()
                .map(|rings| rings_from_positions(rings))
                .collect::<Result<Vec<_>, _>>()
                .map(LandGeometry::MultiPolygon),
            Value::GeometryCollection(members) => members
                .iter()
                .map(LandGeometry::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(LandGeometry::GeometryCollection),
            other => Ok(LandGeometry::Other(other.clone())),
        }
    }
}

/// Convert a LandGeometry to a geojson Geometry
impl From<LandGeometry> for Geometry {
    fn from(value: LandGeometry) -> Self {
        match value {
            LandGeometry::Polygon(rings) => Geometry::new(Value::Polygon(rings_to_positions(&rings))),
            LandGeometry::MultiPolygon(polygons) => Geometry::new(Value::MultiPolygon(
                polygons.iter().map(|rings| rings_to_positions(rings)).collect(),
            )),
            LandGeometry::GeometryCollection(members) => Geometry::new(Value::GeometryCollection(
                members.into_iter().map(Geometry::from).collect(),
            )),
            LandGeometry::Other(value) => Geometry::new(value),
        }
    }
}

/// Convert a geojson Feature to a LandFeature, copying properties
impl TryFrom<&Feature> for LandFeature {
    type Error = Error;

    fn try_from(feature: &Feature) -> Result<Self, Self::Error> {
        Ok(LandFeature {
            id: feature.id.clone(),
            properties: feature.properties.clone(),
            geometry: feature
                .geometry
                .as_ref()
                .map(LandGeometry::try_from)
                .transpose()?,
        })
    }
}

/// Convert a LandFeature to a geojson Feature
impl From<LandFeature> for Feature {
    fn from(land_feature: LandFeature) -> Feature {
        Feature {
            bbox: None,
            geometry: land_feature.geometry.map(Into::into),
            id: land_feature.id,
            properties: land_feature.properties,
            foreign_members: None,
        }
    }
}

/// Convert a LandCollection to a geojson FeatureCollection
impl From<LandCollection> for FeatureCollection {
    fn from(collection: LandCollection) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: collection.features.into_iter().map(Into::into).collect(),
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_round_trip_keeps_coordinates() {
        let geometry = Geometry::new(Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ]]));
        let land = LandGeometry::try_from(&geometry).unwrap();
        assert_eq!(land.type_name(), "Polygon");
        let back: Geometry = land.into();
        assert_eq!(back.value, geometry.value);
    }

    #[test]
    fn test_altitude_is_discarded() {
        let geometry = Geometry::new(Value::Polygon(vec![vec![
            vec![0.0, 0.0, 12.0],
            vec![1.0, 0.0, 12.0],
            vec![1.0, 1.0, 12.0],
            vec![0.0, 0.0, 12.0],
        ]]));
        match LandGeometry::try_from(&geometry).unwrap() {
            LandGeometry::Polygon(rings) => {
                assert_eq!(rings[0].0[1], Coord { x: 1.0, y: 0.0 });
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_short_position_is_rejected() {
        let geometry = Geometry::new(Value::MultiPolygon(vec![vec![vec![
            vec![0.0, 0.0],
            vec![1.0],
        ]]]));
        assert!(matches!(
            LandGeometry::try_from(&geometry),
            Err(Error::InvalidCoordinates)
        ));
    }

    #[test]
    fn test_point_is_carried_as_other() {
        let geometry = Geometry::new(Value::Point(vec![3.0, 4.0]));
        let land = LandGeometry::try_from(&geometry).unwrap();
        assert_eq!(land, LandGeometry::Other(Value::Point(vec![3.0, 4.0])));
        assert_eq!(land.type_name(), "Point");
    }

    #[test]
    fn test_for_each_ring_recurses_into_collections() {
        let ring: Ring = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)].into();
        let geometry = LandGeometry::GeometryCollection(vec![
            LandGeometry::Polygon(vec![ring.clone(), ring.clone()]),
            LandGeometry::MultiPolygon(vec![vec![ring.clone()], vec![ring]]),
            LandGeometry::Other(Value::Point(vec![0.0, 0.0])),
        ]);
        let mut count = 0;
        geometry.for_each_ring(&mut |_: &Ring| count += 1);
        assert_eq!(count, 4);
    }
}
