use geojson::GeoJson;
use log::debug;

use crate::utils::error::Error;
use crate::utils::geometry::{LandCollection, LandFeature};

/// Turn decoded land data into an owned collection.
///
/// `None` is the empty payload. A single feature is wrapped, a collection is
/// deep copied feature by feature. A bare geometry is rejected.
pub fn normalize(input: Option<&GeoJson>) -> Result<LandCollection, Error> {
    let features = match input {
        None => Vec::new(),
        Some(GeoJson::Feature(feature)) => vec![LandFeature::try_from(feature)?],
        Some(GeoJson::FeatureCollection(collection)) => collection
            .features
            .iter()
            .map(LandFeature::try_from)
            .collect::<Result<Vec<_>, _>>()?,
        Some(GeoJson::Geometry(geometry)) => {
            debug!(
                "Rejecting bare {} geometry payload",
                geometry.value.type_name()
            );
            return Err(Error::UnsupportedPayload);
        }
    };
    Ok(LandCollection { features })
}

/// Same as [`normalize`], starting from raw JSON where `null` is the empty payload.
pub fn normalize_json(input: serde_json::Value) -> Result<LandCollection, Error> {
    if input.is_null() {
        return normalize(None);
    }
    let geojson = match GeoJson::from_json_value(input) {
        Ok(geojson) => geojson,
        Err(e) => {
            debug!("Input is not GeoJSON: {}", e);
            return Err(Error::UnsupportedPayload);
        }
    };
    normalize(Some(&geojson))
}
