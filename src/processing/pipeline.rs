use geojson::GeoJson;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::processing::clip::{clip, clip_feature};
use crate::processing::normalize::normalize;
use crate::processing::rewind::{rewind, rewind_feature};
use crate::utils::error::Error;
use crate::utils::geometry::{LandCollection, LandFeature};

/// Southern cut-off that keeps Antarctica from dominating a Mercator map.
pub const ANTARCTIC_LATITUDE: f64 = -60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineOptions {
    pub min_latitude: f64,
    pub include_south_pole: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            min_latitude: ANTARCTIC_LATITUDE,
            include_south_pole: false,
        }
    }
}

impl PipelineOptions {
    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Latitude the pipeline clips at, if it clips at all.
    pub fn clip_latitude(&self) -> Option<f64> {
        if self.include_south_pole {
            None
        } else {
            Some(self.min_latitude)
        }
    }
}

/// Normalize, clip and rewind decoded land data.
pub fn prepare_land(
    input: Option<&GeoJson>,
    options: &PipelineOptions,
) -> Result<LandCollection, Error> {
    Ok(prepare_collection(normalize(input)?, options))
}

/// Clip and rewind an already normalized collection.
pub fn prepare_collection(normalized: LandCollection, options: &PipelineOptions) -> LandCollection {
    let clipped = match options.clip_latitude() {
        Some(min_latitude) => clip(&normalized, min_latitude),
        None => normalized,
    };
    let rewound = rewind(&clipped);
    info!(
        "Prepared {} land features (clip latitude: {:?})",
        rewound.len(),
        options.clip_latitude()
    );
    rewound
}

fn prepare_feature(feature: &LandFeature, clip_latitude: Option<f64>) -> Option<LandFeature> {
    match clip_latitude {
        Some(min_latitude) => clip_feature(feature, min_latitude).map(|f| rewind_feature(&f)),
        None => Some(rewind_feature(feature)),
    }
}

/// Like [`prepare_land`], but clips and rewinds features on the rayon pool.
///
/// Output order matches [`prepare_land`].
pub fn prepare_land_par(
    input: Option<&GeoJson>,
    options: &PipelineOptions,
) -> Result<LandCollection, Error> {
    Ok(prepare_collection_par(normalize(input)?, options))
}

/// Parallel counterpart of [`prepare_collection`].
pub fn prepare_collection_par(
    normalized: LandCollection,
    options: &PipelineOptions,
) -> LandCollection {
    let clip_latitude = options.clip_latitude();
    let features: Vec<LandFeature> = normalized
        .features
        .par_iter()
        .filter_map(|feature| prepare_feature(feature, clip_latitude))
        .collect();
    info!(
        "Prepared {} land features in parallel (clip latitude: {:?})",
        features.len(),
        clip_latitude
    );
    LandCollection { features }
}
