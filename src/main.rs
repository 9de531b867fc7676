use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use geojson::{FeatureCollection, GeoJson};
use log::info;
use planeta::processing::bounds::fit_bounds;
use planeta::processing::normalize::normalize_json;
use planeta::processing::pipeline::{
    PipelineOptions, prepare_collection, prepare_collection_par,
};
use planeta::utils::error::Error;
use planeta::utils::geometry::LandCollection;

#[derive(Parser, Debug)]
#[command(
    name = "planeta",
    about = "Clip and rewind land polygons for Mercator rendering",
    version
)]
struct Args {
    /// Input GeoJSON file (Feature, FeatureCollection or null)
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// Output GeoJSON file
    #[arg(long, value_name = "FILE", default_value = "out/land.geojson")]
    out: PathBuf,

    /// JSON file with pipeline options; flags given on the command line win
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Southernmost latitude kept when clipping [default: -60]
    #[arg(long, allow_negative_numbers = true)]
    min_latitude: Option<f64>,

    /// Skip latitude clipping entirely
    #[arg(long)]
    include_south_pole: bool,

    /// Clip and rewind features on all cores
    #[arg(long)]
    parallel: bool,
}

impl Args {
    fn pipeline_options(&self) -> Result<PipelineOptions, Error> {
        let mut options = match &self.config {
            Some(path) => PipelineOptions::from_json(&fs::read_to_string(path)?)?,
            None => PipelineOptions::default(),
        };
        if let Some(min_latitude) = self.min_latitude {
            options.min_latitude = min_latitude;
        }
        options.include_south_pole |= self.include_south_pole;
        Ok(options)
    }
}

fn read_land(path: &Path) -> Result<LandCollection, Error> {
    let contents = fs::read_to_string(path)?;
    normalize_json(serde_json::from_str(&contents)?)
}

fn write_geojson(path: &Path, collection: FeatureCollection) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let geojson_string = serde_json::to_string(&GeoJson::FeatureCollection(collection))?;
    fs::write(path, geojson_string)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let options = args.pipeline_options()?;

    let normalized = read_land(&args.input)?;
    let land = if args.parallel {
        prepare_collection_par(normalized, &options)
    } else {
        prepare_collection(normalized, &options)
    };

    let bounds = fit_bounds(&land, options.clip_latitude());
    info!(
        "Fit bounds: [{}, {}] - [{}, {}]",
        bounds.min().x,
        bounds.min().y,
        bounds.max().x,
        bounds.max().y
    );

    let mut collection = FeatureCollection::from(land);
    collection.bbox = Some(vec![
        bounds.min().x,
        bounds.min().y,
        bounds.max().x,
        bounds.max().y,
    ]);
    write_geojson(&args.out, collection)?;

    info!("Saved {}", args.out.display());
    Ok(())
}
