use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level nereus configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NereusConfig {
    /// Filesystem roots.
    #[serde(default)]
    pub paths: PathsToml,

    /// Collocation tolerances and batch cadence.
    #[serde(default)]
    pub collocation: CollocationToml,

    /// Download settings.
    #[serde(default)]
    pub fetch: FetchToml,

    /// Configured wave models, keyed by name.
    #[serde(default)]
    pub models: BTreeMap<String, ModelToml>,

    /// Configured regions, keyed by name.
    #[serde(default)]
    pub regions: BTreeMap<String, RegionToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsToml {
    /// Root of the local swath archive (`<root>/<sat>/<YYYY>/<MM>/`).
    #[serde(default = "default_download_root")]
    pub download_root: PathBuf,
    /// Root under which collocation and validation files are written.
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
}

impl Default for PathsToml {
    fn default() -> Self {
        Self {
            download_root: default_download_root(),
            output_root: default_output_root(),
        }
    }
}

fn default_download_root() -> PathBuf {
    PathBuf::from("data/altimetry")
}
fn default_output_root() -> PathBuf {
    PathBuf::from("data/products")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollocationToml {
    /// Half-width of the time tolerance window in minutes.
    #[serde(default = "default_timewin_minutes")]
    pub timewin_minutes: i64,
    /// Maximum observation-to-cell separation in km.
    #[serde(default = "default_distance_limit_km")]
    pub distance_limit_km: f64,
    /// Hours between batch steps.
    #[serde(default = "default_step_hours")]
    pub step_hours: u32,
    /// Forecast lead times to process, in hours.
    #[serde(default = "default_lead_times")]
    pub lead_times: Vec<u32>,
}

impl Default for CollocationToml {
    fn default() -> Self {
        Self {
            timewin_minutes: default_timewin_minutes(),
            distance_limit_km: default_distance_limit_km(),
            step_hours: default_step_hours(),
            lead_times: default_lead_times(),
        }
    }
}

fn default_timewin_minutes() -> i64 {
    30
}
fn default_distance_limit_km() -> f64 {
    6.0
}
fn default_step_hours() -> u32 {
    6
}
fn default_lead_times() -> Vec<u32> {
    vec![0]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchToml {
    /// Provider archive the download command pulls from
    /// (`<source_root>/<sat>/<YYYY>/<MM>/`).
    #[serde(default)]
    pub source_root: Option<PathBuf>,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for FetchToml {
    fn default() -> Self {
        Self {
            source_root: None,
            workers: default_workers(),
            attempts: default_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

fn default_workers() -> usize {
    4
}
fn default_attempts() -> u32 {
    10
}
fn default_retry_delay_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    /// Root directory of the model archive.
    pub path: PathBuf,
    /// strftime template producing the file name from the init time.
    pub file_template: String,
    #[serde(default = "default_hs_var")]
    pub hs_var: String,
    #[serde(default = "default_lat_var")]
    pub lat_var: String,
    #[serde(default = "default_lon_var")]
    pub lon_var: String,
    #[serde(default = "default_time_var")]
    pub time_var: String,
    /// Epoch base of the model time axis, `YYYY-MM-DD HH:MM:SS`.
    #[serde(default = "default_basetime")]
    pub basetime: String,
    #[serde(default = "default_cycle_hours")]
    pub cycle_hours: u32,
    #[serde(default = "default_max_lead_hours")]
    pub max_lead_hours: u32,
    /// Grid projection, used by grid-footprint regions.
    #[serde(default)]
    pub projection: Option<ProjectionToml>,
}

fn default_hs_var() -> String {
    "hs".to_string()
}
fn default_lat_var() -> String {
    "latitude".to_string()
}
fn default_lon_var() -> String {
    "longitude".to_string()
}
fn default_time_var() -> String {
    "time".to_string()
}
fn default_basetime() -> String {
    "1970-01-01 00:00:00".to_string()
}
fn default_cycle_hours() -> u32 {
    12
}
fn default_max_lead_hours() -> u32 {
    228
}

/// Projection specification — `kind` is `plate_carree` or `rotated_pole`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectionToml {
    pub kind: String,
    #[serde(default)]
    pub pole_lat: Option<f64>,
    #[serde(default)]
    pub pole_lon: Option<f64>,
}

/// Region specification — `kind` selects which fields apply.
///
/// `bbox` uses the four corner bounds; `polar` uses `bounding_lat`;
/// `polygon` uses `vertices` as (lon, lat) pairs; `grid` uses
/// `grid_lats`/`grid_lons` as the reference grid outline plus the
/// projection of the named `model`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionToml {
    pub kind: String,
    #[serde(default)]
    pub llcrnrlat: Option<f64>,
    #[serde(default)]
    pub urcrnrlat: Option<f64>,
    #[serde(default)]
    pub llcrnrlon: Option<f64>,
    #[serde(default)]
    pub urcrnrlon: Option<f64>,
    #[serde(default)]
    pub bounding_lat: Option<f64>,
    #[serde(default)]
    pub vertices: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    pub grid_lats: Option<Vec<f64>>,
    #[serde(default)]
    pub grid_lons: Option<Vec<f64>>,
    #[serde(default)]
    pub model: Option<String>,
}
