//! Append-or-create NetCDF writers for persisted products.
//!
//! All three products share the layout of the archive they extend: a
//! single unlimited `time` dimension with one f64 column per variable.
//! Writers create the file (and its partition directory) on first use
//! and append along `time` afterwards, so a monthly file accumulates
//! rows as the batch loop walks the period.

use std::path::Path;

use chrono::NaiveDateTime;
use nereus_temporal::epoch_offsets_to_datetimes;
use tracing::debug;

use crate::error::IoError;
use crate::netcdf_read::{open_file, read_1d_f64, read_time_basetime};

/// Per-column attribute metadata: name, standard_name, long_name, units.
type ColumnMeta = (&'static str, &'static str, &'static str, &'static str);

const COLL_COLUMNS: [ColumnMeta; 7] = [
    ("mHs", "model Hs", "significant wave height from wave model", "m"),
    ("mlons", "model lons", "longitudes of associated model grid points", "degrees east"),
    ("mlats", "model lats", "latitudes of associated model grid points", "degrees north"),
    ("sHs", "observed Hs", "significant wave height from wave observation", "m"),
    ("slons", "obs lons", "longitudes of observations", "degrees east"),
    ("slats", "obs lats", "latitudes of observations", "degrees north"),
    ("dists", "dists", "distances between observations and model grids", "km"),
];

const VAL_COLUMNS: [ColumnMeta; 9] = [
    ("mop", "mop", "mean of product (wave model)", "m"),
    ("mor", "mor", "mean of reference (observations)", "m"),
    ("rmsd", "rmsd", "root mean square deviation", "m"),
    ("msd", "msd", "mean square deviation", "m^2"),
    ("corr", "corr", "correlation coefficient", "none"),
    ("mad", "mad", "mean absolute deviation", "m"),
    ("bias", "bias", "Bias (mean error)", "m"),
    ("SI", "SI", "scatter index", "none"),
    ("nov", "nov", "number of values", "none"),
];

/// Column bundle appended to a collocation file.
///
/// All vectors share one length; `times` are seconds since the file's
/// basetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollocationRows {
    /// Match instants, seconds since the basetime.
    pub times: Vec<f64>,
    /// Model Hs at the matched cell.
    pub model_hs: Vec<f64>,
    /// Matched cell longitudes.
    pub model_lons: Vec<f64>,
    /// Matched cell latitudes.
    pub model_lats: Vec<f64>,
    /// Observed Hs.
    pub obs_hs: Vec<f64>,
    /// Observation longitudes.
    pub obs_lons: Vec<f64>,
    /// Observation latitudes.
    pub obs_lats: Vec<f64>,
    /// Great-circle separation in km.
    pub dists: Vec<f64>,
}

impl CollocationRows {
    /// Number of rows in the bundle.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the bundle holds no rows.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    fn columns(&self) -> [&[f64]; 7] {
        [
            &self.model_hs,
            &self.model_lons,
            &self.model_lats,
            &self.obs_hs,
            &self.obs_lons,
            &self.obs_lats,
            &self.dists,
        ]
    }
}

/// One validation summary row.
///
/// `si` carries the deviation-spread scatter index; `nov` is the pair
/// count stored as f64 alongside the other columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRow {
    /// Step instant, seconds since the basetime.
    pub time: f64,
    /// Mean of product (model).
    pub mop: f64,
    /// Mean of reference (observations).
    pub mor: f64,
    /// Root mean square deviation.
    pub rmsd: f64,
    /// Mean square deviation.
    pub msd: f64,
    /// Correlation coefficient.
    pub corr: f64,
    /// Mean absolute deviation.
    pub mad: f64,
    /// Bias (mean error).
    pub bias: f64,
    /// Scatter index.
    pub si: f64,
    /// Number of collocated values.
    pub nov: f64,
}

impl ValidationRow {
    fn columns(&self) -> [f64; 9] {
        [
            self.mop, self.mor, self.rmsd, self.msd, self.corr, self.mad, self.bias, self.si,
            self.nov,
        ]
    }
}

/// Collocation columns read back for validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CollocationSeries {
    /// Epoch base declared by the file's time units.
    pub basetime: NaiveDateTime,
    /// Match instants.
    pub times: Vec<NaiveDateTime>,
    /// Model Hs column.
    pub model_hs: Vec<f64>,
    /// Observed Hs column.
    pub obs_hs: Vec<f64>,
}

/// Appends collocation rows, creating the file on first use.
pub fn append_collocation(
    path: &Path,
    basetime: NaiveDateTime,
    rows: &CollocationRows,
) -> Result<(), IoError> {
    ensure_parent(path)?;
    if path.exists() {
        let mut file = netcdf::append(path)?;
        let offset = time_len(&file);
        put_time(&mut file, path, offset, &rows.times)?;
        for ((name, ..), data) in COLL_COLUMNS.iter().zip(rows.columns()) {
            put_column(&mut file, path, name, offset, data)?;
        }
        debug!(path = %path.display(), rows = rows.len(), offset, "collocation rows appended");
    } else {
        let mut file = netcdf::create(path)?;
        file.add_unlimited_dimension("time")?;
        add_time(&mut file, basetime, &rows.times)?;
        for ((name, standard, long, units), data) in COLL_COLUMNS.iter().zip(rows.columns()) {
            add_column(&mut file, name, standard, long, units, data)?;
        }
        debug!(path = %path.display(), rows = rows.len(), "collocation file created");
    }
    Ok(())
}

/// Appends one validation row, creating the file on first use.
pub fn append_validation(
    path: &Path,
    basetime: NaiveDateTime,
    row: &ValidationRow,
) -> Result<(), IoError> {
    ensure_parent(path)?;
    let values = row.columns();
    if path.exists() {
        let mut file = netcdf::append(path)?;
        let offset = time_len(&file);
        put_time(&mut file, path, offset, &[row.time])?;
        for ((name, ..), value) in VAL_COLUMNS.iter().zip(values) {
            put_column(&mut file, path, name, offset, &[value])?;
        }
        debug!(path = %path.display(), offset, "validation row appended");
    } else {
        let mut file = netcdf::create(path)?;
        file.add_unlimited_dimension("time")?;
        add_time(&mut file, basetime, &[row.time])?;
        for ((name, standard, long, units), value) in VAL_COLUMNS.iter().zip(values) {
            add_column(&mut file, name, standard, long, units, &[value])?;
        }
        debug!(path = %path.display(), "validation file created");
    }
    Ok(())
}

/// Writes a full observation dump, replacing any existing file.
///
/// Times are seconds since the altimeter basetime (2000-01-01).
pub fn write_obs_dump(
    path: &Path,
    sat: &str,
    times: &[f64],
    lats: &[f64],
    lons: &[f64],
    hs: &[f64],
) -> Result<(), IoError> {
    ensure_parent(path)?;
    let mut file = netcdf::create(path)?;
    file.add_attribute("title", format!("{sat} altimeter significant wave height"))?;
    file.add_unlimited_dimension("time")?;

    let mut var = file.add_variable::<f64>("time", &["time"])?;
    var.put_attribute("units", "seconds since 2000-01-01 00:00:00")?;
    var.put_values(times, 0..times.len())?;

    let mut var = file.add_variable::<f64>("latitude", &["time"])?;
    var.put_attribute("standard_name", "latitude")?;
    var.put_attribute("units", "degree_north")?;
    var.put_attribute("valid_min", -90.0)?;
    var.put_attribute("valid_max", 90.0)?;
    var.put_values(lats, 0..lats.len())?;

    let mut var = file.add_variable::<f64>("longitude", &["time"])?;
    var.put_attribute("standard_name", "longitude")?;
    var.put_attribute("units", "degree_east")?;
    var.put_attribute("valid_min", -180.0)?;
    var.put_attribute("valid_max", 180.0)?;
    var.put_values(lons, 0..lons.len())?;

    let mut var = file.add_variable::<f64>("Hs", &["time"])?;
    var.put_attribute("standard_name", "sea_surface_wave_significant_height")?;
    var.put_attribute(
        "long_name",
        "Significant wave height estimate from altimeter wave form",
    )?;
    var.put_attribute("units", "m")?;
    var.put_attribute("valid_range", vec![0.0, 25.0])?;
    var.put_values(hs, 0..hs.len())?;

    debug!(path = %path.display(), samples = times.len(), "observation dump written");
    Ok(())
}

/// Reads back the columns validation needs from a collocation file.
pub fn read_collocation(path: &Path) -> Result<CollocationSeries, IoError> {
    let file = open_file(path)?;
    let basetime = read_time_basetime(&file, "time", path)?;
    let offsets = read_1d_f64(&file, &["time"], path)?;
    let model_hs = read_1d_f64(&file, &["mHs"], path)?;
    let obs_hs = read_1d_f64(&file, &["sHs"], path)?;
    let times = epoch_offsets_to_datetimes(basetime, &offsets);
    Ok(CollocationSeries {
        basetime,
        times,
        model_hs,
        obs_hs,
    })
}

fn ensure_parent(path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn time_len(file: &netcdf::FileMut) -> usize {
    file.dimension("time").map_or(0, |d| d.len())
}

fn add_time(
    file: &mut netcdf::FileMut,
    basetime: NaiveDateTime,
    times: &[f64],
) -> Result<(), netcdf::Error> {
    let mut var = file.add_variable::<f64>("time", &["time"])?;
    var.put_attribute("standard_name", "time matches")?;
    var.put_attribute(
        "long_name",
        "associated time steps between model and observation",
    )?;
    var.put_attribute(
        "units",
        format!("seconds since {}", basetime.format("%Y-%m-%d %H:%M:%S")),
    )?;
    var.put_values(times, 0..times.len())?;
    Ok(())
}

fn add_column(
    file: &mut netcdf::FileMut,
    name: &str,
    standard_name: &str,
    long_name: &str,
    units: &str,
    data: &[f64],
) -> Result<(), netcdf::Error> {
    let mut var = file.add_variable::<f64>(name, &["time"])?;
    var.put_attribute("standard_name", standard_name)?;
    var.put_attribute("long_name", long_name)?;
    var.put_attribute("units", units)?;
    var.put_values(data, 0..data.len())?;
    Ok(())
}

fn put_time(
    file: &mut netcdf::FileMut,
    path: &Path,
    offset: usize,
    times: &[f64],
) -> Result<(), IoError> {
    put_column(file, path, "time", offset, times)
}

fn put_column(
    file: &mut netcdf::FileMut,
    path: &Path,
    name: &str,
    offset: usize,
    data: &[f64],
) -> Result<(), IoError> {
    let mut var = file.variable_mut(name).ok_or_else(|| IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })?;
    var.put_values(data, offset..offset + data.len())?;
    Ok(())
}
