//! Wave-model field reading.
//!
//! Model output is config-driven: each model names its own Hs, latitude,
//! longitude, and time variables, a strftime path template keyed on the
//! initialization time, a time-axis epoch base, and the forecast cadence
//! (`cycle_hours`, `max_lead_hours`). Coordinate axes arrive either as
//! 1-D vectors (regular grids) or full 2-D fields (curvilinear grids);
//! both are normalized to flat row-major 2-D arrays.

use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use tracing::debug;

use crate::error::IoError;
use crate::netcdf_read::{open_file, read_coord_f64, read_time_basetime};

/// Where and how to read one configured wave model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    /// Identifier used in filenames and diagnostics.
    pub name: String,
    /// Name of the significant-wave-height variable.
    pub hs_var: String,
    /// Name of the latitude coordinate variable.
    pub lat_var: String,
    /// Name of the longitude coordinate variable.
    pub lon_var: String,
    /// Name of the time coordinate variable.
    pub time_var: String,
    /// Root directory of the model archive.
    pub path: PathBuf,
    /// strftime template producing the file name from the init time.
    pub file_template: String,
    /// Epoch base of the model time axis.
    pub basetime: NaiveDateTime,
    /// Hours between forecast initializations.
    pub cycle_hours: u32,
    /// Longest lead time the archive serves, in hours.
    pub max_lead_hours: u32,
}

/// One model field at a single valid time.
///
/// `lats`, `lons`, and `values` are flat row-major `ny x nx` arrays; NaN
/// values mark cells without data (land, missing). Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelField {
    /// Forecast initialization time.
    pub init_time: NaiveDateTime,
    /// Valid time of this field.
    pub valid_time: NaiveDateTime,
    /// Forecast lead in hours.
    pub lead_hours: u32,
    /// Cell latitudes, row-major.
    pub lats: Vec<f64>,
    /// Cell longitudes, row-major.
    pub lons: Vec<f64>,
    /// Significant wave height per cell, row-major.
    pub values: Vec<f64>,
    /// Number of grid rows.
    pub ny: usize,
    /// Number of grid columns.
    pub nx: usize,
    /// Epoch base of the source time axis.
    pub basetime: NaiveDateTime,
}

impl ModelSpec {
    /// Checks the forecast cadence and resolves the initialization time.
    ///
    /// The init time is `valid_time - lead_hours`; it must fall on the
    /// model cycle and the lead must not exceed the archive's maximum.
    ///
    /// # Errors
    ///
    /// [`IoError::LeadTimeUnavailable`] on either violation; this is a
    /// configuration problem and aborts the run.
    pub fn check_lead_time(
        &self,
        valid_time: NaiveDateTime,
        lead_hours: u32,
    ) -> Result<NaiveDateTime, IoError> {
        if self.cycle_hours == 0 {
            return Err(IoError::LeadTimeUnavailable {
                model: self.name.clone(),
                lead_hours,
                reason: "model cycle is zero hours".to_string(),
            });
        }
        if lead_hours > self.max_lead_hours {
            return Err(IoError::LeadTimeUnavailable {
                model: self.name.clone(),
                lead_hours,
                reason: format!("exceeds maximum lead of {} h", self.max_lead_hours),
            });
        }
        let init_time = valid_time - TimeDelta::hours(i64::from(lead_hours));
        let on_cycle = init_time.hour() % self.cycle_hours == 0
            && init_time.minute() == 0
            && init_time.second() == 0;
        if !on_cycle {
            return Err(IoError::LeadTimeUnavailable {
                model: self.name.clone(),
                lead_hours,
                reason: format!(
                    "init time {init_time} is not on the {} h cycle",
                    self.cycle_hours
                ),
            });
        }
        Ok(init_time)
    }

    /// Archive path of the file initialized at `init_time`.
    pub fn file_path(&self, init_time: NaiveDateTime) -> PathBuf {
        self.path.join(init_time.format(&self.file_template).to_string())
    }
}

/// Reads the model field valid at `valid_time` with the given lead.
///
/// Resolves the init time via the cadence check, opens the templated
/// file, and extracts the Hs slab at the valid time's position in the
/// file's time axis.
///
/// # Errors
///
/// [`IoError::LeadTimeUnavailable`] on a cadence violation (fatal);
/// [`IoError::NoDataForTimeStep`] when the file's time axis does not
/// contain the valid time (recoverable per step); read failures
/// otherwise.
pub fn read_model_field(
    spec: &ModelSpec,
    valid_time: NaiveDateTime,
    lead_hours: u32,
) -> Result<ModelField, IoError> {
    let init_time = spec.check_lead_time(valid_time, lead_hours)?;
    let path = spec.file_path(init_time);
    let file = open_file(&path)?;

    let basetime = read_time_basetime(&file, &spec.time_var, &path)?;
    let (time_axis, _) = read_coord_f64(&file, &spec.time_var, &path)?;
    let wanted = (valid_time - basetime).num_milliseconds() as f64 / 1000.0;
    let time_index = time_axis
        .iter()
        .position(|&t| t == wanted)
        .ok_or(IoError::NoDataForTimeStep { valid_time })?;

    let (lats, lons, ny, nx) = read_grid(&file, spec, &path)?;
    let values = read_hs_slab(&file, spec, &path, time_index, ny, nx)?;

    debug!(
        model = %spec.name,
        %valid_time,
        lead_hours,
        ny,
        nx,
        "model field read"
    );
    Ok(ModelField {
        init_time,
        valid_time,
        lead_hours,
        lats,
        lons,
        values,
        ny,
        nx,
        basetime,
    })
}

/// Reads the coordinate axes and normalizes them to row-major 2-D.
fn read_grid(
    file: &netcdf::File,
    spec: &ModelSpec,
    path: &Path,
) -> Result<(Vec<f64>, Vec<f64>, usize, usize), IoError> {
    let (lat_data, lat_shape) = read_coord_f64(file, &spec.lat_var, path)?;
    let (lon_data, lon_shape) = read_coord_f64(file, &spec.lon_var, path)?;

    match (lat_shape.len(), lon_shape.len()) {
        // Regular grid: mesh the two axis vectors.
        (1, 1) => {
            let ny = lat_data.len();
            let nx = lon_data.len();
            let mut lats = Vec::with_capacity(ny * nx);
            let mut lons = Vec::with_capacity(ny * nx);
            for &lat in &lat_data {
                for &lon in &lon_data {
                    lats.push(lat);
                    lons.push(lon);
                }
            }
            Ok((lats, lons, ny, nx))
        }
        // Curvilinear grid: coordinates already cover every cell.
        (2, 2) => {
            if lat_shape != lon_shape {
                return Err(IoError::DimensionMismatch {
                    name: spec.lon_var.clone(),
                    expected: lat_data.len(),
                    got: lon_data.len(),
                });
            }
            Ok((lat_data, lon_data, lat_shape[0], lat_shape[1]))
        }
        (got, _) => Err(IoError::DimensionMismatch {
            name: spec.lat_var.clone(),
            expected: 1,
            got,
        }),
    }
}

/// Reads the Hs values at one time index as a flat `ny x nx` slab.
fn read_hs_slab(
    file: &netcdf::File,
    spec: &ModelSpec,
    path: &Path,
    time_index: usize,
    ny: usize,
    nx: usize,
) -> Result<Vec<f64>, IoError> {
    let var = file
        .variable(&spec.hs_var)
        .ok_or_else(|| IoError::MissingVariable {
            name: spec.hs_var.clone(),
            path: path.to_path_buf(),
        })?;
    let rank = var.dimensions().len();
    let values = match rank {
        3 => var.get_values::<f64, _>((time_index..time_index + 1, 0..ny, 0..nx))?,
        2 => var.get_values::<f64, _>((0..ny, 0..nx))?,
        got => {
            return Err(IoError::DimensionMismatch {
                name: format!("{} dimensions", spec.hs_var),
                expected: 3,
                got,
            })
        }
    };
    if values.len() != ny * nx {
        return Err(IoError::DimensionMismatch {
            name: spec.hs_var.clone(),
            expected: ny * nx,
            got: values.len(),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn spec(dir: &Path) -> ModelSpec {
        ModelSpec {
            name: "testwam".to_string(),
            hs_var: "hs".to_string(),
            lat_var: "lat".to_string(),
            lon_var: "lon".to_string(),
            time_var: "time".to_string(),
            path: dir.to_path_buf(),
            file_template: "hs_%Y%m%d%H.nc".to_string(),
            basetime: dt(1970, 1, 1, 0),
            cycle_hours: 12,
            max_lead_hours: 228,
        }
    }

    /// Writes a model file with a regular 2x3 grid and two time steps.
    fn write_model(path: &Path, epoch_times: &[f64], hs_by_step: &[Vec<f64>]) {
        let mut file = netcdf::create(path).unwrap();
        file.add_dimension("time", epoch_times.len()).unwrap();
        file.add_dimension("lat", 2).unwrap();
        file.add_dimension("lon", 3).unwrap();
        let mut v = file.add_variable::<f64>("time", &["time"]).unwrap();
        v.put_attribute("units", "seconds since 1970-01-01 00:00:00").unwrap();
        v.put_values(epoch_times, ..).unwrap();
        let mut v = file.add_variable::<f64>("lat", &["lat"]).unwrap();
        v.put_values(&[60.0, 61.0], ..).unwrap();
        let mut v = file.add_variable::<f64>("lon", &["lon"]).unwrap();
        v.put_values(&[4.0, 5.0, 6.0], ..).unwrap();
        let mut v = file.add_variable::<f64>("hs", &["time", "lat", "lon"]).unwrap();
        for (i, slab) in hs_by_step.iter().enumerate() {
            v.put_values(slab, (i..i + 1, 0..2, 0..3)).unwrap();
        }
    }

    #[test]
    fn cadence_check_accepts_on_cycle_lead() {
        let dir = tempfile::tempdir().unwrap();
        let s = spec(dir.path());
        let init = s.check_lead_time(dt(2021, 1, 2, 6), 6).unwrap();
        assert_eq!(init, dt(2021, 1, 2, 0));
    }

    #[test]
    fn cadence_check_rejects_off_cycle_lead() {
        let dir = tempfile::tempdir().unwrap();
        let s = spec(dir.path());
        let err = s.check_lead_time(dt(2021, 1, 2, 6), 7).unwrap_err();
        assert!(matches!(err, IoError::LeadTimeUnavailable { lead_hours: 7, .. }));
        assert!(err.to_string().contains("testwam"));
    }

    #[test]
    fn cadence_check_rejects_excessive_lead() {
        let dir = tempfile::tempdir().unwrap();
        let s = spec(dir.path());
        let err = s.check_lead_time(dt(2021, 1, 12, 0), 240).unwrap_err();
        assert!(matches!(err, IoError::LeadTimeUnavailable { lead_hours: 240, .. }));
    }

    #[test]
    fn file_path_applies_template() {
        let s = spec(Path::new("/archive"));
        assert_eq!(
            s.file_path(dt(2021, 1, 2, 0)),
            PathBuf::from("/archive/hs_2021010200.nc")
        );
    }

    #[test]
    fn reads_field_at_valid_time() {
        let dir = tempfile::tempdir().unwrap();
        let s = spec(dir.path());
        let init = dt(2021, 1, 2, 0);
        let t0 = (init - s.basetime).num_seconds() as f64;
        let slab0: Vec<f64> = vec![1.0; 6];
        let slab1: Vec<f64> = (0..6).map(|i| i as f64 / 2.0).collect();
        write_model(
            &s.file_path(init),
            &[t0, t0 + 6.0 * 3600.0],
            &[slab0, slab1.clone()],
        );

        let field = read_model_field(&s, dt(2021, 1, 2, 6), 6).unwrap();
        assert_eq!(field.init_time, init);
        assert_eq!(field.lead_hours, 6);
        assert_eq!((field.ny, field.nx), (2, 3));
        assert_eq!(field.values, slab1);
        // meshed coordinates: row-major, lat varies by row, lon by column
        assert_relative_eq!(field.lats[0], 60.0, epsilon = 1e-12);
        assert_relative_eq!(field.lats[3], 61.0, epsilon = 1e-12);
        assert_relative_eq!(field.lons[1], 5.0, epsilon = 1e-12);
        assert_relative_eq!(field.lons[4], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_valid_time_is_no_data_for_time_step() {
        let dir = tempfile::tempdir().unwrap();
        let s = spec(dir.path());
        let init = dt(2021, 1, 2, 0);
        let t0 = (init - s.basetime).num_seconds() as f64;
        write_model(&s.file_path(init), &[t0], &[vec![1.0; 6]]);

        let err = read_model_field(&s, dt(2021, 1, 2, 12), 12).unwrap_err();
        assert!(matches!(err, IoError::NoDataForTimeStep { .. }));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let s = spec(dir.path());
        let err = read_model_field(&s, dt(2021, 1, 2, 0), 0).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
