//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a coordinate variable and return its flattened data plus rank.
///
/// Axes come in two layouts in practice: 1-D vectors along one grid axis,
/// or full 2-D fields already matching the data grid.
pub(crate) fn read_coord_f64(
    file: &netcdf::File,
    name: &str,
    path: &Path,
) -> Result<(Vec<f64>, Vec<usize>), IoError> {
    let var = file.variable(name).ok_or_else(|| IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })?;
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let data = var.get_values::<f64, _>(..)?;
    Ok((data, shape))
}

/// Parse a CF-style `"seconds since YYYY-MM-DD[ HH:MM:SS]"` units string
/// into the base datetime.
pub(crate) fn parse_epoch_units(units: &str) -> Result<NaiveDateTime, IoError> {
    let rest = units
        .strip_prefix("seconds since ")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units}'"),
        })?;
    let rest = rest.trim();

    if let Ok(t) = NaiveDateTime::parse_from_str(rest, "%Y-%m-%d %H:%M:%S") {
        return Ok(t);
    }
    chrono::NaiveDate::parse_from_str(rest, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to parse base date '{rest}': {e}"),
        })
}

/// Read the time variable's `units` attribute and parse the epoch base.
pub(crate) fn read_time_basetime(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<NaiveDateTime, IoError> {
    let var = file.variable(time_var).ok_or_else(|| IoError::MissingVariable {
        name: time_var.to_string(),
        path: path.to_path_buf(),
    })?;

    let units: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    parse_epoch_units(&units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parse_units_with_time_of_day() {
        let t = parse_epoch_units("seconds since 2000-01-01 00:00:00").unwrap();
        assert_eq!(
            t,
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
    }

    #[test]
    fn parse_units_date_only() {
        let t = parse_epoch_units("seconds since 1970-01-01").unwrap();
        assert_eq!(
            t,
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
    }

    #[test]
    fn parse_units_rejects_days() {
        assert!(parse_epoch_units("days since 1970-01-01").is_err());
    }

    #[test]
    fn parse_units_rejects_garbage_date() {
        assert!(parse_epoch_units("seconds since yesterday").is_err());
    }

    #[test]
    fn open_missing_file_is_file_not_found() {
        let err = open_file(Path::new("/nonexistent/swath.nc")).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
