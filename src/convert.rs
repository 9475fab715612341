//! Pure conversion functions: CLI strings and TOML config structs ->
//! crate API config types.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

use nereus_collocate::CollocationConfig;
use nereus_fetch::FetchConfig;
use nereus_io::ModelSpec;
use nereus_region::{Projection, Region};

use crate::config::{ModelToml, NereusConfig, ProjectionToml, RegionToml};

/// Parses a `YYYYMMDDHH` period bound.
pub fn parse_date(s: &str) -> Result<NaiveDateTime> {
    if s.len() != 10 || !s.bytes().all(|b| b.is_ascii_digit()) {
        bail!("invalid date {s:?}: expected YYYYMMDDHH");
    }
    let date = NaiveDate::parse_from_str(&s[..8], "%Y%m%d")
        .with_context(|| format!("invalid date {s:?}"))?;
    let hour: u32 = s[8..].parse()?;
    date.and_hms_opt(hour, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("invalid hour in date {s:?}"))
}

/// Looks up a model by name; unknown names are fatal.
pub fn model_toml<'a>(config: &'a NereusConfig, name: &str) -> Result<&'a ModelToml> {
    config.models.get(name).ok_or_else(|| {
        let known: Vec<_> = config.models.keys().collect();
        anyhow::anyhow!("unknown model {name:?} (configured: {known:?})")
    })
}

/// Looks up a region by name; unknown names are fatal.
pub fn region_toml<'a>(config: &'a NereusConfig, name: &str) -> Result<&'a RegionToml> {
    config.regions.get(name).ok_or_else(|| {
        let known: Vec<_> = config.regions.keys().collect();
        anyhow::anyhow!("unknown region {name:?} (configured: {known:?})")
    })
}

/// Builds a [`ModelSpec`] from a TOML model entry.
pub fn build_model_spec(name: &str, toml: &ModelToml) -> Result<ModelSpec> {
    let basetime = NaiveDateTime::parse_from_str(&toml.basetime, "%Y-%m-%d %H:%M:%S")
        .with_context(|| format!("model {name:?}: invalid basetime {:?}", toml.basetime))?;
    if toml.cycle_hours == 0 {
        bail!("model {name:?}: cycle_hours must be positive");
    }
    Ok(ModelSpec {
        name: name.to_string(),
        hs_var: toml.hs_var.clone(),
        lat_var: toml.lat_var.clone(),
        lon_var: toml.lon_var.clone(),
        time_var: toml.time_var.clone(),
        path: toml.path.clone(),
        file_template: toml.file_template.clone(),
        basetime,
        cycle_hours: toml.cycle_hours,
        max_lead_hours: toml.max_lead_hours,
    })
}

/// Parses a projection specification.
pub fn build_projection(toml: &ProjectionToml) -> Result<Projection> {
    match toml.kind.as_str() {
        "plate_carree" => Ok(Projection::PlateCarree),
        "rotated_pole" => {
            let (Some(pole_lat), Some(pole_lon)) = (toml.pole_lat, toml.pole_lon) else {
                bail!("rotated_pole projection requires pole_lat and pole_lon");
            };
            Ok(Projection::RotatedPole { pole_lat, pole_lon })
        }
        other => bail!("unknown projection kind: {other:?}"),
    }
}

/// Builds a [`Region`] from a TOML region entry.
///
/// A `grid` region projects the configured reference grid through the
/// named model's projection (identity when the model declares none).
pub fn build_region(config: &NereusConfig, name: &str) -> Result<Region> {
    let toml = region_toml(config, name)?;
    match toml.kind.as_str() {
        "bbox" => {
            let (Some(lat_lo), Some(lat_hi), Some(lon_lo), Some(lon_hi)) =
                (toml.llcrnrlat, toml.urcrnrlat, toml.llcrnrlon, toml.urcrnrlon)
            else {
                bail!("region {name:?}: bbox requires all four corner bounds");
            };
            Ok(Region::BBox {
                lat_lo,
                lat_hi,
                lon_lo,
                lon_hi,
            })
        }
        "polar" => {
            let Some(bounding_lat) = toml.bounding_lat else {
                bail!("region {name:?}: polar requires bounding_lat");
            };
            Ok(Region::PolarCap { bounding_lat })
        }
        "polygon" => {
            let Some(ref vertices) = toml.vertices else {
                bail!("region {name:?}: polygon requires vertices");
            };
            let ring: Vec<(f64, f64)> = vertices.iter().map(|v| (v[0], v[1])).collect();
            Region::polygon(&ring).with_context(|| format!("region {name:?}"))
        }
        "grid" => {
            let (Some(ref grid_lats), Some(ref grid_lons)) = (&toml.grid_lats, &toml.grid_lons)
            else {
                bail!("region {name:?}: grid requires grid_lats and grid_lons");
            };
            let projection = match toml.model.as_deref() {
                Some(model) => match &model_toml(config, model)?.projection {
                    Some(p) => build_projection(p)?,
                    None => Projection::PlateCarree,
                },
                None => Projection::PlateCarree,
            };
            Region::grid_footprint(projection, grid_lats, grid_lons)
                .with_context(|| format!("region {name:?}"))
        }
        other => bail!("region {name:?}: unknown kind {other:?}"),
    }
}

/// Builds the [`CollocationConfig`] from the TOML collocation section.
pub fn build_collocation_config(config: &NereusConfig) -> CollocationConfig {
    CollocationConfig::default()
        .with_distance_limit_km(config.collocation.distance_limit_km)
        .with_time_window_minutes(config.collocation.timewin_minutes)
}

/// Builds the [`FetchConfig`] from the TOML fetch section.
pub fn build_fetch_config(config: &NereusConfig) -> FetchConfig {
    FetchConfig::default()
        .with_workers(config.fetch.workers)
        .with_attempts(config.fetch.attempts)
        .with_retry_delay(Duration::from_secs(config.fetch.retry_delay_secs))
}

/// Loads and parses the TOML configuration file.
pub fn load_config(path: &std::path::Path) -> Result<NereusConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml_str: &str) -> NereusConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn parse_date_accepts_period_bounds() {
        let t = parse_date("2021010206").unwrap();
        assert_eq!(
            t,
            NaiveDate::from_ymd_opt(2021, 1, 2).unwrap().and_hms_opt(6, 0, 0).unwrap()
        );
    }

    #[test]
    fn parse_date_rejects_bad_input() {
        assert!(parse_date("20210102").is_err());
        assert!(parse_date("2021010225").is_err());
        assert!(parse_date("202101026x").is_err());
    }

    #[test]
    fn unknown_model_is_fatal_and_names_alternatives() {
        let cfg = config(
            r#"
            [models.mwam4]
            path = "/archive"
            file_template = "hs_%Y%m%d%H.nc"
            "#,
        );
        let err = model_toml(&cfg, "nope").unwrap_err();
        assert!(err.to_string().contains("nope"));
        assert!(err.to_string().contains("mwam4"));
    }

    #[test]
    fn model_spec_from_toml() {
        let cfg = config(
            r#"
            [models.mwam4]
            path = "/archive"
            file_template = "hs_%Y%m%d%H.nc"
            cycle_hours = 6
            "#,
        );
        let spec = build_model_spec("mwam4", model_toml(&cfg, "mwam4").unwrap()).unwrap();
        assert_eq!(spec.cycle_hours, 6);
        assert_eq!(spec.max_lead_hours, 228);
        assert_eq!(spec.hs_var, "hs");
    }

    #[test]
    fn bbox_region_from_toml() {
        let cfg = config(
            r#"
            [regions.nordic]
            kind = "bbox"
            llcrnrlat = 55.0
            urcrnrlat = 75.0
            llcrnrlon = -10.0
            urcrnrlon = 30.0
            "#,
        );
        let region = build_region(&cfg, "nordic").unwrap();
        assert!(region.contains(60.0, 5.0));
        assert!(!region.contains(40.0, 5.0));
    }

    #[test]
    fn polar_region_from_toml() {
        let cfg = config(
            r#"
            [regions.arctic]
            kind = "polar"
            bounding_lat = 66.0
            "#,
        );
        let region = build_region(&cfg, "arctic").unwrap();
        assert!(region.contains(70.0, -120.0));
        assert!(!region.contains(60.0, 10.0));
    }

    #[test]
    fn polygon_region_from_toml() {
        let cfg = config(
            r#"
            [regions.tri]
            kind = "polygon"
            vertices = [[0.0, 0.0], [10.0, 0.0], [5.0, 10.0]]
            "#,
        );
        let region = build_region(&cfg, "tri").unwrap();
        assert!(region.contains(2.0, 5.0));
        assert!(!region.contains(9.0, 9.0));
    }

    #[test]
    fn incomplete_bbox_is_rejected() {
        let cfg = config(
            r#"
            [regions.partial]
            kind = "bbox"
            llcrnrlat = 55.0
            "#,
        );
        assert!(build_region(&cfg, "partial").is_err());
    }

    #[test]
    fn unknown_region_kind_is_rejected() {
        let cfg = config(
            r#"
            [regions.odd]
            kind = "hexagon"
            "#,
        );
        let err = build_region(&cfg, "odd").unwrap_err();
        assert!(err.to_string().contains("hexagon"));
    }

    #[test]
    fn collocation_config_from_toml() {
        let cfg = config(
            r#"
            [collocation]
            timewin_minutes = 15
            distance_limit_km = 10.0
            "#,
        );
        let cc = build_collocation_config(&cfg);
        assert_eq!(cc.time_window_minutes, 15);
        assert_eq!(cc.distance_limit_km, 10.0);
    }

    #[test]
    fn defaults_apply_for_empty_config() {
        let cfg = config("");
        assert_eq!(cfg.collocation.step_hours, 6);
        assert_eq!(cfg.collocation.lead_times, vec![0]);
        assert_eq!(cfg.fetch.attempts, 10);
    }
}
