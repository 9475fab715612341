//! Validate command: re-read monthly collocation files, compute per-step
//! statistics, and append to the monthly validation files.

use anyhow::{bail, Context, Result};
use chrono::TimeDelta;
use tracing::{info, info_span, warn};

use nereus_io::{
    append_validation, coll_dir, coll_filename, read_collocation, val_dir, val_filename, IoError,
    ValidationRow,
};
use nereus_temporal::match_window;
use nereus_validate::validate;

use crate::cli::ValidateArgs;
use crate::convert;

/// Run the validation batch for one satellite and model.
pub fn run(args: ValidateArgs) -> Result<()> {
    let _cmd = info_span!("validate").entered();
    let config = convert::load_config(&args.config)?;
    let start = convert::parse_date(&args.start_date)?;
    let end = convert::parse_date(&args.end_date)?;
    if end < start {
        bail!("end date {end} precedes start date {start}");
    }
    let model = convert::build_model_spec(&args.model, convert::model_toml(&config, &args.model)?)?;
    let timewin = config.collocation.timewin_minutes;
    let step = TimeDelta::hours(i64::from(config.collocation.step_hours.max(1)));

    let mut rows = 0usize;
    for &lead in &config.collocation.lead_times {
        let mut valid_time = start;
        while valid_time <= end {
            let coll_path = coll_dir(&config.paths.output_root, &args.sat, valid_time)
                .join(coll_filename(&model.name, &args.sat, lead, valid_time));
            let series = match read_collocation(&coll_path) {
                Ok(series) => series,
                Err(IoError::FileNotFound { path }) => {
                    info!(%valid_time, lead, file = %path.display(), "no collocation file, skipping step");
                    valid_time += step;
                    continue;
                }
                Err(e) => {
                    warn!(%valid_time, lead, error = %e, "collocation file unreadable, continuing");
                    valid_time += step;
                    continue;
                }
            };

            let in_window = match_window(valid_time, None, timewin, &series.times);
            let model_hs: Vec<f64> = in_window.indices.iter().map(|&i| series.model_hs[i]).collect();
            let obs_hs: Vec<f64> = in_window.indices.iter().map(|&i| series.obs_hs[i]).collect();

            let Some(summary) = validate(&model_hs, &obs_hs) else {
                info!(%valid_time, lead, "zero valid pairs, skipping step");
                valid_time += step;
                continue;
            };
            info!(%valid_time, lead, n = summary.n, "validation summary\n{summary}");

            let row = ValidationRow {
                time: (valid_time - series.basetime).num_milliseconds() as f64 / 1000.0,
                mop: summary.mean_model,
                mor: summary.mean_obs,
                rmsd: summary.rmsd,
                msd: summary.msd,
                corr: summary.corr,
                mad: summary.mad,
                bias: summary.bias,
                si: summary.si_std,
                nov: summary.n as f64,
            };
            let dir = val_dir(&config.paths.output_root, &args.sat, valid_time);
            let path = dir.join(val_filename(&model.name, &args.sat, lead, valid_time));
            append_validation(&path, series.basetime, &row)
                .with_context(|| format!("failed to append to {}", path.display()))?;
            rows += 1;
            valid_time += step;
        }
    }
    info!(rows, "validation batch complete");
    Ok(())
}
