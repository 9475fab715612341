//! Collocate command: step through a period matching model fields with
//! observations and appending to the monthly collocation files.

use anyhow::{bail, Context, Result};
use chrono::TimeDelta;
use tracing::{info, info_span, warn};

use nereus_collocate::{collocate, filter_observations, MatchRecord};
use nereus_io::{
    append_collocation, coll_dir, coll_filename, list_swath_files, read_swath_files,
    CollocationRows, IoError, ModelSpec,
};
use nereus_temporal::datetimes_to_epoch_offsets;

use crate::cli::CollocateArgs;
use crate::convert;

/// Run the collocation batch for one satellite, model, and region.
pub fn run(args: CollocateArgs) -> Result<()> {
    let _cmd = info_span!("collocate").entered();
    let config = convert::load_config(&args.config)?;
    let start = convert::parse_date(&args.start_date)?;
    let end = convert::parse_date(&args.end_date)?;
    if end < start {
        bail!("end date {end} precedes start date {start}");
    }
    let model = convert::build_model_spec(&args.model, convert::model_toml(&config, &args.model)?)?;
    let region = convert::build_region(&config, &args.region)?;
    let coll_config = convert::build_collocation_config(&config);
    let timewin = config.collocation.timewin_minutes;
    let step = TimeDelta::hours(i64::from(config.collocation.step_hours.max(1)));
    let lead_times = &config.collocation.lead_times;

    // Bad lead times are configuration errors; reject them before any work.
    for &lead in lead_times {
        model
            .check_lead_time(start, lead)
            .with_context(|| format!("lead time {lead} h cannot be served"))?;
    }

    let root = config.paths.download_root.join(&args.sat);
    let files = list_swath_files(&root, &args.sat, start, end, timewin)?;
    let swath = read_swath_files(&files)?;
    info!(sat = %args.sat, files = files.len(), samples = swath.len(), "swath assembled");

    let mut total = 0usize;
    let mut valid_time = start;
    while valid_time <= end {
        let subset = filter_observations(&swath, &region, valid_time, None, timewin);
        if subset.is_empty() {
            info!(%valid_time, "no observations in window, skipping step");
            valid_time += step;
            continue;
        }

        for &lead in lead_times {
            let records = match collocate_step(&model, valid_time, lead, &subset, &coll_config) {
                Ok(records) => records,
                Err(StepError::Fatal(e)) => return Err(e),
                Err(StepError::Skip(e)) => {
                    warn!(%valid_time, lead, error = %e, "step failed, continuing");
                    continue;
                }
            };
            if records.is_empty() {
                info!(%valid_time, lead, "no collocated values");
                continue;
            }

            let rows = to_rows(&model, &records);
            let dir = coll_dir(&config.paths.output_root, &args.sat, valid_time);
            let path = dir.join(coll_filename(&model.name, &args.sat, lead, valid_time));
            append_collocation(&path, model.basetime, &rows)
                .with_context(|| format!("failed to append to {}", path.display()))?;
            info!(%valid_time, lead, matches = records.len(), file = %path.display(), "records appended");
            total += records.len();
        }
        valid_time += step;
    }
    info!(total, "collocation batch complete");
    Ok(())
}

enum StepError {
    /// Configuration-level failure that aborts the run.
    Fatal(anyhow::Error),
    /// Per-step data availability failure; the batch continues.
    Skip(IoError),
}

fn collocate_step(
    model: &ModelSpec,
    valid_time: chrono::NaiveDateTime,
    lead: u32,
    subset: &nereus_collocate::ObsSubset,
    config: &nereus_collocate::CollocationConfig,
) -> Result<Vec<MatchRecord>, StepError> {
    let field = nereus_io::read_model_field(model, valid_time, lead).map_err(|e| match e {
        fatal @ IoError::LeadTimeUnavailable { .. } => StepError::Fatal(fatal.into()),
        recoverable => StepError::Skip(recoverable),
    })?;
    collocate(&field, subset, config).map_err(|e| StepError::Fatal(e.into()))
}

fn to_rows(model: &ModelSpec, records: &[MatchRecord]) -> CollocationRows {
    let times: Vec<chrono::NaiveDateTime> = records.iter().map(|r| r.time).collect();
    CollocationRows {
        times: datetimes_to_epoch_offsets(model.basetime, &times),
        model_hs: records.iter().map(|r| r.model_hs).collect(),
        model_lons: records.iter().map(|r| r.model_lon).collect(),
        model_lats: records.iter().map(|r| r.model_lat).collect(),
        obs_hs: records.iter().map(|r| r.obs_hs).collect(),
        obs_lons: records.iter().map(|r| r.obs_lon).collect(),
        obs_lats: records.iter().map(|r| r.obs_lat).collect(),
        dists: records.iter().map(|r| r.distance_km).collect(),
    }
}
