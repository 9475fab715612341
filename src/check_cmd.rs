//! Check command: inspect available observations for a period and region.

use anyhow::{bail, Context, Result};
use tracing::{info, info_span, warn};

use nereus_collocate::filter_observations;
use nereus_io::{list_swath_files, read_swath_files, satellite_basetime, write_obs_dump};
use nereus_qc::{detect_outliers, OutlierConfig};
use nereus_stats::{nanmean, nanstd};
use nereus_temporal::datetimes_to_epoch_offsets;

use crate::cli::CheckArgs;
use crate::convert;

/// Run the observation check for one satellite, period, and region.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();
    let config = convert::load_config(&args.config)?;
    let start = convert::parse_date(&args.start_date)?;
    let end = match args.end_date {
        Some(ref s) => convert::parse_date(s)?,
        None => start,
    };
    if end < start {
        bail!("end date {end} precedes start date {start}");
    }
    let region = convert::build_region(&config, &args.region)?;
    let timewin = config.collocation.timewin_minutes;

    let root = config.paths.download_root.join(&args.sat);
    let files = list_swath_files(&root, &args.sat, start, end, timewin)
        .with_context(|| format!("failed to list swath files under {}", root.display()))?;
    info!(sat = %args.sat, files = files.len(), "swath files found");

    let swath = read_swath_files(&files)?;
    let interval_end = if end > start { Some(end) } else { None };
    let subset = filter_observations(&swath, &region, start, interval_end, timewin);
    if subset.is_empty() {
        warn!(region = %args.region, "no observations in region and period");
        return Ok(());
    }

    let offsets = datetimes_to_epoch_offsets(satellite_basetime(), &subset.times);
    let outliers = detect_outliers(&offsets, &subset.hs, None, &OutlierConfig::default());
    info!(
        footprints = subset.len(),
        mean_hs = format!("{:.2}", nanmean(&subset.hs)),
        std_hs = format!("{:.2}", nanstd(&subset.hs)),
        outliers = outliers.len(),
        first = %subset.times[0],
        last = %subset.times[subset.len() - 1],
        "observation summary"
    );

    if let Some(ref dump) = args.dump {
        write_obs_dump(dump, &args.sat, &offsets, &subset.lats, &subset.lons, &subset.hs)?;
        info!(path = %dump.display(), "observation dump written");
    }
    Ok(())
}
