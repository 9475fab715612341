//! Download command: list, window-select, and pool-fetch swath files.

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::{info, info_span};

use nereus_fetch::{fetch_batch, select_by_window, LocalMirror, SwathSource};

use crate::cli::DownloadArgs;
use crate::convert;

/// Run the download pipeline for one satellite and period.
pub fn run(args: DownloadArgs) -> Result<()> {
    let _cmd = info_span!("download").entered();
    let config = convert::load_config(&args.config)?;
    let start = convert::parse_date(&args.start_date)?;
    let end = convert::parse_date(&args.end_date)?;
    if end < start {
        bail!("end date {end} precedes start date {start}");
    }

    let Some(ref source_root) = config.fetch.source_root else {
        bail!("no fetch source configured: set [fetch].source_root");
    };
    let source = LocalMirror::new(source_root.join(&args.sat));
    let fetch_config = convert::build_fetch_config(&config);
    let timewin = config.collocation.timewin_minutes;

    let mut names = Vec::new();
    for (year, month) in months(start, end) {
        names.extend(source.list(year, month)?);
    }
    let selected = select_by_window(&names, start, end, timewin);
    info!(
        sat = %args.sat,
        listed = names.len(),
        selected = selected.len(),
        "swath files selected"
    );

    let dest_root = config.paths.download_root.join(&args.sat);
    let fetched = fetch_batch(&source, &selected, &dest_root, &fetch_config)
        .context("swath download failed")?;
    info!(fetched, dest = %dest_root.display(), "download complete");
    Ok(())
}

/// (year, month) pairs for every month intersecting `[start, end]`.
fn months(start: NaiveDateTime, end: NaiveDateTime) -> Vec<(i32, u32)> {
    let mut out = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());
    loop {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default());
        match first {
            Some(first) if first <= end => out.push((year, month)),
            _ => break,
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    out
}
