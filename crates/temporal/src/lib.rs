//! Time handling for the collocation suite: epoch-offset conversions and
//! tolerance-window matching of timestamped samples.

pub mod epoch;
pub mod window;

pub use epoch::{datetimes_to_epoch_offsets, epoch_offsets_to_datetimes, hour_rounder};
pub use window::{WindowMatches, match_window, match_window_offsets};
