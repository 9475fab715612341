//! # nereus-io
//!
//! Read altimeter swaths and wave-model fields from NetCDF, and persist
//! collocation, validation, and observation-dump products. Bridges
//! external file formats into nereus's internal `&[f64]` slice-based
//! APIs and owns the filename and partition conventions of the archive.

mod error;
mod filenames;
mod model;
mod netcdf_read;
mod swath;
mod writers;

pub use error::IoError;
pub use filenames::{
    coll_dir, coll_filename, obs_dump_filename, parse_swath_stamp, swath_dir, val_dir,
    val_filename, SWATH_STAMP_FORMAT,
};
pub use model::{read_model_field, ModelField, ModelSpec};
pub use swath::{list_swath_files, read_swath_files, satellite_basetime, SwathSeries};
pub use writers::{
    append_collocation, append_validation, read_collocation, write_obs_dump, CollocationRows,
    CollocationSeries, ValidationRow,
};
