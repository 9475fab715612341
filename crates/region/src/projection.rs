//! Cartographic projections used by grid-footprint regions.

/// Closed set of projections the model grids are defined on.
///
/// `PlateCarree` is the identity for regular lat-lon grids. `RotatedPole`
/// is the spherical rotated-pole transform used by the regional wave
/// models: geographic coordinates are expressed relative to a displaced
/// north pole, yielding a near-rectangular grid in rotated coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Identity projection: (lon, lat) maps to (x, y) unchanged.
    PlateCarree,
    /// Spherical rotated-pole transform.
    RotatedPole {
        /// Geographic latitude of the rotated north pole, in degrees.
        pole_lat: f64,
        /// Geographic longitude of the rotated north pole, in degrees.
        pole_lon: f64,
    },
}

impl Projection {
    /// Projects a geographic (lon, lat) pair in degrees to projected (x, y).
    ///
    /// For `RotatedPole` the output is the rotated longitude/latitude in
    /// degrees. The transform is undefined exactly at the rotated pole
    /// itself (the rotated longitude degenerates there); grid corners never
    /// sit on the pole in practice.
    pub fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        match *self {
            Projection::PlateCarree => (lon, lat),
            Projection::RotatedPole { pole_lat, pole_lon } => {
                let phi = lat.to_radians();
                let phi_p = pole_lat.to_radians();
                let dlam = (lon - pole_lon).to_radians();

                let sin_phi_r = phi.sin() * phi_p.sin() + phi.cos() * phi_p.cos() * dlam.cos();
                let lat_r = sin_phi_r.clamp(-1.0, 1.0).asin();
                let lon_r = (phi.cos() * dlam.sin())
                    .atan2(phi_p.sin() * phi.cos() * dlam.cos() - phi_p.cos() * phi.sin());
                (lon_r.to_degrees(), lat_r.to_degrees())
            }
        }
    }
}
