//! Great-circle distance via the haversine formula.

/// Earth radius in km used throughout the collocation suite.
pub const EARTH_RADIUS_KM: f64 = 6367.0;

/// Great-circle distance in km between two points given in decimal degrees.
///
/// Symmetric in its arguments and zero (within floating tolerance) for
/// identical points.
pub fn haversine(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lon1 = lon1.to_radians();
    let lat1 = lat1.to_radians();
    let lon2 = lon2.to_radians();
    let lat2 = lat2.to_radians();

    let dlon = lon2 - lon1;
    let dlat = lat2 - lat1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_identical_points_zero() {
        assert_abs_diff_eq!(haversine(5.3, 60.4, 5.3, 60.4), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(haversine(-170.0, -80.0, -170.0, -80.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_symmetric() {
        let d1 = haversine(10.0, 50.0, -20.0, 30.0);
        let d2 = haversine(-20.0, 30.0, 10.0, 50.0);
        assert_relative_eq!(d1, d2, epsilon = 1e-12);
    }

    #[test]
    fn test_quarter_meridian() {
        // Equator to pole: pi/2 * 6367 km
        let d = haversine(0.0, 0.0, 0.0, 90.0);
        assert_relative_eq!(d, std::f64::consts::FRAC_PI_2 * EARTH_RADIUS_KM, epsilon = 1e-9);
        assert_relative_eq!(d, 10001.3, epsilon = 0.1);
    }

    #[test]
    fn test_one_degree_longitude_at_equator() {
        // 1 degree of longitude at the equator: 2*pi*R/360
        let d = haversine(0.0, 0.0, 1.0, 0.0);
        let expected = 2.0 * std::f64::consts::PI * EARTH_RADIUS_KM / 360.0;
        assert_relative_eq!(d, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_antimeridian_crossing() {
        // Wrap-around distance should match the mirrored pair
        let d1 = haversine(179.5, 0.0, -179.5, 0.0);
        let d2 = haversine(-0.5, 0.0, 0.5, 0.0);
        assert_relative_eq!(d1, d2, epsilon = 1e-9);
    }
}
