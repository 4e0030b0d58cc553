//! Great-circle distance on a spherical Earth.

use crate::models::GeoPoint;

/// Equatorial radius used by MongoDB for spherical geometry, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_378_100.0;

/// Haversine distance between two points in meters.
pub fn haversine_distance_meters(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let (lat1, lat2) = (from.lat().to_radians(), to.lat().to_radians());
    let d_lat = (to.lat() - from.lat()).to_radians();
    let d_lng = (to.lng() - from.lng()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let p = GeoPoint::new(-122.42, 37.77);
        assert_eq!(haversine_distance_meters(&p, &p), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let expected = EARTH_RADIUS_METERS * std::f64::consts::PI / 180.0;
        assert!((haversine_distance_meters(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_san_francisco_neighbours() {
        let v1 = GeoPoint::new(-122.42, 37.77);
        let v2 = GeoPoint::new(-122.43, 37.78);
        let d = haversine_distance_meters(&v1, &v2);
        assert!(d > 1_300.0 && d < 1_500.0, "distance was {d}");
    }

    #[test]
    fn test_symmetric() {
        let a = GeoPoint::new(13.4, 52.5);
        let b = GeoPoint::new(2.35, 48.86);
        assert!((haversine_distance_meters(&a, &b) - haversine_distance_meters(&b, &a)).abs() < 1e-9);
    }
}
