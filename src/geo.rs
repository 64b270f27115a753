use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Great-circle distance in kilometers (Haversine, spherical Earth)
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const BERCY: Coordinates = Coordinates::new(48.8393, 2.3791);
    const OLYMPIA: Coordinates = Coordinates::new(48.8698, 2.3266);

    #[test_log::test]
    fn distance_to_itself_should_be_zero() {
        assert_eq!(distance_km(BERCY, BERCY), 0.0);
    }

    #[test_log::test]
    fn distance_should_be_symmetric() {
        assert_eq!(distance_km(BERCY, OLYMPIA), distance_km(OLYMPIA, BERCY));
    }

    #[test_log::test]
    fn distance_between_bercy_and_olympia_should_be_about_five_km() {
        let distance = distance_km(BERCY, OLYMPIA);

        assert!((5.0..5.3).contains(&distance), "{}", distance);
    }

    #[test_log::test]
    fn one_degree_of_longitude_on_the_equator_should_be_about_111_km() {
        let distance = distance_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));

        assert!((distance - 111.19).abs() < 0.01, "{}", distance);
    }

    #[test_log::test]
    fn distance_should_never_be_negative() {
        let distance = distance_km(Coordinates::new(-33.86, 151.2), Coordinates::new(48.85, 2.35));

        assert!(distance > 0.0);
    }
}
