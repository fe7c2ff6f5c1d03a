//! Coordinates and great-circle distance.

/// Earth's radius in miles used by the haversine formula.
pub const EARTH_RADIUS_MILES: f64 = 3956.0;

/// A latitude/longitude pair in decimal degrees.
///
/// Only constructible through [`Coordinate::new`], which rejects values
/// outside `[-90, 90]` x `[-180, 180]` and non-finite input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Returns `None` when either component is non-finite or out of range.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two coordinates in miles (haversine).
///
/// Full precision is returned; use [`round_tenth`] when surfacing the value.
#[must_use]
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `h` a hair above 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_MILES * c
}

/// Round a distance to one decimal place for display.
#[must_use]
pub fn round_tenth(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}
