use crate::numerics::Coordinate;

/// Mean Earth radius used for every distance, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// # Contract
///
/// - `haversine_km(a, a) == 0`
/// - `haversine_km(a, b) == haversine_km(b, a)`
/// - the result is never negative, and never NaN for finite inputs.
pub trait GreatCircle {
    fn haversine_km(&self, othr: &Self) -> f64;
}

impl GreatCircle for Coordinate {
    #[inline]
    fn haversine_km(&self, othr: &Coordinate) -> f64 {
        distance(self.latitude, self.longitude, othr.latitude, othr.longitude)
    }
}

/// # Usage
/// Computes the haversine distance, in kilometers, between two points given
/// in decimal degrees:
///
/// ```text
/// a = sin²(Δφ/2) + cos(φ1)·cos(φ2)·sin²(Δλ/2)
/// c = 2·atan2(√a, √(1-a))
/// d = R·c
/// ```
///
/// `a` is mathematically within [0, 1]; rounding can push it a hair outside,
/// so it is clamped before the square roots.
#[inline]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let half_dphi = (lat2 - lat1).to_radians() / 2.0;
    let half_dlambda = (lon2 - lon1).to_radians() / 2.0;

    let a = half_dphi.sin().powi(2) + phi1.cos() * phi2.cos() * half_dlambda.sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Rounds a distance to 4 decimal places, halves away from zero.
#[inline]
pub fn round_km(km: f64) -> f64 {
    (km * 10_000.0).round() / 10_000.0
}
