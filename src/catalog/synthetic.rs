use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

use crate::{catalog::LocatedRecord, numerics::Coordinate};

/// Kilometers per degree of latitude on the reference sphere.
const KM_PER_DEGREE: f64 = 111.194_926_644_558_73;

/// Generates `n` records scattered around `center`, for load testing.
///
/// Offsets are drawn from a normal distribution with a standard deviation of
/// `spread_km` in each of the north and east directions. The same seed always
/// yields the same catalog. Ids run from 1 to `n`.
pub fn synthetic_catalog(n: usize, center: Coordinate, spread_km: f64, seed: u64) -> Vec<LocatedRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let lon_scale = KM_PER_DEGREE * center.latitude.to_radians().cos().max(1e-6);

    (1..=n)
        .map(|i| {
            let north: f64 = rng.sample(StandardNormal);
            let east: f64 = rng.sample(StandardNormal);

            let latitude = (center.latitude + north * spread_km / KM_PER_DEGREE).clamp(-90.0, 90.0);
            let longitude = wrap_longitude(center.longitude + east * spread_km / lon_scale);

            LocatedRecord {
                external_id: i as i64,
                name: format!("Synthetic Center {i}"),
                address: format!("Grid cell {i}"),
                phone: format!("9000{i:06}"),
                latitude,
                longitude,
            }
        })
        .collect()
}

fn wrap_longitude(longitude: f64) -> f64 {
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && longitude > 0.0 {
        180.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::GreatCircle;

    #[test]
    fn same_seed_same_catalog() {
        let center = Coordinate::new(13.0827, 80.2707);
        assert_eq!(
            synthetic_catalog(50, center, 10.0, 7),
            synthetic_catalog(50, center, 10.0, 7)
        );
        assert_ne!(
            synthetic_catalog(50, center, 10.0, 7),
            synthetic_catalog(50, center, 10.0, 8)
        );
    }

    #[test]
    fn records_are_valid_and_near_center() {
        let center = Coordinate::new(13.0827, 80.2707);
        let records = synthetic_catalog(500, center, 5.0, 42);

        assert_eq!(records.len(), 500);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.external_id, i as i64 + 1);
            record.validate().unwrap();
            // six sigma in both axes is well under 50 km
            assert!(record.coordinate().haversine_km(&center) < 50.0);
        }
    }

    #[test]
    fn longitude_wraps_around_antimeridian() {
        assert_eq!(wrap_longitude(181.0), -179.0);
        assert_eq!(wrap_longitude(-181.0), 179.0);
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(10.0), 10.0);
    }

    #[test]
    fn polar_center_stays_valid() {
        let records = synthetic_catalog(100, Coordinate::new(89.99, 179.9), 50.0, 3);
        for record in &records {
            record.validate().unwrap();
        }
    }
}
