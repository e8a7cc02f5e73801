use serde::{Deserialize, Serialize};

use crate::{FinderError, Result, numerics::Coordinate};

/// One known location.
///
/// On disk the external identifier is stored under `id`; `external_id` is
/// accepted as well. Display fields may be omitted and default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedRecord {
    #[serde(rename = "id", alias = "external_id")]
    pub external_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocatedRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Checks that the record sits at a real place on the globe.
    pub fn validate(&self) -> Result<()> {
        let coordinate = self.coordinate();
        if !coordinate.is_finite() {
            return Err(FinderError::InvalidRecord {
                external_id: self.external_id,
                reason: format!(
                    "coordinates must be finite, got ({}, {})",
                    self.latitude, self.longitude
                ),
            });
        }
        if !coordinate.in_range() {
            return Err(FinderError::InvalidRecord {
                external_id: self.external_id,
                reason: format!(
                    "coordinates ({}, {}) are outside [-90, 90] x [-180, 180]",
                    self.latitude, self.longitude
                ),
            });
        }
        Ok(())
    }
}
