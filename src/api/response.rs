use serde::{Deserialize, Serialize};

use crate::{numerics::Coordinate, search::RankedResult};

/// Echo of the query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinate> for Origin {
    fn from(coordinate: Coordinate) -> Self {
        Origin {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }
}

/// Payload answering one nearest-location request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestResponse {
    pub origin: Origin,
    pub nearest: Vec<RankedResult>,
}

/// Payload describing a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
