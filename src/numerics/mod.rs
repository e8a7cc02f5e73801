//! Spherical geometry used to weight the location graph.
//!
//! This module provides the great-circle (haversine) distance between two
//! coordinates on a sphere of fixed radius, plus the rounding applied to
//! distances before they are reported.

mod coordinate;
mod haversine;

pub use coordinate::Coordinate;
pub use haversine::{EARTH_RADIUS_KM, GreatCircle, distance, round_km};
