use std::{cmp::Ordering, hash::Hash, hash::Hasher};

/// A wrapper around f64 that provides total ordering and proper equality semantics.
///
/// Standard f64 does not implement `Ord` or `Eq` due to NaN values and signed zeros.
/// This wrapper uses bit-level comparison to ensure that any floating-point numbers are
/// compared using a total order, including NaN values and signed zeros.
///
/// This enables distances to be used in heaps and sorted collections.
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct TotalF64(pub f64);

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for TotalF64 {
    fn from(x: f64) -> Self {
        TotalF64(x)
    }
}

impl Hash for TotalF64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}
