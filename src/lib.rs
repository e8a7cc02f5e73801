pub mod api;
pub mod catalog;
pub mod error;
pub mod fs;
pub mod numerics;
pub mod search;
pub mod sets;
pub mod statistics;

pub use error::{FinderError, Result};
