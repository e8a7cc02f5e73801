//! Request validation, the finder entry point and the response payload.
//!
//! Coordinates are checked here, before any ranking work starts; the search
//! core only ever sees finite numbers.

mod finder;
mod request;
mod response;

pub use finder::*;
pub use request::*;
pub use response::*;
