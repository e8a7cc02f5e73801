//! The catalog of known locations.
//!
//! Records are loaded once, validated, and handed to each request as an
//! immutable snapshot. The store can be refreshed with an update-or-create
//! pass keyed by external id without disturbing snapshots already handed out.

mod record;
mod store;
mod synthetic;

pub use record::*;
pub use store::*;
pub use synthetic::*;
