//! The breakpoint record model: classification of raw host breakpoints
//! into the categories the bulk-action engine and the event interpreter
//! operate on.

mod paths;
mod record;

pub use paths::{normalize_path, relative_to_root};
pub use record::{BreakpointRecord, ONE_TIME_CONDITION};
