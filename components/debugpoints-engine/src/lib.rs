//! The decision core: ignore-pattern matching, breakpoint scope
//! resolution, and the composable bulk-action engine.

pub mod bulk;
pub mod ignore;
pub mod scope;

pub use bulk::{BulkAction, Category, Operation, Scope};
