//! Graph query resolution
//!
//! The selection-tree types and the executor that materializes them against
//! the schema registry and store.

pub mod executor;
pub mod selection;

pub use executor::{Executor, FieldError, PathSegment, QueryResponse};
pub use selection::{Arguments, FieldSelection, SelectionSet};
