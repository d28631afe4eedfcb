//! Tabular data model for claimscan.
//! A column-named, row-major table of loosely typed cells.

pub mod collections;
pub mod table;
pub mod value;

pub use collections::{FxHashMap, FxHashSet};
pub use table::RecordTable;
pub use value::Value;
