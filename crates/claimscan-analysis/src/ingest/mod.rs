//! Raw-input ingestion: CSV loading, column normalization, alias
//! resolution, value coercion, and the cleaning profile.
//!
//! Everything here runs before detection; the detector never sees aliases
//! or raw money strings.

pub mod cleaner;
pub mod coerce;
pub mod columns;
pub mod profile;
pub mod reader;

pub use cleaner::{CleaningOutcome, TableCleaner};
pub use profile::CleaningProfile;
pub use reader::{infer_numeric_columns, parse_csv, read_csv};
