//! Safe SQL building: identifiers from static descriptors only, values as parameters.

mod builder;
mod field;
mod filter;
pub mod params;
mod placeholder;
mod update;

pub use builder::*;
pub use field::*;
pub use filter::*;
pub use params::*;
pub use placeholder::*;
pub use update::*;

/// Quote identifier for PostgreSQL.
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
