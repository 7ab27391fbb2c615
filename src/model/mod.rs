//! Row types, field identifiers and table descriptors for each entity.

pub mod company;
pub mod job;

pub use company::*;
pub use job::*;
