//! Request extractors.

mod admin;
pub use admin::AdminGuard;
