//! Entity services over the safe SQL builder.

mod company;
mod crud;
mod job;
pub mod validation;
pub use company::CompanyService;
pub use job::JobService;
pub use validation::RequestValidator;
