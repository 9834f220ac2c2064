//! Diff layer
//! - types.rs: Change records (PackageVersionEvent, PackageChange, ProjectChange)
//! - requirement.rs: Exact pin extraction from requirements lines
//! - parser.rs: DiffParser turning a diff into package changes

pub mod parser;
pub mod requirement;
pub mod types;

pub use parser::DiffParser;
pub use requirement::PinnedRequirement;
pub use types::{ChangeType, PackageChange, PackageVersionEvent, ProjectChange};
