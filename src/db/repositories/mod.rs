//! Repositories
//!
//! Repository pattern implementations for data access.
//! Each repository handles list/get/insert/update/delete for a specific entity.

pub mod category;
pub mod submission;

pub use category::{CategoryRepository, InMemoryCategoryRepository};
pub use submission::{InMemorySubmissionRepository, SubmissionRepository};
