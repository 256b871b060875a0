//! Services layer - Business logic
//!
//! This module contains the stores behind the admin screens.
//! Services are responsible for:
//! - Implementing the mutation rules of each collection
//! - Deriving filtered and paginated views
//! - Coordinating between repositories and cache

pub mod category;
pub mod slug;
pub mod submission;

pub use category::{filter_categories, CategoryService, CategoryServiceError, CategoryStats};
pub use slug::generate_slug;
pub use submission::{
    filter_submissions, StatusCounts, SubmissionQuery, SubmissionService, SubmissionServiceError,
};
