//! Data models
//!
//! This module contains the data structures shared by the admin screens:
//! - Entities (Category, Submission)
//! - Pagination containers for derived views

mod category;
mod pagination;
mod submission;

pub use category::Category;
pub use pagination::{paginate, total_pages, Page, DEFAULT_PAGE_SIZE};
pub use submission::{Submission, SubmissionStatus};
