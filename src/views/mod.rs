//! View controllers
//!
//! Each admin screen owns a view that holds its presentation state (search
//! inputs, current page, open editors) and turns user actions into store
//! calls. Rendering is left to the caller; views only expose the derived
//! data a screen would display.

pub mod category;
pub mod submission;

pub use category::{CategoryEditor, CategoryForm, CategoryView, FormError};
pub use submission::{NotesDraft, SubmissionView};

use crate::services::{CategoryServiceError, SubmissionServiceError};

/// Error types for view actions
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The submitted form failed validation
    #[error(transparent)]
    Form(#[from] FormError),

    /// An editor action was attempted with no editor open
    #[error("No {0} is being edited")]
    NothingToSave(&'static str),

    #[error(transparent)]
    Category(#[from] CategoryServiceError),

    #[error(transparent)]
    Submission(#[from] SubmissionServiceError),
}
