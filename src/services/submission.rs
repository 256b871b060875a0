//! Submission service
//!
//! Moderation logic for submitted APIs:
//! - Status transitions (pending / approved / rejected)
//! - Admin notes
//! - Search + status filter + pagination, memoized per view key

use crate::cache::{CacheLayer, MemoryCache};
use crate::db::repositories::SubmissionRepository;
use crate::models::{paginate, Page, Submission, SubmissionStatus, DEFAULT_PAGE_SIZE};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cache key prefixes
const CACHE_KEY_SUBMISSION_VIEW: &str = "submissions:view:";
const CACHE_PATTERN_SUBMISSIONS: &str = "submissions:*";

/// Error types for submission service operations
#[derive(Debug, thiserror::Error)]
pub enum SubmissionServiceError {
    /// Submission not found
    #[error("Submission not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Inputs that produce one page of the moderation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionQuery {
    /// Search over tool name and submitter name; empty means no constraint
    pub search: String,
    /// Status filter; `None` means every status
    pub status: Option<SubmissionStatus>,
    /// Page number (1-indexed)
    pub page: usize,
    /// Items per page
    pub page_size: usize,
}

impl Default for SubmissionQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SubmissionQuery {
    /// Memoization key for the derived page
    fn cache_key(&self) -> String {
        let status = self.status.map(|s| s.to_string()).unwrap_or_else(|| "all".to_string());
        format!(
            "{}{}:{}:{}:{}",
            CACHE_KEY_SUBMISSION_VIEW,
            status,
            self.page,
            self.page_size,
            self.search.to_lowercase()
        )
    }
}

/// Number of submissions in each status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected
    }
}

/// Submission service for the moderation screen
pub struct SubmissionService {
    repo: Arc<dyn SubmissionRepository>,
    cache: Arc<MemoryCache>,
}

impl SubmissionService {
    /// Create a new submission service
    pub fn new(repo: Arc<dyn SubmissionRepository>, cache: Arc<MemoryCache>) -> Self {
        Self { repo, cache }
    }

    /// Get submission by ID
    pub async fn get(&self, id: &str) -> Result<Option<Submission>, SubmissionServiceError> {
        self.repo.get(id).await.context("Failed to get submission").map_err(Into::into)
    }

    /// List all submissions in display order
    pub async fn list(&self) -> Result<Vec<Submission>, SubmissionServiceError> {
        self.repo.list().await.context("Failed to list submissions").map_err(Into::into)
    }

    /// Move a submission to `status`, refreshing `updated_at`
    ///
    /// A missing submission leaves the collection untouched and returns `NotFound`.
    pub async fn set_status(
        &self,
        id: &str,
        status: SubmissionStatus,
    ) -> Result<Submission, SubmissionServiceError> {
        let updated = self.modify(id, |s| s.set_status(status)).await?;
        tracing::info!(id, %status, "Submission status changed");
        Ok(updated)
    }

    /// Replace the admin notes of a submission, refreshing `updated_at`
    ///
    /// A missing submission leaves the collection untouched and returns `NotFound`.
    pub async fn save_notes(&self, id: &str, notes: &str) -> Result<Submission, SubmissionServiceError> {
        let updated = self.modify(id, |s| s.set_notes(notes.to_string())).await?;
        tracing::info!(id, chars = notes.chars().count(), "Submission notes saved");
        Ok(updated)
    }

    /// Submissions matching both the search term and the status filter
    pub async fn filter(
        &self,
        search: &str,
        status: Option<SubmissionStatus>,
    ) -> Result<Vec<Submission>, SubmissionServiceError> {
        Ok(filter_submissions(&self.list().await?, search, status))
    }

    /// One page of the filtered list
    ///
    /// Results are memoized by (search, status, page, page_size) until the
    /// next mutation.
    pub async fn view(&self, query: &SubmissionQuery) -> Result<Page<Submission>, SubmissionServiceError> {
        let cache_key = query.cache_key();
        if let Some(hit) = self.cache.get::<Page<Submission>>(&cache_key).await.ok().flatten() {
            tracing::debug!(key = %cache_key, "Submission view served from cache");
            return Ok(hit);
        }

        let filtered = self.filter(&query.search, query.status).await?;
        let page = paginate(&filtered, query.page, query.page_size);

        let _ = self.cache.set(&cache_key, &page).await;
        Ok(page)
    }

    /// Number of submissions per status
    pub async fn counts(&self) -> Result<StatusCounts, SubmissionServiceError> {
        let mut counts = StatusCounts::default();
        for submission in self.list().await? {
            match submission.status {
                SubmissionStatus::Pending => counts.pending += 1,
                SubmissionStatus::Approved => counts.approved += 1,
                SubmissionStatus::Rejected => counts.rejected += 1,
            }
        }
        Ok(counts)
    }

    /// Load, mutate and store one submission
    async fn modify<F>(&self, id: &str, change: F) -> Result<Submission, SubmissionServiceError>
    where
        F: FnOnce(&mut Submission),
    {
        let mut submission = self
            .repo
            .get(id)
            .await
            .context("Failed to get submission")?
            .ok_or_else(|| SubmissionServiceError::NotFound(id.to_string()))?;

        change(&mut submission);

        if !self.repo.update(&submission).await.context("Failed to update submission")? {
            return Err(SubmissionServiceError::NotFound(id.to_string()));
        }
        self.invalidate_cache().await?;
        Ok(submission)
    }

    async fn invalidate_cache(&self) -> Result<(), SubmissionServiceError> {
        self.cache
            .delete_pattern(CACHE_PATTERN_SUBMISSIONS)
            .await
            .context("Failed to invalidate submission cache")?;
        Ok(())
    }
}

/// Ordered subsequence of `submissions` passing the search and status predicates
pub fn filter_submissions(
    submissions: &[Submission],
    search: &str,
    status: Option<SubmissionStatus>,
) -> Vec<Submission> {
    submissions
        .iter()
        .filter(|s| s.matches(search))
        .filter(|s| status.map_or(true, |status| s.status == status))
        .cloned()
        .collect()
}
