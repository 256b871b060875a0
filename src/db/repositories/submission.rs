//! Submission repository
//!
//! Storage operations for submissions. Submissions are seeded at startup;
//! `insert` and `delete` exist so the storage interface matches the other
//! repositories and a database-backed implementation can be swapped in.

use crate::models::Submission;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Submission repository trait
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// List all submissions in insertion order
    async fn list(&self) -> Result<Vec<Submission>>;

    /// Get submission by ID
    async fn get(&self, id: &str) -> Result<Option<Submission>>;

    /// Append a new submission
    async fn insert(&self, submission: &Submission) -> Result<Submission>;

    /// Replace the stored submission with the same ID.
    /// Returns `false` when no submission matched.
    async fn update(&self, submission: &Submission) -> Result<bool>;

    /// Delete a submission. Returns `false` when no submission matched.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// In-memory submission repository
#[derive(Default)]
pub struct InMemorySubmissionRepository {
    rows: RwLock<Vec<Submission>>,
}

impl InMemorySubmissionRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-filled with the given submissions
    pub fn with_rows(rows: Vec<Submission>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(rows: Vec<Submission>) -> Arc<dyn SubmissionRepository> {
        Arc::new(Self::with_rows(rows))
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn list(&self) -> Result<Vec<Submission>> {
        Ok(self.rows.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Submission>> {
        Ok(self.rows.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, submission: &Submission) -> Result<Submission> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|s| s.id == submission.id) {
            anyhow::bail!("Submission with ID {} already exists", submission.id);
        }
        rows.push(submission.clone());
        Ok(submission.clone())
    }

    async fn update(&self, submission: &Submission) -> Result<bool> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|s| s.id == submission.id) {
            Some(row) => {
                *row = submission.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() != before)
    }
}
