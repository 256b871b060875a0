//! Submission moderation view
//!
//! Holds the search box, status filter, current page and the admin-notes
//! editor of the moderation screen. Changing the search or the status
//! filter sends the list back to page 1.

use super::ViewError;
use crate::models::{Page, Submission, SubmissionStatus};
use crate::services::{StatusCounts, SubmissionQuery, SubmissionService, SubmissionServiceError};
use std::sync::Arc;

/// Notes being edited for one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesDraft {
    pub submission_id: String,
    pub text: String,
}

/// Moderation screen state
pub struct SubmissionView {
    service: Arc<SubmissionService>,
    query: SubmissionQuery,
    notes: Option<NotesDraft>,
}

impl SubmissionView {
    pub fn new(service: Arc<SubmissionService>, page_size: usize) -> Self {
        Self {
            service,
            query: SubmissionQuery {
                page_size: page_size.max(1),
                ..SubmissionQuery::default()
            },
            notes: None,
        }
    }

    /// Current search, filter and page
    pub fn query(&self) -> &SubmissionQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.query.page
    }

    /// Change the search term; the list returns to page 1
    pub fn set_query(&mut self, search: &str) {
        if self.query.search != search {
            tracing::debug!(search, "Submission search changed");
        }
        self.query.search = search.to_string();
        self.query.page = 1;
    }

    /// Change the status filter; the list returns to page 1
    pub fn set_status_filter(&mut self, status: Option<SubmissionStatus>) {
        self.query.status = status;
        self.query.page = 1;
    }

    /// Jump to `page`; 0 is treated as 1
    pub fn set_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    /// The page currently on screen
    pub async fn current(&self) -> Result<Page<Submission>, ViewError> {
        Ok(self.service.view(&self.query).await?)
    }

    /// Advance one page if there is a next page; returns the page number
    pub async fn next_page(&mut self) -> Result<usize, ViewError> {
        if self.current().await?.has_next() {
            self.query.page += 1;
        }
        Ok(self.query.page)
    }

    /// Go back one page, stopping at page 1
    pub fn prev_page(&mut self) -> usize {
        self.query.page = self.query.page.saturating_sub(1).max(1);
        self.query.page
    }

    pub async fn counts(&self) -> Result<StatusCounts, ViewError> {
        Ok(self.service.counts().await?)
    }

    /// Approve, reject or re-queue a submission
    pub async fn set_status(&self, id: &str, status: SubmissionStatus) -> Result<Submission, ViewError> {
        Ok(self.service.set_status(id, status).await?)
    }

    pub fn notes_draft(&self) -> Option<&NotesDraft> {
        self.notes.as_ref()
    }

    /// Open the notes editor for `id`, pre-filled with its current notes
    ///
    /// Replaces any draft already open.
    pub async fn begin_notes(&mut self, id: &str) -> Result<&NotesDraft, ViewError> {
        let submission = self
            .service
            .get(id)
            .await?
            .ok_or_else(|| SubmissionServiceError::NotFound(id.to_string()))?;

        Ok(&*self.notes.insert(NotesDraft {
            submission_id: submission.id,
            text: submission.admin_notes,
        }))
    }

    /// Replace the draft text
    pub fn set_draft(&mut self, text: &str) -> Result<(), ViewError> {
        let draft = self.notes.as_mut().ok_or(ViewError::NothingToSave("note"))?;
        draft.text = text.to_string();
        Ok(())
    }

    /// Persist the draft and close the editor
    pub async fn save_notes(&mut self) -> Result<Submission, ViewError> {
        let draft = self.notes.take().ok_or(ViewError::NothingToSave("note"))?;
        match self.service.save_notes(&draft.submission_id, &draft.text).await {
            Ok(saved) => Ok(saved),
            Err(e) => {
                tracing::warn!(id = %draft.submission_id, error = %e, "Saving notes failed");
                Err(e.into())
            }
        }
    }

    /// Discard the draft
    pub fn cancel_notes(&mut self) {
        self.notes = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::db::repositories::InMemorySubmissionRepository;
    use crate::db::SeedData;

    fn seed_view() -> SubmissionView {
        let seed = SeedData::demo().expect("Failed to load demo seed");
        let repo = InMemorySubmissionRepository::boxed(seed.submissions);
        let service = Arc::new(SubmissionService::new(repo, Arc::new(MemoryCache::new())));
        SubmissionView::new(service, 10)
    }

    fn many_view(count: usize) -> SubmissionView {
        let ts = "2024-01-01T00:00:00Z".parse().unwrap();
        let rows = (1..=count)
            .map(|n| Submission {
                id: format!("sub_{}", n),
                name: format!("Person {}", n),
                email: format!("p{}@example.com", n),
                tool_name: if n % 2 == 0 { format!("Vision {}", n) } else { format!("Speech {}", n) },
                description: String::new(),
                api_link: String::new(),
                status: SubmissionStatus::Pending,
                admin_notes: String::new(),
                created_at: ts,
                updated_at: ts,
            })
            .collect();
        let repo = InMemorySubmissionRepository::boxed(rows);
        let service = Arc::new(SubmissionService::new(repo, Arc::new(MemoryCache::new())));
        SubmissionView::new(service, 10)
    }

    // ========================================================================
    // Page reset tests
    // ========================================================================

    #[tokio::test]
    async fn test_new_query_resets_page() {
        let mut view = many_view(25);
        view.set_page(2);
        assert_eq!(view.current().await.unwrap().items[0].id, "sub_11");

        view.set_query("vision");

        assert_eq!(view.page(), 1);
        let page = view.current().await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total, 12);
        assert_eq!(page.items[0].id, "sub_2");
    }

    #[tokio::test]
    async fn test_new_status_filter_resets_page() {
        let mut view = many_view(25);
        view.set_page(3);

        view.set_status_filter(Some(SubmissionStatus::Approved));

        assert_eq!(view.page(), 1);
        assert!(view.current().await.unwrap().is_empty());

        view.set_status_filter(None);
        assert_eq!(view.current().await.unwrap().items.len(), 10);
    }

    #[tokio::test]
    async fn test_page_navigation() {
        let mut view = many_view(25);

        assert_eq!(view.next_page().await.unwrap(), 2);
        assert_eq!(view.next_page().await.unwrap(), 3);
        // Last page, stays put
        assert_eq!(view.next_page().await.unwrap(), 3);
        assert_eq!(view.current().await.unwrap().items.len(), 5);

        assert_eq!(view.prev_page(), 2);
        assert_eq!(view.prev_page(), 1);
        assert_eq!(view.prev_page(), 1);

        view.set_page(0);
        assert_eq!(view.page(), 1);
    }

    // ========================================================================
    // Notes editor tests
    // ========================================================================

    #[tokio::test]
    async fn test_notes_save_flow() {
        let mut view = seed_view();

        let draft = view.begin_notes("sub_3").await.unwrap();
        assert_eq!(draft.text, "API documentation incomplete");

        view.set_draft("Docs added, approve next week").unwrap();
        let saved = view.save_notes().await.unwrap();

        assert_eq!(saved.admin_notes, "Docs added, approve next week");
        assert!(view.notes_draft().is_none());
        let page = view.current().await.unwrap();
        assert_eq!(page.items[2].admin_notes, "Docs added, approve next week");
    }

    #[tokio::test]
    async fn test_notes_cancel_discards() {
        let mut view = seed_view();
        view.begin_notes("sub_1").await.unwrap();
        view.set_draft("never saved").unwrap();

        view.cancel_notes();

        assert!(view.notes_draft().is_none());
        assert_eq!(view.current().await.unwrap().items[0].admin_notes, "");
    }

    #[tokio::test]
    async fn test_notes_without_draft() {
        let mut view = seed_view();

        assert!(matches!(view.set_draft("x"), Err(ViewError::NothingToSave(_))));
        assert!(matches!(view.save_notes().await, Err(ViewError::NothingToSave(_))));
    }

    #[tokio::test]
    async fn test_begin_notes_missing() {
        let mut view = seed_view();

        let result = view.begin_notes("sub_404").await;

        assert!(matches!(result, Err(ViewError::Submission(SubmissionServiceError::NotFound(_)))));
        assert!(view.notes_draft().is_none());
    }

    #[tokio::test]
    async fn test_status_change_updates_counts() {
        let view = seed_view();

        view.set_status("sub_1", SubmissionStatus::Rejected).await.unwrap();

        let counts = view.counts().await.unwrap();
        assert_eq!(counts, StatusCounts { pending: 0, approved: 1, rejected: 2 });
    }
}
