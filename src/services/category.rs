//! Category service
//!
//! Implements business logic for category management:
//! - Create, read, update, delete categories
//! - Slug derivation from the label when no slug is given
//! - Case-insensitive label search, memoized per query

use crate::cache::{CacheLayer, MemoryCache};
use crate::db::repositories::CategoryRepository;
use crate::models::Category;
use crate::services::slug::generate_slug;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cache key prefixes
const CACHE_KEY_CATEGORY_FILTER: &str = "categories:filter:";
const CACHE_PATTERN_CATEGORIES: &str = "categories:*";

/// Error types for category service operations
#[derive(Debug, thiserror::Error)]
pub enum CategoryServiceError {
    /// Category not found
    #[error("Category not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Summary counters shown above the category list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub categories: usize,
    pub applications: u64,
}

/// Category service for managing directory categories
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
    cache: Arc<MemoryCache>,
}

impl CategoryService {
    /// Create a new category service
    pub fn new(repo: Arc<dyn CategoryRepository>, cache: Arc<MemoryCache>) -> Self {
        Self { repo, cache }
    }

    /// Create a new category
    ///
    /// A blank `slug` is replaced by `generate_slug(label)`. The new category
    /// starts with zero applications and is appended after existing ones.
    pub async fn add(&self, label: &str, slug: Option<&str>) -> Result<Category, CategoryServiceError> {
        let category = Category::new(label.to_string(), resolve_slug(label, slug));

        let created = self.repo.insert(&category).await.context("Failed to create category")?;
        self.invalidate_cache().await?;

        tracing::info!(id = %created.id, slug = %created.slug, "Category created");
        Ok(created)
    }

    /// Update a category's label and slug
    ///
    /// `id`, `total_applications` and `created_at` are kept; `updated_at` is
    /// refreshed. A missing category leaves the collection untouched and
    /// returns `NotFound`.
    pub async fn update(
        &self,
        id: &str,
        label: &str,
        slug: Option<&str>,
    ) -> Result<Category, CategoryServiceError> {
        let mut category = self
            .repo
            .get(id)
            .await
            .context("Failed to get category")?
            .ok_or_else(|| CategoryServiceError::NotFound(id.to_string()))?;

        category.rename(label.to_string(), resolve_slug(label, slug));

        if !self.repo.update(&category).await.context("Failed to update category")? {
            return Err(CategoryServiceError::NotFound(id.to_string()));
        }
        self.invalidate_cache().await?;

        tracing::info!(id = %category.id, slug = %category.slug, "Category updated");
        Ok(category)
    }

    /// Delete a category
    ///
    /// Returns `false` if no category had this ID.
    pub async fn delete(&self, id: &str) -> Result<bool, CategoryServiceError> {
        let removed = self.repo.delete(id).await.context("Failed to delete category")?;
        if removed {
            self.invalidate_cache().await?;
            tracing::info!(id, "Category deleted");
        } else {
            tracing::debug!(id, "Delete ignored, category not found");
        }
        Ok(removed)
    }

    /// Get category by ID
    pub async fn get(&self, id: &str) -> Result<Option<Category>, CategoryServiceError> {
        self.repo.get(id).await.context("Failed to get category").map_err(Into::into)
    }

    /// List all categories in display order
    pub async fn list(&self) -> Result<Vec<Category>, CategoryServiceError> {
        self.repo.list().await.context("Failed to list categories").map_err(Into::into)
    }

    /// Categories whose label contains `query`, case-insensitively
    ///
    /// An empty query returns every category. Order is preserved.
    pub async fn filter(&self, query: &str) -> Result<Vec<Category>, CategoryServiceError> {
        let cache_key = format!("{}{}", CACHE_KEY_CATEGORY_FILTER, query.to_lowercase());
        if let Some(hit) = self.cache.get::<Vec<Category>>(&cache_key).await.ok().flatten() {
            return Ok(hit);
        }

        let filtered = filter_categories(&self.list().await?, query);

        let _ = self.cache.set(&cache_key, &filtered).await;
        Ok(filtered)
    }

    /// Category count and total number of applications across categories
    pub async fn stats(&self) -> Result<CategoryStats, CategoryServiceError> {
        let categories = self.list().await?;
        Ok(CategoryStats {
            categories: categories.len(),
            applications: categories.iter().map(|c| u64::from(c.total_applications)).sum(),
        })
    }

    async fn invalidate_cache(&self) -> Result<(), CategoryServiceError> {
        self.cache
            .delete_pattern(CACHE_PATTERN_CATEGORIES)
            .await
            .context("Failed to invalidate category cache")?;
        Ok(())
    }
}

/// Ordered subsequence of `categories` matching `query`
pub fn filter_categories(categories: &[Category], query: &str) -> Vec<Category> {
    categories.iter().filter(|c| c.matches(query)).cloned().collect()
}

/// The explicit slug when non-blank, otherwise one derived from the label
fn resolve_slug(label: &str, slug: Option<&str>) -> String {
    match slug.map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => generate_slug(label),
    }
}
