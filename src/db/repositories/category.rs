//! Category repository
//!
//! Storage operations for categories.
//!
//! This module provides:
//! - `CategoryRepository` trait defining the interface for category data access
//! - `InMemoryCategoryRepository` keeping categories in insertion order

use crate::models::Category;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Category repository trait
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories in insertion order
    async fn list(&self) -> Result<Vec<Category>>;

    /// Get category by ID
    async fn get(&self, id: &str) -> Result<Option<Category>>;

    /// Append a new category
    async fn insert(&self, category: &Category) -> Result<Category>;

    /// Replace the stored category with the same ID.
    /// Returns `false` when no category matched.
    async fn update(&self, category: &Category) -> Result<bool>;

    /// Delete a category. Returns `false` when no category matched.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// In-memory category repository
///
/// Position in the backing vector is the display order.
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    rows: RwLock<Vec<Category>>,
}

impl InMemoryCategoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-filled with the given categories
    pub fn with_rows(rows: Vec<Category>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(rows: Vec<Category>) -> Arc<dyn CategoryRepository> {
        Arc::new(Self::with_rows(rows))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.rows.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Category>> {
        Ok(self.rows.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, category: &Category) -> Result<Category> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|c| c.id == category.id) {
            anyhow::bail!("Category with ID {} already exists", category.id);
        }
        rows.push(category.clone());
        Ok(category.clone())
    }

    async fn update(&self, category: &Category) -> Result<bool> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|c| c.id == category.id) {
            Some(row) => {
                *row = category.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(label: &str, slug: &str) -> Category {
        Category::new(label.to_string(), slug.to_string())
    }

    #[tokio::test]
    async fn test_insert_preserves_order() {
        let repo = InMemoryCategoryRepository::new();
        let a = repo.insert(&category("A", "a")).await.unwrap();
        let b = repo.insert(&category("B", "b")).await.unwrap();
        let c = repo.insert(&category("C", "c")).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn test_insert_duplicate_id_fails() {
        let repo = InMemoryCategoryRepository::new();
        let a = category("A", "a");
        repo.insert(&a).await.unwrap();

        assert!(repo.insert(&a).await.is_err());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get() {
        let a = category("A", "a");
        let repo = InMemoryCategoryRepository::with_rows(vec![a.clone()]);

        assert_eq!(repo.get(&a.id).await.unwrap(), Some(a));
        assert_eq!(repo.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_in_place() {
        let a = category("A", "a");
        let b = category("B", "b");
        let repo = InMemoryCategoryRepository::with_rows(vec![a.clone(), b.clone()]);

        let mut changed = a.clone();
        changed.label = "A2".to_string();
        assert!(repo.update(&changed).await.unwrap());

        let rows = repo.list().await.unwrap();
        assert_eq!(rows[0].label, "A2");
        assert_eq!(rows[1], b);
    }

    #[tokio::test]
    async fn test_update_missing_returns_false() {
        let a = category("A", "a");
        let repo = InMemoryCategoryRepository::with_rows(vec![a.clone()]);

        assert!(!repo.update(&category("X", "x")).await.unwrap());
        assert_eq!(repo.list().await.unwrap(), vec![a]);
    }

    #[tokio::test]
    async fn test_delete() {
        let a = category("A", "a");
        let repo = InMemoryCategoryRepository::with_rows(vec![a.clone()]);

        assert!(!repo.delete("missing").await.unwrap());
        assert!(repo.delete(&a.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }
}
