//! Category model
//!
//! This module defines the Category entity managed from the category admin screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix used for generated category identifiers
const CATEGORY_ID_PREFIX: &str = "cat_";

/// Category entity grouping applications listed in the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique identifier, immutable after creation
    pub id: String,
    /// Display label
    pub label: String,
    /// URL-friendly slug
    pub slug: String,
    /// Number of applications filed under this category
    #[serde(default)]
    pub total_applications: u32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new Category with a freshly generated identifier.
    ///
    /// Both timestamps are set to the current time and the application
    /// counter starts at zero.
    pub fn new(label: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: generate_category_id(),
            label,
            slug,
            total_applications: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite label and slug, refreshing `updated_at`
    pub fn rename(&mut self, label: String, slug: String) {
        self.label = label;
        self.slug = slug;
        self.touch();
    }

    /// Refresh the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Case-insensitive substring match against the label.
    ///
    /// An empty query matches every category.
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.label.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Generate a unique category identifier
fn generate_category_id() -> String {
    format!("{}{}", CATEGORY_ID_PREFIX, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_new() {
        let category = Category::new("Text Generation".to_string(), "text-generation".to_string());

        assert!(category.id.starts_with("cat_"));
        assert_eq!(category.label, "Text Generation");
        assert_eq!(category.slug, "text-generation");
        assert_eq!(category.total_applications, 0);
        assert_eq!(category.created_at, category.updated_at);
    }

    #[test]
    fn test_category_ids_are_unique() {
        let a = Category::new("A".to_string(), "a".to_string());
        let b = Category::new("A".to_string(), "a".to_string());

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_category_rename_refreshes_updated_at() {
        let mut category = Category::new("Old".to_string(), "old".to_string());
        category.updated_at = "2024-01-01T00:00:00Z".parse().unwrap();
        category.created_at = category.updated_at;

        category.rename("New".to_string(), "new".to_string());

        assert_eq!(category.label, "New");
        assert_eq!(category.slug, "new");
        assert!(category.updated_at > category.created_at);
    }

    #[test]
    fn test_category_matches_case_insensitive() {
        let category = Category::new("Image Generation".to_string(), "image-generation".to_string());

        assert!(category.matches(""));
        assert!(category.matches("image"));
        assert!(category.matches("GENERATION"));
        assert!(category.matches("ge Gen"));
        assert!(!category.matches("text"));
    }
}
