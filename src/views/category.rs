//! Category management view
//!
//! Holds the search box and the add/edit editor of the category screen.
//! The editor's form is a plain value; `submit` validates it and hands the
//! result to the category store.

use super::ViewError;
use crate::models::Category;
use crate::services::{generate_slug, CategoryService, CategoryServiceError, CategoryStats};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Form validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Category name is required")]
    LabelRequired,

    #[error("Slug is required and could not be derived from the category name")]
    SlugRequired,
}

/// Add/edit form state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryForm {
    pub label: String,
    pub slug: String,
}

/// A form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCategoryForm {
    pub label: String,
    pub slug: String,
}

impl CategoryForm {
    /// Form pre-filled from an existing category
    pub fn from_category(category: &Category) -> Self {
        Self {
            label: category.label.clone(),
            slug: category.slug.clone(),
        }
    }

    /// Typing in the name field also rewrites the slug field
    pub fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
        self.slug = generate_slug(label);
    }

    /// Slug input is normalized as it is typed
    pub fn set_slug(&mut self, slug: &str) {
        self.slug = generate_slug(slug);
    }

    /// Check required fields
    ///
    /// The label is trimmed and must not be blank. A blank slug falls back to
    /// one derived from the label; if that is empty too the form is rejected.
    pub fn validate(&self) -> Result<ValidCategoryForm, FormError> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(FormError::LabelRequired);
        }

        let slug = match self.slug.trim() {
            "" => generate_slug(label),
            slug => slug.to_string(),
        };
        if slug.is_empty() {
            return Err(FormError::SlugRequired);
        }

        Ok(ValidCategoryForm {
            label: label.to_string(),
            slug,
        })
    }
}

/// Which record the open editor targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryEditor {
    Add,
    Edit(String),
}

/// Category screen state
pub struct CategoryView {
    service: Arc<CategoryService>,
    query: String,
    editor: Option<(CategoryEditor, CategoryForm)>,
}

impl CategoryView {
    pub fn new(service: Arc<CategoryService>) -> Self {
        Self {
            service,
            query: String::new(),
            editor: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Categories matching the current search
    pub async fn rows(&self) -> Result<Vec<Category>, ViewError> {
        Ok(self.service.filter(&self.query).await?)
    }

    pub async fn stats(&self) -> Result<CategoryStats, ViewError> {
        Ok(self.service.stats().await?)
    }

    /// The open editor, if any
    pub fn editor(&self) -> Option<&CategoryEditor> {
        self.editor.as_ref().map(|(editor, _)| editor)
    }

    /// Mutable access to the open editor's form
    pub fn form_mut(&mut self) -> Option<&mut CategoryForm> {
        self.editor.as_mut().map(|(_, form)| form)
    }

    /// Open an empty add form
    pub fn begin_add(&mut self) {
        self.editor = Some((CategoryEditor::Add, CategoryForm::default()));
    }

    /// Open the edit form pre-filled from category `id`
    pub async fn begin_edit(&mut self, id: &str) -> Result<(), ViewError> {
        let category = self
            .service
            .get(id)
            .await?
            .ok_or_else(|| CategoryServiceError::NotFound(id.to_string()))?;
        self.editor = Some((
            CategoryEditor::Edit(category.id.clone()),
            CategoryForm::from_category(&category),
        ));
        Ok(())
    }

    /// Close the editor without saving
    pub fn cancel(&mut self) {
        self.editor = None;
    }

    /// Validate the open form and save it
    ///
    /// On success the editor is closed. On a validation error the editor
    /// stays open so the form can be corrected.
    pub async fn submit(&mut self) -> Result<Category, ViewError> {
        let (editor, form) = self.editor.as_ref().ok_or(ViewError::NothingToSave("category"))?;
        let valid = form.validate()?;

        let saved = match editor {
            CategoryEditor::Add => self.service.add(&valid.label, Some(&valid.slug)).await,
            CategoryEditor::Edit(id) => self.service.update(id, &valid.label, Some(&valid.slug)).await,
        };

        match saved {
            Ok(category) => {
                self.editor = None;
                Ok(category)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Category save failed");
                // A vanished record cannot be saved; close the editor like cancel
                self.editor = None;
                Err(e.into())
            }
        }
    }

    /// Delete a category; `false` when it did not exist
    pub async fn delete(&mut self, id: &str) -> Result<bool, ViewError> {
        Ok(self.service.delete(id).await?)
    }
}
