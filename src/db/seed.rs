//! Seed data
//!
//! The admin screens start from a fixed demo dataset. It is embedded in the
//! binary as YAML; a different file can be supplied through `seed.path` in
//! the configuration.

use crate::models::{Category, Submission};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Demo dataset shipped with the binary
const DEFAULT_SEED: &str = include_str!("seed.yml");

/// Initial contents of both stores
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

impl SeedData {
    /// The embedded demo dataset
    pub fn demo() -> Result<Self> {
        Self::parse(DEFAULT_SEED).context("Embedded seed data is invalid")
    }

    /// Load seed data from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to load seed file '{}'", path.display()))
    }

    /// Load from `path` when given, otherwise the embedded demo dataset
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let seed = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::demo()?,
        };
        tracing::debug!(
            categories = seed.categories.len(),
            submissions = seed.submissions.len(),
            "Seed data loaded"
        );
        Ok(seed)
    }

    fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let seed: SeedData = serde_yaml::from_str(content).context("Failed to parse seed YAML")?;
        seed.check_unique_ids()?;
        Ok(seed)
    }

    fn check_unique_ids(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for id in self.categories.iter().map(|c| &c.id) {
            if !seen.insert(id) {
                anyhow::bail!("Duplicate category ID in seed data: {}", id);
            }
        }
        let mut seen = HashSet::new();
        for id in self.submissions.iter().map(|s| &s.id) {
            if !seen.insert(id) {
                anyhow::bail!("Duplicate submission ID in seed data: {}", id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubmissionStatus;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_demo_seed() {
        let seed = SeedData::demo().unwrap();

        assert_eq!(seed.categories.len(), 2);
        assert_eq!(seed.categories[0].id, "cat_1");
        assert_eq!(seed.categories[0].slug, "text-generation");
        assert_eq!(seed.categories[0].total_applications, 10);

        let statuses: Vec<SubmissionStatus> = seed.submissions.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![SubmissionStatus::Pending, SubmissionStatus::Approved, SubmissionStatus::Rejected]
        );
        assert_eq!(seed.submissions[1].admin_notes, "Great documentation and API design");
    }

    #[test]
    fn test_load_without_path_uses_demo() {
        let seed = SeedData::load(None).unwrap();
        assert_eq!(seed.submissions.len(), 3);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
categories:
  - id: cat_9
    label: Audio
    slug: audio
    created_at: "2024-02-01T00:00:00Z"
    updated_at: "2024-02-01T00:00:00Z"
"#
        )
        .unwrap();

        let seed = SeedData::load(Some(file.path())).unwrap();

        assert_eq!(seed.categories.len(), 1);
        assert_eq!(seed.categories[0].total_applications, 0);
        assert!(seed.submissions.is_empty());
    }

    #[test]
    fn test_empty_file_is_empty_seed() {
        let file = NamedTempFile::new().unwrap();
        let seed = SeedData::from_file(file.path()).unwrap();

        assert!(seed.categories.is_empty());
        assert!(seed.submissions.is_empty());
    }

    #[test]
    fn test_invalid_status_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
submissions:
  - id: sub_1
    name: A
    email: a@example.com
    tool_name: T
    description: D
    api_link: https://example.com
    status: spam
    created_at: "2024-02-01T00:00:00Z"
    updated_at: "2024-02-01T00:00:00Z"
"#
        )
        .unwrap();

        assert!(SeedData::from_file(file.path()).is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
categories:
  - {{ id: cat_1, label: A, slug: a, created_at: "2024-02-01T00:00:00Z", updated_at: "2024-02-01T00:00:00Z" }}
  - {{ id: cat_1, label: B, slug: b, created_at: "2024-02-01T00:00:00Z", updated_at: "2024-02-01T00:00:00Z" }}
"#
        )
        .unwrap();

        let err = SeedData::from_file(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Duplicate category ID"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(SeedData::from_file(Path::new("does/not/exist.yml")).is_err());
    }
}
