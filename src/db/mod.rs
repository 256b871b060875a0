//! Storage layer
//!
//! Categories and submissions live behind repository traits so the stores
//! never depend on where records are kept. The bundled implementations are
//! in-memory and start from seed data.
//!
//! # Usage
//!
//! ```ignore
//! use apidir_admin::db::{seed::SeedData, repositories::InMemoryCategoryRepository};
//!
//! let seed = SeedData::load(None)?;
//! let repo = InMemoryCategoryRepository::boxed(seed.categories);
//! ```

pub mod repositories;
pub mod seed;

pub use seed::SeedData;
