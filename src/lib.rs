//! API directory admin - category management and submission moderation
//!
//! This library provides the stores, derived views and console behind the
//! directory's admin screens.

pub mod cache;
pub mod config;
pub mod console;
pub mod db;
pub mod models;
pub mod services;
pub mod views;
