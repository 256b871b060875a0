//! Slug generation
//!
//! Turns a free-text label into a URL-safe identifier made of lowercase
//! ASCII letters, digits and single interior hyphens.

/// Generate a URL-friendly slug from a label
///
/// Lower-cases the label, replaces every run of characters outside
/// `[a-z0-9]` with a single hyphen, and strips hyphens from both ends.
/// The function is total and idempotent.
pub fn generate_slug(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            // Only emit a separator between two kept characters
            if pending_hyphen && !result.is_empty() {
                result.push('-');
            }
            pending_hyphen = false;
            result.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    result
}
