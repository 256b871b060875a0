//! Admin console
//!
//! Line-oriented front end for the two admin screens. Each input line is one
//! command; `execute` returns the text to print. Errors are reported as
//! output text and never end the session; only `quit` does.
//!
//! Commands:
//!   help
//!   categories [query]
//!   category add <label> [--slug <slug>]
//!   category edit <id> <label> [--slug <slug>]
//!   category delete <id>
//!   submissions
//!   submissions search [query]
//!   submissions status <pending|approved|rejected|all>
//!   submissions page <n>
//!   submission <approve|reject|pending> <id>
//!   submission notes <id> <text>
//!   quit

use crate::models::{Category, Page, Submission, SubmissionStatus};
use crate::views::{CategoryView, SubmissionView, ViewError};
use std::fmt::Write;

const HELP: &str = "\
Commands:
  categories [query]                          List categories, optionally filtered by name
  category add <label> [--slug <slug>]        Add a category
  category edit <id> <label> [--slug <slug>]  Rename a category
  category delete <id>                        Delete a category
  submissions                                 Show the current page of submissions
  submissions search [query]                  Search by tool or submitter name
  submissions status <pending|approved|rejected|all>
  submissions page <n>                        Jump to page n
  submission <approve|reject|pending> <id>    Change a submission's status
  submission notes <id> <text>                Replace a submission's admin notes
  help                                        Show this message
  quit                                        Exit";

/// Error type for console commands
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("Unknown command: {0} (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    View(#[from] ViewError),
}

/// Interactive admin session over the category and submission views
pub struct Console {
    categories: CategoryView,
    submissions: SubmissionView,
    finished: bool,
}

impl Console {
    pub fn new(categories: CategoryView, submissions: SubmissionView) -> Self {
        Self {
            categories,
            submissions,
            finished: false,
        }
    }

    /// `true` once `quit` has been executed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run one command line and return its output
    pub async fn execute(&mut self, line: &str) -> String {
        let words: Vec<&str> = line.split_whitespace().collect();
        match self.dispatch(&words).await {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(command = line.trim(), error = %e, "Command failed");
                format!("Error: {}", e)
            }
        }
    }

    async fn dispatch(&mut self, words: &[&str]) -> Result<String, ConsoleError> {
        match words {
            [] => Ok(String::new()),
            ["help"] => Ok(HELP.to_string()),
            ["quit"] | ["exit"] => {
                self.finished = true;
                Ok("Bye".to_string())
            }
            ["categories", query @ ..] => {
                self.categories.set_query(&query.join(" "));
                self.render_categories().await
            }
            ["category", "add", rest @ ..] => self.add_category(rest).await,
            ["category", "edit", id, rest @ ..] => self.edit_category(id, rest).await,
            ["category", "delete", id] => {
                if self.categories.delete(id).await? {
                    Ok(format!("Deleted category {}", id))
                } else {
                    Ok(format!("No category with id {}", id))
                }
            }
            ["category", ..] => Err(ConsoleError::Usage(
                "category add <label> [--slug <slug>] | category edit <id> <label> [--slug <slug>] | category delete <id>",
            )),
            ["submissions"] => self.render_submissions().await,
            ["submissions", "search", query @ ..] => {
                self.submissions.set_query(&query.join(" "));
                self.render_submissions().await
            }
            ["submissions", "status", status] => {
                let filter = match *status {
                    "all" => None,
                    other => Some(
                        other
                            .parse::<SubmissionStatus>()
                            .map_err(|_| ConsoleError::Usage("submissions status <pending|approved|rejected|all>"))?,
                    ),
                };
                self.submissions.set_status_filter(filter);
                self.render_submissions().await
            }
            ["submissions", "page", n] => {
                let page = n
                    .parse::<usize>()
                    .map_err(|_| ConsoleError::Usage("submissions page <n>"))?;
                self.submissions.set_page(page);
                self.render_submissions().await
            }
            ["submissions", ..] => Err(ConsoleError::Usage(
                "submissions [search [query] | status <pending|approved|rejected|all> | page <n>]",
            )),
            ["submission", "notes", id, text @ ..] => {
                self.submissions.begin_notes(id).await?;
                self.submissions.set_draft(&text.join(" "))?;
                let saved = self.submissions.save_notes().await?;
                Ok(format!("Notes saved for {}", saved.id))
            }
            ["submission", action, id] => {
                let status = match *action {
                    "approve" => SubmissionStatus::Approved,
                    "reject" => SubmissionStatus::Rejected,
                    "pending" => SubmissionStatus::Pending,
                    _ => return Err(ConsoleError::Usage("submission <approve|reject|pending> <id>")),
                };
                let saved = self.submissions.set_status(id, status).await?;
                Ok(format!("{} is now {}", saved.id, saved.status))
            }
            ["submission", ..] => Err(ConsoleError::Usage(
                "submission <approve|reject|pending> <id> | submission notes <id> <text>",
            )),
            [command, ..] => Err(ConsoleError::UnknownCommand(command.to_string())),
        }
    }

    async fn add_category(&mut self, args: &[&str]) -> Result<String, ConsoleError> {
        let (label, slug) = split_slug_flag(args)?;
        self.categories.begin_add();
        if let Some(form) = self.categories.form_mut() {
            form.set_label(&label);
            if let Some(slug) = slug {
                form.set_slug(&slug);
            }
        }
        let created = self.submit_category().await?;
        Ok(format!("Added {}", format_category(&created)))
    }

    async fn edit_category(&mut self, id: &str, args: &[&str]) -> Result<String, ConsoleError> {
        let (label, slug) = split_slug_flag(args)?;
        self.categories.begin_edit(id).await?;
        if let Some(form) = self.categories.form_mut() {
            form.set_label(&label);
            if let Some(slug) = slug {
                form.set_slug(&slug);
            }
        }
        let updated = self.submit_category().await?;
        Ok(format!("Updated {}", format_category(&updated)))
    }

    /// Submit the open category form; a rejected form is discarded
    async fn submit_category(&mut self) -> Result<Category, ConsoleError> {
        let result = self.categories.submit().await;
        self.categories.cancel();
        Ok(result?)
    }

    async fn render_categories(&self) -> Result<String, ConsoleError> {
        let rows = self.categories.rows().await?;
        let stats = self.categories.stats().await?;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} categories, {} applications",
            stats.categories, stats.applications
        );
        if rows.is_empty() {
            out.push_str("No categories match");
        }
        for category in &rows {
            let _ = writeln!(out, "  {}", format_category(category));
        }
        Ok(out.trim_end().to_string())
    }

    async fn render_submissions(&self) -> Result<String, ConsoleError> {
        let page = self.submissions.current().await?;
        let counts = self.submissions.counts().await?;
        let query = self.submissions.query();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "pending {} / approved {} / rejected {}",
            counts.pending, counts.approved, counts.rejected
        );
        let _ = writeln!(
            out,
            "search: {:?}  status: {}",
            query.search,
            query.status.map(|s| s.to_string()).unwrap_or_else(|| "all".to_string())
        );
        render_page(&mut out, &page);
        Ok(out.trim_end().to_string())
    }
}

fn render_page(out: &mut String, page: &Page<Submission>) {
    if page.is_empty() {
        out.push_str("No submissions match\n");
    }
    for s in &page.items {
        let _ = writeln!(
            out,
            "  [{}] {} {} by {} <{}> {}",
            s.id, s.status, s.tool_name, s.name, s.email, s.api_link
        );
        if !s.admin_notes.is_empty() {
            let _ = writeln!(out, "      notes: {}", s.admin_notes);
        }
    }
    let _ = writeln!(
        out,
        "page {} of {} ({} total)",
        page.page,
        page.total_pages(),
        page.total
    );
}

fn format_category(category: &Category) -> String {
    format!(
        "[{}] {} ({}) - {} applications",
        category.id, category.label, category.slug, category.total_applications
    )
}

/// Split `<label words> [--slug <slug>]`
fn split_slug_flag(args: &[&str]) -> Result<(String, Option<String>), ConsoleError> {
    const USAGE: &str = "<label> [--slug <slug>]";
    match args.iter().position(|w| *w == "--slug") {
        Some(at) => match &args[at + 1..] {
            [] => Err(ConsoleError::Usage(USAGE)),
            slug => Ok((args[..at].join(" "), Some(slug.join(" ")))),
        },
        None => Ok((args.join(" "), None)),
    }
}
