//! Plain-text rendering of the list and detail view models.
//!
//! The renderer turns a view model into a `String`; writing it to a terminal is the
//! caller's business. Layout:
//!
//! ```text
//! error banner(s)
//! in-flight deletions
//! filter summary
//! cards (or skeleton / empty state)
//! pagination line (only when pages > 1)
//! ```

use crate::ui::helpers::{format_tags, truncate, CARD_DESCRIPTION_CHARS};
use crate::ui::viewmodel::{JobCard, JobDetailViewModel, JobListViewModel};
use std::fmt::Write;

/// Number of placeholder rows shown while the first page loads.
const SKELETON_ROWS: usize = 3;

/// Renders the job list.
#[must_use]
pub fn render_job_list(vm: &JobListViewModel) -> String {
    let mut out = String::new();

    if let Some(error) = &vm.error {
        let _ = writeln!(out, "! {error}");
    }
    if let Some(error) = &vm.delete_error {
        let _ = writeln!(out, "! {error}");
    }

    for id in &vm.deleting {
        let _ = writeln!(out, "Deleting job #{id}...");
    }

    let _ = writeln!(out, "Search Jobs: {}", describe_filters(vm));
    out.push('\n');

    if vm.show_skeleton {
        for _ in 0..SKELETON_ROWS {
            out.push_str("  ░░░░░░░░░░░░░░░░░░░░░░░░░░░░\n");
        }
        return out;
    }

    if let Some(empty) = &vm.empty_state {
        let _ = writeln!(out, "  {}", empty.message);
        let _ = writeln!(out, "  {}", empty.subtitle);
    }

    for card in &vm.jobs {
        render_card(&mut out, card);
    }

    if vm.show_pagination {
        let _ = writeln!(out, "Page {} of {}", vm.current_page, vm.pages);
    }
    out
}

fn describe_filters(vm: &JobListViewModel) -> String {
    let f = &vm.filters;
    let mut parts: Vec<String> = [
        ("title", &f.title),
        ("company", &f.company),
        ("location", &f.location),
        ("type", &f.job_type),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{label}={value}"))
    .collect();
    parts.push(format!("sort={} ({})", f.sort_by.label(), f.sort_order.label()));
    parts.join(", ")
}

fn render_card(out: &mut String, card: &JobCard) {
    let _ = writeln!(out, "#{} {} [{}]", card.id, card.title, card.job_type);
    let _ = writeln!(out, "   {} | {} | Posted {}", card.company, card.location, card.posted);
    if let Some(description) = &card.description {
        let _ = writeln!(out, "   {}", truncate(description, CARD_DESCRIPTION_CHARS));
    }
    if !card.tags.is_empty() {
        let _ = writeln!(out, "   {}", format_tags(&card.tags));
    }
    out.push('\n');
}

/// Renders the single-job view.
#[must_use]
pub fn render_job_detail(vm: &JobDetailViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", vm.title, vm.job_type);
    let _ = writeln!(out, "{} | {}", vm.company, vm.location);
    let _ = writeln!(out, "Posted {}", vm.posted);
    if let Some(updated) = &vm.updated {
        let _ = writeln!(out, "Updated {updated}");
    }
    if let Some(url) = &vm.url {
        let _ = writeln!(out, "Apply: {url}");
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "{}",
        vm.description.as_deref().unwrap_or("No description provided.")
    );
    if !vm.tags.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Skills: {}", format_tags(&vm.tags));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FilterState;
    use crate::ui::viewmodel::EmptyState;

    fn card(id: i64) -> JobCard {
        JobCard {
            id,
            title: "Engineer".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            job_type: "Full-time".into(),
            posted: "Jan 5, 2024".into(),
            description: Some("Build things.".into()),
            tags: vec!["rust".into()],
        }
    }

    #[test]
    fn pagination_hidden_for_single_page() {
        let vm = JobListViewModel {
            jobs: vec![card(1), card(2)],
            pages: 1,
            current_page: 1,
            deleting: vec![4],
            ..JobListViewModel::default()
        };
        let text = render_job_list(&vm);
        assert!(text.contains("#1 Engineer [Full-time]"));
        assert!(text.contains("#2 Engineer [Full-time]\n"));
        assert!(text.contains("Deleting job #4..."));
        assert!(!text.contains("Page "));
    }

    #[test]
    fn both_error_banners_render() {
        let vm = JobListViewModel {
            error: Some("Failed to fetch jobs. Please try again later.".into()),
            delete_error: Some("Failed to delete job. Please try again.".into()),
            pages: 3,
            current_page: 2,
            show_pagination: true,
            filters: FilterState {
                title: "Engineer".into(),
                ..FilterState::default()
            },
            empty_state: Some(EmptyState {
                message: "No jobs found".into(),
                subtitle: "Try widening your search".into(),
            }),
            ..JobListViewModel::default()
        };
        let text = render_job_list(&vm);
        assert!(text.starts_with("! Failed to fetch jobs."));
        assert!(text.contains("! Failed to delete job."));
        assert!(text.contains("title=Engineer, sort=Posting Date (Newest First)"));
        assert!(text.contains("No jobs found"));
        assert!(text.contains("Page 2 of 3"));
    }

    #[test]
    fn detail_lists_skills_in_order() {
        let vm = JobDetailViewModel {
            id: 1,
            title: "Engineer".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            job_type: "Contract".into(),
            posted: "Jan 5, 2024".into(),
            description: None,
            url: Some("https://acme.example/apply".into()),
            tags: vec!["react".into(), "node".into()],
            updated: None,
        };
        let text = render_job_detail(&vm);
        assert!(text.contains("Apply: https://acme.example/apply"));
        assert!(text.contains("No description provided."));
        assert!(text.contains("Skills: [react] [node]"));
    }
}
