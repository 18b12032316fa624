//! Plain-text table rendering for the dashboard.

use chrono::{DateTime, Utc};

use crate::models::{Application, ApplicationStatus};

/// Notes longer than this are cut in the list view.
pub const NOTES_PREVIEW_LEN: usize = 50;

const HEADERS: [&str; 9] = [
    "Id", "Company", "Role", "Country", "Type", "Location", "Status", "Applied", "Notes",
];

pub fn truncate_notes(notes: &str) -> String {
    if notes.chars().count() > NOTES_PREVIEW_LEN {
        let head: String = notes.chars().take(NOTES_PREVIEW_LEN).collect();
        format!("{head}...")
    } else {
        notes.to_string()
    }
}

pub fn status_badge(status: ApplicationStatus) -> String {
    status.as_str().replace('_', " ")
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn row(app: &Application) -> [String; 9] {
    [
        app.id.to_string(),
        app.company.clone(),
        app.role.clone(),
        app.country.clone().unwrap_or_default(),
        app.job_type.as_str().to_string(),
        app.location.as_str().to_string(),
        status_badge(app.status),
        format_date(&app.application_date),
        truncate_notes(&app.notes),
    ]
}

/// Renders `apps` as an aligned table, one line per record, plus a footer
/// with the number shown out of `total`.
pub fn render_table(apps: &[Application], total: usize) -> String {
    let rows: Vec<[String; 9]> = apps.iter().map(row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for r in &rows {
        for (width, cell) in widths.iter_mut().zip(r) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    for r in &rows {
        push_line(&mut out, r, &widths);
    }
    out.push_str(&format!("{} of {} applications\n", apps.len(), total));
    out
}

fn push_line(out: &mut String, cells: &[String; 9], widths: &[usize; 9]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
