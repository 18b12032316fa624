//! Local search over the fetched list. Pure, never touches the network.

use std::fmt;
use std::str::FromStr;

use crate::models::{Application, ApplicationStatus, JobType};

/// A dropdown selection: everything, or one exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr> FromStr for Selector<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ALL" {
            Ok(Selector::All)
        } else {
            s.parse().map(Selector::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("ALL"),
            Selector::Only(v) => v.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub query: String,
    pub status: Selector<ApplicationStatus>,
    pub job_type: Selector<JobType>,
}

impl FilterCriteria {
    pub fn matches(&self, app: &Application) -> bool {
        self.status.accepts(&app.status)
            && self.job_type.accepts(&app.job_type)
            && matches_query(app, &self.query)
    }
}

/// Keeps, in order, the records accepted by `criteria`.
pub fn filter_applications(apps: &[Application], criteria: &FilterCriteria) -> Vec<Application> {
    apps.iter()
        .filter(|app| criteria.matches(app))
        .cloned()
        .collect()
}

/// Case-insensitive substring match against any field's string form.
/// An empty query matches everything; absent fields never match.
fn matches_query(app: &Application, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    searchable_values(app)
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

fn searchable_values(app: &Application) -> Vec<String> {
    let mut values = vec![
        app.id.to_string(),
        app.link.clone(),
        app.company.clone(),
        app.role.clone(),
        app.job_type.as_str().to_string(),
        app.location.as_str().to_string(),
        app.status.as_str().to_string(),
        app.application_date.to_rfc3339(),
        app.notes.clone(),
    ];
    if let Some(country) = &app.country {
        values.push(country.clone());
    }
    values
}
