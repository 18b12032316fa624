use std::str::FromStr;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::models::{ApplicationPayload, ApplicationStatus, JobType, NewApplication, WorkLocation};

/// Minimum length of `role`, `type` and `location`, in characters.
const MIN_FIELD_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validates a create/update body into typed values.
///
/// Rules:
/// - `link` must parse as an absolute URL
/// - `role`, `type`, `location` need at least two characters
/// - `type`, `location`, `status` must name a known variant
///
/// `company`, `notes` and `country` are accepted as-is. Every failing field
/// is reported, in form order.
pub fn validate(payload: &ApplicationPayload) -> Result<NewApplication, Vec<FieldError>> {
    let mut errors = Vec::new();

    if Url::parse(payload.link.trim()).is_err() {
        errors.push(FieldError::new("link", "Please enter a valid URL"));
    }

    if !long_enough(&payload.role) {
        errors.push(FieldError::new("role", "Role must be at least 2 characters"));
    }

    let job_type = enum_field::<JobType>(
        &mut errors,
        "type",
        "Type",
        &payload.job_type,
        &JobType::ALL.map(|v| v.as_str()),
    );
    let location = enum_field::<WorkLocation>(
        &mut errors,
        "location",
        "Location",
        &payload.location,
        &WorkLocation::ALL.map(|v| v.as_str()),
    );

    let status = match payload.status.parse::<ApplicationStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.push(FieldError::new(
                "status",
                format!(
                    "Status must be one of {}",
                    ApplicationStatus::ALL.map(|v| v.as_str()).join(", ")
                ),
            ));
            None
        }
    };

    match (job_type, location, status) {
        (Some(job_type), Some(location), Some(status)) if errors.is_empty() => {
            Ok(NewApplication {
                link: payload.link.clone(),
                company: payload.company.clone(),
                role: payload.role.clone(),
                job_type,
                location,
                country: payload.country.clone(),
                status,
                notes: payload.notes.clone(),
            })
        }
        _ => Err(errors),
    }
}

/// Joins field errors into the single message carried by `{error}` bodies.
pub fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn long_enough(value: &str) -> bool {
    value.chars().count() >= MIN_FIELD_LEN
}

fn enum_field<T: FromStr>(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    label: &str,
    value: &str,
    allowed: &[&str],
) -> Option<T> {
    if !long_enough(value) {
        errors.push(FieldError::new(
            field,
            format!("{label} must be at least 2 characters"),
        ));
        return None;
    }
    match value.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            errors.push(FieldError::new(
                field,
                format!("{label} must be one of {}", allowed.join(", ")),
            ));
            None
        }
    }
}
