use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Contract => "CONTRACT",
            JobType::Internship => "INTERNSHIP",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkLocation {
    Remote,
    #[serde(rename = "On-site")]
    OnSite,
    Hybrid,
}

impl WorkLocation {
    pub const ALL: [WorkLocation; 3] = [
        WorkLocation::Remote,
        WorkLocation::OnSite,
        WorkLocation::Hybrid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkLocation::Remote => "Remote",
            WorkLocation::OnSite => "On-site",
            WorkLocation::Hybrid => "Hybrid",
        }
    }
}

/// Where an application stands. Drives the badge shown in the list view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    ToApply,
    Pending,
    Canceled,
    Refused,
    InInterviews,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::ToApply,
        ApplicationStatus::Pending,
        ApplicationStatus::Canceled,
        ApplicationStatus::Refused,
        ApplicationStatus::InInterviews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::ToApply => "TO_APPLY",
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Canceled => "CANCELED",
            ApplicationStatus::Refused => "REFUSED",
            ApplicationStatus::InInterviews => "IN_INTERVIEWS",
        }
    }
}

/// Error returned when a wire string is not a member of one of the enumerations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! wire_enum {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(JobType, "type");
wire_enum!(WorkLocation, "location");
wire_enum!(ApplicationStatus, "status");

/// A persisted job application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub link: String,
    pub company: String,
    pub role: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub location: WorkLocation,
    pub country: Option<String>,
    pub status: ApplicationStatus,
    pub application_date: DateTime<Utc>,
    pub notes: String,
}

/// Validated, typed field values for a create or a full-record replace.
/// Everything except the store-assigned `id` and `application_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub link: String,
    pub company: String,
    pub role: String,
    pub job_type: JobType,
    pub location: WorkLocation,
    pub country: Option<String>,
    pub status: ApplicationStatus,
    pub notes: String,
}

impl NewApplication {
    /// Materializes a record with store-assigned identity and timestamp.
    pub fn into_application(self, id: Uuid, application_date: DateTime<Utc>) -> Application {
        Application {
            id,
            link: self.link,
            company: self.company,
            role: self.role,
            job_type: self.job_type,
            location: self.location,
            country: self.country,
            status: self.status,
            application_date,
            notes: self.notes,
        }
    }
}

/// Untyped form body accepted by create and update. Shared by the HTTP API
/// and the dashboard forms; `validation::validate` turns it into a
/// `NewApplication`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub link: String,
    pub company: String,
    pub role: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub status: String,
    pub notes: String,
}

impl From<&Application> for ApplicationPayload {
    fn from(app: &Application) -> Self {
        Self {
            link: app.link.clone(),
            company: app.company.clone(),
            role: app.role.clone(),
            job_type: app.job_type.as_str().to_string(),
            location: app.location.as_str().to_string(),
            country: app.country.clone(),
            status: app.status.as_str().to_string(),
            notes: app.notes.clone(),
        }
    }
}

/// PUT body: the full record keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: ApplicationPayload,
}

/// Raw `applications` row. Enumerations are stored as text.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub link: String,
    pub company: String,
    pub role: String,
    #[sqlx(rename = "type")]
    pub job_type: String,
    pub location: String,
    pub country: Option<String>,
    pub status: String,
    pub application_date: DateTime<Utc>,
    pub notes: String,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = anyhow::Error;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |e: UnknownVariant| anyhow!("application {id} holds {e}");
        Ok(Application {
            id,
            job_type: row.job_type.parse().map_err(corrupt)?,
            location: row.location.parse().map_err(corrupt)?,
            status: row.status.parse().map_err(corrupt)?,
            link: row.link,
            company: row.company,
            role: row.role,
            country: row.country,
            application_date: row.application_date,
            notes: row.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_row() -> ApplicationRow {
        ApplicationRow {
            id: Uuid::new_v4(),
            link: "https://x.com/job".to_string(),
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            job_type: "FULL_TIME".to_string(),
            location: "On-site".to_string(),
            country: None,
            status: "IN_INTERVIEWS".to_string(),
            application_date: Utc::now(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_wire_strings_round_trip_through_from_str() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>(), Ok(status));
        }
        for job_type in JobType::ALL {
            assert_eq!(job_type.as_str().parse::<JobType>(), Ok(job_type));
        }
        for location in WorkLocation::ALL {
            assert_eq!(location.as_str().parse::<WorkLocation>(), Ok(location));
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = "ARCHIVED".parse::<ApplicationStatus>().unwrap_err();
        assert_eq!(err.kind, "status");
        assert_eq!(err.to_string(), "unknown status 'ARCHIVED'");
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert!("remote".parse::<WorkLocation>().is_err());
        assert!("full_time".parse::<JobType>().is_err());
    }

    #[test]
    fn test_serde_matches_as_str() {
        assert_eq!(json!(WorkLocation::OnSite), json!("On-site"));
        assert_eq!(json!(JobType::PartTime), json!("PART_TIME"));
        assert_eq!(json!(ApplicationStatus::InInterviews), json!("IN_INTERVIEWS"));
    }

    #[test]
    fn test_application_serializes_camel_case() {
        let app = Application::try_from(sample_row()).unwrap();
        let value = serde_json::to_value(&app).unwrap();
        assert_eq!(value["type"], "FULL_TIME");
        assert_eq!(value["location"], "On-site");
        assert!(value.get("applicationDate").is_some());
        assert!(value["country"].is_null());
    }

    #[test]
    fn test_row_with_unknown_status_is_rejected() {
        let mut row = sample_row();
        row.status = "GHOSTED".to_string();
        let err = Application::try_from(row).unwrap_err();
        assert!(err.to_string().contains("GHOSTED"));
    }

    #[test]
    fn test_update_body_flattens_fields() {
        let id = Uuid::new_v4();
        let body = json!({
            "id": id,
            "link": "https://x.com/job",
            "role": "Engineer",
            "type": "FULL_TIME",
            "location": "Remote",
            "status": "PENDING",
            "notes": "",
            "company": "Acme"
        });
        let update: ApplicationUpdate = serde_json::from_value(body).unwrap();
        assert_eq!(update.id, id);
        assert_eq!(update.fields.status, "PENDING");
        assert_eq!(update.fields.country, None);
    }

    #[test]
    fn test_payload_requires_notes_and_company() {
        let body = json!({
            "link": "https://x.com/job",
            "role": "Engineer",
            "type": "FULL_TIME",
            "location": "Remote",
            "status": "TO_APPLY"
        });
        assert!(serde_json::from_value::<ApplicationPayload>(body).is_err());
    }

    #[test]
    fn test_payload_country_is_optional() {
        let body = json!({
            "link": "https://x.com/job",
            "company": "",
            "role": "Engineer",
            "type": "FULL_TIME",
            "location": "Remote",
            "status": "TO_APPLY",
            "notes": ""
        });
        let payload: ApplicationPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.country, None);
    }
}
