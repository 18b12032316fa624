use uuid::Uuid;

use crate::applications::validation::validate;
use crate::dashboard::client::{ClientError, TrackerClient};
use crate::dashboard::filter::{filter_applications, FilterCriteria};
use crate::models::{Application, ApplicationPayload};

/// Client-side dashboard state.
///
/// The fetched list is the source of truth. Mutations never patch it
/// locally: after any successful create/update/delete the whole list is
/// refetched. A failed call returns the error and leaves state as it was.
pub struct Dashboard {
    client: TrackerClient,
    applications: Vec<Application>,
    criteria: FilterCriteria,
    filtered: Vec<Application>,
}

impl Dashboard {
    pub fn new(client: TrackerClient) -> Self {
        Self {
            client,
            applications: Vec::new(),
            criteria: FilterCriteria::default(),
            filtered: Vec::new(),
        }
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn filtered(&self) -> &[Application] {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replaces the filter and recomputes the view. Local only.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.applications = self.client.list().await?;
        self.refilter();
        Ok(())
    }

    pub async fn create(&mut self, form: &ApplicationPayload) -> Result<(), ClientError> {
        validate(form).map_err(ClientError::Validation)?;
        self.client.create(form).await?;
        self.refresh().await
    }

    pub async fn update(&mut self, id: Uuid, form: &ApplicationPayload) -> Result<(), ClientError> {
        validate(form).map_err(ClientError::Validation)?;
        // The response is the pre-update snapshot; the refetch is what counts.
        self.client.update(id, form).await?;
        self.refresh().await
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<(), ClientError> {
        self.client.delete(id).await?;
        self.refresh().await
    }

    fn refilter(&mut self) {
        self.filtered = filter_applications(&self.applications, &self.criteria);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::filter::Selector;
    use crate::models::ApplicationStatus;
    use crate::routes::build_router;
    use crate::routes::test_support::{test_state, OWNER_TOKEN, STRANGER_TOKEN};

    async fn spawn_server() -> String {
        let (state, _) = test_state();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn form(company: &str) -> ApplicationPayload {
        ApplicationPayload {
            link: "https://x.com/job".to_string(),
            company: company.to_string(),
            role: "Engineer".to_string(),
            job_type: "FULL_TIME".to_string(),
            location: "Remote".to_string(),
            country: None,
            status: "TO_APPLY".to_string(),
            notes: String::new(),
        }
    }

    async fn owner_dashboard() -> Dashboard {
        let client = TrackerClient::new(spawn_server().await, OWNER_TOKEN).unwrap();
        Dashboard::new(client)
    }

    #[tokio::test]
    async fn test_mutations_refetch_the_list() {
        let mut dashboard = owner_dashboard().await;
        dashboard.refresh().await.unwrap();
        assert!(dashboard.applications().is_empty());

        dashboard.create(&form("Acme")).await.unwrap();
        assert_eq!(dashboard.applications().len(), 1);
        let id = dashboard.applications()[0].id;

        let mut changed = form("Acme");
        changed.status = "PENDING".to_string();
        dashboard.update(id, &changed).await.unwrap();
        assert_eq!(dashboard.applications()[0].status, ApplicationStatus::Pending);

        dashboard.delete(id).await.unwrap();
        assert!(dashboard.applications().is_empty());
        assert!(dashboard.filtered().is_empty());
    }

    #[tokio::test]
    async fn test_filtered_view_follows_criteria_and_refetches() {
        let mut dashboard = owner_dashboard().await;
        dashboard.create(&form("Acme")).await.unwrap();
        dashboard.create(&form("Globex")).await.unwrap();

        dashboard.set_criteria(FilterCriteria {
            query: "glob".to_string(),
            ..Default::default()
        });
        assert_eq!(dashboard.filtered().len(), 1);
        assert_eq!(dashboard.applications().len(), 2);

        let mut pending = form("Globular");
        pending.status = "PENDING".to_string();
        dashboard.create(&pending).await.unwrap();
        assert_eq!(dashboard.filtered().len(), 2);

        let pending_only = FilterCriteria {
            status: Selector::Only(ApplicationStatus::Pending),
            ..dashboard.criteria().clone()
        };
        dashboard.set_criteria(pending_only);
        assert_eq!(dashboard.filtered()[0].company, "Globular");
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_submitted() {
        let mut dashboard = owner_dashboard().await;
        let mut bad = form("Acme");
        bad.link = "acme".to_string();
        let err = dashboard.create(&bad).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ref errors) if errors[0].field == "link"));

        dashboard.refresh().await.unwrap();
        assert!(dashboard.applications().is_empty());
    }

    #[tokio::test]
    async fn test_failed_call_leaves_state_unchanged() {
        let mut dashboard = owner_dashboard().await;
        dashboard.create(&form("Acme")).await.unwrap();
        let before = dashboard.applications().to_vec();

        let err = dashboard.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404, .. }));
        assert_eq!(dashboard.applications(), before.as_slice());

        let err = dashboard.update(Uuid::new_v4(), &form("Other")).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404, .. }));
        assert_eq!(dashboard.applications(), before.as_slice());
    }

    #[tokio::test]
    async fn test_stranger_sees_unauthorized() {
        let client = TrackerClient::new(spawn_server().await, STRANGER_TOKEN).unwrap();
        let mut dashboard = Dashboard::new(client);
        match dashboard.refresh().await.unwrap_err() {
            ClientError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Unauthorized");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
