use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use tracker::dashboard::board::Dashboard;
use tracker::dashboard::client::TrackerClient;
use tracker::dashboard::filter::{FilterCriteria, Selector};
use tracker::dashboard::view::render_table;
use tracker::models::{ApplicationPayload, ApplicationStatus, JobType};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Track job applications from the terminal")]
struct Cli {
    /// Tracker server base URL
    #[arg(long, env = "TRACKER_URL", default_value = "http://localhost:8080")]
    url: String,

    /// Access token returned by /auth/callback
    #[arg(long, env = "TRACKER_TOKEN", hide_env_values = true)]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List applications
    List {
        /// Case-insensitive text to look for in any field
        #[arg(short, long, default_value = "")]
        query: String,

        /// TO_APPLY, PENDING, CANCELED, REFUSED, IN_INTERVIEWS or ALL
        #[arg(short, long, default_value = "ALL")]
        status: Selector<ApplicationStatus>,

        /// FULL_TIME, PART_TIME, CONTRACT, INTERNSHIP or ALL
        #[arg(short = 't', long = "type", default_value = "ALL")]
        job_type: Selector<JobType>,
    },

    /// Add an application
    Add {
        #[command(flatten)]
        fields: FormArgs,
    },

    /// Replace an application's fields; omitted flags keep their current value
    Update {
        /// Application ID
        #[arg(long)]
        id: Uuid,

        #[command(flatten)]
        fields: FormArgs,
    },

    /// Delete an application
    Delete {
        /// Application ID
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args)]
struct FormArgs {
    /// URL of the job posting
    #[arg(long)]
    link: Option<String>,

    #[arg(long)]
    company: Option<String>,

    #[arg(long)]
    role: Option<String>,

    /// FULL_TIME, PART_TIME, CONTRACT or INTERNSHIP
    #[arg(long = "type")]
    job_type: Option<String>,

    /// Remote, On-site or Hybrid
    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    country: Option<String>,

    /// TO_APPLY, PENDING, CANCELED, REFUSED or IN_INTERVIEWS
    #[arg(long)]
    status: Option<String>,

    #[arg(long)]
    notes: Option<String>,
}

impl FormArgs {
    /// Overlays the given flags on `base`.
    fn apply(self, mut base: ApplicationPayload) -> ApplicationPayload {
        let FormArgs {
            link,
            company,
            role,
            job_type,
            location,
            country,
            status,
            notes,
        } = self;
        if let Some(v) = link {
            base.link = v;
        }
        if let Some(v) = company {
            base.company = v;
        }
        if let Some(v) = role {
            base.role = v;
        }
        if let Some(v) = job_type {
            base.job_type = v;
        }
        if let Some(v) = location {
            base.location = v;
        }
        if country.is_some() {
            base.country = country;
        }
        if let Some(v) = status {
            base.status = v;
        }
        if let Some(v) = notes {
            base.notes = v;
        }
        base
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = TrackerClient::new(cli.url, cli.token)?;
    let mut dashboard = Dashboard::new(client);

    match cli.command {
        Commands::List {
            query,
            status,
            job_type,
        } => {
            dashboard.set_criteria(FilterCriteria {
                query,
                status,
                job_type,
            });
            dashboard.refresh().await?;
        }
        Commands::Add { fields } => {
            let form = fields.apply(ApplicationPayload {
                status: ApplicationStatus::default().as_str().to_string(),
                ..Default::default()
            });
            dashboard.create(&form).await?;
            println!("Application added.");
        }
        Commands::Update { id, fields } => {
            dashboard.refresh().await?;
            let current = dashboard
                .applications()
                .iter()
                .find(|a| a.id == id)
                .ok_or_else(|| anyhow!("No application with id {id}"))?;
            let form = fields.apply(ApplicationPayload::from(current));
            dashboard.update(id, &form).await?;
            println!("Application updated.");
        }
        Commands::Delete { id } => {
            dashboard.delete(id).await?;
            println!("Application deleted.");
        }
    }

    print!(
        "{}",
        render_table(dashboard.filtered(), dashboard.applications().len())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_filters_parse() {
        let cli = Cli::parse_from([
            "dashboard", "--token", "t", "list", "--status", "PENDING", "--type", "ALL", "-q", "acme",
        ]);
        match cli.command {
            Commands::List {
                query,
                status,
                job_type,
            } => {
                assert_eq!(query, "acme");
                assert_eq!(status, Selector::Only(ApplicationStatus::Pending));
                assert_eq!(job_type, Selector::All);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_bad_status_rejected() {
        let result = Cli::try_parse_from(["dashboard", "--token", "t", "list", "--status", "HIRED"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_flags_overlay_current_values() {
        let base = ApplicationPayload {
            link: "https://x.com/job".to_string(),
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            job_type: "FULL_TIME".to_string(),
            location: "Remote".to_string(),
            country: Some("Chile".to_string()),
            status: "TO_APPLY".to_string(),
            notes: "first call".to_string(),
        };
        let cli = Cli::parse_from([
            "dashboard", "--token", "t", "update", "--id", "00000000-0000-0000-0000-000000000000",
            "--status", "PENDING",
        ]);
        let Commands::Update { fields, .. } = cli.command else {
            panic!("expected update");
        };
        let form = fields.apply(base.clone());
        assert_eq!(form.status, "PENDING");
        assert_eq!(form.company, base.company);
        assert_eq!(form.country, base.country);
        assert_eq!(form.notes, base.notes);
    }
}
