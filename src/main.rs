//! Command-line front end for the job board.
//!
//! A thin layer mapping subcommands onto the library: each run loads the
//! configuration, initializes logging, performs one workflow and prints the
//! rendered result on stdout. Logs go to stderr or the configured log file.
//!
//! # Subcommands
//!
//! - `list`: one page of jobs, with filters, sort and page
//! - `show <id>`: a single job
//! - `add`: create a job (repeat `--tag` for several skills)
//! - `edit <id>`: replace a job, keeping fields that are not given
//! - `delete <id>`: delete a job after confirmation (`--yes` skips the prompt)

#![allow(clippy::multiple_crate_versions)]

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use jobboard::app::{
    create_job, load_job_detail, replace_job, AlwaysConfirm, ConfirmationGate, DeleteOutcome, JobListController,
};
use jobboard::domain::{FilterKey, FilterState, JobType, NewJob};
use jobboard::ui::{render_job_detail, render_job_list};
use jobboard::{initialize, Config, JobBoardError, JobsBackend, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "jobboard", version, about = "Browse and manage job postings")]
struct Cli {
    /// Configuration file (default: <config dir>/jobboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend API base URL, e.g. http://localhost:5000/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List jobs matching the given filters
    List(ListArgs),
    /// Show one job
    Show { id: i64 },
    /// Create a job
    Add(JobFields),
    /// Replace a job; omitted fields keep their current value
    Edit {
        id: i64,
        #[command(flatten)]
        fields: JobFields,
        /// Remove every tag
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
    },
    /// Delete a job
    Delete {
        id: i64,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct ListArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// Full-time, Part-time, Contract or Internship
    #[arg(long)]
    job_type: Option<String>,
    /// posting_date, title or company
    #[arg(long)]
    sort_by: Option<String>,
    /// asc or desc
    #[arg(long)]
    sort_order: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: u32,
}

#[derive(Args)]
struct JobFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// Full-time, Part-time, Contract or Internship
    #[arg(long, value_parser = parse_job_type)]
    job_type: Option<JobType>,
    #[arg(long)]
    description: Option<String>,
    /// Application link
    #[arg(long)]
    url: Option<String>,
    /// Required skill; repeat for several
    #[arg(long = "tag", id = "tags")]
    tags: Vec<String>,
    /// Posting date, YYYY-MM-DD or RFC 3339 (default: now)
    #[arg(long, value_parser = parse_posting_date)]
    posted: Option<DateTime<Utc>>,
}

impl JobFields {
    /// Overlays the given fields on `base`.
    fn apply_to(self, mut base: NewJob) -> NewJob {
        if let Some(title) = self.title {
            base.title = title;
        }
        if let Some(company) = self.company {
            base.company = company;
        }
        if let Some(location) = self.location {
            base.location = location;
        }
        if self.job_type.is_some() {
            base.job_type = self.job_type;
        }
        if self.description.is_some() {
            base.description = self.description;
        }
        if self.url.is_some() {
            base.url = self.url;
        }
        if !self.tags.is_empty() {
            base.tags = self.tags;
        }
        if let Some(posted) = self.posted {
            base.posting_date = posted;
        }
        base
    }
}

fn parse_job_type(value: &str) -> std::result::Result<JobType, String> {
    value.parse().map_err(|e: JobBoardError| e.to_string())
}

fn parse_posting_date(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Some(timestamp) = jobboard::domain::job::parse_timestamp(value) {
        return Ok(timestamp);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

/// Asks on stderr and reads the answer from stdin.
struct StdinConfirm;

impl ConfirmationGate for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn filters_from(args: &ListArgs) -> Result<FilterState> {
    let mut filters = FilterState::default();
    for (key, value) in [
        (FilterKey::Title, &args.title),
        (FilterKey::Company, &args.company),
        (FilterKey::Location, &args.location),
        (FilterKey::JobType, &args.job_type),
        (FilterKey::SortBy, &args.sort_by),
        (FilterKey::SortOrder, &args.sort_order),
    ] {
        if let Some(value) = value {
            filters.set(key, value)?;
        }
    }
    Ok(filters)
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
        config.validate()?;
    }
    let backend = initialize(&config)?;

    match cli.command {
        Command::List(args) => {
            let filters = filters_from(&args)?;
            let jobs = JobListController::with_query(backend, &config, filters, args.page);
            jobs.load().await?;
            print!("{}", render_job_list(&jobs.view()));
        }
        Command::Show { id } => {
            let detail = load_job_detail(backend.as_ref(), id).await?;
            print!("{}", render_job_detail(&detail));
        }
        Command::Add(fields) => {
            let job = create_job(backend.as_ref(), fields.apply_to(NewJob::default())).await?;
            println!("Created job #{} ({})", job.id, job.title);
        }
        Command::Edit {
            id,
            fields,
            clear_tags,
        } => {
            let existing = backend.get_job(id).await?;
            let mut job = fields.apply_to(NewJob::from(&existing));
            if clear_tags {
                job.tags.clear();
            }
            let job = replace_job(backend.as_ref(), id, job).await?;
            println!("Updated job #{} ({})", job.id, job.title);
        }
        Command::Delete { id, yes } => {
            let jobs = JobListController::new(backend, &config);
            jobs.load().await?;
            let gate: &dyn ConfirmationGate = if yes { &AlwaysConfirm } else { &StdinConfirm };
            match jobs.delete_job(id, gate).await? {
                DeleteOutcome::Deleted => println!("Deleted job #{id}"),
                DeleteOutcome::Cancelled => println!("Cancelled"),
                DeleteOutcome::Suppressed => println!("A deletion of job #{id} is already in progress"),
                DeleteOutcome::Failed(message) => return Err(JobBoardError::Delete(message)),
            }
            print!("{}", render_job_list(&jobs.view()));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
