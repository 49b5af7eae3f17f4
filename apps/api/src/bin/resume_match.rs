//! Command-line client: upload a resume, match it against one or more job
//! descriptions and print each step.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use resume_match::client::{
    view, HttpAnalysisClient, ResumeFile, Session, DEFAULT_SERVER_URL,
};

#[derive(Debug, Parser)]
#[command(name = "resume-match", version, about = "Match a resume against job descriptions")]
struct Cli {
    /// Resume file (.pdf, .txt or .md)
    resume: PathBuf,

    /// Job description file; repeat to compare several roles.
    /// Reads the job description from stdin when neither --job nor --job-text is given.
    #[arg(short, long = "job", value_name = "FILE")]
    jobs: Vec<PathBuf>,

    /// Job description passed inline
    #[arg(long, conflicts_with = "jobs")]
    job_text: Option<String>,

    /// Base URL of the analysis API
    #[arg(long, env = "RESUME_MATCH_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Print the raw JSON results instead of the formatted views
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("resume_match=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let job_descriptions = collect_job_descriptions(&cli).await?;

    let mut session = Session::new(HttpAnalysisClient::new(&cli.server));

    let file = ResumeFile::read(&cli.resume).await;
    let loaded = match file {
        Ok(file) => session.load_resume(file).await.is_ok(),
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    show(&session, cli.json)?;
    if !loaded {
        return Ok(ExitCode::FAILURE);
    }

    let mut failed = false;
    for (i, job_description) in job_descriptions.iter().enumerate() {
        if i > 0 {
            session.try_another_job();
        }
        if session.match_job(job_description).await.is_err() {
            failed = true;
        }
        show(&session, cli.json)?;
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn collect_job_descriptions(cli: &Cli) -> Result<Vec<String>> {
    if let Some(text) = &cli.job_text {
        return Ok(vec![text.clone()]);
    }
    if !cli.jobs.is_empty() {
        let mut descriptions = Vec::with_capacity(cli.jobs.len());
        for path in &cli.jobs {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read job description '{}'", path.display()))?;
            descriptions.push(text);
        }
        return Ok(descriptions);
    }

    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read job description from stdin")?;
    Ok(vec![text])
}

fn show(session: &Session<HttpAnalysisClient>, json: bool) -> Result<()> {
    if !json {
        println!("{}", view::render(session));
        return Ok(());
    }

    if let Some(error) = session.error() {
        eprintln!("{error}");
    }
    let value = match (session.match_result(), session.resume()) {
        (Some(result), _) => serde_json::to_string_pretty(result)?,
        (None, Some(resume)) => serde_json::to_string_pretty(resume)?,
        (None, None) => return Ok(()),
    };
    println!("{value}");
    Ok(())
}
