use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use config::LabProfile;
use envirolab_core::clock::SystemClock;
use envirolab_schemas::{kind::ReportKind, sample::SampleType};
use render::OutputFormat;
use std::{fs, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workflow::Session;

mod config;
mod render;
mod workflow;

#[derive(Parser)]
#[command(name = "envirolab")]
#[command(about = "Environmental compliance test report generator")]
struct Cli {
    /// Lab profile YAML (organisation, signatory, default addressee)
    #[arg(long, global = true)]
    profile: Option<PathBuf>,
    /// Directory of schema YAML files overriding the built-in report layouts
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a blank form for a report kind as YAML input
    Template {
        /// water, air, soil or noise
        kind: ReportKind,
    },
    /// Check a filled-in form without generating a report
    Validate {
        #[arg(long)]
        input: PathBuf,
    },
    /// Submit a filled-in form and render the finished report
    Generate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Record a collected sample and print its sample code
    Sample {
        #[arg(long)]
        company: String,
        /// water, air, soil, waste or other
        #[arg(long)]
        sample_type: SampleType,
        /// Collection date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("envirolab=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let session = Session {
        catalog: config::load_catalog(cli.catalog.as_deref())?,
        profile: LabProfile::load(cli.profile.as_deref())?,
        clock: Arc::new(SystemClock),
    };

    match cli.command {
        Commands::Template { kind } => {
            print!("{}", workflow::template(&session, kind)?);
        }
        Commands::Validate { input } => {
            let report = workflow::validate(&session, workflow::read_input(&input)?)?;
            if !report.is_valid() {
                for failure in report.failures() {
                    println!("  - {}: {}", failure.path, failure.message);
                }
                anyhow::bail!("{}", report);
            }
            println!("{:?} is valid.", input);
        }
        Commands::Generate {
            input,
            format,
            output,
        } => {
            let rendered = workflow::generate(&session, workflow::read_input(&input)?, format)?;
            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("Failed to write report to {:?}", path))?;
                    println!("Report written to {:?}", path);
                }
                None => print!("{}", rendered),
            }
        }
        Commands::Sample {
            company,
            sample_type,
            date,
        } => {
            let record = workflow::sample(&session, &company, sample_type, date)?;
            println!("Sample recorded successfully!");
            println!("  - Sample Code:     {}", record.sample_code);
            println!("  - Company:         {}", record.company_name);
            println!("  - Sample Type:     {:?}", record.sample_type);
            println!("  - Collection Date: {}", record.collection_date);
        }
    }

    Ok(())
}
