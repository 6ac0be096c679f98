//! Command line entry point for the salary benchmark database.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use salary_benchmarks::api::{create_router, AppState};
use salary_benchmarks::auth::Authenticator;
use salary_benchmarks::config::AppConfig;
use salary_benchmarks::seed::{seed_experience_bands_from_csv, seed_job_titles_from_csv, SeedOutcome};
use salary_benchmarks::store::Store;

#[derive(Debug, Parser)]
#[command(name = "salary-benchmarks")]
#[command(about = "Salary benchmark database for job titles and experience bands")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the database tables
    InitDb,
    /// Import experience bands from CSV
    SeedExperienceBands {
        /// CSV file, defaults to the configured data file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Import job titles from CSV
    SeedJobTitles {
        /// CSV file, defaults to the configured data file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Import experience bands, then job titles
    SeedAll,
    /// Serve the HTTP API
    Serve {
        /// Address to listen on, overrides the configuration
        #[arg(long)]
        bind: Option<String>,
    },
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "salary_benchmarks=debug,info"
    } else {
        "salary_benchmarks=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

fn print_outcome(kind: &str, outcome: &SeedOutcome) {
    match outcome {
        SeedOutcome::Seeded(report) => println!(
            "Seeded {} {} ({} already present, {} without a key).",
            report.inserted, kind, report.skipped_existing, report.skipped_blank_key
        ),
        SeedOutcome::SourceMissing { path } => println!("{} source not found at {}", kind, path),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = AppConfig::resolve(cli.config.as_deref())?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        database_url = %config.database_url,
        "Starting salary-benchmarks"
    );

    let store = Store::connect(&config.database_url).await?;

    match cli.command {
        Command::InitDb => {
            store.init_schema().await?;
            println!("Initialized the database.");
        }
        Command::SeedExperienceBands { file } => {
            store.init_schema().await?;
            let path = file.unwrap_or_else(|| config.experience_bands_path());
            let outcome = seed_experience_bands_from_csv(&store, &path).await?;
            print_outcome("experience bands", &outcome);
        }
        Command::SeedJobTitles { file } => {
            store.init_schema().await?;
            let path = file.unwrap_or_else(|| config.job_titles_path());
            let outcome = seed_job_titles_from_csv(&store, &path).await?;
            print_outcome("job titles", &outcome);
        }
        Command::SeedAll => {
            store.init_schema().await?;
            let bands = seed_experience_bands_from_csv(&store, config.experience_bands_path()).await?;
            print_outcome("experience bands", &bands);
            let titles = seed_job_titles_from_csv(&store, config.job_titles_path()).await?;
            print_outcome("job titles", &titles);
        }
        Command::Serve { bind } => {
            store.init_schema().await?;
            let address = bind.unwrap_or_else(|| config.bind_address.clone());
            let state = AppState::new(store.clone(), Authenticator::new(config.admin.clone()));
            let router = create_router(state);

            let listener = tokio::net::TcpListener::bind(&address).await?;
            info!(address = %address, "Listening");
            axum::serve(listener, router).await?;
        }
    }

    store.close().await;
    Ok(())
}
