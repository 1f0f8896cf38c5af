//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use arogya::config::Config;
use args::OutputArgs;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(name = "arogya")]
#[command(about = "Clinical intake: doctors, patient records and report summaries", long_about = None)]
struct Cli {
    /// Config file (defaults to ./arogya.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record store file, overrides the config
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// More logging: -v for info, -vv for debug
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON document as nested tables
    Render {
        /// JSON file to render, `-` for stdin
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Upload PDF reports and render the returned summary
    Summarize {
        /// PDF reports to upload
        documents: Vec<PathBuf>,

        /// Summarization endpoint, overrides the config
        #[arg(long)]
        endpoint: Option<Url>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Register a doctor under their licence number
    Register {
        /// Full name
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Medical licence number
        #[arg(long)]
        license: String,
    },

    /// Check a doctor's email against their licence number
    Login {
        #[arg(long)]
        email: String,
        /// Medical licence number
        #[arg(long)]
        license: String,
    },

    /// Save a patient record and print its id
    Save {
        /// Patient form (YAML or JSON)
        #[arg(long)]
        form: PathBuf,

        /// Report summary to attach (JSON)
        #[arg(long)]
        reports: Option<PathBuf>,
    },

    /// Render a stored record, e.g. `user/<id>` or `doctors/<licence>`
    Show {
        key: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    match cli.command {
        Commands::Render { input, output } => {
            commands::render::run(&input, &output)
        }
        Commands::Summarize {
            documents,
            endpoint,
            output,
        } => {
            if let Some(endpoint) = endpoint {
                config.summary_endpoint = endpoint;
            }
            commands::summarize::run(&config, &documents, &output)
        }
        Commands::Register {
            name,
            email,
            license,
        } => commands::doctor::register(&config, name, email, license),
        Commands::Login { email, license } => {
            commands::doctor::login(&config, &email, &license)
        }
        Commands::Save { form, reports } => {
            commands::save::run(&config, &form, reports.as_deref())
        }
        Commands::Show { key, output } => {
            commands::show::run(&config, &key, &output)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "arogya=warn",
        1 => "arogya=info",
        _ => "arogya=debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
