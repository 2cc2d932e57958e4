//! `ingredient-admin`: create, edit and inspect ingredient records from the
//! command line, driving the same form logic as the dashboard.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ingredient_admin_app::{AppConfig, AppState, AppStateBuilder};
use ingredient_admin_core::IngredientForm;
use ingredient_admin_core::types::{FormNotice, IngredientId, SafetyLevel, SubmitOutcome};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "ingredient-admin",
    version,
    about = "Create and edit skincare ingredient records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file (default: <config dir>/ingredient-admin/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new ingredient; the slug is derived from the name
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        benefits: String,

        #[arg(long, value_enum, default_value_t = SafetyArg::Safe)]
        safety_level: SafetyArg,
    },

    /// Edit an existing ingredient; omitted fields keep their stored value
    Edit {
        /// Identifier of the record to edit
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        benefits: Option<String>,

        #[arg(long, value_enum)]
        safety_level: Option<SafetyArg>,
    },

    /// Print a stored ingredient as JSON
    Show {
        #[arg(long)]
        id: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SafetyArg {
    /// Aman
    Safe,
    /// Hati-hati untuk Kulit Sensitif
    Caution,
    /// Perlu Resep Dokter
    Prescription,
}

impl From<SafetyArg> for SafetyLevel {
    fn from(arg: SafetyArg) -> Self {
        match arg {
            SafetyArg::Safe => Self::Safe,
            SafetyArg::Caution => Self::CautionSensitiveSkin,
            SafetyArg::Prescription => Self::RequiresPrescription,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let state = AppStateBuilder::from_config(&config)
        .build()
        .context("Failed to initialize application")?;

    match cli.command {
        Commands::Create {
            name,
            description,
            benefits,
            safety_level,
        } => {
            let form = state.open_create_form();
            form.set_name(name);
            form.set_description(description);
            form.set_benefits(benefits);
            form.set_safety_level(safety_level.into());
            println!("Slug: {}", form.fields().slug);
            submit_and_return(&form).await
        }
        Commands::Edit {
            id,
            name,
            slug,
            description,
            benefits,
            safety_level,
        } => {
            let form = state.open_edit_form(&IngredientId::new(id)).await?;
            if let Some(name) = name {
                form.set_name(name);
            }
            if let Some(slug) = slug {
                form.set_slug(slug)?;
            }
            if let Some(description) = description {
                form.set_description(description);
            }
            if let Some(benefits) = benefits {
                form.set_benefits(benefits);
            }
            if let Some(level) = safety_level {
                form.set_safety_level(level.into());
            }
            submit_and_return(&form).await
        }
        Commands::Show { id } => show(&state, &IngredientId::new(id)).await,
    }
}

/// Submit, report the notice, then wait for the form to route back to the listing
async fn submit_and_return(form: &IngredientForm) -> Result<()> {
    tracing::info!("{} ({})", form.submit_label(), form.status_badge());
    let result = form.submit().await;

    if let Some(notice) = form.notice() {
        match notice {
            FormNotice::Success(msg) => println!("{msg}"),
            FormNotice::Error(msg) => eprintln!("{msg}"),
        }
    }

    match result? {
        SubmitOutcome::Created(record) => println!("Created ingredient {}", record.id),
        SubmitOutcome::Updated => println!("Updated ingredient"),
        SubmitOutcome::Skipped => return Ok(()),
    }

    form.wait_for_navigation().await;
    Ok(())
}

async fn show(state: &AppState, id: &IngredientId) -> Result<()> {
    let record = state.ingredient_service.load_for_edit(id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    println!("Safety: {}", record.fields.safety_level.label());
    Ok(())
}
