use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use itinera_core::ItineraError;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod logging;
mod render;
mod runtime;

#[derive(Parser)]
#[command(name = "itinera", version)]
#[command(about = "Itinera - plan trips with an AI travel assistant", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Config file (default: <config dir>/itinera/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Store file (default: <data dir>/itinera/storage.json)
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "ephemeral")]
    pub store: Option<PathBuf>,

    /// Keep everything in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show or change your display name
    Profile {
        #[arg(long)]
        name: Option<String>,
    },
    /// Change your password
    Password,
    /// Generate an itinerary
    Plan(commands::trips::PlanArgs),
    /// Revise a saved itinerary with feedback
    Refine {
        /// Itinerary id (see `itinera list`)
        id: String,
        #[arg(long)]
        feedback: String,
        /// Save the result as a new history entry
        #[arg(long)]
        save: bool,
    },
    /// Suggest interests for a partial query
    Suggest {
        query: String,
        /// Interests already chosen, comma separated
        #[arg(long)]
        existing: Option<String>,
    },
    /// List saved itineraries, newest first
    List,
    /// Show one saved itinerary
    Show {
        id: String,
        /// Print the stored text without sections
        #[arg(long)]
        raw: bool,
    },
    /// Delete one saved itinerary and its chat
    Delete { id: String },
    /// Delete every saved itinerary and chat
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Chat about a saved itinerary
    Chat {
        id: String,
        /// Send one message instead of starting the interactive chat
        #[arg(long, short)]
        message: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let runtime = runtime::Runtime::build(&cli.global)?;
    let app = &runtime.app;

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
        } => commands::account::register(app, name, email, password)?,
        Commands::Login { email, password } => commands::account::login(app, email, password)?,
        Commands::Logout => commands::account::logout(app)?,
        Commands::Whoami => commands::account::whoami(app),
        Commands::Profile { name } => commands::account::profile(app, name)?,
        Commands::Password => commands::account::change_password(app)?,
        Commands::Plan(args) => commands::trips::plan(app, args).await?,
        Commands::Refine { id, feedback, save } => {
            commands::trips::refine(app, &id, &feedback, save).await?
        }
        Commands::Suggest { query, existing } => {
            commands::trips::suggest(app, &query, existing.as_deref()).await?
        }
        Commands::List => commands::trips::list(app)?,
        Commands::Show { id, raw } => commands::trips::show(app, &id, raw)?,
        Commands::Delete { id } => commands::trips::delete(app, &id)?,
        Commands::Clear { yes } => commands::trips::clear(app, yes)?,
        Commands::Chat { id, message } => commands::chat::run(app, &id, message).await?,
    }

    Ok(())
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<ItineraError>() {
        Some(ItineraError::Validation(errors)) => {
            eprintln!("{}", "Please fix the following:".red().bold());
            for field_error in errors.iter() {
                eprintln!(
                    "  {} {}",
                    format!("{}:", field_error.field).yellow(),
                    field_error.message
                );
            }
        }
        Some(e @ ItineraError::UserNotFound { .. }) => {
            eprintln!("{}", e.to_string().red());
            eprintln!("{}", "Run `itinera register` to create an account.".bright_black());
        }
        Some(e) if e.is_account_error() => eprintln!("{}", e.to_string().red()),
        _ => eprintln!("{} {:#}", "Error:".red().bold(), err),
    }
}
