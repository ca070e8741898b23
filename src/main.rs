mod client;
mod commands;
mod config;
mod notifier;
mod render;
mod session;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::client::Client;
use crate::config::GlobalConfig;
use crate::store::EventStore;

#[derive(Parser)]
#[command(name = "keepday")]
#[command(about = "Track relationship events (birthdays, promotions, ...) with D-day countdowns")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month calendar with an upcoming preview
    Month {
        /// Year to display (defaults to the current one)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to display, 1-12 (defaults to the current one)
        #[arg(short, long)]
        month: Option<u32>,
    },
    /// Show the week containing a date
    Week {
        /// Any date in the week (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List all upcoming events with their D-day
    Upcoming,
    /// Add an event (prompts for anything not given as a flag)
    Add {
        #[arg(long)]
        title: Option<String>,

        /// Name of the related person
        #[arg(long)]
        person: Option<String>,

        /// Event category, e.g. 생일, 승진
        #[arg(long = "type")]
        event_type: Option<String>,

        /// Event day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        memo: Option<String>,

        /// Reminder date/time; setting it turns the reminder on
        #[arg(long)]
        remind: Option<String>,
    },
    /// Edit an event by id (unspecified fields keep their values)
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        person: Option<String>,

        #[arg(long = "type")]
        event_type: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        memo: Option<String>,

        #[arg(long)]
        remind: Option<String>,
    },
    /// Delete an event by id
    Remove { id: String },
    /// Interactive calendar session
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GlobalConfig::load()?;

    let client = Client::new(config.server_url);
    let today = chrono::Local::now().date_naive();
    let mut store = EventStore::new(client, today);

    match cli.command {
        Commands::Month { year, month } => commands::month::run(&mut store, year, month).await,
        Commands::Week { date } => commands::week::run(&mut store, date).await,
        Commands::Upcoming => commands::upcoming::run(&mut store).await,
        Commands::Add {
            title,
            person,
            event_type,
            date,
            memo,
            remind,
        } => commands::add::run(&mut store, title, person, event_type, date, memo, remind).await,
        Commands::Edit {
            id,
            title,
            person,
            event_type,
            date,
            memo,
            remind,
        } => {
            commands::edit::run(&mut store, id, title, person, event_type, date, memo, remind)
                .await
        }
        Commands::Remove { id } => commands::remove::run(&mut store, id).await,
        Commands::Run => commands::run::run(store).await,
    }
}
