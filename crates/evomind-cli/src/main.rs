//! EvoMind - habit, task, and mood tracker
//!
//! Terminal front-end over `evomind-core`:
//! - Splash routing from persisted session flags
//! - Onboarding, registration, login, and logout
//! - Today's plan with task transitions and habit completions
//! - Task and habit lists, mood check-ins, and the profile screen

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use evomind_core::{
    paths, ApiClient, ClientConfig, Database, EmotionSource, KeyValueStore, Preferences,
};

mod commands;

/// EvoMind - Habit, task, and mood tracker
#[derive(Parser)]
#[command(name = "evomind")]
#[command(about = "Habit, task, and mood tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL (overrides config file and EVOMIND_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session database path (defaults to ~/.evomind/evomind.db)
    #[arg(long, global = true)]
    database: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the splash screen and route to the first screen
    Start {
        /// Skip the minimum splash delay
        #[arg(long)]
        no_splash: bool,
    },

    /// Finish onboarding
    Onboarding {
        /// Skip the remaining slides (same outcome as finishing)
        #[arg(long)]
        skip: bool,
    },

    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out of this device
    Logout,

    /// Today's plan
    Plan {
        #[command(subcommand)]
        action: Option<PlanCommands>,
    },

    /// Log how you feel right now
    Mood {
        /// Emotion name or emoji
        emotion: String,
        /// emoji, ai, or self-report
        #[arg(long, default_value = "emoji")]
        source: EmotionSource,
    },

    /// Manage your tasks and habits
    Todo {
        #[command(subcommand)]
        action: Option<TodoCommands>,
    },

    /// View or edit your profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileCommands>,
    },
}

#[derive(Subcommand)]
pub(crate) enum PlanCommands {
    /// List today's tasks and habits
    Show,
    /// Start a pending task
    Start { task_id: String },
    /// Complete an ongoing task
    Complete { task_id: String },
    /// Mark one occurrence of a habit as done
    Habit { habit_id: String },
}

#[derive(Subcommand)]
pub(crate) enum TodoCommands {
    /// List all tasks and habits
    List,
    /// Add a task
    AddTask {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// Add a habit
    AddHabit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// daily, weekly, or custom
        #[arg(long, default_value = "daily")]
        frequency: String,
    },
    /// Edit a task
    EditTask {
        task_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    /// Edit a habit
    EditHabit {
        habit_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        frequency: Option<String>,
    },
    /// Delete a task
    DeleteTask { task_id: String },
    /// Delete a habit
    DeleteHabit { habit_id: String },
}

#[derive(Subcommand)]
pub(crate) enum ProfileCommands {
    /// Show name, email, completed tasks, and current mood
    Show,
    /// Change name and/or email
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change password
    Password {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

fn init_logging() {
    // Log to file so command output stays clean
    let log_dir = paths::logs_dir();
    std::fs::create_dir_all(&log_dir).ok();

    let writer: Box<dyn std::io::Write + Send> =
        match std::fs::File::create(log_dir.join(evomind_core::constants::storage::LOG_FILE_NAME)) {
            Ok(file) => Box::new(file),
            Err(_) => Box::new(std::io::sink()),
        };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(writer))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let db_path = cli.database.unwrap_or_else(paths::database_path);
    let db = Database::new(&db_path)?;
    let store: Arc<dyn KeyValueStore> = Arc::new(Preferences::new(db.shared()));
    tracing::info!("Using session database {:?}", db_path);

    let config = ClientConfig::load(cli.api_url)?;
    let client = Arc::new(ApiClient::new(&config)?);
    tracing::info!("Using backend {}", client.base_url());

    match cli.command {
        Some(Commands::Start { no_splash }) => commands::start(store, no_splash).await,
        None => commands::start(store, false).await,
        Some(Commands::Onboarding { skip }) => commands::onboarding(store, skip).await,
        Some(Commands::Register {
            name,
            email,
            password,
        }) => commands::register(&client, name, email, password).await,
        Some(Commands::Login { email, password }) => {
            commands::login(store, &client, &email, &password).await
        }
        Some(Commands::Logout) => commands::logout(store).await,
        Some(Commands::Plan { action }) => {
            commands::plan(store, client, action.unwrap_or(PlanCommands::Show)).await
        }
        Some(Commands::Mood { emotion, source }) => {
            commands::mood(store, &client, &emotion, source).await
        }
        Some(Commands::Todo { action }) => {
            commands::todo(store, &client, action.unwrap_or(TodoCommands::List)).await
        }
        Some(Commands::Profile { action }) => {
            commands::profile(store, &client, action.unwrap_or(ProfileCommands::Show)).await
        }
    }
}
