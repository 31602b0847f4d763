use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studybuddy-cli", version, about = "StudyBuddy CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily check-in for streak coins
    Checkin(commands::checkin::CheckinArgs),
    /// Coin balance
    Wallet {
        #[command(subcommand)]
        action: commands::wallet::WalletAction,
    },
    /// Motivation level
    Motivation {
        #[command(subcommand)]
        action: commands::wallet::MotivationAction,
    },
    /// Cosmetic shop
    Shop {
        #[command(subcommand)]
        action: commands::shop::ShopAction,
    },
    /// Mood journal
    Mood {
        #[command(subcommand)]
        action: commands::mood::MoodAction,
    },
    /// Write a daily reflection
    Reflect(commands::mood::ReflectArgs),
    /// Achievement progress
    Achievements {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Student profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Scripted study coach
    Coach {
        #[command(subcommand)]
        action: commands::coach::CoachAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Raw snapshot access
    State {
        #[command(subcommand)]
        action: commands::state::StateAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STUDYBUDDY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Checkin(args) => commands::checkin::run(args),
        Commands::Wallet { action } => commands::wallet::run(action),
        Commands::Motivation { action } => commands::wallet::run_motivation(action),
        Commands::Shop { action } => commands::shop::run(action),
        Commands::Mood { action } => commands::mood::run(action),
        Commands::Reflect(args) => commands::mood::run_reflect(args),
        Commands::Achievements { json } => commands::achievements::run(json),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Coach { action } => commands::coach::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::State { action } => commands::state::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
