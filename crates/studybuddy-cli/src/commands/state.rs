use std::path::PathBuf;

use clap::Subcommand;
use studybuddy_core::{replay, AppState, Command, Config, Session, SqliteSnapshotStore};

use super::{open_session, CliResult};

#[derive(Subcommand)]
pub enum StateAction {
    /// Print the persisted snapshot
    Export,
    /// Re-apply a JSON command log onto a fresh state and store the result
    Replay {
        /// File holding a JSON array of commands
        file: PathBuf,
    },
    /// Discard the snapshot and start over
    Reset,
}

pub fn run(action: StateAction) -> CliResult {
    match action {
        StateAction::Export => {
            let session = open_session()?;
            println!("{}", serde_json::to_string_pretty(session.state())?);
        }
        StateAction::Replay { file } => {
            let config = Config::load()?;
            let commands: Vec<Command> = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            let result = replay(AppState::new(&config.economy), &commands, &config.economy);
            for (idx, err) in &result.rejected {
                eprintln!("command {idx} rejected: {err}");
            }

            let store = SqliteSnapshotStore::open_default(&config)?;
            let mut session = Session::with_state(result.state, config.economy, store);
            session.flush()?;
            println!(
                "replayed {} command(s), {} rejected",
                commands.len(),
                result.rejected.len()
            );
        }
        StateAction::Reset => {
            let config = Config::load()?;
            SqliteSnapshotStore::open_default(&config)?.clear()?;
            println!("state reset");
        }
    }
    Ok(())
}
