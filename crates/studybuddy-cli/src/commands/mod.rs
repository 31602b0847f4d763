pub mod achievements;
pub mod checkin;
pub mod coach;
pub mod config;
pub mod mood;
pub mod profile;
pub mod shop;
pub mod state;
pub mod task;
pub mod wallet;

use studybuddy_core::{Config, Dispatched, Session, SqliteSnapshotStore};
use tracing::debug;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Load the config and open the on-disk session it points at.
pub fn open_session() -> Result<Session<SqliteSnapshotStore>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    debug!(
        database = %config.storage.database_file,
        namespace = %config.storage.namespace,
        "opening session"
    );
    Ok(Session::open_default(&config)?)
}

/// Warn when an accepted change could not be written to disk.
pub fn report_persist(dispatched: &Dispatched) {
    if let Some(e) = &dispatched.persist_error {
        eprintln!("warning: change applied but not saved: {e}");
    }
}

/// JSON body for a rejected economy operation.
pub fn rejection_json(err: &studybuddy_core::EconomyError) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "errorKind": err.kind(),
        "message": err.to_string(),
    })
}
