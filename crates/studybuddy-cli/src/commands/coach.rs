use std::time::Duration;

use clap::Subcommand;
use studybuddy_core::{Command, Config};

use super::{open_session, report_persist, CliResult};

#[derive(Subcommand)]
pub enum CoachAction {
    /// Send a message to the coach
    Ask {
        message: String,
        /// Reply immediately instead of waiting the configured delay
        #[arg(long)]
        no_delay: bool,
    },
    /// Show the chat history
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the chat history
    Clear,
}

pub fn run(action: CoachAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        CoachAction::Ask { message, no_delay } => {
            let (reply, dispatched) = session.ask_coach(&message, &mut rand::thread_rng())?;
            report_persist(&dispatched);
            if !no_delay {
                let delay = Config::load_or_default().coach.reply_delay_ms;
                std::thread::sleep(Duration::from_millis(delay));
            }
            println!("{reply}");
        }
        CoachAction::History { json } => {
            let messages = &session.state().chat_messages;
            if json {
                println!("{}", serde_json::to_string_pretty(messages)?);
            } else {
                for msg in messages {
                    let who = match msg.personality {
                        Some(p) => format!("coach ({p})"),
                        None => "you".to_string(),
                    };
                    println!("[{}] {who}: {}", msg.timestamp.format("%Y-%m-%d %H:%M"), msg.text);
                }
            }
        }
        CoachAction::Clear => {
            let dispatched = session.dispatch(Command::ClearChatHistory)?;
            report_persist(&dispatched);
            println!("chat history cleared");
        }
    }
    Ok(())
}
