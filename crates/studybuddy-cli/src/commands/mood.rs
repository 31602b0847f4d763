use clap::{Args, Subcommand};
use studybuddy_core::{Command, DateKey, Mood, Reflection};

use super::{open_session, report_persist, CliResult};

#[derive(Subcommand)]
pub enum MoodAction {
    /// Record today's mood
    Record {
        /// amazing, good, okay, stressed or overwhelmed
        mood: Mood,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },
    /// Show recent mood entries
    History {
        /// Number of entries to show
        #[arg(long, default_value = "7")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct ReflectArgs {
    /// What happened today
    content: String,
    /// amazing, good, okay, stressed or overwhelmed
    #[arg(long, default_value = "okay")]
    mood: Mood,
    /// Something you are grateful for
    #[arg(long)]
    gratitude: Option<String>,
    /// Goals for tomorrow
    #[arg(long)]
    goals: Option<String>,
    /// Day the reflection is about (YYYY-MM-DD, default today)
    #[arg(long)]
    date: Option<DateKey>,
}

pub fn run(action: MoodAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        MoodAction::Record { mood, note } => {
            let dispatched = session.record_mood(mood, note)?;
            report_persist(&dispatched);
            println!(
                "Recorded {mood}. Motivation {}.",
                session.state().profile().motivation_level()
            );
        }
        MoodAction::History { limit, json } => {
            let history = &session.state().mood_history;
            let skip = history.len().saturating_sub(limit);
            let recent = &history[skip..];
            if json {
                println!("{}", serde_json::to_string_pretty(recent)?);
            } else if recent.is_empty() {
                println!("No moods recorded yet.");
            } else {
                for entry in recent {
                    match &entry.reflection {
                        Some(note) => println!("{}  {:<12} {note}", entry.date, entry.mood.as_str()),
                        None => println!("{}  {}", entry.date, entry.mood),
                    }
                }
            }
        }
    }
    Ok(())
}

pub fn run_reflect(args: ReflectArgs) -> CliResult {
    let mut session = open_session()?;
    let date = args.date.unwrap_or_else(DateKey::today);
    let mut reflection = Reflection::new(date, args.content, args.mood);
    reflection.gratitude = args.gratitude;
    reflection.goals = args.goals;

    let dispatched = session.dispatch(Command::AddReflection { reflection })?;
    report_persist(&dispatched);
    println!(
        "Reflection saved. Motivation {}.",
        session.state().profile().motivation_level()
    );
    Ok(())
}
