//! Student profile commands.
//!
//! `set` only touches the fields that were passed. Theme and music accept
//! `none` to clear the selection; unknown or unowned items are ignored.

use clap::Subcommand;
use studybuddy_core::{CoachPersonality, ProfileUpdate};

use super::{open_session, report_persist, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update profile fields
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        student_id: Option<String>,
        /// motivational, empathetic, analytical, creative or stoic
        #[arg(long)]
        coach: Option<CoachPersonality>,
        /// Default reminder lead time in minutes
        #[arg(long)]
        reminder: Option<u32>,
        /// Owned theme id, or "none"
        #[arg(long)]
        theme: Option<String>,
        /// Owned music id, or "none"
        #[arg(long)]
        music: Option<String>,
    },
    /// Task completion stats
    Stats,
}

fn selection(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.eq_ignore_ascii_case("none") { None } else { Some(v) })
}

pub fn run(action: ProfileAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        ProfileAction::Show { json } => {
            let profile = session.state().profile();
            if json {
                println!("{}", serde_json::to_string_pretty(profile)?);
            } else {
                println!("Name:        {}", profile.name.as_deref().unwrap_or("-"));
                println!("Email:       {}", profile.email.as_deref().unwrap_or("-"));
                println!("Student ID:  {}", profile.student_id.as_deref().unwrap_or("-"));
                println!("Coach:       {}", profile.coach_personality);
                println!("Reminder:    {} min", profile.default_reminder_minutes());
                println!("Theme:       {}", profile.selected_theme().unwrap_or("-"));
                println!("Music:       {}", profile.selected_music().unwrap_or("-"));
            }
        }
        ProfileAction::Set {
            name,
            email,
            student_id,
            coach,
            reminder,
            theme,
            music,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                student_id,
                coach_personality: coach,
                default_reminder_minutes: reminder,
                selected_theme: selection(theme),
                selected_music: selection(music),
            };
            let dispatched = session.update_profile_fields(update)?;
            report_persist(&dispatched);
            println!("profile updated");
        }
        ProfileAction::Stats => {
            let stats = session.state().profile_stats();
            println!(
                "Tasks: {}/{} completed ({:.0}%)",
                stats.completed_tasks, stats.total_tasks, stats.completion_rate
            );
        }
    }
    Ok(())
}
