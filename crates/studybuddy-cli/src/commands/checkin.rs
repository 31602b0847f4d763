use clap::Args;
use studybuddy_core::DateKey;

use super::{open_session, report_persist, CliResult};

#[derive(Args)]
pub struct CheckinArgs {
    /// Calendar day to check in for (YYYY-MM-DD, default today)
    #[arg(long)]
    date: Option<DateKey>,
    /// Show the reward without checking in
    #[arg(long)]
    preview: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CheckinArgs) -> CliResult {
    let mut session = open_session()?;
    let today = args.date.unwrap_or_else(DateKey::today);

    if args.preview {
        let state = session.state();
        let reward = state.next_check_in_reward(today, session.rules());
        let already = state.check_ins.has_checked_in(today);
        if args.json {
            let body = serde_json::json!({
                "date": today,
                "alreadyCheckedIn": already,
                "nextReward": reward,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        } else if already {
            println!("Already checked in for {today}.");
        } else {
            println!("Checking in for {today} would award {reward} coin(s).");
        }
        return Ok(());
    }

    let (outcome, dispatched) = session.check_in(today)?;
    report_persist(&dispatched);

    let profile = session.state().profile();
    if args.json {
        let body = serde_json::json!({
            "success": outcome.success,
            "coinsAwarded": outcome.coins_awarded,
            "coins": profile.coins(),
            "currentStreak": profile.current_streak(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else if outcome.success {
        println!(
            "Checked in for {today}: +{} coin(s). Balance {}, streak {}.",
            outcome.coins_awarded,
            profile.coins(),
            profile.current_streak()
        );
    } else {
        println!("Already checked in for {today}.");
    }
    Ok(())
}
