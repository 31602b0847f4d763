use clap::Subcommand;
use studybuddy_core::{Dispatched, EconomyError, Outcome};

use super::{open_session, rejection_json, report_persist, CliResult};

#[derive(Subcommand)]
pub enum WalletAction {
    /// Show balance, streak and owned items
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add coins
    Credit {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        /// Why the coins were granted
        #[arg(long, default_value = "manual")]
        reason: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Spend coins
    Debit {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum MotivationAction {
    /// Show the current level
    Show,
    /// Move the level by a signed delta, clamped to 0..=100
    Adjust {
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
}

pub fn run(action: WalletAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        WalletAction::Show { json } => {
            let profile = session.state().profile();
            if json {
                let body = serde_json::json!({
                    "coins": profile.coins(),
                    "motivationLevel": profile.motivation_level(),
                    "currentStreak": profile.current_streak(),
                    "totalCheckIns": profile.total_check_ins(),
                    "purchasedItems": profile.purchased_items(),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("Coins:       {}", profile.coins());
                println!("Motivation:  {}", profile.motivation_level());
                println!("Streak:      {}", profile.current_streak());
                println!("Check-ins:   {}", profile.total_check_ins());
                if !profile.purchased_items().is_empty() {
                    let owned: Vec<&str> = profile.purchased_items().iter().map(String::as_str).collect();
                    println!("Owned:       {}", owned.join(", "));
                }
            }
        }
        WalletAction::Credit { amount, reason, json } => {
            print_balance(session.credit_coins(amount, &reason), json)?;
        }
        WalletAction::Debit { amount, json } => {
            print_balance(session.debit_coins(amount), json)?;
        }
    }
    Ok(())
}

fn print_balance(result: Result<Dispatched, EconomyError>, json: bool) -> CliResult {
    match result {
        Ok(dispatched) => {
            report_persist(&dispatched);
            let coins = match dispatched.outcome {
                Outcome::Balance { coins } => coins,
                _ => 0,
            };
            if json {
                let body = serde_json::json!({ "success": true, "coins": coins });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("Balance: {coins}");
            }
            Ok(())
        }
        Err(e) if json => {
            println!("{}", serde_json::to_string_pretty(&rejection_json(&e))?);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run_motivation(action: MotivationAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        MotivationAction::Show => {
            println!("{}", session.state().profile().motivation_level());
        }
        MotivationAction::Adjust { delta } => {
            let dispatched = session.adjust_motivation(delta)?;
            report_persist(&dispatched);
            println!("Motivation: {}", session.state().profile().motivation_level());
        }
    }
    Ok(())
}
