use clap::Subcommand;
use studybuddy_core::{ItemCategory, Session, SqliteSnapshotStore};

use super::{open_session, rejection_json, report_persist, CliResult};

#[derive(Subcommand)]
pub enum ShopAction {
    /// List catalog items
    List {
        /// Filter by category (theme, music, decoration)
        #[arg(long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Buy an item
    Buy {
        item_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Select an owned theme or music track
    Equip { item_id: String },
}

fn parse_category(s: &str) -> Result<ItemCategory, String> {
    [ItemCategory::Theme, ItemCategory::Music, ItemCategory::Decoration]
        .into_iter()
        .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| format!("unknown category: {s}"))
}

pub fn run(action: ShopAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        ShopAction::List { category, json } => list(&session, category.as_deref(), json)?,
        ShopAction::Buy { item_id, json } => match session.purchase(&item_id) {
            Ok((receipt, dispatched)) => {
                report_persist(&dispatched);
                if json {
                    let mut body = serde_json::to_value(&receipt)?;
                    body["success"] = serde_json::Value::Bool(true);
                    println!("{}", serde_json::to_string_pretty(&body)?);
                } else {
                    println!(
                        "Bought {} for {} coin(s). Balance {}.",
                        receipt.item_id, receipt.price, receipt.balance
                    );
                    if let Some(category) = receipt.equipped {
                        println!("Equipped as {category}.");
                    }
                }
            }
            Err(e) if json => {
                println!("{}", serde_json::to_string_pretty(&rejection_json(&e))?);
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },
        ShopAction::Equip { item_id } => {
            let dispatched = session.dispatch(studybuddy_core::Command::Equip {
                item_id: item_id.clone(),
            })?;
            report_persist(&dispatched);
            println!("Equipped {item_id}.");
        }
    }
    Ok(())
}

fn list(session: &Session<SqliteSnapshotStore>, category: Option<&str>, json: bool) -> CliResult {
    let filter = category.map(parse_category).transpose()?;
    let state = session.state();
    let profile = state.profile();
    let items: Vec<_> = state
        .catalog()
        .items()
        .iter()
        .filter(|item| filter.map_or(true, |c| item.category == c))
        .collect();

    if json {
        let rows: Vec<_> = items
            .iter()
            .map(|item| {
                let mut row = serde_json::to_value(item).unwrap_or_default();
                row["owned"] = serde_json::Value::Bool(profile.owns(&item.id));
                row
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Balance: {}", profile.coins());
    for item in items {
        let mark = if profile.owns(&item.id) { "owned" } else { "" };
        println!(
            "{:<18} {:<10} {:>4}  {:<22} {mark}",
            item.id,
            item.category.as_str(),
            item.price,
            item.name
        );
    }
    Ok(())
}
