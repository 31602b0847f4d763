use super::{open_session, CliResult};

pub fn run(json: bool) -> CliResult {
    let session = open_session()?;
    let statuses = session.achievement_statuses();

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    let unlocked = statuses.iter().filter(|s| s.unlocked).count();
    println!("Unlocked {unlocked}/{}", statuses.len());
    for status in &statuses {
        let mark = if status.unlocked { "[x]" } else { "[ ]" };
        println!(
            "{mark} {:<16} {:>3}/{:<3} {}",
            status.name, status.current, status.target, status.description
        );
    }
    Ok(())
}
