//! Daily check-in and streak engine.
//!
//! Each calendar day is in one of two states:
//!
//! ```text
//! NotCheckedIn -> CheckedIn
//! ```
//!
//! `CheckedIn` is terminal for the day. A second check-in with the same
//! [`DateKey`] is a no-op that reports `success: false`, so callers may invoke
//! it freely (the UI does so on every open).
//!
//! By default a skipped day does not break the streak. Setting
//! `reset_streak_on_gap` in [`EconomyRules`] makes the streak the run of
//! consecutive logged days instead, so a backfilled day can join two runs.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::date::DateKey;
use crate::error::EconomyError;
use crate::profile::Profile;
use crate::rules::EconomyRules;

/// One successful daily check-in. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    pub date_key: DateKey,
    pub day_of_cycle: u32,
    pub coins_awarded: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInOutcome {
    pub success: bool,
    pub coins_awarded: u32,
}

impl CheckInOutcome {
    pub const ALREADY_CHECKED_IN: CheckInOutcome = CheckInOutcome {
        success: false,
        coins_awarded: 0,
    };
}

/// Check-in history. `date_key` values are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInLog {
    #[serde(default)]
    pub(crate) daily_check_ins: Vec<CheckInRecord>,
    #[serde(default)]
    pub(crate) last_check_in: Option<DateKey>,
}

impl CheckInLog {
    pub fn records(&self) -> &[CheckInRecord] {
        &self.daily_check_ins
    }

    pub fn last_check_in(&self) -> Option<DateKey> {
        self.last_check_in
    }

    pub fn has_checked_in(&self, day: DateKey) -> bool {
        self.daily_check_ins.iter().any(|r| r.date_key == day)
    }

    /// The most recent `limit` records, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &CheckInRecord> {
        self.daily_check_ins.iter().rev().take(limit)
    }

    /// Drop duplicate days from a loaded snapshot, keeping the first record.
    pub(crate) fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.daily_check_ins.retain(|r| seen.insert(r.date_key));
        let latest = self.daily_check_ins.iter().map(|r| r.date_key).max();
        self.last_check_in = self.last_check_in.max(latest);
    }
}

/// Coins the next successful check-in would award.
pub fn next_reward(profile: &Profile, log: &CheckInLog, today: DateKey, rules: &EconomyRules) -> u32 {
    rules.day_of_cycle(effective_streak(profile, log, today, rules))
}

/// Perform the check-in for `today`.
///
/// On a new day: awards `day_of_cycle` coins, bumps the streak and the total,
/// raises motivation by the configured boost and appends the record. On a day
/// already in the log nothing changes.
///
/// # Errors
/// Only if the reward could not be credited, in which case nothing changed.
pub fn perform_daily_check_in(
    profile: &mut Profile,
    log: &mut CheckInLog,
    today: DateKey,
    rules: &EconomyRules,
) -> Result<CheckInOutcome, EconomyError> {
    if log.has_checked_in(today) {
        debug!(%today, "already checked in");
        return Ok(CheckInOutcome::ALREADY_CHECKED_IN);
    }

    let streak = effective_streak(profile, log, today, rules);
    let day_of_cycle = rules.day_of_cycle(streak);
    let coins_awarded = day_of_cycle;

    // Only fallible step; runs before anything else is touched.
    profile.credit_coins(i64::from(coins_awarded), "daily check-in")?;

    log.daily_check_ins.push(CheckInRecord {
        date_key: today,
        day_of_cycle,
        coins_awarded,
    });
    log.last_check_in = log.last_check_in.max(Some(today));

    profile.current_streak = match log.last_check_in {
        Some(last) if rules.reset_streak_on_gap => consecutive_days_ending(log, last),
        _ => streak.saturating_add(1),
    };
    profile.total_check_ins = profile.total_check_ins.saturating_add(1);
    profile.adjust_motivation(rules.checkin_motivation_boost);

    info!(
        %today,
        coins_awarded,
        streak = profile.current_streak,
        "daily check-in recorded"
    );

    Ok(CheckInOutcome {
        success: true,
        coins_awarded,
    })
}

/// Streak the reward is computed from, after the optional gap rule.
fn effective_streak(profile: &Profile, log: &CheckInLog, today: DateKey, rules: &EconomyRules) -> u32 {
    if !rules.reset_streak_on_gap {
        return profile.current_streak;
    }
    today
        .previous_day()
        .map_or(0, |yesterday| consecutive_days_ending(log, yesterday))
}

/// Number of logged days in the unbroken run ending on `end`.
fn consecutive_days_ending(log: &CheckInLog, end: DateKey) -> u32 {
    let mut run = 0;
    let mut cursor = Some(end);
    while let Some(day) = cursor.filter(|d| log.has_checked_in(*d)) {
        run += 1;
        cursor = day.previous_day();
    }
    run
}
