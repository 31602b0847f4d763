//! Tunable economy parameters.
//!
//! Loaded from the `[economy]` table of `config.toml`. Defaults reproduce the
//! classic reward table: 10 starting coins, check-in rewards cycling 1..=7,
//! +5 motivation per check-in, and streaks that never break on a missed day.

use serde::{Deserialize, Serialize};

use crate::profile::MOTIVATION_MAX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyRules {
    #[serde(default = "default_starting_coins")]
    pub starting_coins: u32,
    #[serde(default = "default_starting_motivation")]
    pub starting_motivation: u8,
    /// Length of the check-in reward cycle; the reward equals the 1-based
    /// position in the cycle.
    #[serde(default = "default_checkin_cycle_days")]
    pub checkin_cycle_days: u32,
    #[serde(default = "default_checkin_motivation_boost")]
    pub checkin_motivation_boost: i32,
    /// Restart the streak when the previous check-in was not yesterday.
    #[serde(default)]
    pub reset_streak_on_gap: bool,
}

fn default_starting_coins() -> u32 {
    10
}
fn default_starting_motivation() -> u8 {
    75
}
fn default_checkin_cycle_days() -> u32 {
    7
}
fn default_checkin_motivation_boost() -> i32 {
    5
}

impl Default for EconomyRules {
    fn default() -> Self {
        Self {
            starting_coins: default_starting_coins(),
            starting_motivation: default_starting_motivation(),
            checkin_cycle_days: default_checkin_cycle_days(),
            checkin_motivation_boost: default_checkin_motivation_boost(),
            reset_streak_on_gap: false,
        }
    }
}

impl EconomyRules {
    /// Clamp values that would break ledger invariants.
    pub fn normalized(mut self) -> Self {
        self.starting_motivation = self.starting_motivation.min(MOTIVATION_MAX);
        self.checkin_cycle_days = self.checkin_cycle_days.max(1);
        self
    }

    /// Coins awarded for a check-in made with `current_streak` days behind it.
    pub fn day_of_cycle(&self, current_streak: u32) -> u32 {
        let cycle = self.checkin_cycle_days.max(1);
        (current_streak % cycle) + 1
    }
}
