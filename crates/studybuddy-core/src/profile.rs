//! Profile & economy ledger.
//!
//! The profile is the singleton record holding the coin balance, motivation
//! level, streak counters and cosmetic selections. Every ledger operation
//! validates before it mutates, so a rejected call leaves the profile exactly
//! as it was.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::coach::CoachPersonality;
use crate::error::EconomyError;
use crate::rules::EconomyRules;

pub const MOTIVATION_MIN: u8 = 0;
pub const MOTIVATION_MAX: u8 = 100;

/// Upper bound for the default reminder lead time (one day).
pub const MAX_REMINDER_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    pub(crate) coins: u32,
    #[serde(deserialize_with = "clamped_motivation")]
    pub(crate) motivation_level: u8,
    #[serde(default)]
    pub(crate) current_streak: u32,
    #[serde(default)]
    pub(crate) total_check_ins: u32,
    #[serde(default)]
    pub(crate) purchased_items: BTreeSet<String>,
    #[serde(default)]
    pub(crate) selected_theme: Option<String>,
    #[serde(default)]
    pub(crate) selected_music: Option<String>,
    #[serde(default)]
    pub coach_personality: CoachPersonality,
    #[serde(default = "default_reminder_minutes")]
    pub(crate) default_reminder_minutes: u32,
}

fn default_reminder_minutes() -> u32 {
    15
}

/// Accept any stored integer and clamp it into the motivation range.
fn clamped_motivation<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    let clamped = raw.clamp(i64::from(MOTIVATION_MIN), i64::from(MOTIVATION_MAX));
    Ok(u8::try_from(clamped).unwrap_or(MOTIVATION_MAX))
}

impl Default for Profile {
    fn default() -> Self {
        Self::new(&EconomyRules::default())
    }
}

/// Partial profile update. `None` leaves a field untouched.
///
/// Theme and music selections use a nested option so a caller can clear a
/// selection with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub coach_personality: Option<CoachPersonality>,
    #[serde(default)]
    pub default_reminder_minutes: Option<u32>,
    #[serde(default)]
    pub selected_theme: Option<Option<String>>,
    #[serde(default)]
    pub selected_music: Option<Option<String>>,
}

impl Profile {
    /// Fresh profile seeded from the economy rules.
    pub fn new(rules: &EconomyRules) -> Self {
        Self {
            name: None,
            email: None,
            student_id: None,
            coins: rules.starting_coins,
            motivation_level: rules.starting_motivation.min(MOTIVATION_MAX),
            current_streak: 0,
            total_check_ins: 0,
            purchased_items: BTreeSet::new(),
            selected_theme: None,
            selected_music: None,
            coach_personality: CoachPersonality::default(),
            default_reminder_minutes: default_reminder_minutes(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn motivation_level(&self) -> u8 {
        self.motivation_level
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn total_check_ins(&self) -> u32 {
        self.total_check_ins
    }

    pub fn purchased_items(&self) -> &BTreeSet<String> {
        &self.purchased_items
    }

    pub fn owns(&self, item_id: &str) -> bool {
        self.purchased_items.contains(item_id)
    }

    pub fn selected_theme(&self) -> Option<&str> {
        self.selected_theme.as_deref()
    }

    pub fn selected_music(&self) -> Option<&str> {
        self.selected_music.as_deref()
    }

    pub fn default_reminder_minutes(&self) -> u32 {
        self.default_reminder_minutes
    }

    // ── Ledger ───────────────────────────────────────────────────────

    /// Shift motivation by `delta`, clamped into `[0, 100]`. Never fails.
    pub fn adjust_motivation(&mut self, delta: i32) -> u8 {
        let next = i32::from(self.motivation_level)
            .saturating_add(delta)
            .clamp(i32::from(MOTIVATION_MIN), i32::from(MOTIVATION_MAX));
        self.motivation_level = next as u8;
        self.motivation_level
    }

    /// Add coins to the balance and return the new balance.
    ///
    /// # Errors
    /// [`EconomyError::InvalidAmount`] when `amount <= 0` or does not fit the
    /// balance type.
    pub fn credit_coins(&mut self, amount: i64, reason: &str) -> Result<u32, EconomyError> {
        let credit = positive_amount(amount)?;
        self.coins = self
            .coins
            .checked_add(credit)
            .ok_or(EconomyError::InvalidAmount { amount })?;
        debug!(amount = credit, reason, balance = self.coins, "coins credited");
        Ok(self.coins)
    }

    /// Remove coins from the balance and return the new balance.
    ///
    /// # Errors
    /// [`EconomyError::InvalidAmount`] when `amount <= 0`;
    /// [`EconomyError::InsufficientFunds`] when the balance would go negative.
    /// The balance is unchanged on either error.
    pub fn debit_coins(&mut self, amount: i64) -> Result<u32, EconomyError> {
        let debit = positive_amount(amount)?;
        let remaining = self
            .coins
            .checked_sub(debit)
            .ok_or(EconomyError::InsufficientFunds {
                balance: self.coins,
                required: debit,
            })?;
        self.coins = remaining;
        debug!(amount = debit, balance = self.coins, "coins debited");
        Ok(self.coins)
    }

    /// Merge the scalar fields of `update`.
    ///
    /// The reminder default is clamped into `[0, MAX_REMINDER_MINUTES]`.
    /// Theme and music selections are applied verbatim here; the state layer
    /// filters out selections of items the profile cannot equip.
    pub fn apply_update(&mut self, update: ProfileUpdate) -> &Profile {
        if let Some(name) = update.name {
            self.name = non_blank(name);
        }
        if let Some(email) = update.email {
            self.email = non_blank(email);
        }
        if let Some(student_id) = update.student_id {
            self.student_id = non_blank(student_id);
        }
        if let Some(personality) = update.coach_personality {
            self.coach_personality = personality;
        }
        if let Some(minutes) = update.default_reminder_minutes {
            self.default_reminder_minutes = minutes.min(MAX_REMINDER_MINUTES);
        }
        if let Some(theme) = update.selected_theme {
            self.selected_theme = theme;
        }
        if let Some(music) = update.selected_music {
            self.selected_music = music;
        }
        self
    }

    /// Re-establish bounded fields after loading an externally edited snapshot.
    pub(crate) fn normalize(&mut self) {
        self.motivation_level = self.motivation_level.min(MOTIVATION_MAX);
        self.default_reminder_minutes = self.default_reminder_minutes.min(MAX_REMINDER_MINUTES);
    }
}

fn positive_amount(amount: i64) -> Result<u32, EconomyError> {
    if amount <= 0 {
        return Err(EconomyError::InvalidAmount { amount });
    }
    u32::try_from(amount).map_err(|_| EconomyError::InvalidAmount { amount })
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
