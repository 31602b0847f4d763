//! Whole-application state and the pure reducer over it.
//!
//! [`AppState`] is the single snapshot that gets persisted. Its mutating
//! methods validate before they touch anything, so a rejected call leaves the
//! state as it was. [`reduce`] wraps them in the `state -> (next, outcome)`
//! form used by [`crate::session::Session`] and by [`replay`].

use serde::{Deserialize, Serialize};

use crate::achievements::{self, AchievementInputs, AchievementStatus};
use crate::checkin::{self, CheckInLog, CheckInOutcome};
use crate::date::DateKey;
use crate::error::EconomyError;
use crate::mood::{Mood, MoodEntry};
use crate::planner::{seeded_holidays, ChatMessage, ClassSession, Holiday, ProfileStats, Reflection, Task};
use crate::profile::{Profile, ProfileUpdate};
use crate::rules::EconomyRules;
use crate::shop::{self, Catalog, ItemCategory, PurchaseReceipt};

/// Snapshot layout version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub reflections: Vec<Reflection>,
    #[serde(default)]
    pub classes: Vec<ClassSession>,
    #[serde(default = "seeded_holidays")]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub shop_items: Catalog,
    #[serde(default)]
    pub user_profile: Profile,
    #[serde(default)]
    pub chat_messages: Vec<ChatMessage>,
    #[serde(default)]
    pub mood_history: Vec<MoodEntry>,
    #[serde(flatten)]
    pub check_ins: CheckInLog,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&EconomyRules::default())
    }
}

impl AppState {
    /// First-run state: default profile, seeded catalog and holidays.
    pub fn new(rules: &EconomyRules) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            tasks: Vec::new(),
            reflections: Vec::new(),
            classes: Vec::new(),
            holidays: seeded_holidays(),
            shop_items: Catalog::seeded(),
            user_profile: Profile::new(rules),
            chat_messages: Vec::new(),
            mood_history: Vec::new(),
            check_ins: CheckInLog::default(),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.user_profile
    }

    pub fn catalog(&self) -> &Catalog {
        &self.shop_items
    }

    /// Re-establish invariants on a snapshot read from storage.
    pub fn normalize(&mut self) {
        self.user_profile.normalize();
        self.shop_items.normalize();
        self.check_ins.normalize();
        self.version = SNAPSHOT_VERSION;
    }

    // ── Economy ──────────────────────────────────────────────────────

    pub fn check_in(&mut self, today: DateKey, rules: &EconomyRules) -> Result<CheckInOutcome, EconomyError> {
        checkin::perform_daily_check_in(&mut self.user_profile, &mut self.check_ins, today, rules)
    }

    pub fn next_check_in_reward(&self, today: DateKey, rules: &EconomyRules) -> u32 {
        checkin::next_reward(&self.user_profile, &self.check_ins, today, rules)
    }

    pub fn purchase(&mut self, item_id: &str) -> Result<PurchaseReceipt, EconomyError> {
        shop::purchase(&mut self.user_profile, &self.shop_items, item_id)
    }

    pub fn equip(&mut self, item_id: &str) -> Result<ItemCategory, EconomyError> {
        shop::equip(&mut self.user_profile, &self.shop_items, item_id)
    }

    pub fn credit_coins(&mut self, amount: i64, reason: &str) -> Result<u32, EconomyError> {
        self.user_profile.credit_coins(amount, reason)
    }

    pub fn debit_coins(&mut self, amount: i64) -> Result<u32, EconomyError> {
        self.user_profile.debit_coins(amount)
    }

    pub fn adjust_motivation(&mut self, delta: i32) -> u8 {
        self.user_profile.adjust_motivation(delta)
    }

    /// Log a mood and apply its motivation delta. Returns the new level.
    pub fn record_mood(&mut self, mood: Mood, date: DateKey, reflection: Option<String>) -> u8 {
        self.mood_history.push(MoodEntry {
            date,
            mood,
            reflection,
        });
        self.user_profile.adjust_motivation(mood.motivation_delta())
    }

    /// Save a written reflection and apply the reflection boost for its mood.
    pub fn add_reflection(&mut self, reflection: Reflection) -> Result<u8, EconomyError> {
        if reflection.content.trim().is_empty() {
            return Err(EconomyError::EmptyReflection);
        }
        let boost = reflection.mood.reflection_boost();
        self.reflections.push(reflection);
        Ok(self.user_profile.adjust_motivation(boost))
    }

    /// Merge profile fields. Theme or music selections naming an item that is
    /// not owned, or not of the matching category, are ignored.
    pub fn update_profile_fields(&mut self, mut update: ProfileUpdate) -> &Profile {
        if let Some(Some(theme)) = &update.selected_theme {
            if !shop::can_select(&self.user_profile, &self.shop_items, theme, ItemCategory::Theme) {
                update.selected_theme = None;
            }
        }
        if let Some(Some(music)) = &update.selected_music {
            if !shop::can_select(&self.user_profile, &self.shop_items, music, ItemCategory::Music) {
                update.selected_music = None;
            }
        }
        self.user_profile.apply_update(update)
    }

    // ── Planner ──────────────────────────────────────────────────────

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn complete_task(&mut self, id: &str) -> Result<&Task, EconomyError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| EconomyError::UnknownTask { id: id.to_string() })?;
        task.completed = true;
        Ok(task)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task, EconomyError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| EconomyError::UnknownTask { id: id.to_string() })?;
        Ok(self.tasks.remove(idx))
    }

    pub fn add_class(&mut self, class: ClassSession) {
        self.classes.push(class);
    }

    /// Remove a class by id. Returns whether anything was removed.
    pub fn delete_class(&mut self, id: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c.id != id);
        self.classes.len() != before
    }

    pub fn add_holiday(&mut self, holiday: Holiday) {
        self.holidays.push(holiday);
    }

    pub fn add_chat_message(&mut self, message: ChatMessage) {
        self.chat_messages.push(message);
    }

    pub fn clear_chat_history(&mut self) {
        self.chat_messages.clear();
    }

    // ── Derived ──────────────────────────────────────────────────────

    pub fn achievement_inputs(&self) -> AchievementInputs {
        AchievementInputs {
            coins: self.user_profile.coins(),
            current_streak: self.user_profile.current_streak(),
            total_check_ins: self.user_profile.total_check_ins(),
            purchased_items: self.user_profile.purchased_items().len(),
            completed_tasks: self.tasks.iter().filter(|t| t.completed).count(),
            reflections: self.reflections.len(),
        }
    }

    pub fn achievement_statuses(&self) -> Vec<AchievementStatus> {
        achievements::statuses(&self.achievement_inputs())
    }

    pub fn profile_stats(&self) -> ProfileStats {
        ProfileStats::from_tasks(&self.tasks)
    }
}

/// A mutation request from a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    CheckIn { today: DateKey },
    Purchase { item_id: String },
    Equip { item_id: String },
    CreditCoins { amount: i64, reason: String },
    DebitCoins { amount: i64 },
    AdjustMotivation { delta: i32 },
    RecordMood {
        mood: Mood,
        date: DateKey,
        #[serde(default)]
        reflection: Option<String>,
    },
    AddReflection { reflection: Reflection },
    UpdateProfile { update: ProfileUpdate },
    AddTask { task: Task },
    CompleteTask { id: String },
    DeleteTask { id: String },
    AddClass { class: ClassSession },
    DeleteClass { id: String },
    AddHoliday { holiday: Holiday },
    AddChatMessage { message: ChatMessage },
    ClearChatHistory,
}

/// Result of an accepted command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    CheckIn(CheckInOutcome),
    Purchased(PurchaseReceipt),
    Equipped { category: ItemCategory },
    Balance { coins: u32 },
    Motivation { level: u8 },
    ProfileUpdated,
    Recorded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: AppState,
    pub outcome: Outcome,
    /// False when the command was accepted but left the state as it was
    /// (a repeated check-in, a clamp that was already at the bound).
    pub changed: bool,
}

/// Apply `command` to `state` without mutating it.
///
/// # Errors
/// The command's [`EconomyError`]; `state` is untouched either way.
pub fn reduce(state: &AppState, command: &Command, rules: &EconomyRules) -> Result<Transition, EconomyError> {
    let mut next = state.clone();
    let outcome = match command {
        Command::CheckIn { today } => Outcome::CheckIn(next.check_in(*today, rules)?),
        Command::Purchase { item_id } => Outcome::Purchased(next.purchase(item_id)?),
        Command::Equip { item_id } => Outcome::Equipped {
            category: next.equip(item_id)?,
        },
        Command::CreditCoins { amount, reason } => Outcome::Balance {
            coins: next.credit_coins(*amount, reason)?,
        },
        Command::DebitCoins { amount } => Outcome::Balance {
            coins: next.debit_coins(*amount)?,
        },
        Command::AdjustMotivation { delta } => Outcome::Motivation {
            level: next.adjust_motivation(*delta),
        },
        Command::RecordMood {
            mood,
            date,
            reflection,
        } => Outcome::Motivation {
            level: next.record_mood(*mood, *date, reflection.clone()),
        },
        Command::AddReflection { reflection } => Outcome::Motivation {
            level: next.add_reflection(reflection.clone())?,
        },
        Command::UpdateProfile { update } => {
            next.update_profile_fields(update.clone());
            Outcome::ProfileUpdated
        }
        Command::AddTask { task } => {
            next.add_task(task.clone());
            Outcome::Recorded
        }
        Command::CompleteTask { id } => {
            next.complete_task(id)?;
            Outcome::Recorded
        }
        Command::DeleteTask { id } => {
            next.delete_task(id)?;
            Outcome::Recorded
        }
        Command::AddClass { class } => {
            next.add_class(class.clone());
            Outcome::Recorded
        }
        Command::DeleteClass { id } => {
            next.delete_class(id);
            Outcome::Recorded
        }
        Command::AddHoliday { holiday } => {
            next.add_holiday(holiday.clone());
            Outcome::Recorded
        }
        Command::AddChatMessage { message } => {
            next.add_chat_message(message.clone());
            Outcome::Recorded
        }
        Command::ClearChatHistory => {
            next.clear_chat_history();
            Outcome::Recorded
        }
    };
    let changed = next != *state;
    Ok(Transition {
        next,
        outcome,
        changed,
    })
}

/// Result of re-applying a command log.
#[derive(Debug, Clone)]
pub struct Replay {
    pub state: AppState,
    /// Index into the command log and the reason each rejected command failed.
    pub rejected: Vec<(usize, EconomyError)>,
}

/// Re-apply `commands` from `initial`, skipping the ones that are rejected.
pub fn replay<'a, I>(initial: AppState, commands: I, rules: &EconomyRules) -> Replay
where
    I: IntoIterator<Item = &'a Command>,
{
    let mut state = initial;
    let mut rejected = Vec::new();
    for (idx, command) in commands.into_iter().enumerate() {
        match reduce(&state, command, rules) {
            Ok(transition) => state = transition.next,
            Err(e) => rejected.push((idx, e)),
        }
    }
    Replay { state, rejected }
}
