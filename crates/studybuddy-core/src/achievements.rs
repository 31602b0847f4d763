//! Achievement evaluator.
//!
//! Nothing is stored: every query recomputes unlock status from the current
//! counters, so it can run on every render without side effects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstSteps,
    WeekWarrior,
    TaskMaster,
    CoinCollector,
    Shopaholic,
    SelfAware,
    Dedicated,
}

/// Which counter a threshold is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CompletedTasks,
    CurrentStreak,
    Coins,
    PurchasedItems,
    Reflections,
    TotalCheckIns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub metric: Metric,
    pub target: u64,
}

pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstSteps,
        name: "First Steps",
        description: "Complete your first task",
        metric: Metric::CompletedTasks,
        target: 1,
    },
    AchievementDef {
        id: AchievementId::WeekWarrior,
        name: "Week Warrior",
        description: "7-day check-in streak",
        metric: Metric::CurrentStreak,
        target: 7,
    },
    AchievementDef {
        id: AchievementId::TaskMaster,
        name: "Task Master",
        description: "Complete 10 tasks",
        metric: Metric::CompletedTasks,
        target: 10,
    },
    AchievementDef {
        id: AchievementId::CoinCollector,
        name: "Coin Collector",
        description: "Hold 50 coins",
        metric: Metric::Coins,
        target: 50,
    },
    AchievementDef {
        id: AchievementId::Shopaholic,
        name: "Shopaholic",
        description: "Own 3 shop items",
        metric: Metric::PurchasedItems,
        target: 3,
    },
    AchievementDef {
        id: AchievementId::SelfAware,
        name: "Self-Aware",
        description: "Write 30 reflections",
        metric: Metric::Reflections,
        target: 30,
    },
    AchievementDef {
        id: AchievementId::Dedicated,
        name: "Dedicated",
        description: "Check in on 30 days",
        metric: Metric::TotalCheckIns,
        target: 30,
    },
];

/// Counters the evaluator reads. Built by `AppState::achievement_inputs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementInputs {
    pub coins: u32,
    pub current_streak: u32,
    pub total_check_ins: u32,
    pub purchased_items: usize,
    pub completed_tasks: usize,
    pub reflections: usize,
}

impl AchievementInputs {
    fn value(&self, metric: Metric) -> u64 {
        match metric {
            Metric::CompletedTasks => self.completed_tasks as u64,
            Metric::CurrentStreak => u64::from(self.current_streak),
            Metric::Coins => u64::from(self.coins),
            Metric::PurchasedItems => self.purchased_items as u64,
            Metric::Reflections => self.reflections as u64,
            Metric::TotalCheckIns => u64::from(self.total_check_ins),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatus {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub unlocked: bool,
    /// Current value, capped at `target`.
    pub current: u64,
    pub target: u64,
    /// `current / target` in `[0.0, 1.0]`.
    pub progress: f64,
}

pub fn evaluate(def: &AchievementDef, inputs: &AchievementInputs) -> AchievementStatus {
    let raw = inputs.value(def.metric);
    let current = raw.min(def.target);
    let progress = if def.target == 0 {
        1.0
    } else {
        current as f64 / def.target as f64
    };
    AchievementStatus {
        id: def.id,
        name: def.name.to_string(),
        description: def.description.to_string(),
        unlocked: raw >= def.target,
        current,
        target: def.target,
        progress,
    }
}

/// Status of every achievement, in display order.
pub fn statuses(inputs: &AchievementInputs) -> Vec<AchievementStatus> {
    ACHIEVEMENTS.iter().map(|def| evaluate(def, inputs)).collect()
}

pub fn unlocked_count(inputs: &AchievementInputs) -> usize {
    ACHIEVEMENTS
        .iter()
        .filter(|def| inputs.value(def.metric) >= def.target)
        .count()
}
