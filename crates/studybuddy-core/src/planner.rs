//! Planner records: tasks, classes, holidays, reflections and chat history.
//!
//! These are plain data owned by the views. The economy only reads counts
//! from them (completed tasks, reflections) for achievements and stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coach::CoachPersonality;
use crate::date::DateKey;
use crate::mood::Mood;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Class,
    #[default]
    Assignment,
    Exam,
    Personal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub reminder_minutes: u32,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(title: impl Into<String>, due_date: DateTime<Utc>, reminder_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            due_date,
            priority: Priority::default(),
            category: TaskCategory::default(),
            location: None,
            reminder_minutes,
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub id: String,
    pub date: DateKey,
    pub content: String,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gratitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
}

impl Reflection {
    pub fn new(date: DateKey, content: impl Into<String>, mood: Mood) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            content: content.into(),
            mood,
            gratitude: None,
            goals: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: String,
    pub title: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub is_important: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub color: String,
    pub reminder_minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayKind {
    Public,
    University,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: String,
    pub name: String,
    pub date: DateKey,
    #[serde(rename = "type")]
    pub kind: HolidayKind,
}

/// Public holidays preloaded into a fresh calendar.
pub fn seeded_holidays() -> Vec<Holiday> {
    [
        ("New Year's Day", (2024, 1, 1)),
        ("Chinese New Year", (2024, 2, 10)),
        ("Hari Raya Aidilfitri", (2024, 4, 10)),
        ("Wesak Day", (2024, 5, 22)),
        ("Hari Raya Haji", (2024, 6, 17)),
        ("Merdeka Day", (2024, 8, 31)),
        ("Malaysia Day", (2024, 9, 16)),
        ("Deepavali", (2024, 11, 1)),
        ("Christmas Day", (2024, 12, 25)),
    ]
    .into_iter()
    .enumerate()
    .filter_map(|(i, (name, (y, m, d)))| {
        DateKey::from_ymd(y, m, d).map(|date| Holiday {
            id: (i + 1).to_string(),
            name: name.to_string(),
            date,
            kind: HolidayKind::Public,
        })
    })
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Coach,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<CoachPersonality>,
}

impl ChatMessage {
    pub fn from_user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            personality: None,
        }
    }

    pub fn from_coach(text: impl Into<String>, personality: CoachPersonality) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender: Sender::Coach,
            timestamp: Utc::now(),
            personality: Some(personality),
        }
    }
}

/// Task completion summary shown on the profile screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub completed_tasks: usize,
    pub total_tasks: usize,
    /// Percentage in `[0, 100]`; 0 when there are no tasks.
    pub completion_rate: f64,
}

impl ProfileStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total_tasks = tasks.len();
        let completed_tasks = tasks.iter().filter(|t| t.completed).count();
        let completion_rate = if total_tasks == 0 {
            0.0
        } else {
            completed_tasks as f64 / total_tasks as f64 * 100.0
        };
        Self {
            completed_tasks,
            total_tasks,
            completion_rate,
        }
    }
}
