//! # StudyBuddy Core Library
//!
//! Core business logic for the StudyBuddy student planner: the coin economy,
//! daily check-in streaks, the cosmetic shop and derived achievements. The
//! CLI and any GUI are thin layers that send [`Command`]s into a [`Session`]
//! and re-read its [`AppState`] to render.
//!
//! ## Architecture
//!
//! - **Ledger**: coin balance and motivation on [`Profile`], never negative,
//!   motivation clamped to `[0, 100]`
//! - **Check-in engine**: one check-in per calendar day, rewards cycling 1..=7
//! - **Shop**: atomic purchases against a static [`Catalog`]
//! - **Achievements**: recomputed from counters on every query
//! - **Storage**: whole-state JSON snapshot in a SQLite key-value slot, TOML
//!   configuration
//!
//! ## Key Components
//!
//! - [`reduce`]: pure `state -> (next, outcome)` transition function
//! - [`Session`]: state container that saves a snapshot after each mutation
//! - [`SnapshotStore`]: persistence seam
//! - [`Config`]: application configuration management

pub mod achievements;
pub mod checkin;
pub mod coach;
pub mod date;
pub mod error;
pub mod mood;
pub mod planner;
pub mod profile;
pub mod rules;
pub mod session;
pub mod shop;
pub mod state;
pub mod storage;

pub use achievements::{AchievementId, AchievementStatus};
pub use checkin::{CheckInOutcome, CheckInRecord};
pub use coach::CoachPersonality;
pub use date::DateKey;
pub use error::{ConfigError, CoreError, EconomyError, StorageError};
pub use mood::{Mood, MoodEntry};
pub use planner::{ChatMessage, ProfileStats, Reflection, Task};
pub use profile::{Profile, ProfileUpdate};
pub use rules::EconomyRules;
pub use session::{Dispatched, Session};
pub use shop::{Catalog, ItemCategory, PurchaseReceipt, ShopItem};
pub use state::{reduce, replay, AppState, Command, Outcome, Transition};
pub use storage::{Config, MemorySnapshotStore, SnapshotStore, SqliteSnapshotStore};
