//! Injectable state container.
//!
//! A [`Session`] owns the in-memory [`AppState`], the economy rules and a
//! [`SnapshotStore`]. Every accepted command that changes the state is
//! followed by a snapshot save. The in-memory state is authoritative: a
//! failed save is logged and handed back to the caller, never rolled back.

use rand::Rng;
use tracing::{debug, warn};

use crate::achievements::AchievementStatus;
use crate::checkin::CheckInOutcome;
use crate::coach;
use crate::date::DateKey;
use crate::error::{CoreError, EconomyError, StorageError};
use crate::mood::Mood;
use crate::planner::ChatMessage;
use crate::profile::ProfileUpdate;
use crate::rules::EconomyRules;
use crate::shop::PurchaseReceipt;
use crate::state::{reduce, AppState, Command, Outcome};
use crate::storage::{Config, SnapshotStore, SqliteSnapshotStore};

/// An accepted command and the fate of its snapshot write.
#[derive(Debug)]
pub struct Dispatched {
    pub outcome: Outcome,
    /// Set when the state changed but could not be saved.
    pub persist_error: Option<StorageError>,
}

impl Dispatched {
    pub fn persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}

pub struct Session<S: SnapshotStore> {
    state: AppState,
    rules: EconomyRules,
    store: S,
}

impl Session<SqliteSnapshotStore> {
    /// Open the on-disk session described by `config`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or its snapshot is
    /// unreadable.
    pub fn open_default(config: &Config) -> Result<Self, CoreError> {
        let store = SqliteSnapshotStore::open_default(config)?;
        Ok(Session::open_configured(store, config)?)
    }
}

impl<S: SnapshotStore> Session<S> {
    /// Restore the stored snapshot, or start fresh on first run.
    ///
    /// # Errors
    /// Returns an error if a stored snapshot exists but cannot be read.
    pub fn open(store: S, rules: EconomyRules) -> Result<Self, StorageError> {
        let state = match store.load()? {
            Some(state) => state,
            None => {
                debug!("no snapshot found, starting fresh");
                AppState::new(&rules)
            }
        };
        Ok(Self { state, rules, store })
    }

    /// Like [`Session::open`], but a first-run profile also takes the coach
    /// personality from `config`.
    ///
    /// # Errors
    /// Returns an error if a stored snapshot exists but cannot be read.
    pub fn open_configured(store: S, config: &Config) -> Result<Self, StorageError> {
        let rules = config.economy.clone();
        let state = match store.load()? {
            Some(state) => state,
            None => {
                debug!(personality = %config.coach.default_personality, "no snapshot found, starting fresh");
                let mut state = AppState::new(&rules);
                state.user_profile.coach_personality = config.coach.default_personality;
                state
            }
        };
        Ok(Self { state, rules, store })
    }

    /// Wrap an existing state without touching the store.
    pub fn with_state(state: AppState, rules: EconomyRules, store: S) -> Self {
        Self { state, rules, store }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn rules(&self) -> &EconomyRules {
        &self.rules
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (AppState, S) {
        (self.state, self.store)
    }

    /// Apply `command` and save the snapshot if anything changed.
    ///
    /// # Errors
    /// The command's rejection; the state is unchanged and nothing is saved.
    pub fn dispatch(&mut self, command: Command) -> Result<Dispatched, EconomyError> {
        let transition = reduce(&self.state, &command, &self.rules).inspect_err(|e| {
            debug!(kind = e.kind(), error = %e, "command rejected");
        })?;

        let persist_error = if transition.changed {
            self.state = transition.next;
            self.store.save(&self.state).err().inspect(|e| {
                warn!(error = %e, "snapshot save failed; keeping in-memory state");
            })
        } else {
            None
        };

        Ok(Dispatched {
            outcome: transition.outcome,
            persist_error,
        })
    }

    /// Save the current state unconditionally.
    ///
    /// # Errors
    /// Returns the store's error.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        self.store.save(&self.state)
    }

    // ── Convenience wrappers ─────────────────────────────────────────

    pub fn check_in(&mut self, today: DateKey) -> Result<(CheckInOutcome, Dispatched), EconomyError> {
        let dispatched = self.dispatch(Command::CheckIn { today })?;
        match dispatched.outcome {
            Outcome::CheckIn(outcome) => Ok((outcome, dispatched)),
            _ => Ok((CheckInOutcome::ALREADY_CHECKED_IN, dispatched)),
        }
    }

    /// Check in for the local calendar day.
    pub fn check_in_today(&mut self) -> Result<(CheckInOutcome, Dispatched), EconomyError> {
        self.check_in(DateKey::today())
    }

    pub fn purchase(&mut self, item_id: &str) -> Result<(PurchaseReceipt, Dispatched), EconomyError> {
        let dispatched = self.dispatch(Command::Purchase {
            item_id: item_id.to_string(),
        })?;
        match &dispatched.outcome {
            Outcome::Purchased(receipt) => Ok((receipt.clone(), dispatched)),
            _ => Err(EconomyError::UnknownItem {
                item_id: item_id.to_string(),
            }),
        }
    }

    pub fn credit_coins(&mut self, amount: i64, reason: &str) -> Result<Dispatched, EconomyError> {
        self.dispatch(Command::CreditCoins {
            amount,
            reason: reason.to_string(),
        })
    }

    pub fn debit_coins(&mut self, amount: i64) -> Result<Dispatched, EconomyError> {
        self.dispatch(Command::DebitCoins { amount })
    }

    pub fn adjust_motivation(&mut self, delta: i32) -> Result<Dispatched, EconomyError> {
        self.dispatch(Command::AdjustMotivation { delta })
    }

    pub fn record_mood(&mut self, mood: Mood, note: Option<String>) -> Result<Dispatched, EconomyError> {
        self.dispatch(Command::RecordMood {
            mood,
            date: DateKey::today(),
            reflection: note,
        })
    }

    pub fn update_profile_fields(&mut self, update: ProfileUpdate) -> Result<Dispatched, EconomyError> {
        self.dispatch(Command::UpdateProfile { update })
    }

    /// Send a chat message and append the coach's scripted reply.
    /// Returns the reply text.
    pub fn ask_coach<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        rng: &mut R,
    ) -> Result<(String, Dispatched), EconomyError> {
        let profile = self.state.profile();
        let personality = profile.coach_personality;
        let reply = coach::respond(text, personality, profile.current_streak(), rng);

        let question = self.dispatch(Command::AddChatMessage {
            message: ChatMessage::from_user(text),
        })?;
        let mut answer = self.dispatch(Command::AddChatMessage {
            message: ChatMessage::from_coach(reply.clone(), personality),
        })?;
        // The caller sees a failure from either write.
        if answer.persist_error.is_none() {
            answer.persist_error = question.persist_error;
        }
        Ok((reply, answer))
    }

    pub fn achievement_statuses(&self) -> Vec<AchievementStatus> {
        self.state.achievement_statuses()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::CoachPersonality;
    use crate::planner::Sender;
    use crate::storage::MemorySnapshotStore;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn day(n: u32) -> DateKey {
        DateKey::from_ymd(2024, 6, n).unwrap()
    }

    fn session() -> Session<MemorySnapshotStore> {
        Session::open(MemorySnapshotStore::new(), EconomyRules::default()).unwrap()
    }

    #[test]
    fn fresh_session_uses_rule_defaults() {
        let rules = EconomyRules {
            starting_coins: 3,
            ..Default::default()
        };
        let session = Session::open(MemorySnapshotStore::new(), rules).unwrap();
        assert_eq!(session.state().profile().coins(), 3);
        assert_eq!(session.store().save_count(), 0);
    }

    #[test]
    fn accepted_mutations_are_saved() {
        let mut session = session();
        let (outcome, dispatched) = session.check_in(day(1)).unwrap();
        assert!(outcome.success);
        assert!(dispatched.persisted());
        assert_eq!(session.store().save_count(), 1);

        let restored = session.store().load().unwrap().unwrap();
        assert_eq!(&restored, session.state());
    }

    #[test]
    fn no_op_check_in_does_not_save() {
        let mut session = session();
        session.check_in(day(1)).unwrap();
        let (outcome, _) = session.check_in(day(1)).unwrap();
        assert_eq!(outcome, CheckInOutcome::ALREADY_CHECKED_IN);
        assert_eq!(session.store().save_count(), 1);
    }

    #[test]
    fn rejected_commands_do_not_save() {
        let mut session = session();
        let err = session.debit_coins(11).unwrap_err();
        assert_eq!(err.kind(), "insufficient_funds");
        assert_eq!(session.state().profile().coins(), 10);
        assert_eq!(session.store().save_count(), 0);
    }

    #[test]
    fn failed_save_keeps_in_memory_state() {
        let mut session = Session::open(MemorySnapshotStore::failing(), EconomyRules::default()).unwrap();

        let (receipt, dispatched) = session.purchase("music-lofi").unwrap();

        assert_eq!(receipt.balance, 5);
        assert!(matches!(
            dispatched.persist_error,
            Some(StorageError::WriteRejected(_))
        ));
        assert_eq!(session.state().profile().coins(), 5);
        assert!(session.state().profile().owns("music-lofi"));
    }

    #[test]
    fn reopening_restores_saved_state() {
        let mut session = session();
        session.check_in(day(1)).unwrap();
        session.purchase("music-lofi").unwrap();
        let (state, store) = session.into_parts();

        let reopened = Session::open(store, EconomyRules::default()).unwrap();
        assert_eq!(reopened.state(), &state);
        assert_eq!(reopened.state().profile().coins(), 6);
    }

    #[test]
    fn ask_coach_appends_both_messages() {
        let mut session = session();
        let mut rng = Pcg64::seed_from_u64(3);
        let (reply, _) = session.ask_coach("hello there", &mut rng).unwrap();

        let messages = &session.state().chat_messages;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[1].sender, Sender::Coach);
        assert_eq!(messages[1].text, reply);
        assert_eq!(session.store().save_count(), 2);
    }

    #[test]
    fn ask_coach_reports_a_failed_first_write() {
        let mut store = MemorySnapshotStore::new();
        store.fail_next = 1;
        let mut session = Session::open(store, EconomyRules::default()).unwrap();
        let mut rng = Pcg64::seed_from_u64(9);

        let (_, dispatched) = session.ask_coach("done with my essay", &mut rng).unwrap();

        assert!(matches!(
            dispatched.persist_error,
            Some(StorageError::WriteRejected(_))
        ));
        assert_eq!(session.store().save_count(), 1);
        assert_eq!(session.state().chat_messages.len(), 2);
    }

    #[test]
    fn first_run_takes_coach_personality_from_config() {
        let mut config = Config::default();
        config.set("coach.default_personality", "stoic").unwrap();
        config.set("economy.starting_coins", "4").unwrap();

        let session = Session::open_configured(MemorySnapshotStore::new(), &config).unwrap();
        let profile = session.state().profile();
        assert_eq!(profile.coach_personality, CoachPersonality::Stoic);
        assert_eq!(profile.coins(), 4);
    }

    #[test]
    fn stored_personality_wins_over_config() {
        let mut session = session();
        session
            .update_profile_fields(ProfileUpdate {
                coach_personality: Some(CoachPersonality::Creative),
                ..Default::default()
            })
            .unwrap();
        let (_, store) = session.into_parts();

        let mut config = Config::default();
        config.coach.default_personality = CoachPersonality::Analytical;
        let reopened = Session::open_configured(store, &config).unwrap();
        assert_eq!(reopened.state().profile().coach_personality, CoachPersonality::Creative);
    }

    #[test]
    fn mood_and_motivation_go_through_the_clamp() {
        let mut session = session();
        session.adjust_motivation(20).unwrap();
        session.record_mood(Mood::Amazing, None).unwrap();
        assert_eq!(session.state().profile().motivation_level(), 100);
        session.adjust_motivation(-500).unwrap();
        assert_eq!(session.state().profile().motivation_level(), 0);
    }
}
