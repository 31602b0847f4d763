//! Integration tests for the economy through the public session API.

use studybuddy_core::{
    AchievementId, CheckInOutcome, Command, DateKey, EconomyError, EconomyRules, Mood, Outcome,
    Session, SnapshotStore, SqliteSnapshotStore,
};
use tempfile::TempDir;

fn day(n: u32) -> DateKey {
    DateKey::from_ymd(2024, 10, n).unwrap()
}

fn open(dir: &TempDir) -> Session<SqliteSnapshotStore> {
    let store = SqliteSnapshotStore::open(&dir.path().join("studybuddy.db"), "test").unwrap();
    Session::open(store, EconomyRules::default()).unwrap()
}

#[test]
fn new_student_walkthrough() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);

    let (outcome, _) = session.check_in(day(1)).unwrap();
    assert_eq!(outcome, CheckInOutcome { success: true, coins_awarded: 1 });
    assert_eq!(session.state().profile().coins(), 11);
    assert_eq!(session.state().profile().current_streak(), 1);

    let (receipt, _) = session.purchase("music-lofi").unwrap();
    assert_eq!(receipt.balance, 6);
    assert!(session.state().profile().owns("music-lofi"));
    assert_eq!(session.state().profile().selected_music(), Some("music-lofi"));

    let before = session.state().profile().motivation_level();
    session.record_mood(Mood::Amazing, Some("aced the quiz".into())).unwrap();
    assert_eq!(
        session.state().profile().motivation_level(),
        before.saturating_add(10).min(100)
    );
}

#[test]
fn state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open(&dir);
        for d in 1..=3 {
            session.check_in(day(d)).unwrap();
        }
        session.purchase("theme-forest").unwrap();
    }

    let session = open(&dir);
    let profile = session.state().profile();
    assert_eq!(profile.coins(), 10 + 1 + 2 + 3 - 8);
    assert_eq!(profile.current_streak(), 3);
    assert_eq!(profile.selected_theme(), Some("theme-forest"));
    assert_eq!(session.state().check_ins.records().len(), 3);
    assert_eq!(session.state().check_ins.last_check_in(), Some(day(3)));
}

#[test]
fn week_of_check_ins_unlocks_week_warrior() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);

    let rewards: Vec<u32> = (1..=8)
        .map(|d| session.check_in(day(d)).unwrap().0.coins_awarded)
        .collect();
    assert_eq!(rewards, vec![1, 2, 3, 4, 5, 6, 7, 1]);

    let week = session
        .achievement_statuses()
        .into_iter()
        .find(|s| s.id == AchievementId::WeekWarrior)
        .unwrap();
    assert!(week.unlocked);
    assert_eq!(week.progress, 1.0);
}

#[test]
fn double_check_in_leaves_stored_snapshot_alone() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);
    session.check_in(day(4)).unwrap();
    let stored_before = session.store().load().unwrap();

    let (outcome, _) = session.check_in(day(4)).unwrap();

    assert_eq!(outcome, CheckInOutcome::ALREADY_CHECKED_IN);
    assert_eq!(session.store().load().unwrap(), stored_before);
    assert_eq!(session.state().profile().total_check_ins(), 1);
}

#[test]
fn rejections_surface_their_kind() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);

    let err = session.purchase("theme-volcano").unwrap_err();
    assert_eq!(err.kind(), "unknown_item");

    session.credit_coins(20, "test top-up").unwrap();
    session.purchase("theme-ocean").unwrap();
    assert_eq!(
        session.purchase("theme-ocean").unwrap_err(),
        EconomyError::AlreadyOwned { item_id: "theme-ocean".into() }
    );
    assert_eq!(session.state().profile().coins(), 20);

    assert_eq!(
        session.credit_coins(0, "nothing").unwrap_err(),
        EconomyError::InvalidAmount { amount: 0 }
    );
}

#[test]
fn dispatch_reports_outcomes_for_every_command() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);

    let dispatched = session.dispatch(Command::AdjustMotivation { delta: 40 }).unwrap();
    assert_eq!(dispatched.outcome, Outcome::Motivation { level: 100 });

    let dispatched = session.dispatch(Command::DebitCoins { amount: 4 }).unwrap();
    assert_eq!(dispatched.outcome, Outcome::Balance { coins: 6 });
    assert!(dispatched.persisted());
}
