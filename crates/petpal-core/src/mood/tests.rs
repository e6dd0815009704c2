use super::reporter::MockActivityReporter;
use super::*;
use crate::error::Error;
use crate::Mood;
use mockall::predicate::eq;
use mockall::Sequence;
use petpal_ledger::Interaction;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn units(n: f64) -> Duration {
    Duration::from_millis((n * 1000.0) as u64)
}

fn machine() -> (MoodMachine, Instant) {
    let start = Instant::now();
    (MoodMachine::new(MoodConfig::default(), start), start)
}

// ── Machine ──────────────────────────────────────────────

#[test]
fn test_new_machine_is_neutral() {
    let (m, start) = machine();
    let snap = m.snapshot();
    assert_eq!(snap.mood, Mood::Neutral);
    assert!(!snap.ignored);
    assert_eq!(snap.feed_count, 0);
    assert_eq!(m.next_deadline(), start + units(2.0));
}

#[test]
fn test_feed_sequence_saturates() {
    let (mut m, t0) = machine();

    let t = m.apply(PetAction::Feed, t0).unwrap();
    assert_eq!(t.mood_change, Some((Mood::Neutral, Mood::Happy)));
    assert_eq!(m.snapshot().feed_count, 1);

    let t = m.apply(PetAction::Feed, t0 + units(0.5)).unwrap();
    assert_eq!(t.mood_change, None);
    assert_eq!(m.snapshot().mood, Mood::Happy);
    assert_eq!(m.snapshot().feed_count, 2);

    let t = m.apply(PetAction::Feed, t0 + units(1.0)).unwrap();
    assert_eq!(t.mood_change, Some((Mood::Happy, Mood::Overfed)));
    assert_eq!(m.snapshot().feed_count, FEED_SATURATION);
    assert!(!m.snapshot().can_feed());
}

#[test]
fn test_feed_while_overfed_is_rejected() {
    let (mut m, t0) = machine();
    for _ in 0..3 {
        m.apply(PetAction::Feed, t0).unwrap();
    }
    let before = m.snapshot();
    let last = m.last_interaction_at();

    let err = m.apply(PetAction::Feed, t0 + units(1.0)).unwrap_err();
    assert!(matches!(err, Error::Overfed));
    assert_eq!(m.snapshot(), before);
    assert_eq!(m.last_interaction_at(), last);
}

#[test]
fn test_happy_reverts_after_hold() {
    let (mut m, t0) = machine();
    m.apply(PetAction::Care, t0).unwrap();

    let t = m.advance(t0 + units(2.9));
    assert_eq!(t.mood_change, None);
    assert_eq!(m.snapshot().mood, Mood::Happy);

    let t = m.advance(t0 + units(3.0));
    assert_eq!(t.mood_change, Some((Mood::Happy, Mood::Neutral)));
}

#[test]
fn test_superseded_revert_never_fires() {
    let (mut m, t0) = machine();
    m.apply(PetAction::Feed, t0).unwrap();
    m.apply(PetAction::Play, t0 + units(2.0)).unwrap();

    // The feed's revert at 3 units was replaced by play's at 6.
    m.advance(t0 + units(3.0));
    assert_eq!(m.snapshot().mood, Mood::Happy);
    m.advance(t0 + units(5.9));
    assert_eq!(m.snapshot().mood, Mood::Happy);
    m.advance(t0 + units(6.0));
    assert_eq!(m.snapshot().mood, Mood::Neutral);
}

#[test]
fn test_play_resets_feed_count() {
    let (mut m, t0) = machine();
    m.apply(PetAction::Feed, t0).unwrap();
    m.apply(PetAction::Feed, t0).unwrap();
    m.apply(PetAction::Feed, t0).unwrap();
    assert_eq!(m.snapshot().mood, Mood::Overfed);

    let t = m.apply(PetAction::Play, t0 + units(1.0)).unwrap();
    assert_eq!(t.mood_change, Some((Mood::Overfed, Mood::Happy)));
    assert_eq!(m.snapshot().feed_count, 0);
    assert!(m.snapshot().can_feed());
}

#[test]
fn test_care_keeps_feed_count() {
    let (mut m, t0) = machine();
    m.apply(PetAction::Feed, t0).unwrap();
    m.apply(PetAction::Care, t0 + units(1.0)).unwrap();
    assert_eq!(m.snapshot().feed_count, 1);
}

#[test]
fn test_overfed_clears_after_eight_units() {
    let (mut m, t0) = machine();
    for _ in 0..3 {
        m.apply(PetAction::Feed, t0).unwrap();
    }

    m.advance(t0 + units(7.9));
    assert_eq!(m.snapshot().mood, Mood::Overfed);

    let t = m.advance(t0 + units(8.0));
    assert_eq!(t.mood_change, Some((Mood::Overfed, Mood::Neutral)));
    assert_eq!(m.snapshot().feed_count, 0);
}

#[test]
fn test_ignore_threshold_is_strict() {
    let (mut m, t0) = machine();

    // Polls land on 2, 4, 6, 8, 10: exactly 10 units is not enough.
    for n in [2.0, 4.0, 6.0, 8.0, 10.0] {
        let t = m.advance(t0 + units(n));
        assert!(!t.became_ignored);
    }
    assert_eq!(m.snapshot().mood, Mood::Neutral);

    let t = m.advance(t0 + units(12.0));
    assert!(t.became_ignored);
    assert_eq!(t.mood_change, Some((Mood::Neutral, Mood::Sad)));
    assert!(m.snapshot().ignored);

    // Stays sad without reporting the crossing again.
    let t = m.advance(t0 + units(14.0));
    assert!(!t.became_ignored);
    assert!(t.is_empty());
    assert_eq!(m.snapshot().mood, Mood::Sad);
}

#[test]
fn test_action_clears_ignore() {
    let (mut m, t0) = machine();
    m.advance(t0 + units(12.0));
    assert_eq!(m.snapshot().mood, Mood::Sad);

    let t = m.apply(PetAction::Care, t0 + units(13.0)).unwrap();
    assert_eq!(t.mood_change, Some((Mood::Sad, Mood::Happy)));
    assert!(!m.snapshot().ignored);
}

#[test]
fn test_action_restarts_poll() {
    let (mut m, t0) = machine();
    m.apply(PetAction::Care, t0 + units(1.0)).unwrap();
    // Next poll is 2 units after the action, not on the startup grid.
    assert_eq!(m.next_deadline(), t0 + units(3.0));
}

#[test]
fn test_overfed_outranks_sad() {
    let config = MoodConfig {
        overfed_clear_units: 20,
        ..MoodConfig::default()
    };
    let t0 = Instant::now();
    let mut m = MoodMachine::new(config, t0);
    for _ in 0..3 {
        m.apply(PetAction::Feed, t0).unwrap();
    }

    let t = m.advance(t0 + units(12.0));
    assert!(t.became_ignored);
    assert_eq!(m.snapshot().mood, Mood::Overfed);

    let t = m.advance(t0 + units(20.0));
    assert_eq!(t.mood_change, Some((Mood::Overfed, Mood::Sad)));
}

#[test]
fn test_next_deadline_tracks_earliest_timer() {
    let (mut m, t0) = machine();
    m.apply(PetAction::Feed, t0).unwrap();
    assert_eq!(m.next_deadline(), t0 + units(2.0));

    m.advance(t0 + units(2.0));
    assert_eq!(m.next_deadline(), t0 + units(3.0));
}

// ── Config ───────────────────────────────────────────────

#[test]
fn test_config_durations() {
    let config = MoodConfig::new().with_unit(Duration::from_millis(10));
    assert_eq!(config.poll_interval(), Duration::from_millis(20));
    assert_eq!(config.ignore_after(), Duration::from_millis(100));
    assert_eq!(config.happy_hold(PetAction::Play), Duration::from_millis(40));
    assert_eq!(config.overfed_clear(), Duration::from_millis(80));
}

#[test]
fn test_config_rejects_zero_unit() {
    let config = MoodConfig {
        unit_ms: 0,
        ..MoodConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(Error::InvalidConfig {
            field: "mood.unit_ms",
            ..
        })
    ));
}

#[tokio::test]
async fn test_spawn_rejects_invalid_config() {
    let config = MoodConfig {
        poll_units: 0,
        ..MoodConfig::default()
    };
    assert!(MoodSession::builder(config).spawn().is_err());
}

// ── Reporting ────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_feed_reports_interaction_then_mood() {
    let mut reporter = MockActivityReporter::new();
    let mut seq = Sequence::new();
    reporter
        .expect_interaction()
        .with(eq(Interaction::Feeding))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    reporter
        .expect_mood_changed()
        .with(eq(Mood::Happy))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let session = MoodSession::spawn(MoodConfig::default(), Arc::new(reporter)).unwrap();
    let snap = session.feed().await.unwrap();
    assert_eq!(snap.mood, Mood::Happy);
    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_reporter_failure_does_not_stop_session() {
    let mut reporter = MockActivityReporter::new();
    reporter.expect_interaction().times(2).returning(|_| {
        Err(Error::Store(petpal_store::Error::Configuration(
            "disk full".to_string(),
        )))
    });
    reporter.expect_mood_changed().returning(|_| Ok(()));
    reporter.expect_ignored().returning(|| Ok(()));

    let session = MoodSession::spawn(MoodConfig::default(), Arc::new(reporter)).unwrap();
    session.care().await.unwrap();
    let snap = session.feed().await.unwrap();
    assert_eq!(snap.feed_count, 1);
    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_rejected_feed_is_not_reported() {
    let mut reporter = MockActivityReporter::new();
    reporter
        .expect_interaction()
        .with(eq(Interaction::Feeding))
        .times(3)
        .returning(|_| Ok(()));
    reporter.expect_mood_changed().returning(|_| Ok(()));

    let session = MoodSession::spawn(MoodConfig::default(), Arc::new(reporter)).unwrap();
    for _ in 0..3 {
        session.feed().await.unwrap();
    }
    assert!(matches!(session.feed().await, Err(Error::Overfed)));
    session.shutdown().await;
}
