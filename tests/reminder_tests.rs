#![allow(clippy::unwrap_used)]

use chrono::{Duration, TimeZone, Utc};
use nudnik_bot::error::BotError;
use nudnik_bot::services::reminder::ReminderQueue;

fn morning() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 8, 8, 0, 0).unwrap()
}

#[test]
fn test_schedule_accepts_a_future_time() {
    let queue = ReminderQueue::new();
    let id = queue.schedule(42, "23:59", "go to sleep", morning()).unwrap();
    assert!(id > 0);
    assert_eq!(queue.pending_count(), 1);
}

#[test]
fn test_schedule_rejects_a_time_already_passed_today() {
    let queue = ReminderQueue::new();
    let result = queue.schedule(42, "07:00", "too late", morning());
    assert!(matches!(result, Err(BotError::PastTime)));
    assert_eq!(queue.pending_count(), 0);
}

#[test]
fn test_schedule_rejects_the_current_minute() {
    // The fire time must be strictly in the future.
    let queue = ReminderQueue::new();
    let result = queue.schedule(42, "08:00", "right now", morning());
    assert!(matches!(result, Err(BotError::PastTime)));
    assert_eq!(queue.pending_count(), 0);
}

#[test]
fn test_schedule_rejects_bad_time_formats() {
    let queue = ReminderQueue::new();
    for input in ["24:00", "12:60", "noonish", "12;30", ""] {
        let result = queue.schedule(42, input, "whatever", morning());
        assert!(matches!(result, Err(BotError::InvalidFormat(_))), "input: {input:?}");
    }
    assert_eq!(queue.pending_count(), 0);
}

#[test]
fn test_job_ids_are_monotonic() {
    let queue = ReminderQueue::new();
    let a = queue.schedule(1, "09:00", "a", morning()).unwrap();
    let b = queue.schedule(1, "10:00", "b", morning()).unwrap();
    assert!(b > a);
}

#[test]
fn test_drain_due_fires_exactly_once() {
    let queue = ReminderQueue::new();
    queue.schedule(42, "08:01", "one minute out", morning()).unwrap();

    // Not due yet.
    assert!(queue.drain_due(morning()).is_empty());
    assert_eq!(queue.pending_count(), 1);

    // Due one minute later.
    let later = morning() + Duration::minutes(1);
    let fired = queue.drain_due(later);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].chat_id, 42);
    assert_eq!(fired[0].text, "one minute out");
    assert_eq!(queue.pending_count(), 0);

    // Never fires again.
    assert!(queue.drain_due(later + Duration::hours(1)).is_empty());
}

#[test]
fn test_identical_fire_times_fire_in_scheduling_order() {
    let queue = ReminderQueue::new();
    let first = queue.schedule(1, "12:00", "first", morning()).unwrap();
    let second = queue.schedule(2, "12:00", "second", morning()).unwrap();

    let noon = Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap();
    let fired = queue.drain_due(noon);

    assert_eq!(fired.len(), 2);
    assert_eq!(fired[0].id, first);
    assert_eq!(fired[1].id, second);
}

#[test]
fn test_drain_due_keeps_future_jobs_pending() {
    let queue = ReminderQueue::new();
    queue.schedule(1, "09:00", "soon", morning()).unwrap();
    queue.schedule(1, "21:00", "tonight", morning()).unwrap();

    let nine = Utc.with_ymd_and_hms(2026, 8, 8, 9, 0, 0).unwrap();
    let fired = queue.drain_due(nine);

    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].text, "soon");
    assert_eq!(queue.pending_count(), 1);

    let night = Utc.with_ymd_and_hms(2026, 8, 8, 21, 0, 0).unwrap();
    let fired = queue.drain_due(night);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].text, "tonight");
}

#[test]
fn test_late_drain_still_fires_overdue_jobs() {
    // The tick may wake after the fire time; overdue jobs still fire.
    let queue = ReminderQueue::new();
    queue.schedule(5, "08:30", "overdue", morning()).unwrap();

    let much_later = morning() + Duration::hours(5);
    let fired = queue.drain_due(much_later);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].text, "overdue");
}
