use std::sync::Arc;

use assert_matches::assert_matches;
use tokio_test::{assert_pending, assert_ready, task};

use doctor_cell::models::{ScheduleEntry, SlotSource, TimeSlot};
use doctor_cell::services::{SlotAvailabilityResolver, SlotRefresh, SlotSession, DEFAULT_TIME_SLOTS};

use super::{date, FixedSchedule, GatedSchedule};

fn slots(values: &[&str]) -> Vec<TimeSlot> {
    values.iter().map(|v| TimeSlot(v.to_string())).collect()
}

fn template() -> Vec<TimeSlot> {
    slots(&DEFAULT_TIME_SLOTS)
}

#[tokio::test]
async fn test_resolver_converts_schedule_to_display_slots() {
    let resolver = SlotAvailabilityResolver::new(Arc::new(FixedSchedule(Ok(vec!["00:30", "12:00", "17:45"]))));

    let resolution = resolver.resolve_detailed(Some("doc-1"), Some(date(2026, 10, 16))).await;

    assert_eq!(resolution.source, SlotSource::Schedule);
    assert_eq!(resolution.slots, slots(&["12:30 AM", "12:00 PM", "5:45 PM"]));
}

#[tokio::test]
async fn test_resolver_uses_template_when_schedule_empty() {
    let resolver = SlotAvailabilityResolver::new(Arc::new(FixedSchedule(Ok(vec![]))));

    let resolved = resolver.resolve(Some("doc-1"), Some(date(2026, 10, 16))).await;
    assert_eq!(resolved, template());
}

#[tokio::test]
async fn test_resolver_uses_template_when_lookup_fails() {
    let resolver = SlotAvailabilityResolver::new(Arc::new(FixedSchedule(Err("connection reset"))));

    let resolution = resolver.resolve_detailed(Some("doc-1"), Some(date(2026, 10, 16))).await;
    assert_eq!(resolution.source, SlotSource::DefaultTemplate);
    assert_eq!(resolution.slots, template());
}

#[tokio::test]
async fn test_resolver_uses_template_when_every_entry_is_malformed() {
    let resolver = SlotAvailabilityResolver::new(Arc::new(FixedSchedule(Ok(vec!["25:00", "lunch"]))));

    let resolved = resolver.resolve(Some("doc-1"), Some(date(2026, 10, 16))).await;
    assert_eq!(resolved, template());
}

#[tokio::test]
async fn test_resolver_skips_lookup_without_selection() {
    // An erroring schedule proves nothing was called: the result would be the
    // template either way, so check the blank-id path too.
    let resolver = SlotAvailabilityResolver::new(Arc::new(FixedSchedule(Err("must not be called"))));

    assert_eq!(resolver.resolve(None, Some(date(2026, 10, 16))).await, template());
    assert_eq!(resolver.resolve(Some("doc-1"), None).await, template());
    assert_eq!(resolver.resolve(Some("   "), Some(date(2026, 10, 16))).await, template());
}

#[tokio::test]
async fn test_session_publishes_latest_refresh() {
    let schedule = Arc::new(GatedSchedule::default());
    let session = SlotSession::new(SlotAvailabilityResolver::new(schedule.clone()));

    let first_gate = schedule.gate("doc-old");
    let second_gate = schedule.gate("doc-new");

    // Each refresh takes its ticket on the first poll, then waits on its gate.
    let mut first = task::spawn(session.refresh(Some("doc-old"), Some(date(2026, 10, 16))));
    assert_pending!(first.poll());
    let mut second = task::spawn(session.refresh(Some("doc-new"), Some(date(2026, 10, 17))));
    assert_pending!(second.poll());

    // The newer request answers first, then the stale one arrives late.
    second_gate.send(Ok(vec![ScheduleEntry::new("15:00")])).unwrap();
    assert!(second.is_woken());
    let second = assert_ready!(second.poll());

    first_gate.send(Ok(vec![ScheduleEntry::new("08:00")])).unwrap();
    assert!(first.is_woken());
    let first = assert_ready!(first.poll());

    assert_eq!(second, SlotRefresh::Applied(slots(&["3:00 PM"])));
    assert_matches!(first, SlotRefresh::Superseded);

    let published = session.current().await.unwrap();
    assert_eq!(published.doctor_id.as_deref(), Some("doc-new"));
    assert_eq!(published.date, Some(date(2026, 10, 17)));
    assert_eq!(published.slots, slots(&["3:00 PM"]));
}

#[tokio::test]
async fn test_session_stale_refresh_loses_even_when_newer_answers_last() {
    let schedule = Arc::new(GatedSchedule::default());
    let session = SlotSession::new(SlotAvailabilityResolver::new(schedule.clone()));

    let first_gate = schedule.gate("doc-old");
    let second_gate = schedule.gate("doc-new");

    let mut first = task::spawn(session.refresh(Some("doc-old"), Some(date(2026, 10, 16))));
    assert_pending!(first.poll());
    let mut second = task::spawn(session.refresh(Some("doc-new"), Some(date(2026, 10, 16))));
    assert_pending!(second.poll());

    first_gate.send(Ok(vec![ScheduleEntry::new("08:00")])).unwrap();
    assert_matches!(assert_ready!(first.poll()), SlotRefresh::Superseded);
    assert!(session.current().await.is_none());

    second_gate.send(Ok(vec![ScheduleEntry::new("15:00")])).unwrap();
    assert_eq!(assert_ready!(second.poll()), SlotRefresh::Applied(slots(&["3:00 PM"])));
    assert_eq!(session.current().await.unwrap().doctor_id.as_deref(), Some("doc-new"));
}

#[tokio::test]
async fn test_session_clear_invalidates_in_flight_refresh() {
    let schedule = Arc::new(GatedSchedule::default());
    let session = SlotSession::new(SlotAvailabilityResolver::new(schedule.clone()));

    let gate = schedule.gate("doc-1");
    let mut pending = task::spawn(session.refresh(Some("doc-1"), Some(date(2026, 10, 16))));
    assert_pending!(pending.poll());

    session.clear().await;
    gate.send(Ok(vec![ScheduleEntry::new("10:00")])).unwrap();

    assert_matches!(assert_ready!(pending.poll()), SlotRefresh::Superseded);
    assert!(session.current().await.is_none());
}

#[tokio::test]
async fn test_session_sequential_refreshes_apply() {
    let session = SlotSession::new(SlotAvailabilityResolver::new(Arc::new(FixedSchedule(Ok(vec!["09:00"])))));

    assert_eq!(
        session.refresh(Some("doc-1"), Some(date(2026, 10, 16))).await,
        SlotRefresh::Applied(slots(&["9:00 AM"]))
    );
    assert_eq!(
        session.refresh(None, None).await,
        SlotRefresh::Applied(template())
    );
    assert_eq!(session.current().await.unwrap().slots, template());
}
