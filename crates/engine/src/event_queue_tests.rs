// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use monitor_core::EventKind;

fn event_at(now: Instant, offset_ms: u64, priority: i32) -> Event {
    Event::new(EventKind::StatusSave, now + std::time::Duration::from_millis(offset_ms))
        .priority(priority)
}

#[test]
fn pops_in_ascending_run_time_order() {
    let now = Instant::now();
    let mut queue = EventQueue::new();
    queue.push(event_at(now, 300, 0));
    queue.push(event_at(now, 100, 0));
    queue.push(event_at(now, 200, 0));

    let first = queue.pop().unwrap();
    let second = queue.pop().unwrap();
    let third = queue.pop().unwrap();
    assert!(first.run_time < second.run_time);
    assert!(second.run_time < third.run_time);
}

#[test]
fn ties_break_by_descending_priority() {
    let now = Instant::now();
    let run_time = now + std::time::Duration::from_millis(100);
    let mut queue = EventQueue::new();
    queue.push(Event::new(EventKind::StatusSave, run_time).priority(1));
    queue.push(Event::new(EventKind::StatusSave, run_time).priority(5));
    queue.push(Event::new(EventKind::StatusSave, run_time).priority(3));

    assert_eq!(queue.pop().unwrap().priority, 5);
    assert_eq!(queue.pop().unwrap().priority, 3);
    assert_eq!(queue.pop().unwrap().priority, 1);
}

#[test]
fn drain_ready_only_takes_events_at_or_before_the_horizon() {
    let now = Instant::now();
    let mut queue = EventQueue::new();
    queue.push(event_at(now, 50, 0));
    queue.push(event_at(now, 150, 0));
    queue.push(event_at(now, 250, 0));

    let ready = queue.drain_ready(now + std::time::Duration::from_millis(150));
    assert_eq!(ready.len(), 2);
    assert_eq!(queue.len(), 1);
}

#[test]
fn peek_does_not_remove_the_event() {
    let now = Instant::now();
    let mut queue = EventQueue::new();
    queue.push(event_at(now, 10, 0));
    assert!(queue.peek().is_some());
    assert_eq!(queue.len(), 1);
}
