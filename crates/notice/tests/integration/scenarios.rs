use std::time::Duration;

use herald_notice::{
	CloseReason, Eviction, ManagerConfig, ManualClock, NoticeConfig, NoticeEvent, NoticeKey, NotificationManager, Placement,
	Size, StackSetting,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{CloseLog, Gate, manager};

fn ms(m: u64) -> Duration {
	Duration::from_millis(m)
}

#[test]
fn expired_notice_is_removed_and_closed_once() {
	let (mut manager, clock) = manager(ManagerConfig::default());
	let log = CloseLog::default();
	let key = manager
		.open(NoticeConfig::new("saved".to_string()).key("a").duration(1.0).on_close(log.hook("a")))
		.unwrap();

	clock.advance(ms(999));
	assert_eq!(manager.tick(), 0);
	assert!(manager.contains(&key));

	clock.advance(ms(1));
	assert_eq!(manager.tick(), 1);
	assert!(!manager.contains(&key));
	assert_eq!(log.count("a"), 1);

	clock.advance(ms(5000));
	manager.tick();
	assert_eq!(log.count("a"), 1);
}

#[rstest]
#[case::drop_oldest(Eviction::DropOldest)]
#[case::reuse_slot(Eviction::ReuseSlot)]
fn cap_of_one_keeps_only_the_newest(#[case] eviction: Eviction) {
	let (mut manager, _clock) = manager(ManagerConfig::default().with_max_count(1).with_eviction(eviction));
	let log = CloseLog::default();
	manager.open(NoticeConfig::new("x".to_string()).key("x").on_close(log.hook("x"))).unwrap();
	manager.open(NoticeConfig::new("y".to_string()).key("y")).unwrap();

	assert_eq!(manager.keys(Placement::TopRight), vec![NoticeKey::new("y")]);
	assert_eq!(manager.len(), 1);
	assert_eq!(log.entries(), vec!["x"]);

	let closed: Vec<_> = manager
		.take_events()
		.into_iter()
		.filter(|event| matches!(event, NoticeEvent::Closed { .. }))
		.collect();
	assert_eq!(
		closed,
		vec![NoticeEvent::Closed {
			key: NoticeKey::new("x"),
			placement: Placement::TopRight,
			reason: CloseReason::Evicted,
		}]
	);
}

#[test]
fn reuse_slot_hands_the_evicted_slot_to_the_newcomer() {
	let config = ManagerConfig::default().with_max_count(1).with_eviction(Eviction::ReuseSlot);
	let (mut manager, _clock) = manager(config);
	manager.open(NoticeConfig::new("x".to_string()).key("x")).unwrap();
	let x_slot = manager.get(&NoticeKey::new("x")).unwrap().slot;
	manager.open(NoticeConfig::new("y".to_string()).key("y")).unwrap();

	let y = manager.get(&NoticeKey::new("y")).unwrap();
	assert_eq!(y.slot, x_slot);
	assert_eq!(y.times, 1);
}

#[test]
fn same_key_reopen_ignores_the_cap() {
	let (mut manager, _clock) = manager(ManagerConfig::default().with_max_count(2));
	manager.open(NoticeConfig::new("a".to_string()).key("a")).unwrap();
	manager.open(NoticeConfig::new("b".to_string()).key("b")).unwrap();
	manager.open(NoticeConfig::new("a2".to_string()).key("a")).unwrap();

	assert_eq!(manager.keys(Placement::TopRight), vec![NoticeKey::new("a"), NoticeKey::new("b")]);
	assert_eq!(manager.get(&NoticeKey::new("a")).unwrap().times, 1);
}

#[test]
fn hover_pause_preserves_consumed_time() {
	let (mut manager, clock) = manager(ManagerConfig::default());
	let key = manager.open(NoticeConfig::new("k".to_string()).key("k").duration(1.0)).unwrap();

	clock.advance(ms(500));
	manager.pointer_enter(&key);

	clock.advance(ms(500));
	assert_eq!(manager.tick(), 0);

	clock.advance(ms(500));
	manager.pointer_leave(&key);
	assert_eq!(manager.remaining(&key), Some(ms(500)));

	clock.advance(ms(499));
	assert_eq!(manager.tick(), 0);
	clock.advance(ms(1));
	assert_eq!(manager.tick(), 1);
	assert!(!manager.contains(&key));
}

#[test]
fn stack_collapses_past_threshold_and_expands_on_hover() {
	let (mut manager, _clock) = manager(ManagerConfig::default().with_stack(StackSetting::Toggle(true)));
	let mut keys = Vec::new();
	for n in 0..3 {
		let key = manager.open(NoticeConfig::new(format!("n{n}"))).unwrap();
		manager.register_measure(key.clone(), Size::new(320.0, 60.0));
		keys.push(key);
	}
	assert!(manager.render_pass().placement(Placement::TopRight).unwrap().expanded);

	let fourth = manager.open(NoticeConfig::new("n3".to_string())).unwrap();
	manager.register_measure(fourth, Size::new(320.0, 60.0));
	assert!(!manager.render_pass().placement(Placement::TopRight).unwrap().expanded);

	manager.pointer_enter(&keys[1]);
	let plan = manager.render_pass();
	let frame = plan.placement(Placement::TopRight).unwrap();
	assert!(frame.expanded);
	let offsets: Vec<f32> = frame.notices.iter().map(|n| n.transform.translate_y).collect();
	assert_eq!(offsets, vec![228.0, 152.0, 76.0, 0.0]);
}

#[test]
fn close_queued_behind_open_replays_in_order() {
	let _ = tracing_subscriber::fmt::try_init();
	let gate = Gate::default();
	let clock = ManualClock::new();
	let mut manager = NotificationManager::<String>::builder(ManagerConfig::default())
		.clock(clock)
		.surface(gate.readiness())
		.build()
		.unwrap();
	let log = CloseLog::default();

	let key = manager
		.open(NoticeConfig::new("z".to_string()).key("z").on_close(log.hook("z")))
		.unwrap();
	manager.close(key.clone());
	assert_eq!(manager.pending_tasks(), 2);
	assert!(!manager.contains(&key));
	assert!(manager.render_pass().placements.is_empty());

	gate.open();
	let plan = manager.render_pass();
	assert_eq!(plan.pending, 0);
	assert!(plan.notice(&key).is_none());
	assert!(!manager.contains(&key));
	assert_eq!(log.count("z"), 1);
}

#[test]
fn reopening_in_another_placement_moves_the_notice() {
	let (mut manager, _clock) = manager(ManagerConfig::default());
	manager.open(NoticeConfig::new("a".to_string()).key("a")).unwrap();
	manager
		.open(NoticeConfig::new("a".to_string()).key("a").placement(Placement::BottomLeft))
		.unwrap();

	assert_eq!(manager.placement_of(&NoticeKey::new("a")), Some(Placement::BottomLeft));
	assert!(manager.keys(Placement::TopRight).is_empty());
	assert_eq!(manager.len(), 1);
}
