use herald_notice::{CloseReason, ManagerConfig, NoticeConfig, NoticeEvent, Placement};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::{CloseLog, manager};

#[test]
fn destroy_closes_in_placement_then_insertion_order() {
	let (mut manager, _clock) = manager(ManagerConfig::default());
	let log = CloseLog::default();
	let opens = [
		("a", Placement::TopRight),
		("b", Placement::Bottom),
		("c", Placement::TopRight),
		("d", Placement::Bottom),
	];
	for (key, placement) in opens {
		manager
			.open(NoticeConfig::new(key.to_string()).key(key).placement(placement).on_close(log.hook(key)))
			.unwrap();
	}
	manager.take_events();

	manager.destroy();
	assert_eq!(log.entries(), vec!["a", "c", "b", "d"]);
	assert!(manager.placements().is_empty());

	let events = manager.take_events();
	assert!(
		events
			.iter()
			.take(4)
			.all(|e| matches!(e, NoticeEvent::Closed { reason: CloseReason::Destroyed, .. }))
	);
	assert_eq!(
		events[4..].to_vec(),
		vec![
			NoticeEvent::PlacementEmptied {
				placement: Placement::TopRight
			},
			NoticeEvent::PlacementEmptied {
				placement: Placement::Bottom
			},
			NoticeEvent::AllRemoved,
		]
	);
}

#[test]
fn empty_placement_waits_for_exit_acknowledgment() {
	let (mut manager, _clock) = manager(ManagerConfig::default());
	manager.open(NoticeConfig::new("a".to_string()).key("a")).unwrap();
	manager.open(NoticeConfig::new("b".to_string()).key("b").placement(Placement::Top)).unwrap();
	manager.close("a");
	manager.take_events();

	assert_eq!(manager.placements(), vec![Placement::TopRight, Placement::Top]);
	assert!(manager.placement_exit_finished(Placement::TopRight));
	assert_eq!(
		manager.take_events(),
		vec![NoticeEvent::PlacementEmptied {
			placement: Placement::TopRight
		}]
	);

	manager.close("b");
	assert!(manager.placement_exit_finished(Placement::Top));
	assert_eq!(
		manager.take_events(),
		vec![
			NoticeEvent::Closed {
				key: "b".into(),
				placement: Placement::Top,
				reason: CloseReason::Manual,
			},
			NoticeEvent::PlacementEmptied { placement: Placement::Top },
			NoticeEvent::AllRemoved,
		]
	);
}

#[test]
fn repopulated_placement_is_not_dropped() {
	let (mut manager, _clock) = manager(ManagerConfig::default());
	manager.open(NoticeConfig::new("a".to_string()).key("a")).unwrap();
	manager.close("a");
	manager.open(NoticeConfig::new("b".to_string()).key("b")).unwrap();

	assert!(!manager.placement_exit_finished(Placement::TopRight));
	assert_eq!(manager.placements(), vec![Placement::TopRight]);
}

#[derive(Debug, Clone)]
enum Op {
	Open(u8, u8),
	Close(u8),
	Ack(u8),
	Destroy,
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		(0u8..4, 0u8..3).prop_map(|(k, p)| Op::Open(k, p)),
		(0u8..4).prop_map(Op::Close),
		(0u8..3).prop_map(Op::Ack),
		Just(Op::Destroy),
	]
}

const PLACEMENTS: [Placement; 3] = [Placement::TopRight, Placement::Bottom, Placement::TopLeft];

proptest! {
	#[test]
	fn all_removed_fires_once_per_emptying(ops in proptest::collection::vec(op(), 0..40)) {
		let (mut manager, _clock) = manager(ManagerConfig::default());
		for op in ops {
			match op {
				Op::Open(k, p) => {
					manager
						.open(NoticeConfig::new(String::new()).key(format!("k{k}")).placement(PLACEMENTS[p as usize]))
						.unwrap();
				}
				Op::Close(k) => manager.close(format!("k{k}")),
				Op::Ack(p) => {
					manager.placement_exit_finished(PLACEMENTS[p as usize]);
				}
				Op::Destroy => manager.destroy(),
			}
		}
		manager.destroy();

		let mut populated = false;
		for event in manager.take_events() {
			match event {
				NoticeEvent::Opened { .. } | NoticeEvent::Reopened { .. } => populated = true,
				NoticeEvent::AllRemoved => {
					prop_assert!(populated, "all-removed fired while already empty");
					populated = false;
				}
				_ => {}
			}
		}
		prop_assert!(!populated);
		prop_assert!(manager.placements().is_empty());
	}
}

proptest! {
	#[test]
	fn close_callbacks_fire_once_per_open(closes in proptest::collection::vec(0u8..3, 0..20)) {
		let (mut manager, _clock) = manager(ManagerConfig::default());
		let log = CloseLog::default();
		for k in 0..3u8 {
			let key = format!("k{k}");
			manager.open(NoticeConfig::new(String::new()).key(key.as_str()).on_close(log.hook(&key))).unwrap();
		}
		for k in &closes {
			manager.close(format!("k{k}"));
		}

		for k in 0..3u8 {
			let key = format!("k{k}");
			let expected = usize::from(closes.contains(&k));
			prop_assert_eq!(log.count(&key), expected);
			prop_assert_eq!(manager.contains(&key.as_str().into()), expected == 0);
		}
	}
}
