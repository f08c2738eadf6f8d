use std::cell::Cell;
use std::rc::Rc;

use herald_notice::{ManagerConfig, NoticeConfig, NoticeKey, NotificationManager, Placement};
use pretty_assertions::assert_eq;

use crate::common::{CloseLog, manager};

#[test]
fn close_callback_can_open_and_close_through_notifier() {
	let (mut manager, _clock) = manager(ManagerConfig::default());
	let log = CloseLog::default();
	manager.open(NoticeConfig::new("c".to_string()).key("c").on_close(log.hook("c"))).unwrap();

	let notifier = manager.notifier();
	manager
		.open(NoticeConfig::new("a".to_string()).key("a").on_close(move || {
			notifier.open(NoticeConfig::new("b".to_string()).key("b")).unwrap();
			notifier.close("c");
		}))
		.unwrap();

	manager.close("a");
	assert_eq!(manager.pending_tasks(), 0);
	assert_eq!(manager.keys(Placement::TopRight), vec![NoticeKey::new("b")]);
	assert_eq!(log.count("c"), 1);
}

#[test]
fn close_callback_closing_itself_is_harmless() {
	let (mut manager, _clock) = manager(ManagerConfig::default());
	let calls = Rc::new(Cell::new(0));
	let counter = Rc::clone(&calls);
	let notifier = manager.notifier();
	manager
		.open(NoticeConfig::new("a".to_string()).key("a").on_close(move || {
			counter.set(counter.get() + 1);
			notifier.close("a");
		}))
		.unwrap();

	manager.close("a");
	manager.close("a");
	assert_eq!(calls.get(), 1);
	assert!(manager.is_empty());
}

#[test]
fn all_removed_callback_can_reopen() {
	let _ = tracing_subscriber::fmt::try_init();
	let fired = Rc::new(Cell::new(0));
	let counter = Rc::clone(&fired);
	let mut manager = NotificationManager::<String>::builder(ManagerConfig::default())
		.on_all_removed(move || counter.set(counter.get() + 1))
		.build()
		.unwrap();

	let notifier = manager.notifier();
	manager
		.open(NoticeConfig::new("a".to_string()).key("a").on_close(move || {
			notifier.open(NoticeConfig::new("again".to_string()).key("again")).unwrap();
		}))
		.unwrap();

	manager.destroy();
	assert_eq!(fired.get(), 1);
	assert!(manager.contains(&NoticeKey::new("again")));
}

#[test]
fn click_handler_can_close_its_notice() {
	let (mut manager, _clock) = manager(ManagerConfig::default());
	let notifier = manager.notifier();
	let key = manager
		.open(NoticeConfig::new("a".to_string()).key("a").on_click(move || notifier.close("a")))
		.unwrap();

	assert!(manager.click(&key));
	assert!(!manager.contains(&key));
}
