//! Shared fixtures for manager integration tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use herald_notice::{ManagerConfig, ManualClock, NotificationManager};

pub type Manager = NotificationManager<String>;

/// Builds a manager on a manual clock with an always-ready surface.
pub fn manager(config: ManagerConfig) -> (Manager, ManualClock) {
	let _ = tracing_subscriber::fmt::try_init();
	let clock = ManualClock::new();
	let manager = NotificationManager::builder(config).clock(clock.clone()).build().unwrap();
	(manager, clock)
}

/// Surface whose readiness the test flips by hand.
#[derive(Clone, Default)]
pub struct Gate(Rc<Cell<bool>>);

impl Gate {
	pub fn open(&self) {
		self.0.set(true);
	}

	pub fn readiness(&self) -> impl FnMut() -> bool + 'static {
		let ready = Rc::clone(&self.0);
		move || ready.get()
	}
}

/// Records the order in which close callbacks ran.
#[derive(Clone, Default)]
pub struct CloseLog(Rc<RefCell<Vec<String>>>);

impl CloseLog {
	pub fn hook(&self, key: &str) -> impl FnOnce() + 'static {
		let log = Rc::clone(&self.0);
		let key = key.to_string();
		move || log.borrow_mut().push(key)
	}

	pub fn entries(&self) -> Vec<String> {
		self.0.borrow().clone()
	}

	pub fn count(&self, key: &str) -> usize {
		self.0.borrow().iter().filter(|k| *k == key).count()
	}
}
