//! Time sources for countdowns.
//!
//! Timers never read time on their own; the manager samples its clock once per
//! operation and passes the instant down.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub trait Clock {
	fn now(&self) -> Instant;
}

/// Wall-clock monotonic time.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
	fn now(&self) -> Instant {
		Instant::now()
	}
}

/// Manually advanced clock shared between clones.
///
/// Used by tests and the scenario simulator to drive countdowns deterministically.
#[derive(Debug, Clone)]
pub struct ManualClock {
	now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
	fn default() -> Self {
		Self::new()
	}
}

impl ManualClock {
	pub fn new() -> Self {
		Self::starting_at(Instant::now())
	}

	pub fn starting_at(start: Instant) -> Self {
		Self {
			now: Rc::new(Cell::new(start)),
		}
	}

	pub fn advance(&self, by: Duration) {
		self.now.set(self.now.get() + by);
	}

	/// Moves the clock to `at`; earlier instants are ignored.
	pub fn set(&self, at: Instant) {
		if at > self.now.get() {
			self.now.set(at);
		}
	}
}

impl Clock for ManualClock {
	fn now(&self) -> Instant {
		self.now.get()
	}
}
