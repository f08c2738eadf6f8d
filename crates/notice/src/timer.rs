//! Per-notice auto-close countdowns.
//!
//! A [`Countdown`] is an explicit state machine driven only by transition
//! events (arm, pause, resume, restart, poll); nothing is re-derived from
//! configuration on re-render. Remaining time is captured on pause and resumed
//! as-is, so pausing never extends or shortens the total unpaused lifetime.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use bitflags::bitflags;

use crate::types::{AutoClose, NoticeKey};

bitflags! {
	/// Reasons a countdown is currently held.
	///
	/// A countdown runs only while no reason is set.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct PauseReasons: u8 {
		/// Pointer is over this notice.
		const HOVER = 1 << 0;
		/// Pointer is over another notice of the same stacked placement.
		const STACK_HOVER = 1 << 1;
		/// Page lost focus or became hidden.
		const FOCUS_LOSS = 1 << 2;
	}
}

/// Observable countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
	/// No auto-close configured.
	Idle,
	/// Counting down.
	Running,
	/// Held by at least one [`PauseReasons`] flag.
	Paused,
	/// Reached zero; reported exactly once by [`Countdown::poll`].
	Fired,
}

#[derive(Debug, Clone)]
pub struct Countdown {
	duration: Option<Duration>,
	/// Remaining time as of the last pause (or arm) point.
	remaining: Duration,
	/// Set while running.
	started_at: Option<Instant>,
	held: PauseReasons,
	fired: bool,
}

impl Countdown {
	/// Creates a countdown that starts immediately unless `held` is non-empty.
	pub fn new(auto_close: AutoClose, held: PauseReasons, now: Instant) -> Self {
		let mut countdown = Self {
			duration: None,
			remaining: Duration::ZERO,
			started_at: None,
			held,
			fired: false,
		};
		countdown.restart(auto_close, now);
		countdown
	}

	pub fn state(&self) -> TimerState {
		if self.fired {
			TimerState::Fired
		} else if self.duration.is_none() {
			TimerState::Idle
		} else if self.started_at.is_some() {
			TimerState::Running
		} else {
			TimerState::Paused
		}
	}

	pub fn duration(&self) -> Option<Duration> {
		self.duration
	}

	pub fn held(&self) -> PauseReasons {
		self.held
	}

	/// Restarts with a fresh full duration.
	///
	/// Pause reasons survive a restart: a notice re-opened under the pointer stays held.
	pub fn restart(&mut self, auto_close: AutoClose, now: Instant) {
		self.duration = auto_close.duration();
		self.remaining = self.duration.unwrap_or_default();
		self.fired = false;
		self.started_at = (self.duration.is_some() && self.held.is_empty()).then_some(now);
	}

	/// Adds a pause reason, capturing the remaining time if the countdown was running.
	pub fn pause(&mut self, reason: PauseReasons, now: Instant) {
		self.held.insert(reason);
		if let Some(started) = self.started_at.take() {
			self.remaining = self.remaining.saturating_sub(now.saturating_duration_since(started));
		}
	}

	/// Clears a pause reason; resumes from the captured remaining time once no reason is left.
	pub fn resume(&mut self, reason: PauseReasons, now: Instant) {
		self.held.remove(reason);
		if self.held.is_empty() && self.duration.is_some() && !self.fired && self.started_at.is_none() {
			self.started_at = Some(now);
		}
	}

	/// Remaining unpaused time, or `None` when idle.
	pub fn remaining(&self, now: Instant) -> Option<Duration> {
		self.duration?;
		if self.fired {
			return Some(Duration::ZERO);
		}
		Some(match self.started_at {
			Some(started) => self.remaining.saturating_sub(now.saturating_duration_since(started)),
			None => self.remaining,
		})
	}

	/// Instant the countdown reaches zero if it keeps running.
	///
	/// `None` when the deadline is past what `Instant` can represent; such a
	/// countdown never fires.
	pub fn deadline(&self) -> Option<Instant> {
		self.started_at.and_then(|started| started.checked_add(self.remaining))
	}

	/// Fraction of the duration already consumed, frozen while paused.
	pub fn elapsed_fraction(&self, now: Instant) -> Option<f32> {
		let duration = self.duration?;
		let remaining = self.remaining(now)?;
		if duration.is_zero() {
			return Some(1.0);
		}
		Some((1.0 - remaining.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0) as f32)
	}

	/// Returns true the first time the countdown is observed at zero.
	pub fn poll(&mut self, now: Instant) -> bool {
		match self.deadline() {
			Some(deadline) if now >= deadline => {
				self.started_at = None;
				self.remaining = Duration::ZERO;
				self.fired = true;
				true
			}
			_ => false,
		}
	}
}

/// Owns one countdown per notice key.
///
/// Holds no notice data beyond the key; removal of the notice must cancel the
/// countdown, and cancelling is idempotent.
#[derive(Debug, Default)]
pub struct TimerController {
	timers: HashMap<NoticeKey, Countdown>,
}

impl TimerController {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates the countdown for a new notice, or restarts an existing one.
	///
	/// `held` replaces whatever pause reasons the previous countdown carried.
	pub fn arm(&mut self, key: &NoticeKey, auto_close: AutoClose, held: PauseReasons, now: Instant) {
		match self.timers.get_mut(key) {
			Some(countdown) => {
				countdown.held = held;
				countdown.restart(auto_close, now);
			}
			None => {
				self.timers.insert(key.clone(), Countdown::new(auto_close, held, now));
			}
		}
	}

	/// Removes the countdown. Returns true if one existed.
	pub fn cancel(&mut self, key: &NoticeKey) -> bool {
		self.timers.remove(key).is_some()
	}

	pub fn clear(&mut self) {
		self.timers.clear();
	}

	pub fn pause(&mut self, key: &NoticeKey, reason: PauseReasons, now: Instant) {
		if let Some(countdown) = self.timers.get_mut(key) {
			countdown.pause(reason, now);
		}
	}

	pub fn resume(&mut self, key: &NoticeKey, reason: PauseReasons, now: Instant) {
		if let Some(countdown) = self.timers.get_mut(key) {
			countdown.resume(reason, now);
		}
	}

	/// Returns true the first time the countdown for `key` is observed at zero.
	pub fn poll(&mut self, key: &NoticeKey, now: Instant) -> bool {
		self.timers.get_mut(key).is_some_and(|countdown| countdown.poll(now))
	}

	pub fn get(&self, key: &NoticeKey) -> Option<&Countdown> {
		self.timers.get(key)
	}

	/// Earliest instant at which any running countdown fires.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.timers.values().filter_map(Countdown::deadline).min()
	}

	pub fn len(&self) -> usize {
		self.timers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.timers.is_empty()
	}
}
