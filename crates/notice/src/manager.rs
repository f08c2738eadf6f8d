//! The notification manager façade.
//!
//! [`NotificationManager`] owns the placement registry, the countdowns, the
//! measurement providers and the task queue. Every public operation goes
//! through the queue and is applied on the next flush; callbacks that need to
//! re-enter the manager capture a [`Notifier`] instead of the manager itself.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use std::time::{Duration, Instant};

mod events;
mod frame;

pub use events::{CloseReason, KeyActivation, NoticeEvent};
pub use frame::{AlwaysReady, NoticeFrame, PlacementFrame, RenderPlan, RenderSurface};

use crate::clock::{Clock, MonotonicClock};
use crate::config::ManagerConfig;
use crate::error::Result;
use crate::measure::{Measure, MeasureRegistry};
use crate::notice::{Closable, NoticeConfig, OpenConfig};
use crate::queue::{Notifier, Task};
use crate::registry::{InsertKind, InsertOutcome, PlacementGroup, PlacementRegistry};
use crate::stack::{self, StackConfig, StackLayout};
use crate::timer::{Countdown, PauseReasons, TimerController, TimerState};
use crate::types::{AutoClose, NoticeKey, Placement, Size};

/// Builder for [`NotificationManager`].
pub struct ManagerBuilder<C> {
	config: ManagerConfig,
	clock: Box<dyn Clock>,
	surface: Box<dyn RenderSurface>,
	on_all_removed: Option<Box<dyn FnMut()>>,
	_content: PhantomData<fn() -> C>,
}

impl<C> ManagerBuilder<C> {
	/// Time source for countdowns. Defaults to [`MonotonicClock`].
	#[must_use]
	pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
		self.clock = Box::new(clock);
		self
	}

	/// Readiness check for the rendering surface. Defaults to [`AlwaysReady`].
	#[must_use]
	pub fn surface(mut self, surface: impl RenderSurface + 'static) -> Self {
		self.surface = Box::new(surface);
		self
	}

	/// Called each time the last placement is dropped.
	#[must_use]
	pub fn on_all_removed(mut self, callback: impl FnMut() + 'static) -> Self {
		self.on_all_removed = Some(Box::new(callback));
		self
	}

	pub fn build(self) -> Result<NotificationManager<C>> {
		self.config.validate()?;
		let stack = self.config.stack.resolve();
		let registry = PlacementRegistry::new(self.config.eviction, self.config.cap());
		let config = Rc::new(self.config);
		tracing::debug!(
			max_count = config.max_count,
			stacked = stack.is_some(),
			eviction = ?config.eviction,
			"manager.build"
		);

		Ok(NotificationManager {
			notifier: Notifier::new(Rc::clone(&config)),
			config,
			stack,
			registry,
			timers: TimerController::new(),
			measures: MeasureRegistry::new(),
			surface: self.surface,
			clock: self.clock,
			on_all_removed: self.on_all_removed,
			page_active: true,
			events: Vec::new(),
		})
	}
}

/// Lifecycle and layout manager for toast-style notices.
///
/// Generic over the content type `C`, which the manager stores and hands back
/// in [`NoticeFrame`]s without inspecting it.
pub struct NotificationManager<C> {
	config: Rc<ManagerConfig>,
	stack: Option<StackConfig>,
	registry: PlacementRegistry<C>,
	timers: TimerController,
	measures: MeasureRegistry,
	notifier: Notifier<C>,
	surface: Box<dyn RenderSurface>,
	clock: Box<dyn Clock>,
	on_all_removed: Option<Box<dyn FnMut()>>,
	page_active: bool,
	events: Vec<NoticeEvent>,
}

impl<C> fmt::Debug for NotificationManager<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NotificationManager")
			.field("notices", &self.registry.len())
			.field("pending", &self.notifier.pending())
			.field("page_active", &self.page_active)
			.field("stack", &self.stack)
			.finish_non_exhaustive()
	}
}

impl<C> NotificationManager<C> {
	pub fn builder(config: ManagerConfig) -> ManagerBuilder<C> {
		ManagerBuilder {
			config,
			clock: Box::new(MonotonicClock),
			surface: Box::new(AlwaysReady),
			on_all_removed: None,
			_content: PhantomData,
		}
	}

	/// Manager with a monotonic clock and an always-ready surface.
	pub fn new(config: ManagerConfig) -> Result<Self> {
		Self::builder(config).build()
	}

	pub fn config(&self) -> &ManagerConfig {
		&self.config
	}

	/// Handle for issuing operations from callbacks.
	pub fn notifier(&self) -> Notifier<C> {
		self.notifier.clone()
	}

	/// Opens a notice, or re-opens the notice with the same key.
	///
	/// The config is validated immediately; the insert itself is applied once
	/// the surface is ready.
	pub fn open(&mut self, config: NoticeConfig<C>) -> Result<NoticeKey> {
		let key = self.notifier.open(config)?;
		self.flush();
		Ok(key)
	}

	/// Closes `key`. Unknown keys are ignored.
	pub fn close(&mut self, key: impl Into<NoticeKey>) {
		self.notifier.close(key);
		self.flush();
	}

	/// Closes every notice and drops every placement.
	pub fn destroy(&mut self) {
		self.notifier.destroy();
		self.flush();
	}

	/// Applies queued tasks in FIFO order while the surface reports ready.
	///
	/// Tasks enqueued by callbacks during the flush are applied in the same call.
	/// Returns the number of tasks applied.
	pub fn flush(&mut self) -> usize {
		let mut applied = 0;
		while self.notifier.pending() > 0 {
			if !self.surface.is_ready() {
				tracing::trace!(pending = self.notifier.pending(), "queue.deferred");
				break;
			}
			let batch = self.notifier.drain();
			let now = self.clock.now();
			tracing::trace!(tasks = batch.len(), "queue.flush");
			for queued in batch {
				self.apply(queued.task, now);
				applied += 1;
			}
		}
		applied
	}

	/// Number of operations waiting for the surface.
	pub fn pending_tasks(&self) -> usize {
		self.notifier.pending()
	}

	/// Closes every notice whose countdown reached zero, in placement order.
	///
	/// Returns the number of notices that expired.
	pub fn tick(&mut self) -> usize {
		self.flush();
		let now = self.clock.now();
		let mut expired = 0;
		for key in self.registry.keys() {
			if self.timers.poll(&key, now) {
				tracing::debug!(key = %key, "notice.expire");
				self.remove_notice(&key, CloseReason::Expired, now);
				expired += 1;
			}
		}
		if expired > 0 {
			self.flush();
		}
		expired
	}

	/// Earliest instant at which [`tick`](Self::tick) has work to do.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.timers.next_deadline()
	}

	pub fn pointer_enter(&mut self, key: &NoticeKey) -> bool {
		self.set_hovered(key, true)
	}

	pub fn pointer_leave(&mut self, key: &NoticeKey) -> bool {
		self.set_hovered(key, false)
	}

	fn set_hovered(&mut self, key: &NoticeKey, hovered: bool) -> bool {
		let now = self.clock.now();
		let Some(placement) = self.registry.set_hovered(key, hovered) else {
			return false;
		};
		tracing::trace!(key = %key, %placement, hovered, "notice.hover");
		self.sync_holds(placement, now);
		true
	}

	/// Reports page focus/visibility. Countdowns are held while inactive when
	/// `pause_on_focus_loss` is set.
	pub fn set_page_active(&mut self, active: bool) {
		if self.page_active == active {
			return;
		}
		self.page_active = active;
		tracing::debug!(active, "manager.page_active");
		let now = self.clock.now();
		for placement in self.placements() {
			self.sync_holds(placement, now);
		}
	}

	pub fn is_page_active(&self) -> bool {
		self.page_active
	}

	/// Delivers a click on the notice body to its click handler.
	pub fn click(&mut self, key: &NoticeKey) -> bool {
		let Some(entry) = self.registry.get_mut(key) else {
			return false;
		};
		if let Some(on_click) = entry.on_click.as_mut() {
			on_click();
		}
		self.flush();
		true
	}

	/// Pointer activation of the close affordance.
	pub fn press_close(&mut self, key: &NoticeKey) -> bool {
		self.close_via_affordance(key)
	}

	/// Keyboard activation of a focused close affordance.
	pub fn activate_close(&mut self, key: &NoticeKey, activation: KeyActivation) -> bool {
		activation.activates() && self.close_via_affordance(key)
	}

	fn close_via_affordance(&mut self, key: &NoticeKey) -> bool {
		let closable = self
			.registry
			.get(key)
			.is_some_and(|entry| matches!(entry.closable, Closable::Enabled(_)));
		if closable {
			self.close(key.clone());
		}
		closable
	}

	/// Changes the auto-close duration of a live notice.
	///
	/// Restarts the countdown only when the value actually changes. Returns
	/// whether a restart happened.
	pub fn update_duration(&mut self, key: &NoticeKey, secs: f64) -> Result<bool> {
		let auto_close = AutoClose::from_secs(secs)?;
		let now = self.clock.now();
		let Some(entry) = self.registry.get_mut(key) else {
			return Ok(false);
		};
		if entry.auto_close == auto_close {
			return Ok(false);
		}
		entry.auto_close = auto_close;
		let held = self.timers.get(key).map(Countdown::held).unwrap_or_default();
		self.timers.arm(key, auto_close, held, now);
		tracing::debug!(key = %key, ?auto_close, "notice.rearm");
		Ok(true)
	}

	/// Attaches a size provider to a live notice. Unknown keys are ignored.
	pub fn register_measure(&mut self, key: NoticeKey, provider: impl Measure + 'static) -> bool {
		if !self.registry.contains(&key) {
			return false;
		}
		self.measures.register(key, provider);
		true
	}

	pub fn unregister_measure(&mut self, key: &NoticeKey) -> bool {
		self.measures.unregister(key)
	}

	/// Acknowledges that the last exit transition of `placement` finished.
	///
	/// Drops the placement when it is still empty. Returns false when it was
	/// repopulated in the meantime or is unknown.
	pub fn placement_exit_finished(&mut self, placement: Placement) -> bool {
		if !self.registry.acknowledge_empty(placement) {
			return false;
		}
		self.retire(placement);
		self.check_all_removed();
		self.flush();
		true
	}

	/// Flushes what the surface accepts, then lays out every placement.
	pub fn render_pass(&mut self) -> RenderPlan<'_, C> {
		self.flush();
		self.plan()
	}

	/// Lays out every placement without applying queued tasks.
	pub fn plan(&self) -> RenderPlan<'_, C> {
		let now = self.clock.now();
		let placements = self
			.registry
			.groups()
			.map(|(placement, group)| self.placement_frame(placement, group, now))
			.collect();
		RenderPlan {
			placements,
			pending: self.notifier.pending(),
		}
	}

	fn placement_frame<'a>(&'a self, placement: Placement, group: &'a PlacementGroup<C>, now: Instant) -> PlacementFrame<'a, C> {
		let layout = match &self.stack {
			Some(stack) => {
				let sizes: Vec<Size> = group.iter().map(|entry| self.measures.size_of(&entry.key)).collect();
				stack::layout(&sizes, placement, group.hovered_count(), stack)
			}
			None => StackLayout::flat(group.len(), placement),
		};

		let notices = group
			.iter()
			.zip(layout.transforms)
			.map(|(entry, transform)| NoticeFrame {
				key: &entry.key,
				slot: entry.slot,
				times: entry.times,
				content: &entry.content,
				transform,
				hovered: group.is_hovered(&entry.key),
				close: entry.closable.affordance(),
				progress: entry
					.show_progress
					.then(|| self.timers.get(&entry.key).and_then(|countdown| countdown.elapsed_fraction(now)))
					.flatten(),
				class_name: entry.class_name.as_deref(),
				style: &entry.style,
				attributes: &entry.attributes,
			})
			.collect();

		PlacementFrame {
			placement,
			stacked: self.stack.is_some(),
			expanded: layout.expanded,
			exiting: group.is_empty(),
			notices,
		}
	}

	/// Drains the recorded lifecycle events.
	pub fn take_events(&mut self) -> Vec<NoticeEvent> {
		std::mem::take(&mut self.events)
	}

	pub fn contains(&self, key: &NoticeKey) -> bool {
		self.registry.contains(key)
	}

	pub fn get(&self, key: &NoticeKey) -> Option<&OpenConfig<C>> {
		self.registry.get(key)
	}

	pub fn placement_of(&self, key: &NoticeKey) -> Option<Placement> {
		self.registry.placement_of(key)
	}

	/// Registered placements, including empty ones awaiting acknowledgment.
	pub fn placements(&self) -> Vec<Placement> {
		self.registry.groups().map(|(placement, _)| placement).collect()
	}

	/// Keys of `placement`, oldest first.
	pub fn keys(&self, placement: Placement) -> Vec<NoticeKey> {
		self.registry.group(placement).map(PlacementGroup::keys).unwrap_or_default()
	}

	pub fn len(&self) -> usize {
		self.registry.len()
	}

	pub fn is_empty(&self) -> bool {
		self.registry.is_empty()
	}

	pub fn timer_state(&self, key: &NoticeKey) -> Option<TimerState> {
		self.timers.get(key).map(Countdown::state)
	}

	pub fn remaining(&self, key: &NoticeKey) -> Option<Duration> {
		self.timers.get(key)?.remaining(self.clock.now())
	}

	pub fn hold_reasons(&self, key: &NoticeKey) -> Option<PauseReasons> {
		self.timers.get(key).map(Countdown::held)
	}

	fn apply(&mut self, task: Task<C>, now: Instant) {
		match task {
			Task::Open(config) => self.apply_open(config, now),
			Task::Close(key) => {
				if !self.remove_notice(&key, CloseReason::Manual, now) {
					tracing::trace!(key = %key, "notice.close.absent");
				}
			}
			Task::Destroy => self.destroy_now(),
		}
	}

	fn apply_open(&mut self, config: OpenConfig<C>, now: Instant) {
		let key = config.key.clone();
		let auto_close = config.auto_close;
		let InsertOutcome {
			kind,
			placement,
			slot,
			times,
			previous,
			eviction,
		} = self.registry.insert(config);
		// Replaced configs are discarded without firing their close callback.
		drop(previous);

		let evicted = !eviction.evicted.is_empty();
		for entry in eviction.evicted {
			tracing::debug!(key = %entry.key, %placement, "notice.evict");
			self.finish_close(placement, entry, CloseReason::Evicted);
		}

		let held = self
			.registry
			.group(placement)
			.zip(self.registry.get(&key))
			.map(|(group, entry)| desired_holds(entry, group, self.stack.is_some(), self.focus_lost()))
			.unwrap_or_default();
		self.timers.arm(&key, auto_close, held, now);

		match kind {
			InsertKind::New => {
				tracing::debug!(key = %key, %placement, slot = slot.0, "notice.open");
				self.events.push(NoticeEvent::Opened { key, placement, slot });
			}
			InsertKind::Replaced | InsertKind::Moved { .. } => {
				tracing::debug!(key = %key, %placement, times, "notice.open");
				self.events.push(NoticeEvent::Reopened {
					key,
					placement,
					slot,
					times,
				});
			}
		}

		if let InsertKind::Moved { from } = kind {
			self.sync_holds(from, now);
		}
		if evicted {
			self.sync_holds(placement, now);
		}
	}

	fn remove_notice(&mut self, key: &NoticeKey, reason: CloseReason, now: Instant) -> bool {
		let Some((placement, entry)) = self.registry.remove(key) else {
			return false;
		};
		self.finish_close(placement, entry, reason);
		self.sync_holds(placement, now);
		true
	}

	fn destroy_now(&mut self) {
		let placements = self.placements();
		let drained = self.registry.drain_all();
		tracing::debug!(notices = drained.len(), placements = placements.len(), "manager.destroy");
		for (placement, entry) in drained {
			self.finish_close(placement, entry, CloseReason::Destroyed);
		}
		for placement in placements {
			self.retire(placement);
		}
		self.check_all_removed();
	}

	/// Tears down per-notice state and runs the close callback once.
	fn finish_close(&mut self, placement: Placement, mut entry: OpenConfig<C>, reason: CloseReason) {
		self.timers.cancel(&entry.key);
		self.measures.unregister(&entry.key);
		tracing::debug!(key = %entry.key, %placement, ?reason, "notice.close");
		self.events.push(NoticeEvent::Closed {
			key: entry.key.clone(),
			placement,
			reason,
		});
		if let Some(on_close) = entry.take_on_close() {
			on_close();
		}
	}

	fn retire(&mut self, placement: Placement) {
		tracing::debug!(%placement, "placement.retire");
		self.events.push(NoticeEvent::PlacementEmptied { placement });
	}

	fn check_all_removed(&mut self) {
		if !self.registry.take_all_removed_edge() {
			return;
		}
		tracing::debug!("manager.all_removed");
		self.events.push(NoticeEvent::AllRemoved);
		if let Some(on_all_removed) = self.on_all_removed.as_mut() {
			on_all_removed();
		}
	}

	fn focus_lost(&self) -> bool {
		self.config.pause_on_focus_loss && !self.page_active
	}

	/// Brings every countdown of `placement` in line with the current hover and focus state.
	fn sync_holds(&mut self, placement: Placement, now: Instant) {
		let Some(group) = self.registry.group(placement) else {
			return;
		};
		let stacked = self.stack.is_some();
		let focus_lost = self.focus_lost();
		for entry in group.iter() {
			let held = desired_holds(entry, group, stacked, focus_lost);
			for reason in PauseReasons::all().iter() {
				if held.contains(reason) {
					self.timers.pause(&entry.key, reason, now);
				} else {
					self.timers.resume(&entry.key, reason, now);
				}
			}
		}
	}
}

/// Pause reasons that should hold `entry` given its group's hover state.
///
/// With stacking on, hovering any notice of the placement holds all of them.
fn desired_holds<C>(entry: &OpenConfig<C>, group: &PlacementGroup<C>, stacked: bool, focus_lost: bool) -> PauseReasons {
	let mut held = PauseReasons::empty();
	if entry.pause_on_hover {
		held.set(PauseReasons::HOVER, group.is_hovered(&entry.key));
		held.set(PauseReasons::STACK_HOVER, stacked && group.hovered_count() > 0);
	}
	held.set(PauseReasons::FOCUS_LOSS, focus_lost);
	held
}
