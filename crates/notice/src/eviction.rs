//! `max_count` enforcement for a placement group.
//!
//! Eviction runs only when a new key enters a group. After it runs and the
//! incoming notice is appended, the group holds exactly `cap` entries and the
//! incoming notice is the newest one.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::notice::OpenConfig;
use crate::types::SlotId;

/// Strategy for making room in a full group. One strategy applies to a whole manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eviction {
	/// Remove the oldest entries; the incoming notice keeps its own slot.
	#[default]
	DropOldest,
	/// Remove the oldest entries; the incoming notice inherits the render slot
	/// of the last evicted entry with `times` bumped, so painters can animate a
	/// position reuse instead of a remove plus insert.
	ReuseSlot,
}

/// Entries removed to make room, oldest first.
#[derive(Debug)]
pub struct EvictionOutcome<C> {
	pub evicted: Vec<OpenConfig<C>>,
	/// Slot handed to the incoming notice under [`Eviction::ReuseSlot`].
	pub reused_slot: Option<SlotId>,
}

impl<C> Default for EvictionOutcome<C> {
	fn default() -> Self {
		Self {
			evicted: Vec::new(),
			reused_slot: None,
		}
	}
}

impl<C> EvictionOutcome<C> {
	pub fn is_empty(&self) -> bool {
		self.evicted.is_empty()
	}
}

impl Eviction {
	/// Evicts from the front of `entries` until `incoming` fits under `cap`.
	///
	/// `cap` of `None` means unbounded. `incoming` is not inserted here. Only a
	/// `fresh` key may inherit an evicted slot; a notice moved in from another
	/// placement keeps its own slot and `times`.
	pub fn make_room<C>(
		self,
		entries: &mut VecDeque<OpenConfig<C>>,
		cap: Option<usize>,
		incoming: &mut OpenConfig<C>,
		fresh: bool,
	) -> EvictionOutcome<C> {
		let Some(cap) = cap else {
			return EvictionOutcome::default();
		};

		let excess = (entries.len() + 1).saturating_sub(cap);
		let evicted: Vec<_> = entries.drain(..excess.min(entries.len())).collect();

		let reused_slot = match (self, evicted.last()) {
			(Eviction::ReuseSlot, Some(last)) if fresh => {
				incoming.slot = last.slot;
				incoming.times = last.times.saturating_add(1);
				Some(last.slot)
			}
			_ => None,
		};

		EvictionOutcome { evicted, reused_slot }
	}
}
