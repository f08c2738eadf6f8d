//! Per-placement ordered collections of active notices.
//!
//! The registry is the single owner of notice state. Keys are unique across
//! the whole registry, which implies uniqueness within every placement.
//!
//! A placement that becomes empty stays in the map until the rendering side
//! acknowledges that its last exit transition finished
//! ([`PlacementRegistry::acknowledge_empty`]); this keeps a transiently empty
//! group from being torn down mid-transition.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexMap;

use crate::eviction::{Eviction, EvictionOutcome};
use crate::notice::OpenConfig;
use crate::types::{NoticeKey, Placement, SlotId};

/// Ordered notices of one placement, oldest first.
#[derive(Debug)]
pub struct PlacementGroup<C> {
	entries: VecDeque<OpenConfig<C>>,
	hovered: HashSet<NoticeKey>,
}

impl<C> Default for PlacementGroup<C> {
	fn default() -> Self {
		Self {
			entries: VecDeque::new(),
			hovered: HashSet::new(),
		}
	}
}

impl<C> PlacementGroup<C> {
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &OpenConfig<C>> {
		self.entries.iter()
	}

	pub fn keys(&self) -> Vec<NoticeKey> {
		self.entries.iter().map(|entry| entry.key.clone()).collect()
	}

	/// Number of notices currently under the pointer.
	pub fn hovered_count(&self) -> usize {
		self.hovered.len()
	}

	pub fn is_hovered(&self, key: &NoticeKey) -> bool {
		self.hovered.contains(key)
	}

	fn position(&self, key: &NoticeKey) -> Option<usize> {
		self.entries.iter().position(|entry| &entry.key == key)
	}

	fn take(&mut self, key: &NoticeKey) -> Option<OpenConfig<C>> {
		let position = self.position(key)?;
		self.hovered.remove(key);
		self.entries.remove(position)
	}
}

/// How an insert was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertKind {
	/// New key appended to its group.
	New,
	/// Existing key replaced in place.
	Replaced,
	/// Existing key re-opened under a different placement.
	Moved { from: Placement },
}

#[derive(Debug)]
pub struct InsertOutcome<C> {
	pub kind: InsertKind,
	pub placement: Placement,
	pub slot: SlotId,
	pub times: u32,
	/// Config that was replaced or moved, if any.
	pub previous: Option<OpenConfig<C>>,
	pub eviction: EvictionOutcome<C>,
}

#[derive(Debug)]
pub struct PlacementRegistry<C> {
	groups: IndexMap<Placement, PlacementGroup<C>>,
	index: HashMap<NoticeKey, Placement>,
	eviction: Eviction,
	cap: Option<usize>,
	next_slot: u64,
	/// Set once any placement exists; cleared when the all-removed edge is taken.
	populated: bool,
}

impl<C> PlacementRegistry<C> {
	pub fn new(eviction: Eviction, cap: Option<usize>) -> Self {
		Self {
			groups: IndexMap::new(),
			index: HashMap::new(),
			eviction,
			cap,
			next_slot: 0,
			populated: false,
		}
	}

	/// Inserts `config` into its placement, replacing an existing entry with the same key.
	///
	/// Only a key that is new to the target group triggers eviction; same-key
	/// replaces update in place regardless of the cap.
	pub fn insert(&mut self, mut config: OpenConfig<C>) -> InsertOutcome<C> {
		let placement = config.placement;

		if let Some(&current) = self.index.get(&config.key)
			&& current == placement
			&& let Some(group) = self.groups.get_mut(&placement)
			&& let Some(position) = group.position(&config.key)
		{
			let previous = &group.entries[position];
			config.slot = previous.slot;
			config.times = previous.times.saturating_add(1);
			let (slot, times) = (config.slot, config.times);
			let previous = std::mem::replace(&mut group.entries[position], config);
			return InsertOutcome {
				kind: InsertKind::Replaced,
				placement,
				slot,
				times,
				previous: Some(previous),
				eviction: EvictionOutcome::default(),
			};
		}

		let (kind, previous) = match self.take_entry(&config.key) {
			Some((from, previous)) => {
				config.slot = previous.slot;
				config.times = previous.times.saturating_add(1);
				(InsertKind::Moved { from }, Some(previous))
			}
			None => {
				config.slot = SlotId(self.next_slot);
				self.next_slot = self.next_slot.wrapping_add(1);
				(InsertKind::New, None)
			}
		};

		let group = self.groups.entry(placement).or_default();
		let fresh = kind == InsertKind::New;
		let eviction = self.eviction.make_room(&mut group.entries, self.cap, &mut config, fresh);
		for evicted in &eviction.evicted {
			group.hovered.remove(&evicted.key);
			self.index.remove(&evicted.key);
		}

		let (slot, times) = (config.slot, config.times);
		self.index.insert(config.key.clone(), placement);
		group.entries.push_back(config);
		self.populated = true;

		InsertOutcome {
			kind,
			placement,
			slot,
			times,
			previous,
			eviction,
		}
	}

	/// Removes the entry for `key`. Removing an absent key is a no-op.
	///
	/// The placement stays registered, possibly empty, until acknowledged.
	pub fn remove(&mut self, key: &NoticeKey) -> Option<(Placement, OpenConfig<C>)> {
		self.take_entry(key)
	}

	fn take_entry(&mut self, key: &NoticeKey) -> Option<(Placement, OpenConfig<C>)> {
		let placement = self.index.remove(key)?;
		let entry = self.groups.get_mut(&placement)?.take(key)?;
		Some((placement, entry))
	}

	/// Removes every entry and every placement at once, oldest first per placement.
	pub fn drain_all(&mut self) -> Vec<(Placement, OpenConfig<C>)> {
		self.index.clear();
		self.groups
			.drain(..)
			.flat_map(|(placement, group)| group.entries.into_iter().map(move |entry| (placement, entry)))
			.collect()
	}

	/// Drops an empty placement once its exit transitions completed.
	///
	/// Returns false when the placement is unknown or has been repopulated.
	pub fn acknowledge_empty(&mut self, placement: Placement) -> bool {
		match self.groups.get(&placement) {
			Some(group) if group.is_empty() => {
				self.groups.shift_remove(&placement);
				true
			}
			_ => false,
		}
	}

	/// Returns true exactly once per transition from "some placement registered" to "none".
	pub fn take_all_removed_edge(&mut self) -> bool {
		if self.populated && self.groups.is_empty() {
			self.populated = false;
			return true;
		}
		false
	}

	/// Marks `key` as hovered or not. Returns its placement when the key exists.
	pub fn set_hovered(&mut self, key: &NoticeKey, hovered: bool) -> Option<Placement> {
		let placement = *self.index.get(key)?;
		let group = self.groups.get_mut(&placement)?;
		if hovered {
			group.hovered.insert(key.clone());
		} else {
			group.hovered.remove(key);
		}
		Some(placement)
	}

	pub fn get(&self, key: &NoticeKey) -> Option<&OpenConfig<C>> {
		let placement = self.index.get(key)?;
		self.groups.get(placement)?.iter().find(|entry| &entry.key == key)
	}

	pub fn get_mut(&mut self, key: &NoticeKey) -> Option<&mut OpenConfig<C>> {
		let placement = self.index.get(key)?;
		self.groups.get_mut(placement)?.entries.iter_mut().find(|entry| &entry.key == key)
	}

	pub fn contains(&self, key: &NoticeKey) -> bool {
		self.index.contains_key(key)
	}

	pub fn placement_of(&self, key: &NoticeKey) -> Option<Placement> {
		self.index.get(key).copied()
	}

	pub fn group(&self, placement: Placement) -> Option<&PlacementGroup<C>> {
		self.groups.get(&placement)
	}

	/// Registered placements in first-registration order, including empty ones awaiting acknowledgment.
	pub fn groups(&self) -> impl Iterator<Item = (Placement, &PlacementGroup<C>)> {
		self.groups.iter().map(|(placement, group)| (*placement, group))
	}

	/// Every key, placement by placement, oldest first.
	pub fn keys(&self) -> Vec<NoticeKey> {
		self.groups.values().flat_map(PlacementGroup::keys).collect()
	}

	/// Total number of active notices.
	pub fn len(&self) -> usize {
		self.index.len()
	}

	pub fn is_empty(&self) -> bool {
		self.index.is_empty()
	}

	pub fn cap(&self) -> Option<usize> {
		self.cap
	}

	pub fn eviction(&self) -> Eviction {
		self.eviction
	}
}
