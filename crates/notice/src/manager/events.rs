use serde::Serialize;

use crate::types::{NoticeKey, Placement, SlotId};

/// Why a notice left its placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
	/// `close(key)` or the close affordance.
	Manual,
	/// Auto-close countdown reached zero.
	Expired,
	/// Pushed out by `max_count`.
	Evicted,
	/// Removed by `destroy()`.
	Destroyed,
}

/// Lifecycle edges recorded by the manager, drained with
/// [`NotificationManager::take_events`](super::NotificationManager::take_events).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NoticeEvent {
	Opened {
		key: NoticeKey,
		placement: Placement,
		slot: SlotId,
	},
	/// Same key opened again; the slot is kept and `times` incremented.
	Reopened {
		key: NoticeKey,
		placement: Placement,
		slot: SlotId,
		times: u32,
	},
	Closed {
		key: NoticeKey,
		placement: Placement,
		reason: CloseReason,
	},
	/// A placement finished its exit transitions and was dropped.
	PlacementEmptied { placement: Placement },
	/// The last registered placement went away.
	AllRemoved,
}

/// Keyboard activation delivered to a close affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyActivation {
	Enter,
	Space,
	Other,
}

impl KeyActivation {
	/// Enter and Space activate a focused close button; anything else is ignored.
	pub fn activates(self) -> bool {
		matches!(self, KeyActivation::Enter | KeyActivation::Space)
	}
}
