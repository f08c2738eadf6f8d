use std::collections::BTreeMap;

use serde::Serialize;

use crate::notice::{CloseAffordance, ExtraAttributes};
use crate::stack::StackTransform;
use crate::types::{NoticeKey, Placement, SlotId};

/// Readiness check for the host's rendering surface.
///
/// Queued operations are applied only while the surface answers true. It
/// is asked again on every flush, so a surface that appears later picks up the
/// backlog on the next operation or render pass.
pub trait RenderSurface {
	fn is_ready(&mut self) -> bool;
}

impl<F> RenderSurface for F
where
	F: FnMut() -> bool,
{
	fn is_ready(&mut self) -> bool {
		self()
	}
}

/// Surface that is ready from the start.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReady;

impl RenderSurface for AlwaysReady {
	fn is_ready(&mut self) -> bool {
		true
	}
}

/// Everything the host paints in one pass, placement by placement.
#[derive(Debug, Serialize)]
pub struct RenderPlan<'a, C> {
	pub placements: Vec<PlacementFrame<'a, C>>,
	/// Operations still waiting for the surface.
	pub pending: usize,
}

impl<'a, C> RenderPlan<'a, C> {
	pub fn placement(&self, placement: Placement) -> Option<&PlacementFrame<'a, C>> {
		self.placements.iter().find(|frame| frame.placement == placement)
	}

	pub fn notice(&self, key: &NoticeKey) -> Option<&NoticeFrame<'a, C>> {
		self.placements.iter().flat_map(|frame| frame.notices.iter()).find(|notice| notice.key == key)
	}
}

#[derive(Debug, Serialize)]
pub struct PlacementFrame<'a, C> {
	pub placement: Placement,
	pub stacked: bool,
	pub expanded: bool,
	/// Empty group still waiting for `placement_exit_finished`.
	pub exiting: bool,
	/// Oldest first.
	pub notices: Vec<NoticeFrame<'a, C>>,
}

#[derive(Debug, Serialize)]
pub struct NoticeFrame<'a, C> {
	pub key: &'a NoticeKey,
	/// Render identity; stable across re-opens of the same key.
	pub slot: SlotId,
	pub times: u32,
	pub content: &'a C,
	pub transform: StackTransform,
	pub hovered: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub close: Option<CloseAffordance>,
	/// Consumed fraction of the countdown, present when progress display is on.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub progress: Option<f32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub class_name: Option<&'a str>,
	#[serde(skip_serializing_if = "no_style")]
	pub style: &'a BTreeMap<String, String>,
	#[serde(skip_serializing_if = "ExtraAttributes::is_empty")]
	pub attributes: &'a ExtraAttributes,
}

fn no_style(style: &&BTreeMap<String, String>) -> bool {
	style.is_empty()
}
