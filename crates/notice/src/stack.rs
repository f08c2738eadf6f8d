//! Stacking geometry for a placement's notices.
//!
//! [`layout`] is a pure function of the ordered sizes, the placement, the hover
//! count and the [`StackConfig`]; it never measures anything itself.
//!
//! Notices are addressed by reverse index: `0` is the most recent. In the
//! collapsed state older notices peek out behind the newest one by `offset`
//! pixels each and shrink horizontally; in the expanded state they are laid out
//! at their real measured heights separated by `gap`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Placement, Size};

pub const DEFAULT_OFFSET: f32 = 8.0;
pub const DEFAULT_THRESHOLD: usize = 3;
pub const DEFAULT_GAP: f32 = 16.0;

/// Reverse index beyond which collapsed notices share the same minimal scale.
pub const MAX_SCALE_STEPS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackConfig {
	/// Notice count above which the stack collapses (unless hovered).
	pub threshold: usize,
	/// Per-step vertical offset when collapsed, in pixels.
	pub offset: f32,
	/// Spacing between notices when expanded, in pixels.
	pub gap: f32,
}

impl Default for StackConfig {
	fn default() -> Self {
		Self {
			threshold: DEFAULT_THRESHOLD,
			offset: DEFAULT_OFFSET,
			gap: DEFAULT_GAP,
		}
	}
}

impl StackConfig {
	pub fn validate(&self) -> Result<()> {
		if self.threshold == 0 {
			return Err(Error::InvalidStack("threshold must be at least 1"));
		}
		if !self.offset.is_finite() || self.offset < 0.0 {
			return Err(Error::InvalidStack("offset must be a finite, non-negative number"));
		}
		if !self.gap.is_finite() || self.gap < 0.0 {
			return Err(Error::InvalidStack("gap must be a finite, non-negative number"));
		}
		Ok(())
	}
}

/// Horizontal self-translation applied to centered placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalShift {
	#[default]
	None,
	/// Shift left by half of the notice's own width.
	HalfSelf,
}

/// Geometry for one notice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StackTransform {
	pub translate_x: HorizontalShift,
	/// Vertical offset in pixels; negative for bottom placements.
	pub translate_y: f32,
	pub scale_x: f32,
	/// Forced height; `None` keeps the natural height.
	pub height: Option<f32>,
}

impl StackTransform {
	fn in_place(placement: Placement) -> Self {
		Self {
			translate_x: shift_for(placement),
			translate_y: 0.0,
			scale_x: 1.0,
			height: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackLayout {
	pub expanded: bool,
	/// One transform per notice, in the same (oldest-first) order as the input.
	pub transforms: Vec<StackTransform>,
}

impl StackLayout {
	/// Layout for placements without stacking: every notice in place.
	pub fn flat(count: usize, placement: Placement) -> Self {
		Self {
			expanded: true,
			transforms: vec![StackTransform::in_place(placement); count],
		}
	}
}

fn shift_for(placement: Placement) -> HorizontalShift {
	if placement.is_centered() {
		HorizontalShift::HalfSelf
	} else {
		HorizontalShift::None
	}
}

/// Returns true when the stack shows every notice at full size.
pub fn is_expanded(count: usize, hovered: usize, config: &StackConfig) -> bool {
	hovered > 0 || count <= config.threshold
}

/// Computes per-notice transforms.
///
/// `sizes` lists the measured size of each notice oldest first; `hovered` is
/// the number of notices of this placement currently under the pointer or
/// holding focus.
pub fn layout(sizes: &[Size], placement: Placement, hovered: usize, config: &StackConfig) -> StackLayout {
	let count = sizes.len();
	let expanded = is_expanded(count, hovered, config);
	let Some(&latest) = sizes.last() else {
		return StackLayout {
			expanded,
			transforms: Vec::new(),
		};
	};
	let direction = if placement.is_top() { 1.0 } else { -1.0 };

	let transforms = sizes
		.iter()
		.enumerate()
		.map(|(position, own)| {
			let index = count - 1 - position;
			if index == 0 {
				return StackTransform::in_place(placement);
			}

			let (offset, height, scale_x) = if expanded {
				let above: f32 = sizes[count - index..].iter().map(|size| size.height + config.gap).sum();
				(above, own.height, 1.0)
			} else {
				let steps = index.min(MAX_SCALE_STEPS) as f32;
				let scale_x = if latest.width > 0.0 && own.width > 0.0 {
					(latest.width - config.offset * 2.0 * steps) / own.width
				} else {
					1.0
				};
				(index as f32 * config.offset, latest.height, scale_x)
			};

			StackTransform {
				translate_x: shift_for(placement),
				translate_y: offset * direction,
				scale_x,
				height: Some(height),
			}
		})
		.collect();

	StackLayout { expanded, transforms }
}

#[cfg(test)]
mod tests;
