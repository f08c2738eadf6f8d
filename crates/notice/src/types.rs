//! Core value types shared by every layer of the notice manager.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identity of a notice within one manager.
///
/// Keys are either supplied by the caller or generated as `<prefix>-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoticeKey(Arc<str>);

impl NoticeKey {
	pub fn new(key: impl AsRef<str>) -> Self {
		Self(Arc::from(key.as_ref()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NoticeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NoticeKey {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for NoticeKey {
	fn from(value: String) -> Self {
		Self(Arc::from(value))
	}
}

/// Render identity of a notice.
///
/// Usually stable for the lifetime of a key; the slot-reuse eviction strategy
/// hands an evicted notice's slot to its replacement so painters can animate a
/// position reuse instead of a remove plus insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SlotId(pub u64);

/// Named screen region that groups and stacks notices independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
	/// Top edge, horizontally centered.
	Top,
	/// Top-left corner.
	TopLeft,
	/// Top-right corner (default).
	#[default]
	TopRight,
	/// Bottom edge, horizontally centered.
	Bottom,
	/// Bottom-left corner.
	BottomLeft,
	/// Bottom-right corner.
	BottomRight,
}

impl Placement {
	pub const ALL: [Placement; 6] = [
		Placement::Top,
		Placement::TopLeft,
		Placement::TopRight,
		Placement::Bottom,
		Placement::BottomLeft,
		Placement::BottomRight,
	];

	/// Returns true for placements anchored to the top edge; their stacks grow downward.
	pub const fn is_top(self) -> bool {
		matches!(self, Placement::Top | Placement::TopLeft | Placement::TopRight)
	}

	/// Returns true for horizontally centered placements.
	pub const fn is_centered(self) -> bool {
		matches!(self, Placement::Top | Placement::Bottom)
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Placement::Top => "top",
			Placement::TopLeft => "top_left",
			Placement::TopRight => "top_right",
			Placement::Bottom => "bottom",
			Placement::BottomLeft => "bottom_left",
			Placement::BottomRight => "bottom_right",
		}
	}
}

impl fmt::Display for Placement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Controls automatic dismissal of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoClose {
	/// Notice stays until closed explicitly.
	#[default]
	Never,
	/// Notice closes once this much unpaused time has elapsed.
	After(Duration),
}

impl AutoClose {
	/// Converts a caller-supplied duration in seconds.
	///
	/// Zero means "never auto-close"; negative, NaN and infinite values are rejected.
	pub fn from_secs(secs: f64) -> Result<Self> {
		if !secs.is_finite() || secs < 0.0 {
			return Err(Error::InvalidDuration(secs));
		}
		if secs == 0.0 {
			return Ok(AutoClose::Never);
		}
		Duration::try_from_secs_f64(secs)
			.map(AutoClose::After)
			.map_err(|_| Error::InvalidDuration(secs))
	}

	pub fn duration(self) -> Option<Duration> {
		match self {
			AutoClose::Never => None,
			AutoClose::After(d) => Some(d),
		}
	}
}

/// Measured size of a rendered notice, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
	pub width: f32,
	pub height: f32,
}

impl Size {
	pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

	pub const fn new(width: f32, height: f32) -> Self {
		Self { width, height }
	}
}
