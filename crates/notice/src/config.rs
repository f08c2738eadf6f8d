//! Manager-level defaults and options.
//!
//! Every field has a default, so an empty TOML document is a valid configuration:
//!
//! ```toml
//! key_prefix = "toast"
//! max_count = 3
//! duration = 3.0
//! placement = "bottom_right"
//! stack = { threshold = 3, offset = 8, gap = 16 }
//! eviction = "reuse_slot"
//! ```

use serde::Deserialize;

use crate::error::Result;
use crate::eviction::Eviction;
use crate::stack::StackConfig;
use crate::types::{AutoClose, Placement};

/// Default auto-close duration in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 4.5;

/// Default task queue depth that triggers a degraded-state warning.
pub const DEFAULT_QUEUE_HIGH_WATER: usize = 64;

/// Stacking toggle: `stack = true` for defaults, or a table of overrides.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StackSetting {
	Toggle(bool),
	Custom(StackConfig),
}

impl Default for StackSetting {
	fn default() -> Self {
		StackSetting::Toggle(false)
	}
}

impl StackSetting {
	/// Resolved stack parameters, or `None` when stacking is disabled.
	pub fn resolve(self) -> Option<StackConfig> {
		match self {
			StackSetting::Toggle(false) => None,
			StackSetting::Toggle(true) => Some(StackConfig::default()),
			StackSetting::Custom(config) => Some(config),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagerConfig {
	/// Prefix for generated keys (`<prefix>-<n>`).
	pub key_prefix: String,
	/// Per-placement cap; `<= 0` disables eviction.
	pub max_count: i64,
	/// Default auto-close in seconds; `0` or `None` disables auto-close.
	pub duration: Option<f64>,
	pub closable: bool,
	pub placement: Placement,
	pub stack: StackSetting,
	pub pause_on_hover: bool,
	pub pause_on_focus_loss: bool,
	pub show_progress: bool,
	pub eviction: Eviction,
	pub queue_high_water: usize,
}

impl Default for ManagerConfig {
	fn default() -> Self {
		Self {
			key_prefix: "notice".to_string(),
			max_count: 0,
			duration: Some(DEFAULT_DURATION_SECS),
			closable: false,
			placement: Placement::TopRight,
			stack: StackSetting::default(),
			pause_on_hover: true,
			pause_on_focus_loss: true,
			show_progress: false,
			eviction: Eviction::default(),
			queue_high_water: DEFAULT_QUEUE_HIGH_WATER,
		}
	}
}

impl ManagerConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config: ManagerConfig = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<()> {
		if let Some(secs) = self.duration {
			AutoClose::from_secs(secs)?;
		}
		if let Some(stack) = self.stack.resolve() {
			stack.validate()?;
		}
		Ok(())
	}

	/// Cap as a count, or `None` when unbounded.
	pub fn cap(&self) -> Option<usize> {
		usize::try_from(self.max_count).ok().filter(|&cap| cap > 0)
	}

	#[must_use]
	pub fn with_max_count(mut self, max_count: i64) -> Self {
		self.max_count = max_count;
		self
	}

	#[must_use]
	pub fn with_duration(mut self, secs: Option<f64>) -> Self {
		self.duration = secs;
		self
	}

	#[must_use]
	pub fn with_stack(mut self, stack: StackSetting) -> Self {
		self.stack = stack;
		self
	}

	#[must_use]
	pub fn with_eviction(mut self, eviction: Eviction) -> Self {
		self.eviction = eviction;
		self
	}

	#[must_use]
	pub fn with_placement(mut self, placement: Placement) -> Self {
		self.placement = placement;
		self
	}
}
