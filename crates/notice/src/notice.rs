//! Caller-facing notice description and its resolved, manager-owned form.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::config::ManagerConfig;
use crate::error::{Error, Result};
use crate::types::{AutoClose, NoticeKey, Placement, SlotId};

/// Prefixes accepted for pass-through attribute names.
pub const ALLOWED_ATTRIBUTE_PREFIXES: &[&str] = &["data-", "aria-"];

/// Default close glyph when [`CloseOptions::icon`] is unset.
pub const DEFAULT_CLOSE_ICON: &str = "\u{00d7}";

/// Default accessible label for the close affordance.
pub const DEFAULT_CLOSE_LABEL: &str = "Close";

pub type CloseCallback = Box<dyn FnOnce()>;
pub type ClickCallback = Box<dyn FnMut()>;

/// Pass-through `data-*` / `aria-*` attributes, validated against an allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtraAttributes(BTreeMap<String, String>);

impl ExtraAttributes {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.0.insert(name.into(), value.into());
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Rejects any name outside [`ALLOWED_ATTRIBUTE_PREFIXES`] or with an empty suffix.
	pub fn validate(&self) -> Result<()> {
		for name in self.0.keys() {
			let allowed = ALLOWED_ATTRIBUTE_PREFIXES
				.iter()
				.any(|prefix| name.len() > prefix.len() && name.starts_with(prefix));
			if !allowed {
				return Err(Error::DisallowedAttribute(name.clone()));
			}
		}
		Ok(())
	}
}

/// Overrides for the close affordance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseOptions {
	pub icon: Option<String>,
	pub aria_label: Option<String>,
	pub attributes: ExtraAttributes,
}

/// Whether a notice shows a close affordance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Closable {
	#[default]
	Disabled,
	Enabled(CloseOptions),
}

impl From<bool> for Closable {
	fn from(value: bool) -> Self {
		if value {
			Closable::Enabled(CloseOptions::default())
		} else {
			Closable::Disabled
		}
	}
}

impl From<CloseOptions> for Closable {
	fn from(value: CloseOptions) -> Self {
		Closable::Enabled(value)
	}
}

impl Closable {
	/// Resolves the attributes the painter needs for an accessible close button.
	pub fn affordance(&self) -> Option<CloseAffordance> {
		match self {
			Closable::Disabled => None,
			Closable::Enabled(options) => Some(CloseAffordance {
				icon: options.icon.clone().unwrap_or_else(|| DEFAULT_CLOSE_ICON.to_string()),
				aria_label: options.aria_label.clone().unwrap_or_else(|| DEFAULT_CLOSE_LABEL.to_string()),
				role: "button",
				tab_index: 0,
				attributes: options.attributes.clone(),
			}),
		}
	}
}

/// Resolved close-button semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloseAffordance {
	pub icon: String,
	pub aria_label: String,
	pub role: &'static str,
	pub tab_index: i32,
	pub attributes: ExtraAttributes,
}

/// Caller-supplied description of one notice.
///
/// Unset fields inherit the manager defaults at `open` time.
pub struct NoticeConfig<C> {
	pub(crate) key: Option<NoticeKey>,
	pub(crate) content: C,
	pub(crate) duration: Option<f64>,
	pub(crate) closable: Option<Closable>,
	pub(crate) placement: Option<Placement>,
	pub(crate) pause_on_hover: Option<bool>,
	pub(crate) show_progress: Option<bool>,
	pub(crate) class_name: Option<String>,
	pub(crate) style: BTreeMap<String, String>,
	pub(crate) attributes: ExtraAttributes,
	pub(crate) on_close: Option<CloseCallback>,
	pub(crate) on_click: Option<ClickCallback>,
}

impl<C> NoticeConfig<C> {
	pub fn new(content: C) -> Self {
		Self {
			key: None,
			content,
			duration: None,
			closable: None,
			placement: None,
			pause_on_hover: None,
			show_progress: None,
			class_name: None,
			style: BTreeMap::new(),
			attributes: ExtraAttributes::new(),
			on_close: None,
			on_click: None,
		}
	}

	#[must_use]
	pub fn key(mut self, key: impl Into<NoticeKey>) -> Self {
		self.key = Some(key.into());
		self
	}

	/// Seconds until auto-close; `0.0` disables auto-close.
	#[must_use]
	pub fn duration(mut self, secs: f64) -> Self {
		self.duration = Some(secs);
		self
	}

	/// Disables auto-close regardless of the manager default.
	#[must_use]
	pub fn persistent(self) -> Self {
		self.duration(0.0)
	}

	#[must_use]
	pub fn closable(mut self, closable: impl Into<Closable>) -> Self {
		self.closable = Some(closable.into());
		self
	}

	#[must_use]
	pub fn placement(mut self, placement: Placement) -> Self {
		self.placement = Some(placement);
		self
	}

	#[must_use]
	pub fn pause_on_hover(mut self, pause: bool) -> Self {
		self.pause_on_hover = Some(pause);
		self
	}

	#[must_use]
	pub fn show_progress(mut self, show: bool) -> Self {
		self.show_progress = Some(show);
		self
	}

	#[must_use]
	pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
		self.class_name = Some(class_name.into());
		self
	}

	#[must_use]
	pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
		self.style.insert(property.into(), value.into());
		self
	}

	/// Adds a pass-through attribute; names are validated when the notice is opened.
	#[must_use]
	pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name, value);
		self
	}

	#[must_use]
	pub fn on_close(mut self, callback: impl FnOnce() + 'static) -> Self {
		self.on_close = Some(Box::new(callback));
		self
	}

	#[must_use]
	pub fn on_click(mut self, callback: impl FnMut() + 'static) -> Self {
		self.on_click = Some(Box::new(callback));
		self
	}

	pub fn key_ref(&self) -> Option<&NoticeKey> {
		self.key.as_ref()
	}
}

impl<C: fmt::Debug> fmt::Debug for NoticeConfig<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NoticeConfig")
			.field("key", &self.key)
			.field("content", &self.content)
			.field("duration", &self.duration)
			.field("closable", &self.closable)
			.field("placement", &self.placement)
			.field("has_on_close", &self.on_close.is_some())
			.finish_non_exhaustive()
	}
}

/// A notice as owned by the registry: key assigned, defaults merged, validated.
pub struct OpenConfig<C> {
	pub key: NoticeKey,
	/// Render identity; assigned by the registry on insert.
	pub slot: SlotId,
	/// Incremented every time the same key is re-opened.
	pub times: u32,
	pub content: C,
	pub auto_close: AutoClose,
	pub closable: Closable,
	pub placement: Placement,
	pub pause_on_hover: bool,
	pub show_progress: bool,
	pub class_name: Option<String>,
	pub style: BTreeMap<String, String>,
	pub attributes: ExtraAttributes,
	pub(crate) on_close: Option<CloseCallback>,
	pub(crate) on_click: Option<ClickCallback>,
}

impl<C> OpenConfig<C> {
	/// Merges `config` over `defaults` (per-call values win) and validates the result.
	pub fn resolve(config: NoticeConfig<C>, key: NoticeKey, defaults: &ManagerConfig) -> Result<Self> {
		let duration = config.duration.or(defaults.duration).unwrap_or(0.0);
		let auto_close = AutoClose::from_secs(duration)?;
		config.attributes.validate()?;

		let closable = config.closable.unwrap_or_else(|| Closable::from(defaults.closable));
		if let Closable::Enabled(options) = &closable {
			options.attributes.validate()?;
		}

		Ok(Self {
			key,
			slot: SlotId(0),
			times: 0,
			content: config.content,
			auto_close,
			closable,
			placement: config.placement.unwrap_or(defaults.placement),
			pause_on_hover: config.pause_on_hover.unwrap_or(defaults.pause_on_hover),
			show_progress: config.show_progress.unwrap_or(defaults.show_progress),
			class_name: config.class_name,
			style: config.style,
			attributes: config.attributes,
			on_close: config.on_close,
			on_click: config.on_click,
		})
	}

	/// Detaches the close callback so it can run at most once.
	pub(crate) fn take_on_close(&mut self) -> Option<CloseCallback> {
		self.on_close.take()
	}

	pub fn has_on_close(&self) -> bool {
		self.on_close.is_some()
	}
}

impl<C: fmt::Debug> fmt::Debug for OpenConfig<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OpenConfig")
			.field("key", &self.key)
			.field("slot", &self.slot)
			.field("times", &self.times)
			.field("content", &self.content)
			.field("auto_close", &self.auto_close)
			.field("placement", &self.placement)
			.finish_non_exhaustive()
	}
}
