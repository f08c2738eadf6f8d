//! Measurement registration boundary.
//!
//! The rendering side registers a size provider per notice key when the notice
//! mounts and unregisters it when it unmounts. Providers are queried on every
//! render pass; the manager never measures anything itself.

use std::collections::HashMap;
use std::fmt;

use crate::types::{NoticeKey, Size};

pub trait Measure {
	fn measure(&self) -> Size;
}

impl Measure for Size {
	fn measure(&self) -> Size {
		*self
	}
}

impl<F> Measure for F
where
	F: Fn() -> Size,
{
	fn measure(&self) -> Size {
		self()
	}
}

#[derive(Default)]
pub struct MeasureRegistry {
	providers: HashMap<NoticeKey, Box<dyn Measure>>,
}

impl fmt::Debug for MeasureRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MeasureRegistry").field("registered", &self.providers.len()).finish()
	}
}

impl MeasureRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers or replaces the provider for `key`.
	pub fn register(&mut self, key: NoticeKey, provider: impl Measure + 'static) {
		self.providers.insert(key, Box::new(provider));
	}

	pub fn unregister(&mut self, key: &NoticeKey) -> bool {
		self.providers.remove(key).is_some()
	}

	/// Current size of `key`; unregistered notices measure as [`Size::ZERO`].
	pub fn size_of(&self, key: &NoticeKey) -> Size {
		self.providers.get(key).map_or(Size::ZERO, |provider| provider.measure())
	}

	pub fn contains(&self, key: &NoticeKey) -> bool {
		self.providers.contains_key(key)
	}

	pub fn clear(&mut self) {
		self.providers.clear();
	}
}
