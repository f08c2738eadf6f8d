//! Notice lifecycle and layout manager for toast-style notifications.
//!
//! The crate owns everything about a notice except painting it: the per-placement
//! queues of active notices, the auto-close countdown with pause/resume, the
//! `max_count` eviction policy, the collapsed/expanded stacking geometry, and a
//! task queue that buffers calls issued before the rendering surface exists.
//!
//! The host UI consumes a [`RenderPlan`] on every render pass and reports back
//! through narrow hooks: pointer and focus events, measured sizes, and the
//! "placement exit finished" acknowledgment.
//!
//! # Example
//!
//! ```
//! use herald_notice::{ManualClock, ManagerConfig, NoticeConfig, NotificationManager};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut manager = NotificationManager::<String>::builder(ManagerConfig::default())
//! 	.clock(clock.clone())
//! 	.build()
//! 	.unwrap();
//!
//! let key = manager.open(NoticeConfig::new("Saved".to_string()).duration(1.0)).unwrap();
//! assert!(manager.contains(&key));
//!
//! clock.advance(Duration::from_secs(1));
//! manager.tick();
//! assert!(!manager.contains(&key));
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod eviction;
pub mod manager;
pub mod measure;
pub mod notice;
pub mod queue;
pub mod registry;
pub mod stack;
pub mod timer;
pub mod types;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{ManagerConfig, StackSetting};
pub use error::{Error, Result};
pub use eviction::{Eviction, EvictionOutcome};
pub use manager::{
	AlwaysReady, CloseReason, KeyActivation, ManagerBuilder, NoticeEvent, NoticeFrame, NotificationManager, PlacementFrame,
	RenderPlan, RenderSurface,
};
pub use measure::{Measure, MeasureRegistry};
pub use notice::{CloseAffordance, CloseOptions, Closable, ExtraAttributes, NoticeConfig, OpenConfig};
pub use queue::{Notifier, Task, TaskQueue};
pub use registry::{PlacementGroup, PlacementRegistry};
pub use stack::{HorizontalShift, StackConfig, StackLayout, StackTransform, layout};
pub use timer::{Countdown, PauseReasons, TimerController, TimerState};
pub use types::{AutoClose, NoticeKey, Placement, SlotId, Size};
