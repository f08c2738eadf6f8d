//! Drives a [`NotificationManager`] through a scenario on a manual clock.

use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Context;
use herald_notice::{Clock, Closable, ManualClock, NoticeConfig, NoticeEvent, NoticeKey, NotificationManager, RenderPlan, Size};
use serde::Serialize;

use crate::script::{Op, Scenario, Step};

/// One output line.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record<'a> {
	Event {
		at_ms: u64,
		#[serde(flatten)]
		event: NoticeEvent,
	},
	Frame {
		at_ms: u64,
		plan: RenderPlan<'a, String>,
	},
	Rejected {
		at_ms: u64,
		error: String,
	},
}

pub struct Runner<W> {
	manager: NotificationManager<String>,
	clock: ManualClock,
	start: Instant,
	ready: Rc<Cell<bool>>,
	frames: bool,
	out: W,
}

impl<W: Write> Runner<W> {
	pub fn new(scenario: &Scenario, frames: bool, out: W) -> anyhow::Result<Self> {
		let clock = ManualClock::new();
		let ready = Rc::new(Cell::new(scenario.ready));
		let gate = Rc::clone(&ready);
		let manager = NotificationManager::builder(scenario.manager.clone())
			.clock(clock.clone())
			.surface(move || gate.get())
			.build()
			.context("building manager")?;

		Ok(Self {
			manager,
			start: clock.now(),
			clock,
			ready,
			frames,
			out,
		})
	}

	/// Applies every step, then runs timers up to `until_ms`.
	pub fn run(mut self, steps: &[Step], until_ms: Option<u64>) -> anyhow::Result<W> {
		for step in steps {
			self.advance_to(step.at_ms)?;
			tracing::debug!(at_ms = step.at_ms, op = ?step.op, "sim.step");
			self.apply(step.at_ms, &step.op)?;
			self.emit_events(step.at_ms)?;
			if self.frames {
				self.emit_frame(step.at_ms)?;
			}
		}
		if let Some(until) = until_ms {
			self.advance_to(until)?;
		}
		Ok(self.out)
	}

	/// Fires every deadline up to `at_ms` at its own instant.
	fn advance_to(&mut self, at_ms: u64) -> anyhow::Result<()> {
		let target = self
			.start
			.checked_add(Duration::from_millis(at_ms))
			.with_context(|| format!("step at {at_ms}ms is past the clock range"))?;
		while let Some(deadline) = self.manager.next_deadline()
			&& deadline <= target
		{
			self.clock.set(deadline);
			let expired = self.manager.tick();
			let deadline_ms = self.ms_since_start(deadline);
			tracing::trace!(at_ms = deadline_ms, expired, "sim.tick");
			self.emit_events(deadline_ms)?;
		}
		self.clock.set(target);
		Ok(())
	}

	fn apply(&mut self, at_ms: u64, op: &Op) -> anyhow::Result<()> {
		let manager = &mut self.manager;
		match op {
			Op::Open {
				key,
				content,
				duration,
				placement,
				closable,
				pause_on_hover,
				show_progress,
				attributes,
			} => {
				let mut config = NoticeConfig::new(content.clone());
				if let Some(key) = key {
					config = config.key(key.as_str());
				}
				if let Some(secs) = duration {
					config = config.duration(*secs);
				}
				if let Some(placement) = placement {
					config = config.placement(*placement);
				}
				if let Some(closable) = closable {
					config = config.closable(Closable::from(*closable));
				}
				if let Some(pause) = pause_on_hover {
					config = config.pause_on_hover(*pause);
				}
				if let Some(show) = show_progress {
					config = config.show_progress(*show);
				}
				for (name, value) in attributes {
					config = config.attribute(name.as_str(), value.as_str());
				}
				if let Err(error) = manager.open(config) {
					tracing::warn!(at_ms, %error, "sim.rejected");
					return self.write(&Record::Rejected {
						at_ms,
						error: error.to_string(),
					});
				}
			}
			Op::Close { key } => manager.close(key.as_str()),
			Op::Destroy => manager.destroy(),
			Op::Hover { key } => {
				manager.pointer_enter(&NoticeKey::new(key));
			}
			Op::Leave { key } => {
				manager.pointer_leave(&NoticeKey::new(key));
			}
			Op::Click { key } => {
				manager.click(&NoticeKey::new(key));
			}
			Op::PressClose { key } => {
				manager.press_close(&NoticeKey::new(key));
			}
			Op::Blur => manager.set_page_active(false),
			Op::Focus => manager.set_page_active(true),
			Op::Ready => {
				self.ready.set(true);
				manager.flush();
			}
			Op::Measure { key, width, height } => {
				manager.register_measure(NoticeKey::new(key), Size::new(*width, *height));
			}
			Op::Ack { placement } => {
				manager.placement_exit_finished(*placement);
			}
			Op::Render => return self.emit_frame(at_ms),
		}
		Ok(())
	}

	fn emit_events(&mut self, at_ms: u64) -> anyhow::Result<()> {
		for event in self.manager.take_events() {
			self.write(&Record::Event { at_ms, event })?;
		}
		Ok(())
	}

	fn emit_frame(&mut self, at_ms: u64) -> anyhow::Result<()> {
		let plan = self.manager.render_pass();
		write_line(&mut self.out, &Record::Frame { at_ms, plan })
	}

	fn write(&mut self, record: &Record<'_>) -> anyhow::Result<()> {
		write_line(&mut self.out, record)
	}

	fn ms_since_start(&self, at: Instant) -> u64 {
		u64::try_from(at.saturating_duration_since(self.start).as_millis()).unwrap_or(u64::MAX)
	}
}

fn write_line(out: &mut impl Write, record: &Record<'_>) -> anyhow::Result<()> {
	serde_json::to_writer(&mut *out, record).context("encoding record")?;
	out.write_all(b"\n").context("writing record")?;
	Ok(())
}
