//! FIFO buffer for manager operations.
//!
//! Every `open`/`close`/`destroy` becomes a [`Task`] first. The manager drains
//! the queue as one ordered batch whenever the rendering surface reports ready,
//! so a `close` issued behind a still-queued `open` of the same key resolves
//! against the queued state. Tasks enqueued while a batch is being applied
//! (from inside a callback) join the same flush after the batch.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::config::ManagerConfig;
use crate::error::Result;
use crate::notice::{NoticeConfig, OpenConfig};
use crate::types::NoticeKey;

pub enum Task<C> {
	Open(OpenConfig<C>),
	Close(NoticeKey),
	Destroy,
}

impl<C> Task<C> {
	pub fn name(&self) -> &'static str {
		match self {
			Task::Open(_) => "open",
			Task::Close(_) => "close",
			Task::Destroy => "destroy",
		}
	}
}

impl<C> fmt::Debug for Task<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Task::Open(config) => f.debug_tuple("Open").field(&config.key).finish(),
			Task::Close(key) => f.debug_tuple("Close").field(key).finish(),
			Task::Destroy => f.write_str("Destroy"),
		}
	}
}

/// Queue entry carrying its enqueue sequence number.
#[derive(Debug)]
pub struct QueuedTask<C> {
	pub task: Task<C>,
	pub seq: u64,
}

#[derive(Debug)]
pub struct TaskQueue<C> {
	seq_next: u64,
	tasks: VecDeque<QueuedTask<C>>,
	high_water: usize,
	/// Set while depth is at or above `high_water`; re-armed once the queue drains.
	over_high_water: bool,
}

impl<C> TaskQueue<C> {
	pub fn new(high_water: usize) -> Self {
		Self {
			seq_next: 0,
			tasks: VecDeque::new(),
			high_water,
			over_high_water: false,
		}
	}

	/// Enqueues one task and returns its sequence number.
	pub fn enqueue(&mut self, task: Task<C>) -> u64 {
		let seq = self.seq_next;
		self.seq_next = self.seq_next.wrapping_add(1);
		tracing::trace!(seq, task = task.name(), depth = self.tasks.len() + 1, "queue.enqueue");
		self.tasks.push_back(QueuedTask { task, seq });

		if self.high_water > 0 && self.tasks.len() >= self.high_water && !self.over_high_water {
			self.over_high_water = true;
			tracing::warn!(
				depth = self.tasks.len(),
				high_water = self.high_water,
				"notice task queue is backing up; rendering surface not ready"
			);
		}
		seq
	}

	/// Removes and returns every queued task in FIFO order.
	pub fn drain(&mut self) -> Vec<QueuedTask<C>> {
		self.over_high_water = false;
		self.tasks.drain(..).collect()
	}

	pub fn len(&self) -> usize {
		self.tasks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tasks.is_empty()
	}

	pub fn is_over_high_water(&self) -> bool {
		self.over_high_water
	}
}

struct Shared<C> {
	queue: TaskQueue<C>,
	next_key: u64,
}

/// Cloneable handle that issues operations into a manager's task queue.
///
/// The handle is what callbacks capture to re-enter the manager: calls made
/// through it are validated immediately and applied on the manager's next flush.
pub struct Notifier<C> {
	shared: Rc<RefCell<Shared<C>>>,
	defaults: Rc<ManagerConfig>,
}

impl<C> Clone for Notifier<C> {
	fn clone(&self) -> Self {
		Self {
			shared: Rc::clone(&self.shared),
			defaults: Rc::clone(&self.defaults),
		}
	}
}

impl<C> fmt::Debug for Notifier<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Notifier").field("pending", &self.pending()).finish_non_exhaustive()
	}
}

impl<C> Notifier<C> {
	pub(crate) fn new(defaults: Rc<ManagerConfig>) -> Self {
		Self {
			shared: Rc::new(RefCell::new(Shared {
				queue: TaskQueue::new(defaults.queue_high_water),
				next_key: 0,
			})),
			defaults,
		}
	}

	/// Validates `config`, assigns its key, and queues it.
	///
	/// Returns the notice key; invalid configs are rejected without queueing anything.
	pub fn open(&self, mut config: NoticeConfig<C>) -> Result<NoticeKey> {
		let explicit = config.key.take();
		let placeholder = explicit.clone().unwrap_or_else(|| NoticeKey::new(""));
		let mut open = OpenConfig::resolve(config, placeholder, &self.defaults)?;
		// Generated only once the config is known good, so rejected opens leave no gap.
		if explicit.is_none() {
			open.key = self.generate_key();
		}
		let key = open.key.clone();
		self.shared.borrow_mut().queue.enqueue(Task::Open(open));
		Ok(key)
	}

	/// Queues removal of `key`. Unknown keys are ignored when applied.
	pub fn close(&self, key: impl Into<NoticeKey>) {
		self.shared.borrow_mut().queue.enqueue(Task::Close(key.into()));
	}

	/// Queues removal of every notice.
	pub fn destroy(&self) {
		self.shared.borrow_mut().queue.enqueue(Task::Destroy);
	}

	/// Number of queued, not yet applied tasks.
	pub fn pending(&self) -> usize {
		self.shared.borrow().queue.len()
	}

	pub fn defaults(&self) -> &ManagerConfig {
		&self.defaults
	}

	pub(crate) fn drain(&self) -> Vec<QueuedTask<C>> {
		self.shared.borrow_mut().queue.drain()
	}

	fn generate_key(&self) -> NoticeKey {
		let mut shared = self.shared.borrow_mut();
		let n = shared.next_key;
		shared.next_key += 1;
		NoticeKey::from(format!("{}-{n}", self.defaults.key_prefix))
	}
}
