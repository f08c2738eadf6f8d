//! Scenario files.
//!
//! ```toml
//! ready = false
//!
//! [manager]
//! max_count = 3
//! stack = true
//!
//! [[step]]
//! at_ms = 0
//! op = "open"
//! key = "saved"
//! content = "File saved"
//! duration = 1.5
//!
//! [[step]]
//! at_ms = 200
//! op = "ready"
//! ```

use std::collections::BTreeMap;

use anyhow::{Context, bail};
use herald_notice::{ManagerConfig, Placement};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
	#[serde(default)]
	pub manager: ManagerConfig,
	/// Whether the rendering surface is ready before the first step.
	#[serde(default = "ready_by_default")]
	pub ready: bool,
	/// Run timers until this time after the last step.
	#[serde(default)]
	pub until_ms: Option<u64>,
	#[serde(default, rename = "step")]
	pub steps: Vec<Step>,
}

fn ready_by_default() -> bool {
	true
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
	pub at_ms: u64,
	#[serde(flatten)]
	pub op: Op,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
	Open {
		key: Option<String>,
		content: String,
		duration: Option<f64>,
		placement: Option<Placement>,
		closable: Option<bool>,
		pause_on_hover: Option<bool>,
		show_progress: Option<bool>,
		#[serde(default)]
		attributes: BTreeMap<String, String>,
	},
	Close {
		key: String,
	},
	Destroy,
	Hover {
		key: String,
	},
	Leave {
		key: String,
	},
	Click {
		key: String,
	},
	PressClose {
		key: String,
	},
	Blur,
	Focus,
	/// Surface becomes ready; queued operations replay.
	Ready,
	Measure {
		key: String,
		width: f32,
		height: f32,
	},
	/// Exit transitions of a placement finished.
	Ack {
		placement: Placement,
	},
	Render,
}

impl Scenario {
	pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
		let scenario: Scenario = toml::from_str(source).context("invalid scenario")?;
		scenario.manager.validate().context("invalid [manager] table")?;

		let mut last = 0;
		for (index, step) in scenario.steps.iter().enumerate() {
			if step.at_ms < last {
				bail!("step {index} at {}ms runs before the previous step at {last}ms", step.at_ms);
			}
			last = step.at_ms;
		}
		Ok(scenario)
	}
}
