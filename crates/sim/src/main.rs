//! `herald`: replays a notice scenario and prints what the manager did.
//!
//! Each output line is one JSON record: lifecycle events as they happen,
//! render frames on `render` steps (or after every step with `--frames`),
//! and rejected `open` calls.

mod cli;
mod runner;
mod script;

use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use runner::Runner;
use script::Scenario;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let source = std::fs::read_to_string(&cli.scenario)
		.with_context(|| format!("reading {}", cli.scenario.display()))?;
	let scenario = Scenario::from_toml_str(&source)?;
	tracing::info!(path = %cli.scenario.display(), steps = scenario.steps.len(), "sim.load");

	let until_ms = cli.until_ms.or(scenario.until_ms);
	let out = BufWriter::new(io::stdout().lock());
	let mut out = Runner::new(&scenario, cli.frames, out)?.run(&scenario.steps, until_ms)?;
	out.flush().context("flushing output")?;
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("herald_notice=debug,herald_sim=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(false)
		.init();
}
