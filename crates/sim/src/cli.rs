use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Replay a notice scenario and print lifecycle events as JSON lines")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Scenario file (TOML)
	pub scenario: PathBuf,

	/// Keep running timers until this time, in milliseconds from the start
	#[arg(long, value_name = "MS")]
	pub until_ms: Option<u64>,

	/// Print a render frame after every step
	#[arg(long)]
	pub frames: bool,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}
