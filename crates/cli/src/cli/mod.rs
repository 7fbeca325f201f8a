
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::report::OutputFormat;
use crate::styles::cli_styles;

/// Hover-driven dropdown checks against a real browser.
#[derive(Parser, Debug)]
#[command(name = "hoverprobe")]
#[command(about = "Check hover-triggered dropdown menus in a real browser")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v progress, -vv protocol traffic)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Report format
	#[arg(short = 'f', long, global = true, value_enum, default_value = "text")]
	pub format: OutputFormat,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Run the dropdown cases against a page.
	Run(RunArgs),
	/// List the available cases.
	Cases,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
	/// Page under test: URL or local path (relative to --serve when given).
	#[arg(long, value_name = "URL|PATH")]
	pub page: Option<String>,

	/// JSON config file.
	#[arg(long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Chrome/Chromium executable.
	#[arg(long, value_name = "PATH", conflicts_with = "cdp_endpoint")]
	pub browser: Option<PathBuf>,

	/// Show the browser window.
	#[arg(long, conflicts_with = "cdp_endpoint")]
	pub headed: bool,

	/// Launch the browser with --no-sandbox (needed as root in containers).
	#[arg(long, conflicts_with = "cdp_endpoint")]
	pub no_sandbox: bool,

	/// Serve a directory over HTTP on a loopback port and load the page from it.
	#[arg(long, value_name = "DIR")]
	pub serve: Option<PathBuf>,

	/// Use a running browser (ws:// URL, http://host:port or port) instead of launching one.
	#[arg(long, value_name = "ENDPOINT")]
	pub cdp_endpoint: Option<String>,

	/// Run only this case (repeatable).
	#[arg(long = "case", value_name = "NAME")]
	pub cases: Vec<String>,

	/// Bound in milliseconds for the menu to appear after hover.
	#[arg(long, value_name = "MS")]
	pub timeout_ms: Option<u64>,

	/// Stop after the first case that does not pass.
	#[arg(long)]
	pub fail_fast: bool,
}
