use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbosity: u8) -> &'static str {
	match verbosity {
		// runner warnings only; the protocol layers stay silent
		0 => "error,hoverprobe=warn,hoverprobe_cli=warn",
		// -v: per-case progress
		1 => "info,chromiumoxide=warn,probe=warn",
		// -vv: browser driver traffic too
		_ => "debug",
	}
}

/// Installs the global subscriber writing compact lines to stderr.
///
/// Stdout is reserved for the report.
pub fn init_logging(verbosity: u8) {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_ansi(std::io::stderr().is_terminal())
		.with_target(true)
		.with_level(true)
		.compact()
		.init();
}
