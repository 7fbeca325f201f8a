use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProbeError>;

/// Errors that abort a run before (or instead of) producing a report.
///
/// Per-case failures never surface here; they are recorded in the
/// [`crate::report::SuiteReport`].
#[derive(Debug, Error)]
pub enum ProbeError {
	#[error("invalid configuration: {0}")]
	Config(String),

	#[error("failed to read config file {path}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file {path}")]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("no target page configured (pass --page, --serve or set HOVERPROBE_PAGE_URL)")]
	MissingPage,

	#[error("page not found: {0}")]
	PageNotFound(PathBuf),

	#[error("unknown case '{0}' (see `hoverprobe cases`)")]
	UnknownCase(String),

	#[error("cannot serve {path}")]
	Serve {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Browser(#[from] probe::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl ProbeError {
	/// Process exit code: 2 for configuration and usage errors, 1 otherwise.
	pub fn exit_code(&self) -> i32 {
		match self {
			ProbeError::Config(_)
			| ProbeError::ConfigRead { .. }
			| ProbeError::ConfigParse { .. }
			| ProbeError::MissingPage
			| ProbeError::PageNotFound(_)
			| ProbeError::UnknownCase(_)
			| ProbeError::Serve { .. } => 2,
			ProbeError::Browser(_) | ProbeError::Io(_) | ProbeError::Json(_) => 1,
		}
	}
}
