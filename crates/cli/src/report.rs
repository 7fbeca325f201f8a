//! Case outcomes and their rendering.

use std::fmt::Write as _;
use std::time::Duration;

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use crate::cases::{Case, CaseError};

/// Report format on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Colored, one line per case
	#[default]
	Text,
	/// A single JSON document
	Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
	Passed,
	/// An assertion did not hold.
	Failed,
	/// The automation layer failed (lookup, timeout, navigation, launch).
	Errored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseReport {
	pub name: &'static str,
	pub status: CaseStatus,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	pub duration_ms: u64,
}

impl CaseReport {
	pub fn from_outcome(case: Case, outcome: &Result<(), CaseError>, elapsed: Duration) -> Self {
		let (status, message) = match outcome {
			Ok(()) => (CaseStatus::Passed, None),
			Err(err @ CaseError::Assertion(_)) => (CaseStatus::Failed, Some(err.to_string())),
			Err(err @ CaseError::Automation(_)) => (CaseStatus::Errored, Some(err.to_string())),
		};
		Self {
			name: case.name(),
			status,
			message,
			duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
		}
	}

	pub fn passed(&self) -> bool {
		self.status == CaseStatus::Passed
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
	pub ok: bool,
	pub cases: Vec<CaseReport>,
}

impl SuiteReport {
	pub fn new(cases: Vec<CaseReport>) -> Self {
		Self {
			ok: cases.iter().all(CaseReport::passed),
			cases,
		}
	}

	pub fn count(&self, status: CaseStatus) -> usize {
		self.cases.iter().filter(|case| case.status == status).count()
	}

	/// 0 when every case passed, 1 otherwise.
	pub fn exit_code(&self) -> i32 {
		if self.ok { 0 } else { 1 }
	}

	pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
		match format {
			OutputFormat::Text => Ok(self.render_text()),
			OutputFormat::Json => serde_json::to_string_pretty(self),
		}
	}

	pub fn render_text(&self) -> String {
		let mut out = String::new();
		for case in &self.cases {
			let label = match case.status {
				CaseStatus::Passed => "PASS ".green().bold(),
				CaseStatus::Failed => "FAIL ".red().bold(),
				CaseStatus::Errored => "ERROR".yellow().bold(),
			};
			let _ = writeln!(out, "{label} {} {}", case.name, format!("({} ms)", case.duration_ms).dimmed());
			if let Some(message) = &case.message {
				let _ = writeln!(out, "      {message}");
			}
		}

		let summary = format!(
			"{} cases: {} passed, {} failed, {} errored",
			self.cases.len(),
			self.count(CaseStatus::Passed),
			self.count(CaseStatus::Failed),
			self.count(CaseStatus::Errored),
		);
		let _ = writeln!(out);
		let _ = writeln!(out, "{}", if self.ok { summary.green() } else { summary.red() });
		out
	}
}
