//! Shared helpers for the real-browser tests.
//!
//! The browser tests are `#[ignore]`d; run them with
//! `cargo test -p hoverprobe-cli -- --ignored` on a machine with
//! Chrome/Chromium.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use hoverprobe_cli::cases::Case;
use hoverprobe_cli::config::SuiteConfig;
use hoverprobe_cli::report::{CaseStatus, SuiteReport};
use hoverprobe_cli::runner::{RunSettings, SuiteRunner};
use hoverprobe_cli::session::{BrowserSessionFactory, BrowserSource};

pub fn fixture_path() -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join("dropdown.html")
}

pub fn fixture_html() -> String {
	std::fs::read_to_string(fixture_path()).unwrap()
}

/// Config for CI containers: no sandbox, shorter bounds.
pub fn test_config() -> SuiteConfig {
	SuiteConfig {
		no_sandbox: true,
		visible_timeout_ms: 5_000,
		style_timeout_ms: 2_000,
		poll_interval_ms: 50,
		..SuiteConfig::default()
	}
}

pub async fn run_suite(page_url: &str, cases: &[Case]) -> SuiteReport {
	let config = test_config();
	let factory = BrowserSessionFactory::new(BrowserSource::Launch(config.launch_options()), config.navigation_timeout());
	SuiteRunner::new(&factory, RunSettings::from_config(&config, page_url))
		.run(cases)
		.await
}

pub fn status_of(report: &SuiteReport, case: Case) -> CaseStatus {
	report
		.cases
		.iter()
		.find(|c| c.name == case.name())
		.unwrap_or_else(|| panic!("{case} missing from report: {report:?}"))
		.status
}

pub fn message_of(report: &SuiteReport, case: Case) -> String {
	report
		.cases
		.iter()
		.find(|c| c.name == case.name())
		.and_then(|c| c.message.clone())
		.unwrap_or_default()
}

pub fn hoverprobe_binary() -> PathBuf {
	PathBuf::from(env!("CARGO_BIN_EXE_hoverprobe"))
}
