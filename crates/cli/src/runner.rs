//! Runs cases in order, each in its own session.

use std::time::Instant;

use probe::{Viewport, WaitOptions};
use tracing::{info, warn};

use crate::cases::{Case, CaseContext, CaseError};
use crate::config::SuiteConfig;
use crate::contract::DropdownContract;
use crate::report::{CaseReport, SuiteReport};
use crate::session::{SessionFactory, SessionLike};

/// Per-run settings shared by every case.
#[derive(Debug, Clone)]
pub struct RunSettings {
	pub page_url: String,
	pub viewport: Viewport,
	pub visible_wait: WaitOptions,
	pub style_wait: WaitOptions,
	pub contract: DropdownContract,
	/// Stop after the first case that does not pass.
	pub fail_fast: bool,
}

impl RunSettings {
	pub fn from_config(config: &SuiteConfig, page_url: impl Into<String>) -> Self {
		Self {
			page_url: page_url.into(),
			viewport: config.viewport,
			visible_wait: config.visible_wait(),
			style_wait: config.style_wait(),
			contract: config.contract.clone(),
			fail_fast: false,
		}
	}

	pub fn fail_fast(mut self, fail_fast: bool) -> Self {
		self.fail_fast = fail_fast;
		self
	}
}

pub struct SuiteRunner<'a> {
	factory: &'a dyn SessionFactory,
	settings: RunSettings,
}

impl<'a> SuiteRunner<'a> {
	pub fn new(factory: &'a dyn SessionFactory, settings: RunSettings) -> Self {
		Self { factory, settings }
	}

	pub async fn run(&self, cases: &[Case]) -> SuiteReport {
		let mut reports = Vec::with_capacity(cases.len());
		for &case in cases {
			let report = self.run_case(case).await;
			let stop = self.settings.fail_fast && !report.passed();
			reports.push(report);
			if stop {
				info!(target = "hoverprobe", case = case.name(), "fail-fast: skipping remaining cases");
				break;
			}
		}
		SuiteReport::new(reports)
	}

	/// Opens a session, runs `case` and always closes the session again.
	///
	/// A session that fails to open has nothing to close.
	pub async fn run_case(&self, case: Case) -> CaseReport {
		info!(target = "hoverprobe", case = case.name(), url = %self.settings.page_url, "running case");
		let started = Instant::now();

		let outcome = match self.factory.open().await {
			Ok(session) => {
				let outcome = self.exercise(case, session.as_ref()).await;
				if let Err(e) = session.close().await {
					warn!(target = "hoverprobe", case = case.name(), "teardown failed: {e}");
				}
				outcome
			}
			Err(e) => Err(CaseError::Automation(e)),
		};

		let report = CaseReport::from_outcome(case, &outcome, started.elapsed());
		match &outcome {
			Ok(()) => info!(target = "hoverprobe", case = case.name(), ms = report.duration_ms, "passed"),
			Err(e) => warn!(target = "hoverprobe", case = case.name(), ms = report.duration_ms, "{e}"),
		}
		report
	}

	async fn exercise(&self, case: Case, session: &dyn SessionLike) -> Result<(), CaseError> {
		session.set_viewport(self.settings.viewport).await?;
		session.goto(&self.settings.page_url).await?;

		let ctx = CaseContext {
			page: session.page(),
			contract: &self.settings.contract,
			visible_wait: self.settings.visible_wait,
			style_wait: self.settings.style_wait,
		};
		case.run(&ctx).await
	}
}
