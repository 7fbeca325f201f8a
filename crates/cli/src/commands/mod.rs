//! `hoverprobe run` and `hoverprobe cases`.


use std::io::Write;

use colored::Colorize;
use serde_json::json;
use tracing::info;

use crate::cases::Case;
use crate::cli::{Cli, Commands, RunArgs};
use crate::config::{SuiteConfig, resolve_page_url};
use crate::error::{ProbeError, Result};
use crate::report::OutputFormat;
use crate::runner::{RunSettings, SuiteRunner};
use crate::serve::FixtureServer;
use crate::session::{BrowserSessionFactory, BrowserSource};

/// Runs the selected command and returns the process exit code.
pub async fn dispatch(cli: Cli) -> Result<i32> {
	match cli.command {
		Commands::Run(args) => run(&args, cli.format).await,
		Commands::Cases => {
			list_cases(cli.format)?;
			Ok(0)
		}
	}
}

async fn run(args: &RunArgs, format: OutputFormat) -> Result<i32> {
	let config = build_config(args, |key| std::env::var(key).ok())?;
	let cases = select_cases(&args.cases)?;
	let cwd = std::env::current_dir()?;

	let server = match &args.serve {
		Some(dir) => Some(FixtureServer::start(dir).await?),
		None => None,
	};
	let page_dir = config.page_dir(&cwd);
	let page_url = match resolve_page_url(config.page.as_deref(), server.as_ref().map(FixtureServer::base_url), &page_dir) {
		Ok(url) => url,
		Err(e) => {
			if let Some(server) = server {
				server.shutdown().await;
			}
			return Err(e);
		}
	};

	let source = match &config.cdp_endpoint {
		Some(endpoint) => BrowserSource::Connect(endpoint.clone()),
		None => BrowserSource::Launch(config.launch_options()),
	};
	let factory = BrowserSessionFactory::new(source, config.navigation_timeout());
	let settings = RunSettings::from_config(&config, page_url.as_str()).fail_fast(args.fail_fast);

	info!(target = "hoverprobe", page = %page_url, cases = cases.len(), "starting suite");
	let report = SuiteRunner::new(&factory, settings).run(&cases).await;

	if let Some(server) = server {
		server.shutdown().await;
	}

	let mut stdout = std::io::stdout().lock();
	writeln!(stdout, "{}", report.render(format)?)?;
	Ok(report.exit_code())
}

/// Layers defaults, the config file, `HOVERPROBE_*` variables and flags.
pub fn build_config(args: &RunArgs, env: impl Fn(&str) -> Option<String>) -> Result<SuiteConfig> {
	let mut config = match &args.config {
		Some(path) => SuiteConfig::load(path)?,
		None => SuiteConfig::default(),
	};
	config.apply_env(env)?;

	if let Some(page) = &args.page {
		config.set_page(page.clone());
	}
	if let Some(browser) = &args.browser {
		config.browser = Some(browser.clone());
	}
	if let Some(endpoint) = &args.cdp_endpoint {
		config.cdp_endpoint = Some(endpoint.clone());
	}
	if args.headed {
		config.headless = false;
	}
	if args.no_sandbox {
		config.no_sandbox = true;
	}
	if let Some(timeout_ms) = args.timeout_ms {
		config.visible_timeout_ms = timeout_ms;
	}

	config.validate()?;
	Ok(config)
}

/// Maps `--case` names to cases; no names selects every case.
pub fn select_cases(names: &[String]) -> Result<Vec<Case>> {
	if names.is_empty() {
		return Ok(Case::ALL.to_vec());
	}
	let mut cases = Vec::with_capacity(names.len());
	for name in names {
		let case = Case::from_name(name).ok_or_else(|| ProbeError::UnknownCase(name.clone()))?;
		if !cases.contains(&case) {
			cases.push(case);
		}
	}
	Ok(cases)
}

fn list_cases(format: OutputFormat) -> Result<()> {
	let mut stdout = std::io::stdout().lock();
	match format {
		OutputFormat::Text => {
			for case in Case::ALL {
				writeln!(stdout, "{:<24} {}", case.name().cyan(), case.description())?;
			}
		}
		OutputFormat::Json => {
			let cases: Vec<_> = Case::ALL
				.iter()
				.map(|case| json!({ "name": case.name(), "description": case.description() }))
				.collect();
			writeln!(stdout, "{}", serde_json::to_string_pretty(&cases)?)?;
		}
	}
	Ok(())
}
