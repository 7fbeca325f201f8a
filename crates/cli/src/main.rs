use clap::Parser;
use colored::Colorize;
use hoverprobe_cli::{cli::Cli, commands, logging};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let code = match commands::dispatch(cli).await {
		Ok(code) => code,
		Err(err) => {
			let code = err.exit_code();
			eprintln!("{} {:#}", "error:".red().bold(), anyhow::Error::new(err));
			code
		}
	};
	std::process::exit(code);
}
