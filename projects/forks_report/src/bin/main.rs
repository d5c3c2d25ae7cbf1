use clap::Parser;
use projects_forks_report::cli::Cli;
use projects_forks_report::report::{self, ReportError};
use projects_forks_report::token::discover_api_token;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MainError {
	#[error("TracingInit: {source}")]
	TracingInit {
		#[source]
		source: utils_trace::TracingInitError,
	},
	#[error("Report: {source}")]
	Report {
		#[source]
		source: ReportError,
	},
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
	utils_trace::init("info")
		.map_err(|source| MainError::TracingInit { source })?;

	let cli = Cli::parse();

	let token = discover_api_token();
	if token.is_none() {
		info!("no .ghtoken credential found; requests are unauthenticated");
	}

	report::run(&cli.username, &cli.repo, cli.max_forks, token.as_ref())
		.await
		.map_err(|source| MainError::Report { source })?;

	Ok(())
}
