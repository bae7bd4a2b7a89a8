pub mod command;
pub mod render;
pub mod session;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use perks_controller::SearchController;
use perks_domain::SearchState;
use perks_gateway::HttpGateway;

use crate::render::RenderOptions;

#[derive(Debug, Parser)]
#[command(
	version = perks_cli::VERSION,
	rename_all = "kebab",
	styles = perks_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Search text used by the first fetch.
	#[arg(long, short = 'q', value_name = "TEXT")]
	pub query: Option<String>,
	/// Merchant filter used by the first fetch.
	#[arg(long, short = 'm', value_name = "NAME")]
	pub merchant: Option<String>,
	/// Print every view as a JSON line instead of text.
	#[arg(long)]
	pub json: bool,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = perks_config::load(&args.config)?;
	init_tracing(&config)?;
	let gateway = HttpGateway::new(&config.gateway)?;
	tracing::info!(url = gateway.url(), "Browsing perks.");

	let search =
		SearchState::new(args.query.unwrap_or_default(), args.merchant.unwrap_or_default());
	let controller = SearchController::from_config(&config.search, search);
	let handle = perks_controller::spawn(controller, Arc::new(gateway));
	let options =
		RenderOptions { all_label: config.search.all_merchants_label.clone(), json: args.json };

	session::drive(handle, BufReader::new(tokio::io::stdin()), tokio::io::stdout(), &options).await
}

fn init_tracing(config: &perks_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
	Ok(())
}
