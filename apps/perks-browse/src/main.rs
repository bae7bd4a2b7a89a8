use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = perks_browse::Args::parse();
	perks_browse::run(args).await
}
