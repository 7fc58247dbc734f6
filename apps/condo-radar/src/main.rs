use std::process;

use clap::Parser;

use condo_cli::prompt;
use condo_radar::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();
	let pause = !args.no_pause;

	if let Err(err) = condo_radar::run(args).await {
		eprintln!("{:?}", color_eyre::Report::new(err));

		if pause {
			prompt::pause("Press [Enter] to exit.");
		}

		process::exit(1);
	}

	Ok(())
}
