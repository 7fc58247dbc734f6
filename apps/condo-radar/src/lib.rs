pub mod input;
pub mod output;

mod error;

pub use error::{Error, Result};

use std::{
	fs::File,
	path::{Path, PathBuf},
	sync::Mutex,
};

use clap::Parser;
use time::OffsetDateTime;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use condo_cli::prompt;
use condo_config::{Config, MAX_RADIUS_M};
use condo_service::RadarService;

#[derive(Debug, Parser)]
#[command(
	version = condo_cli::VERSION,
	rename_all = "kebab",
	styles = condo_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Search radius in meters. Skips the interactive prompt.
	#[arg(
		long,
		short = 'r',
		value_name = "METERS",
		value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_RADIUS_M)),
	)]
	pub radius: Option<u32>,
	/// Exit without waiting for Enter.
	#[arg(long)]
	pub no_pause: bool,
}

pub async fn run(args: Args) -> Result<()> {
	let config = condo_config::read(&args.config)?;
	let timestamp = output::run_timestamp(OffsetDateTime::now_utc())?;

	output::ensure_dirs(&[
		config.paths.input_dir.as_path(),
		config.paths.output_dir.as_path(),
		config.paths.log_dir.as_path(),
	])?;

	let log_path = output::log_path(&config.paths.log_dir, &timestamp);

	init_tracing(&config, &log_path)?;

	tracing::info!(version = condo_cli::VERSION, log = %log_path.display(), "Run started.");

	let result = search_and_report(&args, &config, &timestamp).await;

	if let Err(err) = &result {
		tracing::error!(error = %err, "Run aborted.");

		return result;
	}

	println!("Log saved to {}", log_path.display());

	if !args.no_pause {
		prompt::pause("Press [Enter] to close.");
	}

	Ok(())
}

async fn search_and_report(args: &Args, config: &Config, timestamp: &str) -> Result<()> {
	condo_config::validate(config)?;

	let radius_m = match args.radius {
		Some(radius) => radius,
		None => prompt::ask_radius(config.search.default_radius_m).map_err(Error::Terminal)?,
	};
	let names = read_names(config)?;

	tracing::info!(names = names.len(), radius_m, "Clients loaded.");

	let radar = RadarService::new(config)?;

	println!("Resolving the client portfolio (step 1 of 2)...");

	let portfolio = radar.build_portfolio(&names).await;

	println!("Searching for neighbors (step 2 of 2). This can take several minutes...");

	let report = radar.run_report(&names, radius_m, &portfolio).await;
	let report_path = output::report_path(&config.paths.output_dir, timestamp);

	output::write_report(&report_path, &report.render(&config.report))?;

	tracing::info!(calls = radar.calls_made(), "Run finished.");

	println!("{}", "=".repeat(50));
	println!("Done. Report saved to {}", report_path.display());

	Ok(())
}

fn read_names(config: &Config) -> Result<Vec<String>> {
	let input_dir = &config.paths.input_dir;
	let files = input::list_input_files(input_dir)
		.map_err(|err| Error::MissingInputDir { path: input_dir.clone(), source: err })?;

	if files.is_empty() {
		return Err(Error::NoInputFiles { path: input_dir.clone() });
	}

	let mut names = Vec::new();

	for file in &files {
		names.extend(input::read_column(file, &config.paths.input_column));
	}

	if names.is_empty() {
		return Err(Error::NoNames { column: config.paths.input_column.clone() });
	}

	Ok(names)
}

fn init_tracing(config: &Config, log_path: &Path) -> Result<()> {
	let file = File::create(log_path)
		.map_err(|err| Error::Io { path: log_path.to_path_buf(), source: err })?;
	let filter =
		EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer())
		.with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
		.try_init()?;

	Ok(())
}
