use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Config(#[from] condo_config::Error),
	#[error(transparent)]
	Places(#[from] condo_places::Error),
	#[error("Input directory {path:?} cannot be read.")]
	MissingInputDir { path: PathBuf, source: std::io::Error },
	#[error("No .xlsx or .csv files found in {path:?}. Add the client spreadsheets and try again.")]
	NoInputFiles { path: PathBuf },
	#[error("No names found in column {column:?} of the input files.")]
	NoNames { column: String },
	#[error("Failed to read {path:?}.")]
	ReadInput { path: PathBuf, source: std::io::Error },
	#[error(transparent)]
	Spreadsheet(#[from] calamine::Error),
	#[error(transparent)]
	Csv(#[from] csv::Error),
	#[error("Failed to write {path:?}.")]
	Io { path: PathBuf, source: std::io::Error },
	#[error("Failed to format the run timestamp.")]
	Timestamp(#[from] time::error::Format),
	#[error("Failed to install the log subscriber.")]
	Tracing(#[from] tracing_subscriber::util::TryInitError),
	#[error("Failed to read from the terminal.")]
	Terminal(#[source] std::io::Error),
}
