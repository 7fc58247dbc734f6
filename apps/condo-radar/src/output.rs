use std::{
	fs,
	path::{Path, PathBuf},
};

use time::{OffsetDateTime, macros::format_description};

use crate::{Error, Result};

/// Run timestamp embedded in report and log file names, e.g. `20261019_134501`.
pub fn run_timestamp(now: OffsetDateTime) -> Result<String> {
	Ok(now.format(format_description!("[year][month][day]_[hour][minute][second]"))?)
}

pub fn ensure_dirs(dirs: &[&Path]) -> Result<()> {
	for dir in dirs {
		fs::create_dir_all(dir).map_err(|err| Error::Io { path: dir.to_path_buf(), source: err })?;
	}

	Ok(())
}

pub fn report_path(output_dir: &Path, timestamp: &str) -> PathBuf {
	output_dir.join(format!("resultado_{timestamp}.txt"))
}

pub fn log_path(log_dir: &Path, timestamp: &str) -> PathBuf {
	log_dir.join(format!("log_{timestamp}.log"))
}

pub fn write_report(path: &Path, content: &str) -> Result<()> {
	fs::write(path, content).map_err(|err| Error::Io { path: path.to_path_buf(), source: err })?;

	tracing::info!(path = %path.display(), bytes = content.len(), "Report written.");

	Ok(())
}
