use std::{
	fs, io,
	path::{Path, PathBuf},
};

use calamine::{Data, Reader, Xlsx};
use encoding_rs::WINDOWS_1252;

use crate::{Error, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Spreadsheet files (`.xlsx` or `.csv`) directly under `dir`, sorted, skipping lock and
/// hidden files.
pub fn list_input_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
			continue;
		};

		if file_name.starts_with('~') || file_name.starts_with('.') || !path.is_file() {
			continue;
		}
		if InputFormat::of(&path).is_some() {
			files.push(path);
		}
	}

	files.sort();

	if files.is_empty() {
		tracing::warn!(dir = %dir.display(), "No .xlsx or .csv files found.");
	} else {
		tracing::info!(dir = %dir.display(), files = files.len(), "Input files found.");
	}

	Ok(files)
}

/// Non-empty cells of `column`. A missing column or unreadable file is logged and yields nothing.
pub fn read_column(path: &Path, column: &str) -> Vec<String> {
	match try_read_column(path, column) {
		Ok(Some(names)) => {
			tracing::info!(file = %path.display(), names = names.len(), "Names read.");

			names
		},
		Ok(None) => {
			tracing::error!(file = %path.display(), column, "Column not found.");

			Vec::new()
		},
		Err(err) => {
			tracing::error!(file = %path.display(), error = %err, "Failed to read input file.");

			Vec::new()
		},
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
	Xlsx,
	Csv,
}
impl InputFormat {
	fn of(path: &Path) -> Option<Self> {
		let ext = path.extension()?.to_str()?;

		if ext.eq_ignore_ascii_case("xlsx") {
			Some(Self::Xlsx)
		} else if ext.eq_ignore_ascii_case("csv") {
			Some(Self::Csv)
		} else {
			None
		}
	}
}

fn try_read_column(path: &Path, column: &str) -> Result<Option<Vec<String>>> {
	match InputFormat::of(path) {
		Some(InputFormat::Xlsx) => read_xlsx_column(path, column),
		_ => read_csv_column(path, column),
	}
}

/// Reads the first worksheet, taking its first row as the header.
fn read_xlsx_column(path: &Path, column: &str) -> Result<Option<Vec<String>>> {
	let mut workbook: Xlsx<_> = calamine::open_workbook(path).map_err(calamine::Error::Xlsx)?;
	let Some(sheet) = workbook.sheet_names().first().cloned() else {
		return Ok(None);
	};
	let range = workbook.worksheet_range(&sheet).map_err(calamine::Error::Xlsx)?;
	let mut rows = range.rows();
	let Some(index) = rows
		.next()
		.and_then(|header| header.iter().position(|cell| cell_text(cell).trim() == column))
	else {
		return Ok(None);
	};
	let names = rows
		.filter_map(|row| row.get(index))
		.map(cell_text)
		.filter(|value| !value.trim().is_empty())
		.collect();

	Ok(Some(names))
}

fn cell_text(cell: &Data) -> String {
	match cell {
		Data::Empty => String::new(),
		Data::String(text) => text.clone(),
		other => other.to_string(),
	}
}

/// Cells are decoded one by one, so a Windows-1252 export reads the same as a UTF-8 one.
fn read_csv_column(path: &Path, column: &str) -> Result<Option<Vec<String>>> {
	let raw = fs::read(path)
		.map_err(|err| Error::ReadInput { path: path.to_path_buf(), source: err })?;
	let body = raw.strip_prefix(UTF8_BOM).unwrap_or(&raw);
	let mut reader = csv::ReaderBuilder::new()
		.delimiter(sniff_delimiter(body))
		.flexible(true)
		.from_reader(body);
	let headers = reader.byte_headers()?.clone();
	let Some(index) = headers.iter().position(|header| decode_cell(header).trim() == column) else {
		return Ok(None);
	};
	let mut names = Vec::new();

	for (row, record) in reader.byte_records().enumerate() {
		let record = match record {
			Ok(record) => record,
			Err(err) => {
				tracing::warn!(
					file = %path.display(),
					row = row + 2,
					error = %err,
					"Skipping unreadable row."
				);

				continue;
			},
		};

		if let Some(value) = record.get(index).map(decode_cell)
			&& !value.trim().is_empty()
		{
			names.push(value);
		}
	}

	Ok(Some(names))
}

fn decode_cell(bytes: &[u8]) -> String {
	match std::str::from_utf8(bytes) {
		Ok(text) => text.to_string(),
		Err(_) => WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned(),
	}
}

/// Spreadsheet exports in pt-BR locales separate fields with ';'.
fn sniff_delimiter(raw: &[u8]) -> u8 {
	let header = raw.split(|byte| *byte == b'\n').next().unwrap_or_default();
	let semicolons = header.iter().filter(|byte| **byte == b';').count();
	let commas = header.iter().filter(|byte| **byte == b',').count();

	if semicolons > commas { b';' } else { b',' }
}
