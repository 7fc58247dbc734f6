use std::{
	collections::BTreeSet,
	fmt::{self, Write},
};

use condo_config::Report as Labels;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	NotFound,
	/// Sorted ascending; empty when nothing passed the filter.
	Neighbors(BTreeSet<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
	pub client: String,
	pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
	pub processed: usize,
	pub not_found: usize,
	pub with_neighbors: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
	pub entries: Vec<ReportEntry>,
}
impl Report {
	pub fn stats(&self) -> RunStats {
		let mut stats = RunStats { processed: self.entries.len(), ..Default::default() };

		for entry in &self.entries {
			match &entry.outcome {
				Outcome::NotFound => stats.not_found += 1,
				Outcome::Neighbors(names) if !names.is_empty() => stats.with_neighbors += 1,
				Outcome::Neighbors(_) => {},
			}
		}

		stats
	}

	pub fn render(&self, labels: &Labels) -> String {
		self.display(labels).to_string()
	}

	/// Streams the report text into any formatter.
	pub fn display<'a>(&'a self, labels: &'a Labels) -> ReportDisplay<'a> {
		ReportDisplay { report: self, labels }
	}
}

pub struct ReportDisplay<'a> {
	report: &'a Report,
	labels: &'a Labels,
}
impl fmt::Display for ReportDisplay<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for entry in &self.report.entries {
			write_entry(f, entry, self.labels)?;
		}

		Ok(())
	}
}

fn write_entry(out: &mut impl Write, entry: &ReportEntry, labels: &Labels) -> fmt::Result {
	write!(out, "{}: {}", labels.client_label, entry.client)?;

	match &entry.outcome {
		Outcome::NotFound => writeln!(out, " | {}", labels.not_found)?,
		Outcome::Neighbors(names) => {
			writeln!(out)?;
			writeln!(out, "{}", labels.neighbors_header)?;

			if names.is_empty() {
				writeln!(out, " - {}", labels.none_found)?;
			}

			for name in names {
				writeln!(out, " - {name}")?;
			}
		},
	}

	writeln!(out, "{}", labels.separator)
}
