use std::io::{self, BufRead, Write};

use condo_config::MAX_RADIUS_M;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadiusChoice {
	Default,
	Custom(u32),
	Invalid,
}

pub fn parse_radius(input: &str) -> RadiusChoice {
	let input = input.trim();

	if input.is_empty() {
		return RadiusChoice::Default;
	}

	match input.parse::<u32>() {
		Ok(radius) if (1..=MAX_RADIUS_M).contains(&radius) => RadiusChoice::Custom(radius),
		_ => RadiusChoice::Invalid,
	}
}

/// Asks for a search radius on stdin, falling back to `default` on empty or bad input.
pub fn ask_radius(default: u32) -> io::Result<u32> {
	let stdin = io::stdin();

	ask_radius_from(&mut stdin.lock(), &mut io::stdout(), default)
}

pub fn ask_radius_from(
	input: &mut impl BufRead,
	output: &mut impl Write,
	default: u32,
) -> io::Result<u32> {
	writeln!(output, "--- Nearby condominium finder ---")?;
	writeln!(output, "The default radius is {default} meters.")?;
	write!(output, "Radius in meters, or [Enter] for the default: ")?;
	output.flush()?;

	let mut line = String::new();

	input.read_line(&mut line)?;

	let radius = match parse_radius(&line) {
		RadiusChoice::Default => {
			writeln!(output, "Using the default radius: {default}m")?;

			default
		},
		RadiusChoice::Custom(radius) => {
			writeln!(output, "Using a custom radius: {radius}m")?;

			radius
		},
		RadiusChoice::Invalid => {
			writeln!(output, "Invalid radius. Using the default: {default}m")?;

			default
		},
	};

	writeln!(output, "{}", "-".repeat(50))?;

	Ok(radius)
}

/// Blocks until the user presses Enter. Read errors are ignored.
pub fn pause(message: &str) {
	println!("{message}");

	let mut line = String::new();
	let _ = io::stdin().read_line(&mut line);
}
