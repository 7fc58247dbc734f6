use serde::Deserialize;

use crate::{Error, PlaceId, Result};

pub(crate) const FIELDS: &str = "geometry/location,name,place_id";

/// Best match for a text lookup. Only the first candidate of a response is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
	pub latitude: f64,
	pub longitude: f64,
	pub name: String,
	pub place_id: PlaceId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FindPlaceResponse {
	status: String,
	#[serde(default)]
	candidates: Vec<RawCandidate>,
	error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCandidate {
	geometry: Option<Geometry>,
	name: Option<String>,
	place_id: Option<PlaceId>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
	location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
	lat: f64,
	lng: f64,
}

pub(crate) fn parse_response(res: FindPlaceResponse) -> Result<Option<Candidate>> {
	match res.status.as_str() {
		"OK" => {},
		"ZERO_RESULTS" => return Ok(None),
		_ => return Err(Error::Status { status: res.status, message: res.error_message }),
	}

	let Some(raw) = res.candidates.into_iter().next() else {
		return Ok(None);
	};
	let location = raw
		.geometry
		.and_then(|geometry| geometry.location)
		.ok_or(Error::MissingField { field: "candidates[0].geometry.location" })?;
	let name = raw.name.ok_or(Error::MissingField { field: "candidates[0].name" })?;
	let place_id = raw.place_id.ok_or(Error::MissingField { field: "candidates[0].place_id" })?;

	Ok(Some(Candidate { latitude: location.lat, longitude: location.lng, name, place_id }))
}
