pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Connection, timeout, or body transfer failure.
	#[error("Places request failed: {0}")]
	Transport(#[source] reqwest::Error),
	#[error("Places service answered HTTP {status}.")]
	Http { status: u16 },
	/// HTTP 200 with an API status other than OK/ZERO_RESULTS.
	#[error("Places service returned status {status}{}.", detail(.message))]
	Status { status: String, message: Option<String> },
	#[error("Places response could not be decoded: {0}")]
	Decode(#[from] serde_json::Error),
	#[error("Places response is missing {field}.")]
	MissingField { field: &'static str },
	#[error("Places call budget of {limit} requests is exhausted.")]
	BudgetExhausted { limit: u64 },
	#[error("Places client could not be built: {0}")]
	Client(#[source] reqwest::Error),
}
impl Error {
	/// Worth retrying after a backoff: rate limiting or a server-side failure.
	pub fn is_throttled(&self) -> bool {
		match self {
			Self::Http { status } => *status == 429 || (500..600).contains(status),
			Self::Status { status, .. } => status == "OVER_QUERY_LIMIT",
			_ => false,
		}
	}

	pub fn is_transport(&self) -> bool {
		matches!(self, Self::Transport(_))
	}
}

fn detail(message: &Option<String>) -> String {
	message.as_deref().map(|message| format!(" ({message})")).unwrap_or_default()
}
