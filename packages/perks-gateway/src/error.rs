pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("Perk service responded with status {status}.")]
	Status { status: u16, message: Option<String> },
}
impl Error {
	/// Human-readable message supplied by the service, if the failure carried one.
	pub fn user_message(&self) -> Option<&str> {
		match self {
			Self::Status { message: Some(message), .. } => {
				let message = message.trim();

				if message.is_empty() { None } else { Some(message) }
			},
			_ => None,
		}
	}
}
