pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Search controller has shut down.")]
	Closed,
	#[error(transparent)]
	Join(#[from] tokio::task::JoinError),
}
