use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Whether the mount-time fetch has been requested yet.
///
/// Consumed exactly once by [`crate::SearchController::initialize`]. While still `Initial`,
/// search edits are recorded but never arm the debounce timer, so the mount fetch is not
/// followed by a redundant one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountPhase {
	Initial,
	PastMount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestPhase {
	/// Nothing requested or settled yet.
	Idle,
	/// A debounced fetch is armed and has not fired.
	Pending,
	/// At least one fetch is outstanding.
	InFlight,
	/// The latest fetch settled and nothing newer is pending.
	Settled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestLifecycle {
	pub phase: RequestPhase,
	pub loading: bool,
	pub error: Option<String>,
}

/// Issue order of a fetch. Only the highest issued sequence may update results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchSeq(pub u64);
impl FetchSeq {
	pub fn next(self) -> Self {
		Self(self.0 + 1)
	}
}
impl Display for FetchSeq {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Identity of one armed debounce timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DebounceToken(pub u64);
impl DebounceToken {
	pub fn next(self) -> Self {
		Self(self.0 + 1)
	}
}
