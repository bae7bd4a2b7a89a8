//! Cancellable one-shot timers for debounced fetches.
//!
//! A [`DebounceScheduler`] owns at most one live timer. Arming a new one cancels the previous
//! timer first, and dropping the scheduler cancels whatever is still pending. The callback
//! always runs on a spawned task after the delay, never inline with [`DebounceScheduler::arm`],
//! even for a zero delay.

use std::time::Duration;

use tokio::{task::AbortHandle, time::Instant};

use crate::state::DebounceToken;

/// Cancel handle for one armed timer. Cancelling is idempotent and safe after the timer fired.
#[derive(Debug, Clone)]
pub struct DebounceHandle {
	token: DebounceToken,
	abort: AbortHandle,
}
impl DebounceHandle {
	pub fn token(&self) -> DebounceToken {
		self.token
	}

	pub fn cancel(&self) {
		self.abort.abort();
	}

	pub fn is_finished(&self) -> bool {
		self.abort.is_finished()
	}
}

#[derive(Debug, Default)]
pub struct DebounceScheduler {
	pending: Option<DebounceHandle>,
}
impl DebounceScheduler {
	pub fn arm<F>(&mut self, token: DebounceToken, delay: Duration, on_fire: F) -> DebounceHandle
	where
		F: FnOnce() + Send + 'static,
	{
		self.cancel_pending();

		let deadline = Instant::now() + delay;
		let task = tokio::spawn(async move {
			tokio::time::sleep_until(deadline).await;
			on_fire();
		});
		let handle = DebounceHandle { token, abort: task.abort_handle() };

		self.pending = Some(handle.clone());

		handle
	}

	/// Cancels the pending timer if it is the one armed with `token`.
	pub fn cancel(&mut self, token: DebounceToken) {
		if self.pending.as_ref().is_some_and(|handle| handle.token == token) {
			self.cancel_pending();
		}
	}

	pub fn cancel_pending(&mut self) {
		if let Some(handle) = self.pending.take() {
			handle.cancel();
		}
	}

	pub fn armed_token(&self) -> Option<DebounceToken> {
		self.pending.as_ref().filter(|handle| !handle.is_finished()).map(DebounceHandle::token)
	}
}
impl Drop for DebounceScheduler {
	fn drop(&mut self) {
		self.cancel_pending();
	}
}
