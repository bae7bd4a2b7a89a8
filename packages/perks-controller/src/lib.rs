//! Search and merchant-filter synchronization for a remote perk catalog.
//!
//! [`SearchController`] is a pure state machine: every operation returns the [`Command`]s it
//! wants executed (arm or cancel the debounce timer, issue a fetch). [`spawn`] runs it on a
//! tokio event loop that executes those commands and feeds timer fires and fetch settlements
//! back in, one event at a time.

pub mod controller;
pub mod debounce;
pub mod runtime;
pub mod state;
pub mod view;

mod error;

pub use controller::{Command, GENERIC_FETCH_ERROR, Intent, SearchController, Settlement};
pub use debounce::{DebounceHandle, DebounceScheduler};
pub use error::{Error, Result};
pub use runtime::{SearchHandle, spawn};
pub use state::{DebounceToken, FetchSeq, MountPhase, RequestLifecycle, RequestPhase};
pub use view::SearchView;

use std::time::Duration;

/// Quiet period after the last search edit before a fetch is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
