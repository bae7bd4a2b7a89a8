use std::{collections::BTreeSet, time::Duration};

use perks_domain::{FilterOptions, Perk, PerkQuery, SearchState};

use crate::{
	DEFAULT_DEBOUNCE,
	state::{DebounceToken, FetchSeq, MountPhase, RequestLifecycle, RequestPhase},
	view::SearchView,
};

/// Shown when a failed fetch carries no message of its own.
pub const GENERIC_FETCH_ERROR: &str = "Failed to load perks.";

/// Side effect requested by a controller operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	ArmDebounce { token: DebounceToken, delay: Duration },
	CancelDebounce { token: DebounceToken },
	Fetch { seq: FetchSeq, query: PerkQuery },
}

/// User-facing operations, as queued by a presentation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
	Initialize,
	SetQuery(String),
	SetMerchantFilter(String),
	SubmitNow,
	Reset,
	Refetch,
}

/// What happened to a settled fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
	/// The fetch was the latest issued; its outcome now drives results and error state.
	Applied,
	/// A newer fetch was issued before this one settled; the outcome was dropped.
	Superseded,
	/// Not an outstanding fetch of this controller (already settled, or torn down).
	Unknown,
}

#[derive(Debug)]
pub struct SearchController {
	debounce: Duration,
	search: SearchState,
	mount: MountPhase,
	perks: Vec<Perk>,
	filter_options: FilterOptions,
	results_revision: u64,
	error: Option<String>,
	has_settled: bool,
	armed: Option<DebounceToken>,
	last_token: DebounceToken,
	last_issued: FetchSeq,
	in_flight: BTreeSet<FetchSeq>,
	torn_down: bool,
}
impl SearchController {
	pub fn new(debounce: Duration) -> Self {
		Self::with_state(debounce, SearchState::default())
	}

	/// Starts from a pre-populated search, e.g. one passed on the command line.
	pub fn with_state(debounce: Duration, search: SearchState) -> Self {
		Self {
			debounce,
			search,
			mount: MountPhase::Initial,
			perks: Vec::new(),
			filter_options: FilterOptions::default(),
			results_revision: 0,
			error: None,
			has_settled: false,
			armed: None,
			last_token: DebounceToken::default(),
			last_issued: FetchSeq::default(),
			in_flight: BTreeSet::new(),
			torn_down: false,
		}
	}

	pub fn from_config(cfg: &perks_config::Search, search: SearchState) -> Self {
		Self::with_state(Duration::from_millis(cfg.debounce_ms), search)
	}

	pub fn apply(&mut self, intent: Intent) -> Vec<Command> {
		match intent {
			Intent::Initialize => self.initialize(),
			Intent::SetQuery(query) => self.set_query(query),
			Intent::SetMerchantFilter(merchant) => self.set_merchant_filter(merchant),
			Intent::SubmitNow => self.submit_now(),
			Intent::Reset => self.reset(),
			Intent::Refetch => self.refetch(),
		}
	}

	/// Issues the mount-time fetch and consumes the mount phase. Later calls do nothing.
	pub fn initialize(&mut self) -> Vec<Command> {
		if self.torn_down || self.mount == MountPhase::PastMount {
			tracing::debug!("Search controller already initialized.");

			return Vec::new();
		}

		self.mount = MountPhase::PastMount;

		vec![self.issue_fetch("mount")]
	}

	pub fn set_query(&mut self, query: impl Into<String>) -> Vec<Command> {
		let query = query.into();

		if self.torn_down || self.search.query == query {
			return Vec::new();
		}

		self.search.query = query;

		self.search_changed()
	}

	pub fn set_merchant_filter(&mut self, merchant: impl Into<String>) -> Vec<Command> {
		let merchant = merchant.into();

		if self.torn_down || self.search.merchant_filter == merchant {
			return Vec::new();
		}

		self.search.merchant_filter = merchant;

		self.search_changed()
	}

	/// Clears the search. Goes through the debounce path like any other edit.
	pub fn reset(&mut self) -> Vec<Command> {
		if self.torn_down || self.search.is_empty() {
			return Vec::new();
		}

		self.search = SearchState::default();

		self.search_changed()
	}

	/// Fetches right away with the current search, dropping any pending debounce.
	pub fn submit_now(&mut self) -> Vec<Command> {
		self.fetch_now("submit")
	}

	/// Replays the current search for error recovery. Not debounced.
	pub fn refetch(&mut self) -> Vec<Command> {
		self.fetch_now("refetch")
	}

	pub fn on_debounce_fired(&mut self, token: DebounceToken) -> Vec<Command> {
		if self.torn_down || self.armed != Some(token) {
			tracing::debug!(token = token.0, "Ignoring debounce fire for a cancelled timer.");

			return Vec::new();
		}

		self.armed = None;

		vec![self.issue_fetch("debounce")]
	}

	/// Records the outcome of fetch `seq`. Only the latest issued fetch may change results or
	/// error state; older ones only stop counting toward `loading`.
	pub fn on_fetch_settled(
		&mut self,
		seq: FetchSeq,
		outcome: perks_gateway::Result<Vec<Perk>>,
	) -> Settlement {
		if self.torn_down || !self.in_flight.remove(&seq) {
			return Settlement::Unknown;
		}
		if seq != self.last_issued {
			tracing::debug!(%seq, latest = %self.last_issued, "Discarding superseded fetch result.");

			return Settlement::Superseded;
		}

		self.has_settled = true;

		match outcome {
			Ok(perks) => {
				tracing::debug!(%seq, count = perks.len(), "Applying fetch result.");

				self.replace_results(perks);
				self.error = None;
			},
			Err(err) => {
				let message = err.user_message().unwrap_or(GENERIC_FETCH_ERROR).to_string();

				tracing::warn!(%seq, error = %err, "Perk fetch failed.");

				self.error = Some(message);
			},
		}

		Settlement::Applied
	}

	/// Stops the controller. Returns the cancellation for any armed timer; every later
	/// operation and settlement is ignored.
	pub fn teardown(&mut self) -> Vec<Command> {
		if self.torn_down {
			return Vec::new();
		}

		self.torn_down = true;
		self.in_flight.clear();

		self.armed.take().map(|token| Command::CancelDebounce { token }).into_iter().collect()
	}

	pub fn search(&self) -> &SearchState {
		&self.search
	}

	pub fn query(&self) -> &str {
		&self.search.query
	}

	pub fn merchant_filter(&self) -> &str {
		&self.search.merchant_filter
	}

	pub fn perks(&self) -> &[Perk] {
		&self.perks
	}

	pub fn filter_options(&self) -> &FilterOptions {
		&self.filter_options
	}

	/// Bumped once per result replacement; option derivation runs exactly that often.
	pub fn results_revision(&self) -> u64 {
		self.results_revision
	}

	pub fn loading(&self) -> bool {
		!self.in_flight.is_empty()
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub fn mount_phase(&self) -> MountPhase {
		self.mount
	}

	pub fn armed_token(&self) -> Option<DebounceToken> {
		self.armed
	}

	pub fn latest_seq(&self) -> FetchSeq {
		self.last_issued
	}

	pub fn in_flight_count(&self) -> usize {
		self.in_flight.len()
	}

	pub fn is_torn_down(&self) -> bool {
		self.torn_down
	}

	pub fn phase(&self) -> RequestPhase {
		if self.armed.is_some() {
			RequestPhase::Pending
		} else if !self.in_flight.is_empty() {
			RequestPhase::InFlight
		} else if self.has_settled {
			RequestPhase::Settled
		} else {
			RequestPhase::Idle
		}
	}

	pub fn lifecycle(&self) -> RequestLifecycle {
		RequestLifecycle { phase: self.phase(), loading: self.loading(), error: self.error.clone() }
	}

	pub fn view(&self) -> SearchView {
		SearchView {
			query: self.search.query.clone(),
			merchant_filter: self.search.merchant_filter.clone(),
			filter_options: self.filter_options.selector(),
			perks: self.perks.clone(),
			loading: self.loading(),
			error: self.error.clone(),
			phase: self.phase(),
		}
	}

	fn search_changed(&mut self) -> Vec<Command> {
		match self.mount {
			MountPhase::Initial => {
				tracing::debug!("Recorded search edit before mount; no debounce armed.");

				Vec::new()
			},
			MountPhase::PastMount => self.rearm_debounce(),
		}
	}

	fn rearm_debounce(&mut self) -> Vec<Command> {
		let mut commands = Vec::with_capacity(2);

		if let Some(token) = self.armed.take() {
			commands.push(Command::CancelDebounce { token });
		}

		let token = self.last_token.next();

		self.last_token = token;
		self.armed = Some(token);

		tracing::debug!(token = token.0, delay_ms = self.debounce.as_millis() as u64, "Armed debounce.");

		commands.push(Command::ArmDebounce { token, delay: self.debounce });

		commands
	}

	fn fetch_now(&mut self, reason: &'static str) -> Vec<Command> {
		if self.torn_down {
			return Vec::new();
		}

		let mut commands = Vec::with_capacity(2);

		if let Some(token) = self.armed.take() {
			commands.push(Command::CancelDebounce { token });
		}

		commands.push(self.issue_fetch(reason));

		commands
	}

	fn issue_fetch(&mut self, reason: &'static str) -> Command {
		let seq = self.last_issued.next();
		let query = self.search.to_query();

		self.last_issued = seq;
		self.in_flight.insert(seq);

		tracing::debug!(
			%seq,
			reason,
			search = query.search.as_deref(),
			merchant = query.merchant.as_deref(),
			"Issuing perk fetch."
		);

		Command::Fetch { seq, query }
	}

	fn replace_results(&mut self, perks: Vec<Perk>) {
		self.perks = perks;
		self.filter_options = FilterOptions::from_perks(&self.perks);
		self.results_revision += 1;
	}
}
impl Default for SearchController {
	fn default() -> Self {
		Self::new(DEFAULT_DEBOUNCE)
	}
}
