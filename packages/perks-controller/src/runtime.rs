//! Tokio event loop that executes [`SearchController`] commands.
//!
//! User intents, debounce fires, and fetch settlements all arrive on one channel and are
//! applied strictly in order, so the controller never sees interleaved mutations. Fetches run
//! as detached tasks; superseded ones are left to finish and their results are discarded by
//! sequence number.

use std::sync::Arc;

use tokio::{
	sync::{mpsc, oneshot, watch},
	task::JoinHandle,
};

use perks_domain::Perk;
use perks_gateway::FetchGateway;

use crate::{
	Error, Result,
	controller::{Command, Intent, SearchController},
	debounce::DebounceScheduler,
	state::{DebounceToken, FetchSeq},
	view::SearchView,
};

enum Event {
	Intent(Intent),
	DebounceFired(DebounceToken),
	FetchSettled { seq: FetchSeq, outcome: perks_gateway::Result<Vec<Perk>> },
	Sync(oneshot::Sender<()>),
	Shutdown,
}

/// Starts the event loop on the current tokio runtime.
///
/// The mount fetch is not issued until [`SearchHandle::initialize`] is called, so a caller
/// may still record search edits first.
pub fn spawn(controller: SearchController, gateway: Arc<dyn FetchGateway>) -> SearchHandle {
	let (events_tx, events_rx) = mpsc::unbounded_channel();
	let (view_tx, view_rx) = watch::channel(controller.view());
	let event_loop = EventLoop {
		controller,
		gateway,
		scheduler: DebounceScheduler::default(),
		events_tx: events_tx.clone(),
		events_rx,
		view_tx,
	};
	let task = tokio::spawn(event_loop.run());

	SearchHandle { events: events_tx, view: view_rx, task: Some(task) }
}

/// Presentation-side handle. Dropping it stops the event loop.
pub struct SearchHandle {
	events: mpsc::UnboundedSender<Event>,
	view: watch::Receiver<SearchView>,
	task: Option<JoinHandle<()>>,
}
impl SearchHandle {
	pub fn initialize(&self) -> Result<()> {
		self.send(Intent::Initialize)
	}

	pub fn set_query(&self, query: impl Into<String>) -> Result<()> {
		self.send(Intent::SetQuery(query.into()))
	}

	pub fn set_merchant_filter(&self, merchant: impl Into<String>) -> Result<()> {
		self.send(Intent::SetMerchantFilter(merchant.into()))
	}

	pub fn submit_now(&self) -> Result<()> {
		self.send(Intent::SubmitNow)
	}

	pub fn reset(&self) -> Result<()> {
		self.send(Intent::Reset)
	}

	pub fn refetch(&self) -> Result<()> {
		self.send(Intent::Refetch)
	}

	pub fn send(&self, intent: Intent) -> Result<()> {
		self.events.send(Event::Intent(intent)).map_err(|_| Error::Closed)
	}

	/// Latest published view.
	pub fn view(&self) -> SearchView {
		self.view.borrow().clone()
	}

	/// Receiver that is notified whenever the view changes.
	pub fn subscribe(&self) -> watch::Receiver<SearchView> {
		self.view.clone()
	}

	/// Resolves once every event sent before this call has been processed.
	pub async fn sync(&self) -> Result<()> {
		let (tx, rx) = oneshot::channel();

		self.events.send(Event::Sync(tx)).map_err(|_| Error::Closed)?;

		rx.await.map_err(|_| Error::Closed)
	}

	/// Cancels the pending timer and waits for the loop to stop. Fetches still in flight
	/// are left to finish and their results are dropped.
	pub async fn shutdown(mut self) -> Result<()> {
		let _ = self.events.send(Event::Shutdown);

		if let Some(task) = self.task.take() {
			task.await?;
		}

		Ok(())
	}
}
impl Drop for SearchHandle {
	fn drop(&mut self) {
		if self.task.is_some() {
			let _ = self.events.send(Event::Shutdown);
		}
	}
}

struct EventLoop {
	controller: SearchController,
	gateway: Arc<dyn FetchGateway>,
	scheduler: DebounceScheduler,
	events_tx: mpsc::UnboundedSender<Event>,
	events_rx: mpsc::UnboundedReceiver<Event>,
	view_tx: watch::Sender<SearchView>,
}
impl EventLoop {
	async fn run(mut self) {
		tracing::info!("Search controller started.");

		while let Some(event) = self.events_rx.recv().await {
			let commands = match event {
				Event::Intent(intent) => self.controller.apply(intent),
				Event::DebounceFired(token) => self.controller.on_debounce_fired(token),
				Event::FetchSettled { seq, outcome } => {
					self.controller.on_fetch_settled(seq, outcome);

					Vec::new()
				},
				Event::Sync(ack) => {
					let _ = ack.send(());

					continue;
				},
				Event::Shutdown => {
					let commands = self.controller.teardown();

					self.execute(commands);
					self.publish();

					break;
				},
			};

			self.execute(commands);
			self.publish();
		}

		self.scheduler.cancel_pending();

		tracing::info!("Search controller stopped.");
	}

	fn execute(&mut self, commands: Vec<Command>) {
		for command in commands {
			match command {
				Command::ArmDebounce { token, delay } => {
					let events = self.events_tx.clone();

					self.scheduler.arm(token, delay, move || {
						let _ = events.send(Event::DebounceFired(token));
					});
				},
				Command::CancelDebounce { token } => self.scheduler.cancel(token),
				Command::Fetch { seq, query } => {
					let gateway = Arc::clone(&self.gateway);
					let events = self.events_tx.clone();

					tokio::spawn(async move {
						let outcome = gateway.fetch(&query).await;
						let _ = events.send(Event::FetchSettled { seq, outcome });
					});
				},
			}
		}
	}

	fn publish(&self) {
		self.view_tx.send_if_modified(|view| {
			let next = self.controller.view();

			if *view == next {
				return false;
			}

			*view = next;

			true
		});
	}
}
