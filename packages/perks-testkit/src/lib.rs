mod error;

pub use error::{Error, Result};

use std::{
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use tokio::{
	sync::{mpsc, oneshot, watch},
	time,
};

use perks_controller::SearchView;
use perks_domain::{Perk, PerkQuery};
use perks_gateway::{BoxFuture, FetchGateway};

const VIEW_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway whose fetches stay pending until the test resolves them through [`FetchQueue`].
///
/// Fetches are delivered to the queue in the order they reach the gateway, which lets tests
/// settle them in any order they like.
pub struct ScriptedGateway {
	calls: mpsc::UnboundedSender<PendingFetch>,
	issued: AtomicUsize,
}
impl ScriptedGateway {
	pub fn new() -> (Arc<Self>, FetchQueue) {
		let (calls, rx) = mpsc::unbounded_channel();

		(Arc::new(Self { calls, issued: AtomicUsize::new(0) }), FetchQueue { rx })
	}

	/// Number of fetches that reached the gateway so far.
	pub fn issued(&self) -> usize {
		self.issued.load(Ordering::SeqCst)
	}
}
impl FetchGateway for ScriptedGateway {
	fn fetch<'a>(
		&'a self,
		query: &'a PerkQuery,
	) -> BoxFuture<'a, perks_gateway::Result<Vec<Perk>>> {
		Box::pin(async move {
			let (responder, rx) = oneshot::channel();

			self.issued.fetch_add(1, Ordering::SeqCst);

			if self.calls.send(PendingFetch { query: query.clone(), responder }).is_err() {
				return Err(perks_gateway::Error::Status {
					status: 503,
					message: Some("Scripted gateway queue is closed.".to_string()),
				});
			}

			rx.await.unwrap_or_else(|_| {
				Err(perks_gateway::Error::Status {
					status: 504,
					message: Some("Scripted fetch was dropped unresolved.".to_string()),
				})
			})
		})
	}
}

pub struct FetchQueue {
	rx: mpsc::UnboundedReceiver<PendingFetch>,
}
impl FetchQueue {
	pub async fn next(&mut self) -> Result<PendingFetch> {
		self.rx.recv().await.ok_or_else(|| Error::Message("Scripted gateway was dropped.".to_string()))
	}

	pub fn try_next(&mut self) -> Option<PendingFetch> {
		self.rx.try_recv().ok()
	}
}

pub struct PendingFetch {
	pub query: PerkQuery,
	responder: oneshot::Sender<perks_gateway::Result<Vec<Perk>>>,
}
impl PendingFetch {
	pub fn succeed(self, perks: Vec<Perk>) {
		let _ = self.responder.send(Ok(perks));
	}

	pub fn fail(self, err: perks_gateway::Error) {
		let _ = self.responder.send(Err(err));
	}

	pub fn fail_with_message(self, status: u16, message: &str) {
		self.fail(perks_gateway::Error::Status { status, message: Some(message.to_string()) });
	}
}

pub fn perk(id: &str, merchant: Option<&str>) -> Perk {
	let perk = Perk::new(id, format!("Perk {id}")).with_category("general");

	match merchant {
		Some(merchant) => perk.with_merchant(merchant),
		None => perk,
	}
}

/// Gives spawned tasks a chance to run without moving a paused clock.
pub async fn settle() {
	for _ in 0..32 {
		tokio::task::yield_now().await;
	}
}

/// Waits until the published view satisfies `predicate` and returns that view.
pub async fn wait_for_view<F>(rx: &mut watch::Receiver<SearchView>, predicate: F) -> Result<SearchView>
where
	F: FnMut(&SearchView) -> bool,
{
	let view = time::timeout(VIEW_WAIT_TIMEOUT, rx.wait_for(predicate))
		.await
		.map_err(|_| Error::Message("Timed out waiting for the search view.".to_string()))?
		.map_err(|_| Error::Message("Search controller stopped publishing views.".to_string()))?;

	Ok(view.clone())
}
