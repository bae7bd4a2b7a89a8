mod error;
pub mod http;

pub use error::{Error, Result};
pub use http::HttpGateway;

use std::{future::Future, pin::Pin};

use perks_domain::{Perk, PerkQuery};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of perk listings for a query + merchant pair.
///
/// Implementations own their own timeout policy. Callers do not abort in-flight fetches.
pub trait FetchGateway
where
	Self: Send + Sync,
{
	fn fetch<'a>(&'a self, query: &'a PerkQuery) -> BoxFuture<'a, Result<Vec<Perk>>>;
}
