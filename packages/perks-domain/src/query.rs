use serde::Serialize;

/// User-owned search inputs. Only explicit user actions change these; fetch results never do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchState {
	pub query: String,
	pub merchant_filter: String,
}
impl SearchState {
	pub fn new(query: impl Into<String>, merchant_filter: impl Into<String>) -> Self {
		Self { query: query.into(), merchant_filter: merchant_filter.into() }
	}

	pub fn is_empty(&self) -> bool {
		self.query.is_empty() && self.merchant_filter.is_empty()
	}

	pub fn to_query(&self) -> PerkQuery {
		PerkQuery::new(&self.query, &self.merchant_filter)
	}
}

/// Normalized request parameters for the perk listing endpoint.
///
/// Inputs are trimmed and blank values become absent filters; nothing is ever rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PerkQuery {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub search: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub merchant: Option<String>,
}
impl PerkQuery {
	pub fn new(search: &str, merchant: &str) -> Self {
		Self { search: non_blank(search), merchant: non_blank(merchant) }
	}

	pub fn is_unfiltered(&self) -> bool {
		self.search.is_none() && self.merchant.is_none()
	}

	/// Query-string pairs, omitting absent filters.
	pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
		let mut pairs = Vec::with_capacity(2);

		if let Some(search) = self.search.as_deref() {
			pairs.push(("search", search));
		}
		if let Some(merchant) = self.merchant.as_deref() {
			pairs.push(("merchant", merchant));
		}

		pairs
	}
}

fn non_blank(raw: &str) -> Option<String> {
	let trimmed = raw.trim();

	if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
