use serde::Serialize;

use perks_domain::{MerchantOption, Perk};

use crate::state::RequestPhase;

/// Everything a presentation surface needs to render the search page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
	pub query: String,
	pub merchant_filter: String,
	/// Always starts with [`MerchantOption::All`].
	pub filter_options: Vec<MerchantOption>,
	pub perks: Vec<Perk>,
	pub loading: bool,
	pub error: Option<String>,
	pub phase: RequestPhase,
}
impl SearchView {
	pub fn result_count(&self) -> usize {
		self.perks.len()
	}

	pub fn summary(&self) -> String {
		match self.result_count() {
			1 => "Showing 1 perk".to_string(),
			n => format!("Showing {n} perks"),
		}
	}

	/// Option matching the current merchant filter. `None` when the filter names a merchant
	/// that the latest results no longer contain.
	pub fn selected_option(&self) -> Option<&MerchantOption> {
		let merchant = self.merchant_filter.trim();

		self.filter_options.iter().find(|option| option.filter_value() == merchant)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn view(perks: Vec<Perk>, merchant_filter: &str) -> SearchView {
		let filter_options = perks_domain::FilterOptions::from_perks(&perks).selector();

		SearchView {
			query: String::new(),
			merchant_filter: merchant_filter.to_string(),
			filter_options,
			perks,
			loading: false,
			error: None,
			phase: RequestPhase::Settled,
		}
	}

	#[test]
	fn summary_pluralizes() {
		assert_eq!(view(Vec::new(), "").summary(), "Showing 0 perks");
		assert_eq!(view(vec![Perk::new("1", "a")], "").summary(), "Showing 1 perk");
		assert_eq!(
			view(vec![Perk::new("1", "a"), Perk::new("2", "b")], "").summary(),
			"Showing 2 perks"
		);
	}

	#[test]
	fn selected_option_tracks_filter() {
		let perks = vec![Perk::new("1", "a").with_merchant("Acme")];

		assert_eq!(view(perks.clone(), "").selected_option(), Some(&MerchantOption::All));
		assert_eq!(
			view(perks.clone(), " Acme").selected_option(),
			Some(&MerchantOption::Merchant("Acme".to_string()))
		);
		assert_eq!(view(perks, "Gone").selected_option(), None);
	}
}
