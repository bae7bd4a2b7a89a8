use std::collections::BTreeSet;

use serde::Serialize;

use crate::perk::Perk;

/// Distinct, non-blank merchant names derived from a result set.
///
/// Only [`FilterOptions::from_perks`] builds a populated value, so the set can never drift
/// from the results it was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
	merchants: BTreeSet<String>,
}
impl FilterOptions {
	pub fn from_perks(perks: &[Perk]) -> Self {
		let merchants = perks.iter().filter_map(Perk::merchant_name).map(str::to_string).collect();

		Self { merchants }
	}

	pub fn merchants(&self) -> impl Iterator<Item = &str> {
		self.merchants.iter().map(String::as_str)
	}

	pub fn contains(&self, merchant: &str) -> bool {
		self.merchants.contains(merchant.trim())
	}

	pub fn len(&self) -> usize {
		self.merchants.len()
	}

	pub fn is_empty(&self) -> bool {
		self.merchants.is_empty()
	}

	/// Selector entries: the "all merchants" sentinel first, then merchants in sorted order.
	pub fn selector(&self) -> Vec<MerchantOption> {
		std::iter::once(MerchantOption::All)
			.chain(self.merchants.iter().cloned().map(MerchantOption::Merchant))
			.collect()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MerchantOption {
	All,
	Merchant(String),
}
impl MerchantOption {
	/// Filter value to apply when this option is selected. The sentinel clears the filter.
	pub fn filter_value(&self) -> &str {
		match self {
			Self::All => "",
			Self::Merchant(name) => name,
		}
	}
}
