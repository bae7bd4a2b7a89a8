use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perk {
	/// Accepts the storage-native `_id` as well.
	#[serde(alias = "_id")]
	pub id: String,
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub merchant: Option<String>,
	#[serde(default)]
	pub category: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub discount_percent: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_by: Option<CreatedBy>,
}
impl Perk {
	pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			title: title.into(),
			merchant: None,
			category: String::new(),
			discount_percent: None,
			description: None,
			created_by: None,
		}
	}

	pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
		self.merchant = Some(merchant.into());

		self
	}

	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.category = category.into();

		self
	}

	pub fn with_discount_percent(mut self, discount_percent: f64) -> Self {
		self.discount_percent = Some(discount_percent);

		self
	}

	/// Merchant name with surrounding whitespace removed, or `None` when blank or absent.
	pub fn merchant_name(&self) -> Option<&str> {
		self.merchant.as_deref().map(str::trim).filter(|name| !name.is_empty())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBy {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	pub email: String,
}
