use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_ALL_MERCHANTS_LABEL: &str = "All merchants";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub gateway: Gateway,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Gateway {
	pub api_base: String,
	#[serde(default = "default_path")]
	pub path: String,
	/// Optional. When absent the HTTP client never times out and a hung request keeps the
	/// controller loading.
	#[serde(default)]
	pub timeout_ms: Option<u64>,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	#[serde(default = "default_debounce_ms")]
	pub debounce_ms: u64,
	/// Label rendered for the sentinel option that clears the merchant filter.
	#[serde(default = "default_all_merchants_label")]
	pub all_merchants_label: String,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			debounce_ms: default_debounce_ms(),
			all_merchants_label: default_all_merchants_label(),
		}
	}
}

fn default_path() -> String {
	"/perks/all".to_string()
}

fn default_debounce_ms() -> u64 {
	DEFAULT_DEBOUNCE_MS
}

pub(crate) fn default_all_merchants_label() -> String {
	DEFAULT_ALL_MERCHANTS_LABEL.to_string()
}
