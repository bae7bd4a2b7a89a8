// std
use std::time::Duration as StdDuration;

// crates.io
use reqwest::{
	Client,
	header::{HeaderMap, HeaderName},
};
use serde::Deserialize;
use serde_json::{Map, Value};

// self
use crate::{BoxFuture, Error, FetchGateway, Result};
use perks_domain::{Perk, PerkQuery};

#[derive(Debug, Deserialize)]
struct PerksResponse {
	perks: Vec<Perk>,
}

/// [`FetchGateway`] backed by `GET {api_base}{path}?search=..&merchant=..`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
	client: Client,
	url: String,
}
impl HttpGateway {
	pub fn new(cfg: &perks_config::Gateway) -> Result<Self> {
		let mut builder = Client::builder().default_headers(default_headers(&cfg.default_headers)?);

		if let Some(timeout_ms) = cfg.timeout_ms {
			builder = builder.timeout(StdDuration::from_millis(timeout_ms));
		}

		let client = builder.build()?;
		let url = format!("{}{}", cfg.api_base, cfg.path);

		Ok(Self { client, url })
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	pub async fn list(&self, query: &PerkQuery) -> Result<Vec<Perk>> {
		let res = self.client.get(&self.url).query(&query.query_pairs()).send().await?;
		let status = res.status();

		if !status.is_success() {
			let body = res.bytes().await.ok();
			let message = body.as_deref().and_then(parse_error_message);

			tracing::debug!(status = status.as_u16(), ?message, "Perk listing request failed.");

			return Err(Error::Status { status: status.as_u16(), message });
		}

		let payload: PerksResponse = serde_json::from_slice(&res.bytes().await?)?;

		Ok(payload.perks)
	}
}
impl FetchGateway for HttpGateway {
	fn fetch<'a>(&'a self, query: &'a PerkQuery) -> BoxFuture<'a, Result<Vec<Perk>>> {
		Box::pin(self.list(query))
	}
}

pub fn default_headers(headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut map = HeaderMap::new();

	for (key, value) in headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		map.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(map)
}

fn parse_error_message(body: &[u8]) -> Option<String> {
	let json: Value = serde_json::from_slice(body).ok()?;
	let message = json.get("message").and_then(Value::as_str)?.trim();

	if message.is_empty() { None } else { Some(message.to_string()) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_message_from_error_body() {
		let body = br#"{ "message": " Search index is rebuilding. " }"#;

		assert_eq!(parse_error_message(body), Some("Search index is rebuilding.".to_string()));
	}

	#[test]
	fn ignores_bodies_without_usable_message() {
		assert_eq!(parse_error_message(b"<html>Bad gateway</html>"), None);
		assert_eq!(parse_error_message(br#"{ "error": "nope" }"#), None);
		assert_eq!(parse_error_message(br#"{ "message": "" }"#), None);
		assert_eq!(parse_error_message(br#"{ "message": 42 }"#), None);
	}

	#[test]
	fn rejects_non_string_header_values() {
		let mut headers = Map::new();

		headers.insert("x-client".to_string(), Value::Bool(true));

		assert!(matches!(default_headers(&headers), Err(Error::InvalidConfig { .. })));
	}
}
