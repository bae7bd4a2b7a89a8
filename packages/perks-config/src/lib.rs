mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, DEFAULT_ALL_MERCHANTS_LABEL, DEFAULT_DEBOUNCE_MS, Gateway, Search, Service,
};

use std::{fs, path::Path};

const MAX_DEBOUNCE_MS: u64 = 60_000;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	let api_base = cfg.gateway.api_base.trim();

	if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
		return Err(Error::Validation {
			message: "gateway.api_base must start with http:// or https://.".to_string(),
		});
	}
	if !cfg.gateway.path.starts_with('/') {
		return Err(Error::Validation {
			message: "gateway.path must start with '/'.".to_string(),
		});
	}

	for (key, value) in &cfg.gateway.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("gateway.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.search.debounce_ms > MAX_DEBOUNCE_MS {
		return Err(Error::Validation {
			message: format!("search.debounce_ms must be {MAX_DEBOUNCE_MS} or less."),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let api_base = cfg.gateway.api_base.trim().trim_end_matches('/').to_string();

	cfg.gateway.api_base = api_base;

	if cfg.gateway.timeout_ms == Some(0) {
		cfg.gateway.timeout_ms = None;
	}
	if cfg.search.all_merchants_label.trim().is_empty() {
		cfg.search.all_merchants_label = types::default_all_merchants_label();
	}
}
