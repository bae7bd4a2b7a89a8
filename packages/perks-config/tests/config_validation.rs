use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use perks_config::{Config, DEFAULT_ALL_MERCHANTS_LABEL, DEFAULT_DEBOUNCE_MS, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.expect("Template config must be a table.")
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.expect("Template config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("perks_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> perks_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = perks_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn loads_and_normalizes_sample_config() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Sample config must load.");

	assert_eq!(cfg.gateway.api_base, "http://127.0.0.1:4000");
	assert_eq!(cfg.gateway.path, "/perks/all");
	assert_eq!(cfg.gateway.timeout_ms, Some(10_000));
	assert_eq!(
		cfg.gateway.default_headers.get("x-client").and_then(|v| v.as_str()),
		Some("perks-browse")
	);
	assert_eq!(cfg.search.debounce_ms, 500);
}

#[test]
fn search_section_defaults_when_missing() {
	let payload = "\
[service]
log_level = \"debug\"

[gateway]
api_base = \"https://perks.example.com\"
";
	let cfg = load_payload(payload.to_string()).expect("Minimal config must load.");

	assert_eq!(cfg.gateway.path, "/perks/all");
	assert_eq!(cfg.gateway.timeout_ms, None);
	assert!(cfg.gateway.default_headers.is_empty());
	assert_eq!(cfg.search.debounce_ms, DEFAULT_DEBOUNCE_MS);
	assert_eq!(cfg.search.all_merchants_label, DEFAULT_ALL_MERCHANTS_LABEL);
}

#[test]
fn zero_timeout_means_no_timeout() {
	let cfg = load_payload(sample_toml_with("gateway", "timeout_ms", Value::Integer(0)))
		.expect("Config must load.");

	assert_eq!(cfg.gateway.timeout_ms, None);
}

#[test]
fn blank_sentinel_label_falls_back_to_default() {
	let cfg = load_payload(sample_toml_with(
		"search",
		"all_merchants_label",
		Value::String("   ".to_string()),
	))
	.expect("Config must load.");

	assert_eq!(cfg.search.all_merchants_label, DEFAULT_ALL_MERCHANTS_LABEL);
}

#[test]
fn api_base_requires_http_scheme() {
	let err = load_payload(sample_toml_with(
		"gateway",
		"api_base",
		Value::String("ftp://perks.example.com".to_string()),
	))
	.expect_err("Expected api_base validation error.");

	assert!(
		err.to_string().contains("gateway.api_base must start with http:// or https://."),
		"Unexpected error: {err}"
	);
}

#[test]
fn path_must_be_absolute() {
	let mut cfg = base_config();

	cfg.gateway.path = "perks/all".to_string();

	let err = perks_config::validate(&cfg).expect_err("Expected path validation error.");

	assert!(err.to_string().contains("gateway.path must start with '/'."), "Unexpected error: {err}");
}

#[test]
fn default_headers_must_be_strings() {
	let mut cfg = base_config();

	cfg.gateway.default_headers.insert("x-retries".to_string(), serde_json::json!(3));

	let err = perks_config::validate(&cfg).expect_err("Expected header validation error.");

	assert!(
		err.to_string().contains("gateway.default_headers.x-retries must be a string."),
		"Unexpected error: {err}"
	);
}

#[test]
fn debounce_is_bounded() {
	let mut cfg = base_config();

	cfg.search.debounce_ms = 0;

	assert!(perks_config::validate(&cfg).is_ok());

	cfg.search.debounce_ms = 60_001;

	let err = perks_config::validate(&cfg).expect_err("Expected debounce validation error.");

	assert!(
		err.to_string().contains("search.debounce_ms must be 60000 or less."),
		"Unexpected error: {err}"
	);
}

#[test]
fn log_level_must_be_non_empty() {
	let mut cfg = base_config();

	cfg.service.log_level = " ".to_string();

	assert!(matches!(perks_config::validate(&cfg), Err(Error::Validation { .. })));
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("perks_config_test_missing_file.toml");

	let err = perks_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}

#[test]
fn malformed_toml_reports_parse_error() {
	let err = load_payload("[service\nlog_level = ".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }));
}
