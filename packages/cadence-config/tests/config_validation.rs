use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use cadence_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let table = root
		.as_table_mut()
		.and_then(|root| root.get_mut(section))
		.and_then(Value::as_table_mut)
		.expect("Sample config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
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

	path.push(format!("cadence_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> cadence_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = cadence_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn sample_config_loads() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.listing.default_page_size, 10);
	assert_eq!(cfg.listing.max_page_size, 100);
	assert_eq!(cfg.storage.postgres.pool_max_conns, 8);
	assert_eq!(cfg.directory.utc_offset_minutes, 0);
}

#[test]
fn blank_admin_token_is_treated_as_absent() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert!(cfg.security.admin_auth_token.is_none());
}

#[test]
fn admin_token_is_kept_when_present() {
	let payload = sample_with("security", "admin_auth_token", Value::String("s3cret".to_string()));
	let cfg = load_payload(payload).expect("Config must load.");

	assert_eq!(cfg.security.admin_auth_token.as_deref(), Some("s3cret"));
}

#[test]
fn default_page_size_must_be_positive() {
	let payload = sample_with("listing", "default_page_size", Value::Integer(0));
	let err = load_payload(payload).expect_err("Expected page size validation error.");

	assert!(
		err.to_string().contains("listing.default_page_size must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn max_page_size_must_cover_default() {
	let payload = sample_with("listing", "max_page_size", Value::Integer(5));
	let err = load_payload(payload).expect_err("Expected max page size validation error.");

	assert!(matches!(err, Error::Validation { .. }));
	assert!(err.to_string().contains("listing.max_page_size"), "Unexpected error: {err}");
}

#[test]
fn utc_offset_must_be_within_a_day() {
	let payload = sample_with("directory", "utc_offset_minutes", Value::Integer(24 * 60));
	let err = load_payload(payload).expect_err("Expected offset validation error.");

	assert!(err.to_string().contains("directory.utc_offset_minutes"), "Unexpected error: {err}");
}

#[test]
fn pool_size_must_be_positive() {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let postgres = root
		.get_mut("storage")
		.and_then(|storage| storage.get_mut("postgres"))
		.and_then(Value::as_table_mut)
		.expect("Sample config must include [storage.postgres].");

	postgres.insert("pool_max_conns".to_string(), Value::Integer(0));

	let payload = toml::to_string(&root).expect("Failed to render sample config.");
	let err = load_payload(payload).expect_err("Expected pool size validation error.");

	assert!(
		err.to_string().contains("storage.postgres.pool_max_conns must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn missing_file_reports_path() {
	let path = env::temp_dir().join("cadence_config_missing_file.toml");
	let err = cadence_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}
