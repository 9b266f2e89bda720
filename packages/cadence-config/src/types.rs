use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub directory: Directory,
	pub listing: Listing,
	pub security: Security,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Directory {
	/// Offset from UTC, in minutes, of the wall clock that business hours and dashboard day
	/// boundaries are expressed in.
	#[serde(default)]
	pub utc_offset_minutes: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Listing {
	#[serde(default = "default_page_size")]
	pub default_page_size: u32,
	#[serde(default = "default_max_page_size")]
	pub max_page_size: u32,
	/// Upper bound on the rows a status-sorted admin listing loads into memory.
	#[serde(default = "default_status_sort_max_rows")]
	pub status_sort_max_rows: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
	pub admin_auth_token: Option<String>,
}

fn default_page_size() -> u32 {
	10
}

fn default_max_page_size() -> u32 {
	100
}

fn default_status_sort_max_rows() -> u32 {
	10_000
}
