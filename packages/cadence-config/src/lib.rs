mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Directory, Listing, Postgres, Security, Service, Storage};

use std::{fs, path::Path};

const MAX_UTC_OFFSET_MINUTES: i32 = 23 * 60 + 59;

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
	for (label, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.admin_bind", &cfg.service.admin_bind),
		("storage.postgres.dsn", &cfg.storage.postgres.dsn),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.directory.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
		return Err(Error::Validation {
			message: "directory.utc_offset_minutes must be within -1439..=1439.".to_string(),
		});
	}
	if cfg.listing.default_page_size == 0 {
		return Err(Error::Validation {
			message: "listing.default_page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.listing.max_page_size < cfg.listing.default_page_size {
		return Err(Error::Validation {
			message: "listing.max_page_size must be at least listing.default_page_size."
				.to_string(),
		});
	}
	if cfg.listing.status_sort_max_rows == 0 {
		return Err(Error::Validation {
			message: "listing.status_sort_max_rows must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.security
		.admin_auth_token
		.as_deref()
		.map(|token| token.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.security.admin_auth_token = None;
	}
}
