pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use color_eyre::eyre;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = cadence_cli::VERSION,
	rename_all = "kebab",
	styles = cadence_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = cadence_config::load(&args.config)?;

	init_tracing(&config);

	let http_addr: SocketAddr = config.service.http_bind.parse()?;
	let admin_addr: SocketAddr = config.service.admin_bind.parse()?;

	check_binds(&config, http_addr, admin_addr)?;

	let state = AppState::new(config).await?;
	let app = routes::router(state.clone());
	let admin_app = routes::admin_router(state);
	let http_listener = TcpListener::bind(http_addr).await?;

	tracing::info!(%http_addr, "HTTP server listening.");

	let http_server = axum::serve(http_listener, app);
	let admin_listener = TcpListener::bind(admin_addr).await?;

	tracing::info!(%admin_addr, "Admin server listening.");

	let admin_server = axum::serve(admin_listener, admin_app);

	tokio::try_join!(http_server, admin_server)?;

	Ok(())
}

fn init_tracing(config: &cadence_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// The moderation surface carries no per-user authentication, so it never leaves loopback.
fn check_binds(
	config: &cadence_config::Config,
	http_addr: SocketAddr,
	admin_addr: SocketAddr,
) -> color_eyre::Result<()> {
	if config.security.bind_localhost_only && !http_addr.ip().is_loopback() {
		return Err(eyre::eyre!(
			"http_bind must be a loopback address when bind_localhost_only is true."
		));
	}
	if !admin_addr.ip().is_loopback() {
		return Err(eyre::eyre!("admin_bind must be a loopback address."));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use super::check_binds;

	fn sample() -> cadence_config::Config {
		let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../cadence.example.toml");

		cadence_config::load(&path).expect("Failed to load example config.")
	}

	#[test]
	fn public_bind_requires_opt_out_of_localhost_only() {
		let mut config = sample();
		let public = "0.0.0.0:8090".parse().expect("Valid address.");
		let admin = "127.0.0.1:8091".parse().expect("Valid address.");

		assert!(check_binds(&config, public, admin).is_err());

		config.security.bind_localhost_only = false;

		assert!(check_binds(&config, public, admin).is_ok());
	}

	#[test]
	fn admin_bind_is_always_loopback() {
		let mut config = sample();

		config.security.bind_localhost_only = false;

		let http = "0.0.0.0:8090".parse().expect("Valid address.");
		let admin = "0.0.0.0:8091".parse().expect("Valid address.");

		assert!(check_binds(&config, http, admin).is_err());
	}
}
