use std::sync::Arc;

use cadence_service::CadenceService;
use cadence_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CadenceService>,
}
impl AppState {
	pub async fn new(config: cadence_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_parts(config, db))
	}

	/// Wraps an already prepared pool. Schema bootstrap is left to the caller.
	pub fn from_parts(config: cadence_config::Config, db: Db) -> Self {
		Self { service: Arc::new(CadenceService::new(config, db)) }
	}
}
