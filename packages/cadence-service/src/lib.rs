pub mod analytics;
pub mod business;
pub mod dashboard;
pub mod listing;
pub mod moderation;
pub mod search;
pub mod time_serde;

mod error;

pub use analytics::{BusinessmanDashboard, BusinessmanDashboardResponse, LatestReview};
pub use business::{BusinessInfoBody, BusinessRecord, CreateBusinessRequest, OwnerSummary};
pub use dashboard::{AdminDashboard, AdminDashboardResponse, DashboardRequest, WindowTotals};
pub use error::{Error, Result};
pub use listing::{AdminListItem, AdminListRequest, AdminListResponse, ListingOwner};
pub use moderation::StatusUpdateRequest;
pub use search::{SearchRequest, SearchResponse};

use time::{OffsetDateTime, UtcOffset};
use uuid::Uuid;

use cadence_config::Config;
use cadence_domain::{identity::UserRole, pagination::PageRequest};
use cadence_storage::db::Db;

/// The authenticated caller, as vouched for by the identity gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
	pub user_id: Uuid,
	pub role: UserRole,
	pub email: Option<String>,
}

pub struct CadenceService {
	pub cfg: Config,
	pub db: Db,
}
impl CadenceService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}

	/// The current instant on the directory's wall clock.
	pub fn local_now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc().to_offset(self.utc_offset())
	}

	fn utc_offset(&self) -> UtcOffset {
		UtcOffset::from_whole_seconds(self.cfg.directory.utc_offset_minutes.saturating_mul(60))
			.unwrap_or(UtcOffset::UTC)
	}

	pub(crate) fn page_request(&self, page: Option<&str>, limit: Option<&str>) -> PageRequest {
		PageRequest::from_raw(
			page,
			limit,
			self.cfg.listing.default_page_size,
			self.cfg.listing.max_page_size,
		)
	}
}

pub(crate) fn non_empty(raw: Option<&str>) -> Option<String> {
	raw.map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
}
