use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use cadence_domain::window::DashboardRange;
use cadence_storage::stats::{self, TrackedEntity, WindowCount};

use crate::{CadenceService, Result};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DashboardRequest {
	pub range: Option<String>,
}
impl DashboardRequest {
	pub fn range(&self) -> DashboardRange {
		DashboardRange::parse(self.range.as_deref())
	}
}

/// An unconditional count and the count created inside the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WindowTotals {
	pub total: u64,
	#[serde(rename = "new")]
	pub recent: u64,
}
impl From<WindowCount> for WindowTotals {
	fn from(count: WindowCount) -> Self {
		Self { total: count.total, recent: count.recent }
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
	pub businesses: WindowTotals,
	pub reviews: WindowTotals,
	pub photos: WindowTotals,
	pub claims: WindowTotals,
	pub users: WindowTotals,
	pub business_submissions: WindowTotals,
	pub review_submissions: WindowTotals,
	pub photo_submissions: WindowTotals,
	pub claim_requests: WindowTotals,
	pub profiles_under_review: WindowTotals,
}

#[derive(Clone, Debug)]
pub struct AdminDashboardResponse {
	pub range: DashboardRange,
	pub data: AdminDashboard,
}

impl CadenceService {
	pub async fn admin_dashboard(&self, req: DashboardRequest) -> Result<AdminDashboardResponse> {
		self.admin_dashboard_at(req.range(), self.local_now()).await
	}

	/// All ten counts run concurrently. The first failure aborts the rest and no partial
	/// dashboard is returned.
	pub async fn admin_dashboard_at(
		&self,
		range: DashboardRange,
		now: OffsetDateTime,
	) -> Result<AdminDashboardResponse> {
		let since = range.window_start(now);
		let db = &self.db;
		let (
			businesses,
			reviews,
			photos,
			claims,
			users,
			business_submissions,
			review_submissions,
			photo_submissions,
			claim_requests,
			profiles_under_review,
		) = tokio::try_join!(
			stats::count_window(db, TrackedEntity::Businesses, false, since),
			stats::count_window(db, TrackedEntity::Reviews, false, since),
			stats::count_window(db, TrackedEntity::Photos, false, since),
			stats::count_window(db, TrackedEntity::Claims, false, since),
			stats::count_window(db, TrackedEntity::Users, false, since),
			stats::count_window(db, TrackedEntity::Businesses, true, since),
			stats::count_window(db, TrackedEntity::Reviews, true, since),
			stats::count_window(db, TrackedEntity::Photos, true, since),
			stats::count_window(db, TrackedEntity::Claims, true, since),
			stats::count_window(db, TrackedEntity::Users, true, since),
		)?;

		Ok(AdminDashboardResponse {
			range,
			data: AdminDashboard {
				businesses: businesses.into(),
				reviews: reviews.into(),
				photos: photos.into(),
				claims: claims.into(),
				users: users.into(),
				business_submissions: business_submissions.into(),
				review_submissions: review_submissions.into(),
				photo_submissions: photo_submissions.into(),
				claim_requests: claim_requests.into(),
				profiles_under_review: profiles_under_review.into(),
			},
		})
	}
}
