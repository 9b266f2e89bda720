//! Dashboard for business owners, scoped to the businesses the caller owns.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use cadence_domain::{identity::UserRole, window::DashboardRange};
use cadence_storage::{models::ReviewFeedRow, stats};

use crate::{CadenceService, Caller, DashboardRequest, Error, Result};

const LATEST_REVIEW_LIMIT: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerSummary {
	pub name: Option<String>,
	pub profile_photo: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReviewedBusiness {
	pub id: Uuid,
	pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LatestReview {
	pub id: Uuid,
	pub rating: i32,
	pub comment: String,
	#[serde(serialize_with = "crate::time_serde::serialize")]
	pub date: OffsetDateTime,
	pub user: ReviewerSummary,
	pub business: ReviewedBusiness,
}
impl From<ReviewFeedRow> for LatestReview {
	fn from(row: ReviewFeedRow) -> Self {
		let business_name =
			row.business_name.filter(|name| !name.is_empty()).unwrap_or_else(|| "N/A".to_string());

		Self {
			id: row.review_id,
			rating: row.rating,
			comment: row.comment,
			date: row.created_at,
			user: ReviewerSummary { name: row.user_name, profile_photo: row.user_profile_photo },
			business: ReviewedBusiness { id: row.business_id, name: business_name },
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessmanDashboard {
	pub reviews: u64,
	pub photos: u64,
	pub saves: u64,
	pub latest_reviews: Vec<LatestReview>,
}

#[derive(Clone, Debug)]
pub struct BusinessmanDashboardResponse {
	pub range: DashboardRange,
	pub data: BusinessmanDashboard,
}

impl CadenceService {
	pub async fn businessman_dashboard(
		&self,
		caller: &Caller,
		req: DashboardRequest,
	) -> Result<BusinessmanDashboardResponse> {
		self.businessman_dashboard_at(caller, req.range(), self.local_now()).await
	}

	/// `photos` counts reviews on owned businesses that carry at least one image. `saves` counts
	/// the caller's own saves of the businesses they saved, not saves of the businesses they own.
	pub async fn businessman_dashboard_at(
		&self,
		caller: &Caller,
		range: DashboardRange,
		now: OffsetDateTime,
	) -> Result<BusinessmanDashboardResponse> {
		if caller.role != UserRole::BusinessMan {
			return Err(Error::AccessDenied { message: "Access denied".to_string() });
		}

		let db = &self.db;
		let since = range.window_start(now);
		let (owned, saved) = tokio::try_join!(
			stats::owned_business_ids(db, caller.user_id),
			stats::saved_business_ids(db, caller.user_id),
		)?;
		let (reviews, photos, saves, latest) = tokio::try_join!(
			stats::count_reviews(db, &owned, since, false),
			stats::count_reviews(db, &owned, since, true),
			stats::count_saves(db, caller.user_id, &saved, since),
			stats::latest_reviews(db, &owned, since, LATEST_REVIEW_LIMIT),
		)?;

		Ok(BusinessmanDashboardResponse {
			range,
			data: BusinessmanDashboard {
				reviews,
				photos,
				saves,
				latest_reviews: latest.into_iter().map(LatestReview::from).collect(),
			},
		})
	}
}
