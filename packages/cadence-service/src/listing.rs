use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use cadence_domain::{
	listing::{AdminSort, BusinessStatus, sort_by_status_then_name},
	pagination::{PageRequest, Pagination},
	window::ListingWindow,
};
use cadence_storage::{
	filter::{BusinessOrder, BusinessQuery},
	models::ListingRow,
	queries,
};

use crate::{BusinessInfoBody, CadenceService, Error, Result};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListRequest {
	pub page: Option<String>,
	pub limit: Option<String>,
	pub business_type: Option<String>,
	pub time: Option<String>,
	pub sort_by: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListingOwner {
	pub id: Uuid,
	pub name: Option<String>,
	pub email: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListItem {
	pub id: Uuid,
	pub business_info: BusinessInfoBody,
	pub user: Option<ListingOwner>,
	pub status: BusinessStatus,
	#[serde(serialize_with = "crate::time_serde::serialize")]
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct AdminListResponse {
	pub items: Vec<AdminListItem>,
	pub pagination: Pagination,
}

impl CadenceService {
	pub async fn admin_list(&self, req: AdminListRequest) -> Result<AdminListResponse> {
		self.admin_list_at(req, OffsetDateTime::now_utc()).await
	}

	pub async fn admin_list_at(
		&self,
		req: AdminListRequest,
		now: OffsetDateTime,
	) -> Result<AdminListResponse> {
		let page = self.page_request(req.page.as_deref(), req.limit.as_deref());
		let query = BusinessQuery {
			status: req.business_type.as_deref().and_then(BusinessStatus::parse),
			created_since: ListingWindow::parse(req.time.as_deref()).since(now),
			..BusinessQuery::default()
		};
		let sort = req.sort_by.as_deref().and_then(AdminSort::parse).unwrap_or(AdminSort::Latest);
		let total = queries::count_businesses(&self.db, &query).await?;
		let pagination = Pagination::new(page, total);
		let order = match sort {
			AdminSort::Latest => BusinessOrder::CreatedDesc,
			AdminSort::Oldest => BusinessOrder::CreatedAsc,
			AdminSort::NameAsc => BusinessOrder::NameAsc,
			AdminSort::NameDesc => BusinessOrder::NameDesc,
			AdminSort::Status => {
				let items = self.list_by_status(&query, page, total).await?;

				return Ok(AdminListResponse { items, pagination });
			},
		};
		let rows = queries::list_listing_rows(&self.db, &query, order, Some(page)).await?;
		let items = rows.into_iter().map(listing_item).collect::<Result<Vec<_>>>()?;

		Ok(AdminListResponse { items, pagination })
	}

	/// Status priority with a name tie-break has no storage-side index, so this ordering loads
	/// the entire filtered set, sorts it in memory, and slices the page afterwards. The set is
	/// bounded by `listing.status_sort_max_rows`; larger sets are refused.
	async fn list_by_status(
		&self,
		query: &BusinessQuery,
		page: PageRequest,
		total: u64,
	) -> Result<Vec<AdminListItem>> {
		let max_rows = u64::from(self.cfg.listing.status_sort_max_rows);

		if total > max_rows {
			tracing::warn!(total, max_rows, "Refusing to materialize a status-sorted listing.");

			return Err(Error::InvalidRequest {
				message: format!(
					"Sorting by status supports at most {max_rows} businesses. Narrow the filters."
				),
			});
		}

		let rows =
			queries::list_listing_rows(&self.db, query, BusinessOrder::CreatedAsc, None).await?;

		if rows.len() > 1_000 {
			tracing::warn!(rows = rows.len(), "Materialized a large status-sorted listing.");
		}

		let mut items = rows.into_iter().map(listing_item).collect::<Result<Vec<_>>>()?;

		sort_by_status_then_name(&mut items, |item| (item.status, item.business_info.name.as_str()));

		Ok(page.slice(items))
	}
}

fn listing_item(row: ListingRow) -> Result<AdminListItem> {
	let status = queries::parse_status(&row.status)?;
	let user = row.owner_user_id.map(|id| ListingOwner {
		id,
		name: row.owner_name,
		email: row.owner_email,
	});

	Ok(AdminListItem {
		id: row.business_id,
		business_info: BusinessInfoBody {
			name: row.name,
			email: row.email,
			phone: row.phone,
			address: row.address,
			description: row.description,
			image: row.images.0,
		},
		user,
		status,
		created_at: row.created_at,
	})
}
