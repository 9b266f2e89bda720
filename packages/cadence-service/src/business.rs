use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use cadence_domain::{
	catalog::Service,
	hours::{BusinessHour, duplicate_day, weekday_name},
	identity::Owner,
	listing::BusinessStatus,
};
use cadence_storage::{
	filter::{BusinessOrder, BusinessQuery},
	models::{Business, BusinessInfo},
	queries,
};

use crate::{CadenceService, Caller, Error, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfoBody {
	pub name: String,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub phone: Option<String>,
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub image: Vec<String>,
}
impl From<BusinessInfo> for BusinessInfoBody {
	fn from(info: BusinessInfo) -> Self {
		Self {
			name: info.name,
			email: info.email,
			phone: info.phone,
			address: info.address,
			description: info.description,
			image: info.images,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
	pub id: Uuid,
	pub name: String,
	pub email: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRecord {
	pub id: Uuid,
	/// Set when an individual owns the business.
	pub user: Option<Uuid>,
	/// Set when an administrator owns the business.
	pub admin_id: Option<Uuid>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub owner: Option<OwnerSummary>,
	pub business_info: BusinessInfoBody,
	pub services: Vec<Service>,
	pub business_hours: Vec<BusinessHour>,
	pub longitude: Option<f64>,
	pub latitude: Option<f64>,
	pub status: BusinessStatus,
	#[serde(serialize_with = "crate::time_serde::serialize")]
	pub created_at: OffsetDateTime,
	#[serde(serialize_with = "crate::time_serde::serialize")]
	pub updated_at: OffsetDateTime,
}
impl From<Business> for BusinessRecord {
	fn from(business: Business) -> Self {
		Self {
			id: business.business_id,
			user: business.owner.individual(),
			admin_id: business.owner.administrator(),
			owner: None,
			business_info: business.info.into(),
			services: business.services,
			business_hours: business.hours,
			longitude: business.longitude,
			latitude: business.latitude,
			status: business.status,
			created_at: business.created_at,
			updated_at: business.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessRequest {
	pub business_info: BusinessInfoBody,
	#[serde(default)]
	pub services: Vec<Service>,
	#[serde(default)]
	pub business_hours: Vec<BusinessHour>,
	#[serde(default)]
	pub longitude: Option<f64>,
	#[serde(default)]
	pub latitude: Option<f64>,
}

impl CadenceService {
	/// Creates a pending business owned by the caller. Administrators become the administrative
	/// owner; every other role becomes the individual owner.
	pub async fn create_business(
		&self,
		caller: &Caller,
		req: CreateBusinessRequest,
	) -> Result<BusinessRecord> {
		validate_create(&req)?;

		if queries::get_user(&self.db, caller.user_id).await?.is_none() {
			return Err(Error::NotFound { message: "User not found.".to_string() });
		}

		let now = OffsetDateTime::now_utc();
		let info = req.business_info;
		let business = Business {
			business_id: Uuid::new_v4(),
			owner: Owner::for_creator(caller.role, caller.user_id),
			info: BusinessInfo {
				name: info.name.trim().to_string(),
				email: info.email,
				phone: info.phone,
				address: info.address,
				description: info.description,
				images: info.image,
			},
			services: req.services,
			hours: req.business_hours,
			longitude: req.longitude,
			latitude: req.latitude,
			status: BusinessStatus::Pending,
			created_at: now,
			updated_at: now,
		};

		queries::insert_business(&self.db, &business).await?;

		tracing::info!(
			business_id = %business.business_id,
			services = business.services.len(),
			"Business created."
		);

		Ok(business.into())
	}

	pub async fn get_business(&self, business_id: Uuid) -> Result<BusinessRecord> {
		let business = queries::get_business(&self.db, business_id)
			.await?
			.ok_or_else(|| Error::NotFound { message: "Business not found.".to_string() })?;
		let owner = queries::get_user(&self.db, business.owner.user_id()).await?.map(|user| {
			OwnerSummary { id: user.user_id, name: user.name, email: user.email }
		});
		let mut record = BusinessRecord::from(business);

		record.owner = owner;

		Ok(record)
	}

	/// Approved businesses the caller owns as an individual, oldest first. The caller must be a
	/// known user.
	pub async fn my_approved_businesses(&self, caller: &Caller) -> Result<Vec<BusinessRecord>> {
		if queries::get_user(&self.db, caller.user_id).await?.is_none() {
			return Err(Error::NotFound { message: "User not found.".to_string() });
		}

		let query = BusinessQuery {
			status: Some(BusinessStatus::Approved),
			owner_user_id: Some(caller.user_id),
			..BusinessQuery::default()
		};
		let ids =
			queries::find_business_ids(&self.db, &query, BusinessOrder::CreatedAsc, None).await?;
		let businesses = queries::load_businesses(&self.db, &ids).await?;

		Ok(businesses.into_iter().map(BusinessRecord::from).collect())
	}
}

fn validate_create(req: &CreateBusinessRequest) -> Result<()> {
	if req.business_info.name.trim().is_empty() {
		return Err(invalid("businessInfo.name must be non-empty."));
	}
	if req.business_info.image.iter().any(|url| url.trim().is_empty()) {
		return Err(invalid("businessInfo.image must not contain empty URLs."));
	}
	if let Some(day) = duplicate_day(&req.business_hours) {
		return Err(invalid(format!("businessHours lists {} more than once.", weekday_name(day))));
	}
	if let Some(longitude) = req.longitude
		&& !(longitude.is_finite() && (-180.0..=180.0).contains(&longitude))
	{
		return Err(invalid("longitude must be within [-180, 180]."));
	}
	if let Some(latitude) = req.latitude
		&& !(latitude.is_finite() && (-90.0..=90.0).contains(&latitude))
	{
		return Err(invalid("latitude must be within [-90, 90]."));
	}

	Ok(())
}

fn invalid(message: impl Into<String>) -> Error {
	Error::InvalidRequest { message: message.into() }
}
