use sqlx::types::Json;
use time::OffsetDateTime;
use uuid::Uuid;

use cadence_domain::{
	catalog::Service, hours::BusinessHour, identity::Owner, listing::BusinessStatus,
};

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct User {
	pub user_id: Uuid,
	pub name: String,
	pub email: String,
	pub role: String,
	pub profile_photo: Option<String>,
	pub status: String,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct BusinessRow {
	pub business_id: Uuid,
	pub owner_user_id: Option<Uuid>,
	pub owner_admin_id: Option<Uuid>,
	pub name: String,
	pub email: Option<String>,
	pub phone: Option<String>,
	pub address: Option<String>,
	pub description: Option<String>,
	pub images: Json<Vec<String>>,
	pub longitude: Option<f64>,
	pub latitude: Option<f64>,
	pub status: String,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ServiceRow {
	pub business_id: Uuid,
	pub position: i32,
	pub instrument_family: String,
	pub instrument_type: String,
	pub name: String,
	pub category: Option<String>,
	pub pricing_type: String,
	pub price: Option<f64>,
	pub price_min: Option<f64>,
	pub price_max: Option<f64>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct BusinessHourRow {
	pub business_id: Uuid,
	pub day: String,
	pub open_time: String,
	pub close_time: String,
	pub closed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BusinessInfo {
	pub name: String,
	pub email: Option<String>,
	pub phone: Option<String>,
	pub address: Option<String>,
	pub description: Option<String>,
	pub images: Vec<String>,
}

/// A business with its embedded services and weekly hours, in their stored order.
#[derive(Clone, Debug)]
pub struct Business {
	pub business_id: Uuid,
	pub owner: Owner,
	pub info: BusinessInfo,
	pub services: Vec<Service>,
	pub hours: Vec<BusinessHour>,
	pub longitude: Option<f64>,
	pub latitude: Option<f64>,
	pub status: BusinessStatus,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

/// One row of the admin listing: business summary plus the owning user, when there is one.
#[derive(Debug, sqlx::FromRow)]
pub struct ListingRow {
	pub business_id: Uuid,
	pub name: String,
	pub email: Option<String>,
	pub phone: Option<String>,
	pub address: Option<String>,
	pub description: Option<String>,
	pub images: Json<Vec<String>>,
	pub status: String,
	pub created_at: OffsetDateTime,
	pub owner_user_id: Option<Uuid>,
	pub owner_name: Option<String>,
	pub owner_email: Option<String>,
}

/// A recent review joined with its author and business.
#[derive(Debug, sqlx::FromRow)]
pub struct ReviewFeedRow {
	pub review_id: Uuid,
	pub rating: i32,
	pub comment: String,
	pub created_at: OffsetDateTime,
	pub user_name: Option<String>,
	pub user_profile_photo: Option<String>,
	pub business_id: Uuid,
	pub business_name: Option<String>,
}
