use std::collections::HashMap;

use sqlx::{Postgres, QueryBuilder, types::Json};
use time::OffsetDateTime;
use uuid::Uuid;

use cadence_domain::{
	catalog::Service,
	hours::{BusinessHour, TimeOfDay, parse_weekday, weekday_name},
	identity::Owner,
	listing::BusinessStatus,
	pagination::PageRequest,
	pricing::{PriceRange, Pricing, PricingKind},
};

use crate::{
	Error, Result,
	db::Db,
	filter::{self, BusinessOrder, BusinessQuery},
	models::{Business, BusinessHourRow, BusinessInfo, BusinessRow, ListingRow, ServiceRow, User},
};

pub async fn get_user(db: &Db, user_id: Uuid) -> Result<Option<User>> {
	let user = sqlx::query_as::<_, User>(
		"\
SELECT user_id, name, email, role, profile_photo, status, created_at
FROM users
WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(user)
}

/// Inserts a business with its services and hours in one transaction.
pub async fn insert_business(db: &Db, business: &Business) -> Result<()> {
	let mut tx = db.pool.begin().await?;

	sqlx::query(
		"\
INSERT INTO businesses (
	business_id,
	owner_user_id,
	owner_admin_id,
	name,
	email,
	phone,
	address,
	description,
	images,
	longitude,
	latitude,
	status,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
	)
	.bind(business.business_id)
	.bind(business.owner.individual())
	.bind(business.owner.administrator())
	.bind(business.info.name.as_str())
	.bind(business.info.email.as_deref())
	.bind(business.info.phone.as_deref())
	.bind(business.info.address.as_deref())
	.bind(business.info.description.as_deref())
	.bind(Json(&business.info.images))
	.bind(business.longitude)
	.bind(business.latitude)
	.bind(business.status.as_str())
	.bind(business.created_at)
	.bind(business.updated_at)
	.execute(&mut *tx)
	.await?;

	for (position, service) in business.services.iter().enumerate() {
		let (price, price_min, price_max) = match service.pricing {
			Pricing::Exact(price) => (Some(price), None, None),
			Pricing::Range(range) => (None, range.min, range.max),
		};

		sqlx::query(
			"\
INSERT INTO business_services (
	business_id,
	position,
	instrument_family,
	instrument_type,
	name,
	category,
	pricing_type,
	price,
	price_min,
	price_max
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
		)
		.bind(business.business_id)
		.bind(position_of(position)?)
		.bind(service.instrument_family.as_str())
		.bind(service.instrument_type.as_str())
		.bind(service.name.as_str())
		.bind(service.category.as_deref())
		.bind(service.pricing.kind().as_str())
		.bind(price)
		.bind(price_min)
		.bind(price_max)
		.execute(&mut *tx)
		.await?;
	}

	for (position, hour) in business.hours.iter().enumerate() {
		sqlx::query(
			"\
INSERT INTO business_hours (business_id, position, day, open_time, close_time, closed)
VALUES ($1, $2, $3, $4, $5, $6)",
		)
		.bind(business.business_id)
		.bind(position_of(position)?)
		.bind(weekday_name(hour.day))
		.bind(hour.open.to_string())
		.bind(hour.close.to_string())
		.bind(hour.closed)
		.execute(&mut *tx)
		.await?;
	}

	tx.commit().await?;

	Ok(())
}

pub async fn count_businesses(db: &Db, query: &BusinessQuery) -> Result<u64> {
	let mut builder = QueryBuilder::<Postgres>::new("SELECT count(*) FROM businesses b");

	filter::push_predicate(&mut builder, query);

	let count = builder.build_query_scalar::<i64>().fetch_one(&db.pool).await?;

	Ok(u64::try_from(count).unwrap_or_default())
}

/// Ids of the matching businesses in `order`, optionally restricted to one page.
pub async fn find_business_ids(
	db: &Db,
	query: &BusinessQuery,
	order: BusinessOrder,
	page: Option<PageRequest>,
) -> Result<Vec<Uuid>> {
	let mut builder = QueryBuilder::<Postgres>::new("SELECT b.business_id FROM businesses b");

	filter::push_predicate(&mut builder, query);
	filter::push_order_and_page(&mut builder, order, page);

	let ids = builder.build_query_scalar::<Uuid>().fetch_all(&db.pool).await?;

	Ok(ids)
}

pub async fn list_listing_rows(
	db: &Db,
	query: &BusinessQuery,
	order: BusinessOrder,
	page: Option<PageRequest>,
) -> Result<Vec<ListingRow>> {
	let mut builder = QueryBuilder::<Postgres>::new(
		"\
SELECT
	b.business_id,
	b.name,
	b.email,
	b.phone,
	b.address,
	b.description,
	b.images,
	b.status,
	b.created_at,
	b.owner_user_id,
	u.name AS owner_name,
	u.email AS owner_email
FROM businesses b
LEFT JOIN users u ON u.user_id = b.owner_user_id",
	);

	filter::push_predicate(&mut builder, query);
	filter::push_order_and_page(&mut builder, order, page);

	let rows = builder.build_query_as::<ListingRow>().fetch_all(&db.pool).await?;

	Ok(rows)
}

/// Loads full business records, returned in the order of `ids`. Unknown ids are skipped.
pub async fn load_businesses(db: &Db, ids: &[Uuid]) -> Result<Vec<Business>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, BusinessRow>(
		"\
SELECT
	business_id,
	owner_user_id,
	owner_admin_id,
	name,
	email,
	phone,
	address,
	description,
	images,
	longitude,
	latitude,
	status,
	created_at,
	updated_at
FROM businesses
WHERE business_id = ANY($1)",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await?;
	let service_rows = sqlx::query_as::<_, ServiceRow>(
		"\
SELECT
	business_id,
	position,
	instrument_family,
	instrument_type,
	name,
	category,
	pricing_type,
	price,
	price_min,
	price_max
FROM business_services
WHERE business_id = ANY($1)
ORDER BY business_id, position",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await?;
	let hour_rows = sqlx::query_as::<_, BusinessHourRow>(
		"\
SELECT business_id, day, open_time, close_time, closed
FROM business_hours
WHERE business_id = ANY($1)
ORDER BY business_id, position",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await?;
	let mut services: HashMap<Uuid, Vec<Service>> = HashMap::new();

	for row in service_rows {
		let business_id = row.business_id;

		services.entry(business_id).or_default().push(service_from_row(row)?);
	}

	let mut hours: HashMap<Uuid, Vec<BusinessHour>> = HashMap::new();

	for row in hour_rows {
		let business_id = row.business_id;

		hours.entry(business_id).or_default().push(hour_from_row(row)?);
	}

	let mut by_id: HashMap<Uuid, BusinessRow> =
		rows.into_iter().map(|row| (row.business_id, row)).collect();
	let mut out = Vec::with_capacity(by_id.len());

	for id in ids {
		let Some(row) = by_id.remove(id) else {
			continue;
		};
		let business_services = services.remove(id).unwrap_or_default();
		let business_hours = hours.remove(id).unwrap_or_default();

		out.push(business_from_row(row, business_services, business_hours)?);
	}

	Ok(out)
}

pub async fn get_business(db: &Db, business_id: Uuid) -> Result<Option<Business>> {
	let mut businesses = load_businesses(db, &[business_id]).await?;

	Ok(businesses.pop())
}

/// Returns `false` when no business has this id.
pub async fn update_business_status(
	db: &Db,
	business_id: Uuid,
	status: BusinessStatus,
	now: OffsetDateTime,
) -> Result<bool> {
	let result = sqlx::query(
		"\
UPDATE businesses
SET status = $1, updated_at = $2
WHERE business_id = $3",
	)
	.bind(status.as_str())
	.bind(now)
	.bind(business_id)
	.execute(&db.pool)
	.await?;

	Ok(result.rows_affected() > 0)
}

pub fn parse_status(raw: &str) -> Result<BusinessStatus> {
	BusinessStatus::parse(raw).ok_or_else(|| Error::CorruptRow(format!("unknown status {raw:?}")))
}

fn position_of(index: usize) -> Result<i32> {
	i32::try_from(index)
		.map_err(|_| Error::InvalidArgument(format!("position {index} is out of range")))
}

fn business_from_row(
	row: BusinessRow,
	services: Vec<Service>,
	hours: Vec<BusinessHour>,
) -> Result<Business> {
	let owner = Owner::from_columns(row.owner_user_id, row.owner_admin_id).ok_or_else(|| {
		Error::CorruptRow(format!("business {} must have exactly one owner", row.business_id))
	})?;

	Ok(Business {
		business_id: row.business_id,
		owner,
		info: BusinessInfo {
			name: row.name,
			email: row.email,
			phone: row.phone,
			address: row.address,
			description: row.description,
			images: row.images.0,
		},
		services,
		hours,
		longitude: row.longitude,
		latitude: row.latitude,
		status: parse_status(&row.status)?,
		created_at: row.created_at,
		updated_at: row.updated_at,
	})
}

fn service_from_row(row: ServiceRow) -> Result<Service> {
	let kind = PricingKind::parse(&row.pricing_type).ok_or_else(|| {
		Error::CorruptRow(format!("unknown pricing_type {:?}", row.pricing_type))
	})?;
	let pricing = match kind {
		PricingKind::Exact => {
			let price = row.price.ok_or_else(|| {
				Error::CorruptRow(format!(
					"exact service {} of business {} has no price",
					row.position, row.business_id
				))
			})?;

			Pricing::Exact(price)
		},
		PricingKind::Range => {
			let range = PriceRange::new(row.price_min, row.price_max).ok_or_else(|| {
				Error::CorruptRow(format!(
					"range service {} of business {} is inverted",
					row.position, row.business_id
				))
			})?;

			Pricing::Range(range)
		},
	};

	Ok(Service {
		instrument_family: row.instrument_family,
		instrument_type: row.instrument_type,
		name: row.name,
		category: row.category,
		pricing,
	})
}

fn hour_from_row(row: BusinessHourRow) -> Result<BusinessHour> {
	let day = parse_weekday(&row.day)
		.ok_or_else(|| Error::CorruptRow(format!("unknown weekday {:?}", row.day)))?;
	let open = parse_time(&row.open_time)?;
	let close = parse_time(&row.close_time)?;

	Ok(BusinessHour { day, open, close, closed: row.closed })
}

fn parse_time(raw: &str) -> Result<TimeOfDay> {
	TimeOfDay::parse(raw).ok_or_else(|| Error::CorruptRow(format!("invalid time of day {raw:?}")))
}
