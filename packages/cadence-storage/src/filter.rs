//! Phase-one rendering of business filters into SQL.
//!
//! Every predicate is applied to `businesses b`. Service filters become a single `EXISTS` over
//! `business_services`, so one service has to satisfy the whole conjunction.

use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use cadence_domain::{
	catalog::ServiceFilter,
	hours::{WallClock, weekday_name},
	listing::BusinessStatus,
	pagination::PageRequest,
	pricing::PriceBounds,
};

#[derive(Clone, Debug, Default)]
pub struct BusinessQuery {
	pub status: Option<BusinessStatus>,
	pub owner_user_id: Option<Uuid>,
	pub created_since: Option<OffsetDateTime>,
	pub services: ServiceFilter,
	pub open_at: Option<WallClock>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusinessOrder {
	CreatedAsc,
	CreatedDesc,
	NameAsc,
	NameDesc,
}
impl BusinessOrder {
	fn sql(self) -> &'static str {
		match self {
			Self::CreatedAsc => "b.created_at ASC, b.business_id ASC",
			Self::CreatedDesc => "b.created_at DESC, b.business_id DESC",
			Self::NameAsc => "b.name COLLATE business_name_base ASC, b.business_id ASC",
			Self::NameDesc => "b.name COLLATE business_name_base DESC, b.business_id DESC",
		}
	}
}

pub fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, query: &BusinessQuery) {
	builder.push(" WHERE TRUE");

	if let Some(status) = query.status {
		builder.push(" AND b.status = ").push_bind(status.as_str());
	}
	if let Some(owner) = query.owner_user_id {
		builder.push(" AND b.owner_user_id = ").push_bind(owner);
	}
	if let Some(since) = query.created_since {
		builder.push(" AND b.created_at >= ").push_bind(since);
	}
	if !query.services.is_empty() {
		push_service_exists(builder, &query.services);
	}
	if let Some(clock) = query.open_at {
		push_open_at(builder, clock);
	}
}

pub fn push_order_and_page(
	builder: &mut QueryBuilder<'_, Postgres>,
	order: BusinessOrder,
	page: Option<PageRequest>,
) {
	builder.push(" ORDER BY ").push(order.sql());

	if let Some(page) = page {
		builder.push(" LIMIT ").push_bind(i64::from(page.limit));
		builder.push(" OFFSET ").push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
	}
}

fn push_service_exists(builder: &mut QueryBuilder<'_, Postgres>, filter: &ServiceFilter) {
	builder.push(
		" AND EXISTS (SELECT 1 FROM business_services s WHERE s.business_id = b.business_id",
	);

	if let Some(family) = &filter.instrument_family {
		builder.push(" AND s.instrument_family = ").push_bind(family.clone());
	}
	if let Some(instrument_type) = &filter.instrument_type {
		builder.push(" AND s.instrument_type = ").push_bind(instrument_type.clone());
	}
	if let Some(name) = &filter.name {
		builder.push(" AND s.name = ").push_bind(name.clone());
	}
	if let Some(category) = &filter.category {
		builder.push(" AND s.category = ").push_bind(category.clone());
	}
	if let Some(bounds) = &filter.price {
		push_price_bounds(builder, bounds);
	}

	builder.push(")");
}

// A NULL range end compares as unknown, so it never satisfies a supplied bound.
fn push_price_bounds(builder: &mut QueryBuilder<'_, Postgres>, bounds: &PriceBounds) {
	builder.push(" AND ((s.pricing_type = 'exact'");

	if let Some(min) = bounds.min() {
		builder.push(" AND s.price >= ").push_bind(min);
	}
	if let Some(max) = bounds.max() {
		builder.push(" AND s.price <= ").push_bind(max);
	}

	builder.push(") OR (s.pricing_type = 'range'");

	if let Some(min) = bounds.min() {
		builder.push(" AND s.price_min >= ").push_bind(min);
	}
	if let Some(max) = bounds.max() {
		builder.push(" AND s.price_max <= ").push_bind(max);
	}

	builder.push("))");
}

fn push_open_at(builder: &mut QueryBuilder<'_, Postgres>, clock: WallClock) {
	let time = clock.time.to_string();

	builder
		.push(
			" AND EXISTS (SELECT 1 FROM business_hours h WHERE h.business_id = b.business_id \
			 AND NOT h.closed AND h.day = ",
		)
		.push_bind(weekday_name(clock.day))
		.push(" AND h.open_time COLLATE \"C\" <= ")
		.push_bind(time.clone())
		.push(" AND h.close_time COLLATE \"C\" >= ")
		.push_bind(time)
		.push(")");
}

#[cfg(test)]
mod tests {
	use sqlx::{Postgres, QueryBuilder};
	use time::Weekday;

	use cadence_domain::{
		catalog::ServiceFilter,
		hours::{TimeOfDay, WallClock},
		listing::BusinessStatus,
		pagination::PageRequest,
		pricing::PriceBounds,
	};

	use super::{BusinessOrder, BusinessQuery, push_order_and_page, push_predicate};

	fn render(query: &BusinessQuery) -> String {
		let mut builder = QueryBuilder::<Postgres>::new("SELECT b.business_id FROM businesses b");

		push_predicate(&mut builder, query);

		builder.sql().to_string()
	}

	#[test]
	fn empty_query_adds_no_constraints() {
		assert_eq!(
			render(&BusinessQuery::default()),
			"SELECT b.business_id FROM businesses b WHERE TRUE"
		);
	}

	#[test]
	fn service_filters_share_one_exists_clause() {
		let query = BusinessQuery {
			services: ServiceFilter {
				instrument_family: Some("Strings".to_string()),
				category: Some("beginner".to_string()),
				price: PriceBounds::new(Some(10.0), Some(20.0)),
				..ServiceFilter::default()
			},
			..BusinessQuery::default()
		};
		let sql = render(&query);

		assert_eq!(sql.matches("EXISTS").count(), 1);
		assert!(sql.contains("s.instrument_family = $1"));
		assert!(sql.contains("s.category = $2"));
		assert!(sql.contains("(s.pricing_type = 'exact' AND s.price >= $3 AND s.price <= $4)"));
		assert!(
			sql.contains("(s.pricing_type = 'range' AND s.price_min >= $5 AND s.price_max <= $6)")
		);
	}

	#[test]
	fn one_sided_bound_only_constrains_that_side() {
		let query = BusinessQuery {
			services: ServiceFilter {
				price: PriceBounds::new(None, Some(50.0)),
				..ServiceFilter::default()
			},
			..BusinessQuery::default()
		};
		let sql = render(&query);

		assert!(sql.contains("(s.pricing_type = 'exact' AND s.price <= $1)"));
		assert!(sql.contains("(s.pricing_type = 'range' AND s.price_max <= $2)"));
		assert!(!sql.contains("price_min"));
	}

	#[test]
	fn open_now_and_status_filters_are_conjoined() {
		let query = BusinessQuery {
			status: Some(BusinessStatus::Approved),
			open_at: Some(WallClock {
				day: Weekday::Monday,
				time: TimeOfDay::new(12, 0).expect("Valid time."),
			}),
			..BusinessQuery::default()
		};
		let sql = render(&query);

		assert!(sql.contains("b.status = $1"));
		assert!(sql.contains("NOT h.closed AND h.day = $2"));
		assert!(sql.contains("h.open_time COLLATE \"C\" <= $3"));
		assert!(sql.contains("h.close_time COLLATE \"C\" >= $4"));
	}

	#[test]
	fn name_order_uses_base_collation_and_pages_last() {
		let mut builder = QueryBuilder::<Postgres>::new("SELECT b.business_id FROM businesses b");

		push_predicate(&mut builder, &BusinessQuery::default());
		push_order_and_page(
			&mut builder,
			BusinessOrder::NameDesc,
			Some(PageRequest { page: 3, limit: 10 }),
		);

		assert!(builder.sql().ends_with(
			"ORDER BY b.name COLLATE business_name_base DESC, b.business_id DESC LIMIT $1 OFFSET $2"
		));
	}
}
