//! Public business search.
//!
//! Phase one runs in Postgres: service equality filters, the price predicate, the open-now
//! predicate, creation-time ordering, and pagination, plus a count over the same filter. Phase two
//! re-checks price containment on the returned page and applies the price sorts.

use serde::Deserialize;
use time::OffsetDateTime;

use cadence_domain::{
	catalog::ServiceFilter,
	hours::WallClock,
	pagination::Pagination,
	pricing::PriceBounds,
	refine::{self, PriceSort},
};
use cadence_storage::{
	filter::{BusinessOrder, BusinessQuery},
	queries,
};

use crate::{BusinessRecord, CadenceService, Error, Result, non_empty};

/// Raw search parameters, as they arrive in the query string.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
	pub instrument_family: Option<String>,
	pub select_instrument: Option<String>,
	pub service_name: Option<String>,
	pub offer: Option<String>,
	pub price_min: Option<String>,
	pub price_max: Option<String>,
	pub price_sort: Option<String>,
	pub open_now: Option<String>,
	pub sort_by_created_at: Option<String>,
	pub page: Option<String>,
	pub limit: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SearchResponse {
	pub items: Vec<BusinessRecord>,
	/// Computed before phase two; it can overstate the page when price bounds drop businesses.
	pub pagination: Pagination,
}

impl CadenceService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		self.search_at(req, self.local_now()).await
	}

	/// Runs the search with `now` as the wall clock for the open-now filter.
	pub async fn search_at(&self, req: SearchRequest, now: OffsetDateTime) -> Result<SearchResponse> {
		let page = self.page_request(req.page.as_deref(), req.limit.as_deref());
		let bounds = PriceBounds::new(
			parse_price("priceMin", req.price_min.as_deref())?,
			parse_price("priceMax", req.price_max.as_deref())?,
		);
		let query = BusinessQuery {
			services: ServiceFilter {
				instrument_family: non_empty(req.instrument_family.as_deref()),
				instrument_type: non_empty(req.select_instrument.as_deref()),
				name: non_empty(req.service_name.as_deref()),
				category: non_empty(req.offer.as_deref()),
				price: bounds,
			},
			open_at: (req.open_now.as_deref() == Some("true")).then(|| WallClock::at(now)),
			..BusinessQuery::default()
		};
		let order = creation_order(req.sort_by_created_at.as_deref());
		let (total, ids) = tokio::try_join!(
			queries::count_businesses(&self.db, &query),
			queries::find_business_ids(&self.db, &query, order, Some(page)),
		)?;
		let mut items = queries::load_businesses(&self.db, &ids).await?;
		let fetched = items.len();

		if query.services.price.is_some() {
			refine::retain_matching(&mut items, &query.services, |business| &business.services);
		}
		if let Some(order) = req.price_sort.as_deref().and_then(PriceSort::parse) {
			refine::sort_by_price(&mut items, order, |business| &business.services);
		}

		tracing::debug!(fetched, kept = items.len(), total, "Search page refined.");

		Ok(SearchResponse {
			items: items.into_iter().map(BusinessRecord::from).collect(),
			pagination: Pagination::new(page, total),
		})
	}
}

/// `asc` in any case sorts oldest first and any other value newest first. Without the parameter
/// businesses come back in creation order.
fn creation_order(raw: Option<&str>) -> BusinessOrder {
	match raw {
		Some(value) if !value.trim().eq_ignore_ascii_case("asc") => BusinessOrder::CreatedDesc,
		_ => BusinessOrder::CreatedAsc,
	}
}

fn parse_price(field: &str, raw: Option<&str>) -> Result<Option<f64>> {
	let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
		return Ok(None);
	};
	let value: f64 = raw.parse().map_err(|_| Error::InvalidRequest {
		message: format!("{field} must be a number."),
	})?;

	if !value.is_finite() {
		return Err(Error::InvalidRequest { message: format!("{field} must be a finite number.") });
	}

	Ok(Some(value))
}

#[cfg(test)]
mod tests {
	use cadence_storage::filter::BusinessOrder;

	use super::{creation_order, parse_price};

	#[test]
	fn empty_price_parameters_are_absent() {
		assert_eq!(parse_price("priceMin", None).expect("Absent price."), None);
		assert_eq!(parse_price("priceMin", Some("  ")).expect("Blank price."), None);
		assert_eq!(parse_price("priceMin", Some("12.5")).expect("Numeric price."), Some(12.5));
	}

	#[test]
	fn non_numeric_prices_are_rejected() {
		assert!(parse_price("priceMax", Some("cheap")).is_err());
		assert!(parse_price("priceMax", Some("inf")).is_err());
	}

	#[test]
	fn creation_order_defaults_to_ascending() {
		assert_eq!(creation_order(None), BusinessOrder::CreatedAsc);
		assert_eq!(creation_order(Some("ASC")), BusinessOrder::CreatedAsc);
		assert_eq!(creation_order(Some("desc")), BusinessOrder::CreatedDesc);
		assert_eq!(creation_order(Some("newest")), BusinessOrder::CreatedDesc);
	}
}
