use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
	pub page: u32,
	pub limit: u32,
}
impl PageRequest {
	/// Lenient parsing of `page`/`limit` query values: values below one clamp to one, unparseable
	/// values fall back to the defaults, and `limit` never exceeds `max_limit`.
	pub fn from_raw(
		page: Option<&str>,
		limit: Option<&str>,
		default_limit: u32,
		max_limit: u32,
	) -> Self {
		let page = parse_positive(page).unwrap_or(1);
		let limit = parse_positive(limit).unwrap_or(default_limit).min(max_limit.max(1));

		Self { page, limit }
	}

	pub fn offset(&self) -> u64 {
		u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
	}

	/// Applies this page to an already ordered, fully materialized set.
	pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
		let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);

		items.into_iter().skip(offset).take(self.limit as usize).collect()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
	pub page: u32,
	pub limit: u32,
	pub total_pages: u64,
	pub total_count: u64,
}
impl Pagination {
	pub fn new(request: PageRequest, total_count: u64) -> Self {
		Self {
			page: request.page,
			limit: request.limit,
			total_pages: total_count.div_ceil(u64::from(request.limit.max(1))),
			total_count,
		}
	}
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
	let value: i64 = raw?.trim().parse().ok()?;

	Some(value.clamp(1, i64::from(u32::MAX)) as u32)
}
