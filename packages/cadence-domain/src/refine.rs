//! In-memory refinement applied to a page after the storage query: the price containment
//! re-check and the price sorts, neither of which the store orders by.

use std::cmp::Ordering;

use crate::catalog::{Service, ServiceFilter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceSort {
	LowToHigh,
	HighToLow,
}
impl PriceSort {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"lowToHigh" => Some(Self::LowToHigh),
			"highToLow" => Some(Self::HighToLow),
			_ => None,
		}
	}
}

/// Smallest effective price across the services. No services yields `+inf`.
pub fn lowest_price(services: &[Service]) -> f64 {
	services.iter().map(|service| service.pricing.low_key()).fold(f64::INFINITY, f64::min)
}

/// Largest effective price across the services. No services yields `-inf`.
pub fn highest_price(services: &[Service]) -> f64 {
	services.iter().map(|service| service.pricing.high_key()).fold(f64::NEG_INFINITY, f64::max)
}

/// Keeps the items with at least one service satisfying every field of `filter`, price
/// containment included. Returns how many were dropped.
pub fn retain_matching<T, F>(items: &mut Vec<T>, filter: &ServiceFilter, services: F) -> usize
where
	F: Fn(&T) -> &[Service],
{
	let before = items.len();

	items.retain(|item| filter.matches_any(services(item)));

	before - items.len()
}

/// Stable: items with equal keys keep their prior relative order.
pub fn sort_by_price<T, F>(items: &mut [T], order: PriceSort, services: F)
where
	F: Fn(&T) -> &[Service],
{
	match order {
		PriceSort::LowToHigh => items.sort_by(|a, b| {
			compare_keys(lowest_price(services(a)), lowest_price(services(b)))
		}),
		PriceSort::HighToLow => items.sort_by(|a, b| {
			compare_keys(highest_price(services(b)), highest_price(services(a)))
		}),
	}
}

fn compare_keys(a: f64, b: f64) -> Ordering {
	a.total_cmp(&b)
}
