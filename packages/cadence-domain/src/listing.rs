//! Moderation status and the orderings offered by the admin listing.

use std::cmp::Ordering;

use serde::Serialize;

use crate::collation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
	Pending,
	Approved,
	Rejected,
}
impl BusinessStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Approved => "approved",
			Self::Rejected => "rejected",
		}
	}

	/// Case-insensitive.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"pending" => Some(Self::Pending),
			"approved" => Some(Self::Approved),
			"rejected" => Some(Self::Rejected),
			_ => None,
		}
	}

	/// Statuses a moderator may set. Exact match only.
	pub fn parse_decision(raw: &str) -> Option<Self> {
		match raw {
			"approved" => Some(Self::Approved),
			"rejected" => Some(Self::Rejected),
			_ => None,
		}
	}

	pub fn priority(self) -> u8 {
		match self {
			Self::Pending => 1,
			Self::Approved => 2,
			Self::Rejected => 3,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminSort {
	Latest,
	Oldest,
	NameAsc,
	NameDesc,
	Status,
}
impl AdminSort {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"latest" => Some(Self::Latest),
			"oldest" => Some(Self::Oldest),
			"A-Z" => Some(Self::NameAsc),
			"Z-A" => Some(Self::NameDesc),
			"status" => Some(Self::Status),
			_ => None,
		}
	}
}

/// Status priority first (pending, approved, rejected), then base-strength name order.
pub fn compare_status_then_name(
	a: (BusinessStatus, &str),
	b: (BusinessStatus, &str),
) -> Ordering {
	a.0.priority().cmp(&b.0.priority()).then_with(|| collation::compare_base(a.1, b.1))
}

/// Stable in-memory sort by [`compare_status_then_name`].
pub fn sort_by_status_then_name<T, F>(items: &mut [T], key: F)
where
	F: Fn(&T) -> (BusinessStatus, &str),
{
	items.sort_by(|a, b| compare_status_then_name(key(a), key(b)));
}
