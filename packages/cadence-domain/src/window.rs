//! Time windows for dashboard "new" counts and the admin listing's creation-time filter.

use time::{Duration, OffsetDateTime, Time};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashboardRange {
	#[default]
	Day,
	Week,
	Month,
}
impl DashboardRange {
	/// Unrecognized tokens fall back to [`DashboardRange::Day`].
	pub fn parse(raw: Option<&str>) -> Self {
		match raw.map(str::trim) {
			Some("week") => Self::Week,
			Some("month") => Self::Month,
			_ => Self::Day,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Day => "day",
			Self::Week => "week",
			Self::Month => "month",
		}
	}

	/// Start of the window ending at `now`, evaluated in the offset `now` carries.
	///
	/// - day: start of the current day
	/// - week: seven days before the start of the current day
	/// - month: start of the first day of the current month
	pub fn window_start(self, now: OffsetDateTime) -> OffsetDateTime {
		let start_of_day = now.replace_time(Time::MIDNIGHT);

		match self {
			Self::Day => start_of_day,
			Self::Week => start_of_day - Duration::days(7),
			Self::Month => start_of_day.replace_day(1).unwrap_or(start_of_day),
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListingWindow {
	#[default]
	All,
	Last7Days,
	Last30Days,
}
impl ListingWindow {
	/// Unrecognized tokens mean no creation-time filter.
	pub fn parse(raw: Option<&str>) -> Self {
		match raw.map(str::trim) {
			Some("last-7" | "last-7-days") => Self::Last7Days,
			Some("last-30" | "last-30-days") => Self::Last30Days,
			_ => Self::All,
		}
	}

	/// Rolling window: the same wall-clock instant N days ago.
	pub fn since(self, now: OffsetDateTime) -> Option<OffsetDateTime> {
		match self {
			Self::All => None,
			Self::Last7Days => Some(now - Duration::days(7)),
			Self::Last30Days => Some(now - Duration::days(30)),
		}
	}
}
