//! Weekly opening hours and the "open now" evaluation.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, Weekday};

const WEEKDAYS: [Weekday; 7] = [
	Weekday::Monday,
	Weekday::Tuesday,
	Weekday::Wednesday,
	Weekday::Thursday,
	Weekday::Friday,
	Weekday::Saturday,
	Weekday::Sunday,
];

pub fn weekday_name(day: Weekday) -> &'static str {
	match day {
		Weekday::Monday => "monday",
		Weekday::Tuesday => "tuesday",
		Weekday::Wednesday => "wednesday",
		Weekday::Thursday => "thursday",
		Weekday::Friday => "friday",
		Weekday::Saturday => "saturday",
		Weekday::Sunday => "sunday",
	}
}

pub fn parse_weekday(raw: &str) -> Option<Weekday> {
	let raw = raw.trim();

	WEEKDAYS.into_iter().find(|day| weekday_name(*day).eq_ignore_ascii_case(raw))
}

const MIDNIGHT: TimeOfDay = TimeOfDay { minutes: 0 };

/// Minute-resolution time of day. Displays zero-padded as `HH:MM`, so the textual and numeric
/// orderings agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
	minutes: u16,
}
impl TimeOfDay {
	pub fn new(hour: u8, minute: u8) -> Option<Self> {
		if hour > 23 || minute > 59 {
			return None;
		}

		Some(Self { minutes: u16::from(hour) * 60 + u16::from(minute) })
	}

	/// Accepts `H:MM` or `HH:MM`.
	pub fn parse(raw: &str) -> Option<Self> {
		let (hour, minute) = raw.trim().split_once(':')?;

		if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
			return None;
		}
		if !hour.bytes().chain(minute.bytes()).all(|byte| byte.is_ascii_digit()) {
			return None;
		}

		Self::new(hour.parse().ok()?, minute.parse().ok()?)
	}

	/// Truncates seconds, matching the minute-resolution schedule.
	pub fn from_time(time: time::Time) -> Self {
		Self { minutes: u16::from(time.hour()) * 60 + u16::from(time.minute()) }
	}

	pub fn hour(self) -> u8 {
		(self.minutes / 60) as u8
	}

	pub fn minute(self) -> u8 {
		(self.minutes % 60) as u8
	}
}
impl Display for TimeOfDay {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:02}:{:02}", self.hour(), self.minute())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BusinessHourWire", into = "BusinessHourWire")]
pub struct BusinessHour {
	pub day: Weekday,
	pub open: TimeOfDay,
	pub close: TimeOfDay,
	pub closed: bool,
}

/// The weekday and minute a business schedule is evaluated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallClock {
	pub day: Weekday,
	pub time: TimeOfDay,
}
impl WallClock {
	/// Reads the clock in the offset `now` already carries.
	pub fn at(now: OffsetDateTime) -> Self {
		Self { day: now.weekday(), time: TimeOfDay::from_time(now.time()) }
	}
}

/// Open when the schedule has an entry for the current weekday that is not closed and the
/// current minute lies in `[open, close]`. A weekday without an entry counts as closed, and so
/// does an entry that closes before it opens (an overnight slot), since no minute lies in it.
pub fn is_open_at(hours: &[BusinessHour], clock: WallClock) -> bool {
	hours.iter().any(|hour| {
		hour.day == clock.day && !hour.closed && hour.open <= clock.time && clock.time <= hour.close
	})
}

/// Returns the first weekday that appears more than once.
pub fn duplicate_day(hours: &[BusinessHour]) -> Option<Weekday> {
	let mut seen = [false; 7];

	for hour in hours {
		let slot = hour.day.number_days_from_monday() as usize;

		if seen[slot] {
			return Some(hour.day);
		}

		seen[slot] = true;
	}

	None
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HourRejectReason {
	UnknownDay(String),
	InvalidTime(String),
	MissingTime,
}
impl Display for HourRejectReason {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnknownDay(day) => write!(f, "unknown day '{day}'"),
			Self::InvalidTime(raw) => write!(f, "time '{raw}' is not HH:MM"),
			Self::MissingTime => write!(f, "open and close are required unless closed is true"),
		}
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct BusinessHourWire {
	day: String,
	#[serde(default)]
	open: Option<String>,
	#[serde(default)]
	close: Option<String>,
	#[serde(default)]
	closed: bool,
}

impl TryFrom<BusinessHourWire> for BusinessHour {
	type Error = HourRejectReason;

	fn try_from(wire: BusinessHourWire) -> Result<Self, Self::Error> {
		let day = parse_weekday(&wire.day).ok_or(HourRejectReason::UnknownDay(wire.day))?;
		let parse = |raw: Option<String>| -> Result<Option<TimeOfDay>, HourRejectReason> {
			match raw {
				Some(raw) =>
					TimeOfDay::parse(&raw).map(Some).ok_or(HourRejectReason::InvalidTime(raw)),
				None => Ok(None),
			}
		};
		let open = parse(wire.open)?;
		let close = parse(wire.close)?;
		let (open, close) = match (open, close) {
			(Some(open), Some(close)) => (open, close),
			// Closed days are never evaluated; missing times are stored as midnight.
			_ if wire.closed => (open.unwrap_or(MIDNIGHT), close.unwrap_or(MIDNIGHT)),
			_ => return Err(HourRejectReason::MissingTime),
		};

		Ok(Self { day, open, close, closed: wire.closed })
	}
}

impl From<BusinessHour> for BusinessHourWire {
	fn from(hour: BusinessHour) -> Self {
		Self {
			day: weekday_name(hour.day).to_string(),
			open: Some(hour.open.to_string()),
			close: Some(hour.close.to_string()),
			closed: hour.closed,
		}
	}
}
