use time::{Weekday, macros::datetime};

use cadence_domain::hours::{
	self, BusinessHour, TimeOfDay, WallClock, duplicate_day, is_open_at,
};

fn time_of_day(raw: &str) -> TimeOfDay {
	TimeOfDay::parse(raw).expect("time must parse")
}

fn monday_nine_to_five() -> Vec<BusinessHour> {
	vec![BusinessHour {
		day: Weekday::Monday,
		open: time_of_day("09:00"),
		close: time_of_day("17:00"),
		closed: false,
	}]
}

fn monday_at(raw: &str) -> WallClock {
	WallClock { day: Weekday::Monday, time: time_of_day(raw) }
}

#[test]
fn open_inside_inclusive_window() {
	let hours = monday_nine_to_five();

	assert!(is_open_at(&hours, monday_at("12:00")));
	assert!(is_open_at(&hours, monday_at("09:00")));
	assert!(is_open_at(&hours, monday_at("17:00")));
}

#[test]
fn closed_outside_window() {
	let hours = monday_nine_to_five();

	assert!(!is_open_at(&hours, monday_at("08:59")));
	assert!(!is_open_at(&hours, monday_at("17:01")));
}

#[test]
fn closed_on_days_without_a_record() {
	let hours = monday_nine_to_five();
	let tuesday = WallClock { day: Weekday::Tuesday, time: time_of_day("12:00") };

	assert!(!is_open_at(&hours, tuesday));
	assert!(!is_open_at(&[], monday_at("12:00")));
}

#[test]
fn closed_flag_wins_over_times() {
	let hours = vec![BusinessHour { closed: true, ..monday_nine_to_five()[0] }];

	assert!(!is_open_at(&hours, monday_at("12:00")));
}

#[test]
fn wall_clock_truncates_seconds() {
	// 2024-01-01 was a Monday.
	let clock = WallClock::at(datetime!(2024-01-01 17:00:59 UTC));

	assert_eq!(clock.day, Weekday::Monday);
	assert_eq!(clock.time, time_of_day("17:00"));
	assert!(is_open_at(&monday_nine_to_five(), clock));
}

#[test]
fn time_of_day_parses_and_pads() {
	assert_eq!(time_of_day("9:05").to_string(), "09:05");
	assert_eq!(time_of_day("23:59").to_string(), "23:59");
	assert!(TimeOfDay::parse("24:00").is_none());
	assert!(TimeOfDay::parse("12:5").is_none());
	assert!(TimeOfDay::parse("noon").is_none());
	assert!(time_of_day("09:00") < time_of_day("17:00"));
}

#[test]
fn weekday_names_round_trip() {
	assert_eq!(hours::parse_weekday("Monday"), Some(Weekday::Monday));
	assert_eq!(hours::weekday_name(Weekday::Sunday), "sunday");
	assert_eq!(hours::parse_weekday("funday"), None);
}

#[test]
fn duplicate_days_are_reported() {
	let mut week = monday_nine_to_five();

	assert_eq!(duplicate_day(&week), None);

	week.push(week[0]);

	assert_eq!(duplicate_day(&week), Some(Weekday::Monday));
}

#[test]
fn business_hour_wire_format() {
	let open: BusinessHour = serde_json::from_value(serde_json::json!({
		"day": "monday", "open": "9:00", "close": "17:00", "closed": false
	}))
	.expect("open day must parse");
	let closed: BusinessHour =
		serde_json::from_value(serde_json::json!({ "day": "sunday", "closed": true }))
			.expect("closed day must parse");

	assert_eq!(open.open.to_string(), "09:00");
	assert!(closed.closed);
	assert!(
		serde_json::from_value::<BusinessHour>(serde_json::json!({ "day": "monday" })).is_err()
	);

	let rendered = serde_json::to_value(open).expect("hour must serialize");

	assert_eq!(rendered["day"], "monday");
	assert_eq!(rendered["open"], "09:00");
}

#[test]
fn overnight_hours_are_accepted_but_never_open() {
	let late: BusinessHour = serde_json::from_value(serde_json::json!({
		"day": "friday", "open": "20:00", "close": "02:00", "closed": false
	}))
	.expect("overnight hours must parse");

	assert_eq!((late.open.to_string(), late.close.to_string()), ("20:00".into(), "02:00".into()));

	let hours = [late];

	for raw in ["20:00", "23:59", "00:00", "01:00", "02:00", "12:00"] {
		let clock = WallClock { day: Weekday::Friday, time: time_of_day(raw) };

		assert!(!is_open_at(&hours, clock), "reported open at {raw}");
	}
}
