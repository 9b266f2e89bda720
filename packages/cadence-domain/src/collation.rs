//! Base-strength string comparison: case and accents are ignored, so "Café" and "cafe" compare
//! equal. Uses the same root rules as the `business_name_base` database collation
//! (`en-u-ks-level1`), so in-memory sorts agree with SQL `ORDER BY`.

use std::cmp::Ordering;

use icu_collator::{
	Collator, CollatorBorrowed,
	options::{CollatorOptions, Strength},
};
use icu_locale_core::locale;

thread_local! {
	static BASE: Option<CollatorBorrowed<'static>> = base_collator();
}

fn base_collator() -> Option<CollatorBorrowed<'static>> {
	let mut options = CollatorOptions::default();

	options.strength = Some(Strength::Primary);

	Collator::try_new(locale!("en").into(), options).ok()
}

pub fn compare_base(a: &str, b: &str) -> Ordering {
	// Compiled data always covers `en`; the byte fallback is unreachable in practice.
	BASE.with(|collator| match collator {
		Some(collator) => collator.compare(a, b),
		None => a.cmp(b),
	})
}
