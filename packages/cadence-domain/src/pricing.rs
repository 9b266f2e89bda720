//! Service pricing and the price-bound predicate used by search.
//!
//! A service is priced either with one exact amount or with a `[min, max]` range. The two shapes
//! are compared differently: an exact price must lie inside the query bounds, while a range must
//! be contained by them. A range that merely overlaps the bounds does not qualify.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PricingKind {
	Exact,
	Range,
}
impl PricingKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Exact => "exact",
			Self::Range => "range",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"exact" => Some(Self::Exact),
			"range" => Some(Self::Range),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PriceRange {
	pub min: Option<f64>,
	pub max: Option<f64>,
}
impl PriceRange {
	/// Returns `None` when both ends are present and `min > max`.
	pub fn new(min: Option<f64>, max: Option<f64>) -> Option<Self> {
		if let (Some(min), Some(max)) = (min, max)
			&& min > max
		{
			return None;
		}

		Some(Self { min, max })
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pricing {
	Exact(f64),
	Range(PriceRange),
}
impl Pricing {
	pub fn kind(&self) -> PricingKind {
		match self {
			Self::Exact(_) => PricingKind::Exact,
			Self::Range(_) => PricingKind::Range,
		}
	}

	/// Key used by the low-to-high sort. A range without a lower end sorts last.
	pub fn low_key(&self) -> f64 {
		match self {
			Self::Exact(price) => *price,
			Self::Range(range) => range.min.unwrap_or(f64::INFINITY),
		}
	}

	/// Key used by the high-to-low sort. A range without an upper end counts as zero.
	pub fn high_key(&self) -> f64 {
		match self {
			Self::Exact(price) => *price,
			Self::Range(range) => range.max.unwrap_or(0.0),
		}
	}
}

/// Query-side price bounds. At least one end is always present.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceBounds {
	min: Option<f64>,
	max: Option<f64>,
}
impl PriceBounds {
	/// Returns `None` when neither bound is supplied, meaning no pricing constraint applies.
	///
	/// Inverted bounds are accepted as-is; they simply admit nothing.
	pub fn new(min: Option<f64>, max: Option<f64>) -> Option<Self> {
		if min.is_none() && max.is_none() {
			return None;
		}

		Some(Self { min, max })
	}

	pub fn min(&self) -> Option<f64> {
		self.min
	}

	pub fn max(&self) -> Option<f64> {
		self.max
	}

	pub fn admits(&self, pricing: &Pricing) -> bool {
		match pricing {
			Pricing::Exact(price) =>
				self.min.is_none_or(|min| *price >= min) && self.max.is_none_or(|max| *price <= max),
			// Containment: the whole range must sit inside the bounds. A missing range end never
			// satisfies a supplied bound on that side.
			Pricing::Range(range) => {
				let lower = match self.min {
					Some(min) => range.min.is_some_and(|value| value >= min),
					None => true,
				};
				let upper = match self.max {
					Some(max) => range.max.is_some_and(|value| value <= max),
					None => true,
				};

				lower && upper
			},
		}
	}
}
