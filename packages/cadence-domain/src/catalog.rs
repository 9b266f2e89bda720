use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::pricing::{PriceBounds, PriceRange, Pricing, PricingKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstrumentFamily {
	Strings,
	Woodwinds,
	Brass,
	Percussions,
	Keyboard,
	Others,
}
impl InstrumentFamily {
	pub const ALL: [Self; 6] = [
		Self::Strings,
		Self::Woodwinds,
		Self::Brass,
		Self::Percussions,
		Self::Keyboard,
		Self::Others,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Strings => "Strings",
			Self::Woodwinds => "Woodwinds",
			Self::Brass => "Brass",
			Self::Percussions => "Percussions",
			Self::Keyboard => "Keyboard",
			Self::Others => "Others",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|family| family.as_str() == raw)
	}
}

/// A service offered by a business. Services are embedded in their business and have no
/// identity of their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ServiceWire", into = "ServiceWire")]
pub struct Service {
	pub instrument_family: String,
	pub instrument_type: String,
	pub name: String,
	pub category: Option<String>,
	pub pricing: Pricing,
}

/// Per-service conjunction of the search filters.
///
/// A business matches when at least one of its services satisfies every supplied field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceFilter {
	pub instrument_family: Option<String>,
	pub instrument_type: Option<String>,
	pub name: Option<String>,
	pub category: Option<String>,
	pub price: Option<PriceBounds>,
}
impl ServiceFilter {
	pub fn is_empty(&self) -> bool {
		self.instrument_family.is_none()
			&& self.instrument_type.is_none()
			&& self.name.is_none()
			&& self.category.is_none()
			&& self.price.is_none()
	}

	pub fn matches(&self, service: &Service) -> bool {
		if let Some(family) = &self.instrument_family
			&& &service.instrument_family != family
		{
			return false;
		}
		if let Some(instrument_type) = &self.instrument_type
			&& &service.instrument_type != instrument_type
		{
			return false;
		}
		if let Some(name) = &self.name
			&& &service.name != name
		{
			return false;
		}
		if let Some(category) = &self.category
			&& service.category.as_ref() != Some(category)
		{
			return false;
		}

		self.price.is_none_or(|bounds| bounds.admits(&service.pricing))
	}

	pub fn matches_any(&self, services: &[Service]) -> bool {
		services.iter().any(|service| self.matches(service))
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceRejectReason {
	UnknownInstrumentFamily(String),
	UnknownPricingType(String),
	PriceShapeMismatch(PricingKind),
	NonFinitePrice,
	InvertedRange,
	EmptyName,
}
impl Display for ServiceRejectReason {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnknownInstrumentFamily(family) =>
				write!(f, "unknown instrumentFamily '{family}'"),
			Self::UnknownPricingType(kind) => write!(f, "unknown pricingType '{kind}'"),
			Self::PriceShapeMismatch(kind) =>
				write!(f, "price does not have the shape required by pricingType '{}'", kind.as_str()),
			Self::NonFinitePrice => write!(f, "price must be a finite number"),
			Self::InvertedRange => write!(f, "price.min must not exceed price.max"),
			Self::EmptyName => write!(f, "service name must be non-empty"),
		}
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceWire {
	instrument_family: String,
	instrument_type: String,
	name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	category: Option<String>,
	pricing_type: String,
	price: PriceWire,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum PriceWire {
	Exact(f64),
	Range {
		#[serde(default)]
		min: Option<f64>,
		#[serde(default)]
		max: Option<f64>,
	},
}

impl TryFrom<ServiceWire> for Service {
	type Error = ServiceRejectReason;

	fn try_from(wire: ServiceWire) -> Result<Self, Self::Error> {
		if InstrumentFamily::parse(&wire.instrument_family).is_none() {
			return Err(ServiceRejectReason::UnknownInstrumentFamily(wire.instrument_family));
		}
		if wire.name.trim().is_empty() {
			return Err(ServiceRejectReason::EmptyName);
		}

		let kind = PricingKind::parse(&wire.pricing_type)
			.ok_or_else(|| ServiceRejectReason::UnknownPricingType(wire.pricing_type.clone()))?;
		let pricing = match (kind, wire.price) {
			(PricingKind::Exact, PriceWire::Exact(price)) => {
				if !price.is_finite() {
					return Err(ServiceRejectReason::NonFinitePrice);
				}

				Pricing::Exact(price)
			},
			(PricingKind::Range, PriceWire::Range { min, max }) => {
				if min.into_iter().chain(max).any(|value| !value.is_finite()) {
					return Err(ServiceRejectReason::NonFinitePrice);
				}

				Pricing::Range(PriceRange::new(min, max).ok_or(ServiceRejectReason::InvertedRange)?)
			},
			(kind, _) => return Err(ServiceRejectReason::PriceShapeMismatch(kind)),
		};

		Ok(Self {
			instrument_family: wire.instrument_family,
			instrument_type: wire.instrument_type,
			name: wire.name,
			category: wire.category,
			pricing,
		})
	}
}

impl From<Service> for ServiceWire {
	fn from(service: Service) -> Self {
		let price = match service.pricing {
			Pricing::Exact(price) => PriceWire::Exact(price),
			Pricing::Range(range) => PriceWire::Range { min: range.min, max: range.max },
		};

		Self {
			instrument_family: service.instrument_family,
			instrument_type: service.instrument_type,
			name: service.name,
			category: service.category,
			pricing_type: service.pricing.kind().as_str().to_string(),
			price,
		}
	}
}
