use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use cadence_domain::listing::BusinessStatus;
use cadence_storage::queries;

use crate::{BusinessRecord, CadenceService, Error, Result};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StatusUpdateRequest {
	#[serde(default)]
	pub status: Option<String>,
}

impl CadenceService {
	/// Sets a moderation decision. Only `approved` and `rejected` are accepted, matched exactly.
	pub async fn update_business_status(
		&self,
		business_id: Uuid,
		req: StatusUpdateRequest,
	) -> Result<BusinessRecord> {
		let status = parse_decision(req.status.as_deref())?;
		let now = OffsetDateTime::now_utc();

		if !queries::update_business_status(&self.db, business_id, status, now).await? {
			return Err(business_not_found());
		}

		tracing::info!(%business_id, status = status.as_str(), "Business status updated.");

		let business =
			queries::get_business(&self.db, business_id).await?.ok_or_else(business_not_found)?;

		Ok(business.into())
	}
}

fn parse_decision(raw: Option<&str>) -> Result<BusinessStatus> {
	raw.and_then(BusinessStatus::parse_decision).ok_or_else(|| Error::InvalidRequest {
		message: "Invalid status. Must be 'approved' or 'rejected'.".to_string(),
	})
}

fn business_not_found() -> Error {
	Error::NotFound { message: "Business not found.".to_string() }
}

#[cfg(test)]
mod tests {
	use cadence_domain::listing::BusinessStatus;

	use super::parse_decision;

	#[test]
	fn only_exact_decisions_are_accepted() {
		assert_eq!(parse_decision(Some("approved")).ok(), Some(BusinessStatus::Approved));
		assert_eq!(parse_decision(Some("rejected")).ok(), Some(BusinessStatus::Rejected));
		assert!(parse_decision(Some("pending")).is_err());
		assert!(parse_decision(Some("APPROVED")).is_err());
		assert!(parse_decision(None).is_err());
	}
}
