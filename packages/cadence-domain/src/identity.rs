use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserRole {
	User,
	BusinessMan,
	Admin,
}
impl UserRole {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::User => "user",
			Self::BusinessMan => "businessMan",
			Self::Admin => "admin",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"user" => Some(Self::User),
			"businessMan" => Some(Self::BusinessMan),
			"admin" => Some(Self::Admin),
			_ => None,
		}
	}
}

/// Who a business belongs to. Fixed when the business is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
	Individual(Uuid),
	Administrator(Uuid),
}
impl Owner {
	pub fn for_creator(role: UserRole, user_id: Uuid) -> Self {
		match role {
			UserRole::Admin => Self::Administrator(user_id),
			UserRole::User | UserRole::BusinessMan => Self::Individual(user_id),
		}
	}

	pub fn from_columns(individual: Option<Uuid>, administrator: Option<Uuid>) -> Option<Self> {
		match (individual, administrator) {
			(Some(user_id), None) => Some(Self::Individual(user_id)),
			(None, Some(user_id)) => Some(Self::Administrator(user_id)),
			_ => None,
		}
	}

	pub fn user_id(self) -> Uuid {
		match self {
			Self::Individual(user_id) | Self::Administrator(user_id) => user_id,
		}
	}

	pub fn individual(self) -> Option<Uuid> {
		match self {
			Self::Individual(user_id) => Some(user_id),
			Self::Administrator(_) => None,
		}
	}

	pub fn administrator(self) -> Option<Uuid> {
		match self {
			Self::Administrator(user_id) => Some(user_id),
			Self::Individual(_) => None,
		}
	}
}
