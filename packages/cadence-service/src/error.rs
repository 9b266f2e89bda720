pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Access denied: {message}")]
	AccessDenied { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<cadence_storage::Error> for Error {
	fn from(err: cadence_storage::Error) -> Self {
		match err {
			cadence_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			cadence_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			cadence_storage::Error::NotFound(message) => Self::NotFound { message },
			cadence_storage::Error::CorruptRow(message) => Self::Storage { message },
		}
	}
}
