use axum::{
	Json, Router,
	body::Body,
	extract::{FromRequestParts, Path, Query, State, rejection::JsonRejection},
	http::{HeaderMap, Request, StatusCode, request::Parts},
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::{get, patch},
};
use serde::Serialize;
use uuid::Uuid;

use cadence_domain::{identity::UserRole, pagination::Pagination};
use cadence_service::{
	AdminDashboard, AdminListItem, AdminListRequest, BusinessRecord, BusinessmanDashboard, Caller,
	CreateBusinessRequest, DashboardRequest, Error as ServiceError, SearchRequest,
	StatusUpdateRequest,
};

use crate::state::AppState;

pub const HEADER_USER_ID: &str = "X-Cadence-User-Id";
pub const HEADER_USER_ROLE: &str = "X-Cadence-User-Role";
pub const HEADER_USER_EMAIL: &str = "X-Cadence-User-Email";

const HEADER_AUTHORIZATION: &str = "Authorization";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/businesses", get(search).post(create_business))
		.route("/v1/businesses/mine/approved", get(my_approved_businesses))
		.route("/v1/businesses/{business_id}", get(get_business))
		.route("/v1/businessman/dashboard", get(businessman_dashboard))
		.with_state(state)
}

/// Moderation endpoints. When `security.admin_auth_token` is set every request must carry it as
/// a bearer token.
pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/businesses", get(admin_list))
		.route("/v1/admin/businesses/{business_id}/status", patch(update_business_status))
		.route("/v1/admin/dashboard", get(admin_dashboard))
		.layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Query(req): Query<SearchRequest>,
) -> Result<Json<Envelope<Vec<BusinessRecord>>>, ApiError> {
	let response = state.service.search(req).await?;

	Ok(Json(Envelope::paged("Businesses fetched successfully", response.items, response.pagination)))
}

async fn create_business(
	State(state): State<AppState>,
	CallerHeaders(caller): CallerHeaders,
	payload: Result<Json<CreateBusinessRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<BusinessRecord>>), ApiError> {
	let Json(req) = payload.map_err(ApiError::from_json_rejection)?;
	let record = state.service.create_business(&caller, req).await?;

	Ok((StatusCode::CREATED, Json(Envelope::new("Business created successfully", record))))
}

async fn get_business(
	State(state): State<AppState>,
	Path(business_id): Path<String>,
) -> Result<Json<Envelope<BusinessRecord>>, ApiError> {
	let record = state.service.get_business(parse_business_id(&business_id)?).await?;

	Ok(Json(Envelope::new("Business fetched successfully", record)))
}

async fn my_approved_businesses(
	State(state): State<AppState>,
	CallerHeaders(caller): CallerHeaders,
) -> Result<Json<Envelope<Vec<BusinessRecord>>>, ApiError> {
	let records = state.service.my_approved_businesses(&caller).await?;

	Ok(Json(Envelope::new("Your businesses fetched successfully", records)))
}

async fn businessman_dashboard(
	State(state): State<AppState>,
	CallerHeaders(caller): CallerHeaders,
	Query(req): Query<DashboardRequest>,
) -> Result<Json<Envelope<BusinessmanDashboard>>, ApiError> {
	let response = state.service.businessman_dashboard(&caller, req).await?;
	let message = format!("Dashboard data ({}) for businessman", response.range.as_str());

	Ok(Json(Envelope::new(message, response.data)))
}

async fn admin_list(
	State(state): State<AppState>,
	Query(req): Query<AdminListRequest>,
) -> Result<Json<Envelope<Vec<AdminListItem>>>, ApiError> {
	let response = state.service.admin_list(req).await?;

	Ok(Json(Envelope::paged("Businesses fetched successfully", response.items, response.pagination)))
}

async fn admin_dashboard(
	State(state): State<AppState>,
	Query(req): Query<DashboardRequest>,
) -> Result<Json<Envelope<AdminDashboard>>, ApiError> {
	let response = state.service.admin_dashboard(req).await?;

	Ok(Json(Envelope::new("Dashboard data get successfully", response.data)))
}

async fn update_business_status(
	State(state): State<AppState>,
	Path(business_id): Path<String>,
	payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<Envelope<BusinessRecord>>, ApiError> {
	let Json(req) = payload.map_err(ApiError::from_json_rejection)?;
	let business_id = parse_business_id(&business_id)?;
	let record = state.service.update_business_status(business_id, req).await?;
	let message = format!("Business status updated to {}", record.status.as_str());

	Ok(Json(Envelope::new(message, record)))
}

async fn admin_auth_middleware(
	State(state): State<AppState>,
	req: Request<Body>,
	next: Next,
) -> Response {
	if let Some(expected) = state.service.cfg.security.admin_auth_token.as_deref()
		&& read_bearer_token(req.headers()) != Some(expected)
	{
		return ApiError::new(
			StatusCode::UNAUTHORIZED,
			"UNAUTHORIZED",
			"A valid admin bearer token is required.",
		)
		.into_response();
	}

	next.run(req).await
}

fn read_bearer_token(headers: &HeaderMap) -> Option<&str> {
	let raw = headers.get(HEADER_AUTHORIZATION)?;
	let value = raw.to_str().ok()?.trim();
	let token = value.strip_prefix("Bearer ")?.trim();

	if token.is_empty() { None } else { Some(token) }
}

/// Unparseable ids cannot name a stored business.
fn parse_business_id(raw: &str) -> Result<Uuid, ApiError> {
	Uuid::parse_str(raw.trim())
		.map_err(|_| ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Business not found."))
}

/// The caller identity forwarded by the authentication gateway in front of this service.
pub struct CallerHeaders(pub Caller);
impl<S> FromRequestParts<S> for CallerHeaders
where
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let user_id = header_value(&parts.headers, HEADER_USER_ID)
			.and_then(|raw| Uuid::parse_str(raw).ok())
			.ok_or_else(|| unauthorized(HEADER_USER_ID))?;
		let role = header_value(&parts.headers, HEADER_USER_ROLE)
			.and_then(UserRole::parse)
			.ok_or_else(|| unauthorized(HEADER_USER_ROLE))?;
		let email = header_value(&parts.headers, HEADER_USER_EMAIL).map(str::to_string);

		Ok(Self(Caller { user_id, role, email }))
	}
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
	headers.get(name)?.to_str().ok().map(str::trim).filter(|value| !value.is_empty())
}

fn unauthorized(header: &str) -> ApiError {
	ApiError::new(
		StatusCode::UNAUTHORIZED,
		"UNAUTHORIZED",
		format!("{header} header is missing or invalid."),
	)
}

#[derive(Debug, Serialize)]
struct Envelope<T> {
	success: bool,
	message: String,
	data: T,
	#[serde(skip_serializing_if = "Option::is_none")]
	pagination: Option<Pagination>,
}
impl<T> Envelope<T> {
	fn new(message: impl Into<String>, data: T) -> Self {
		Self { success: true, message: message.into(), data, pagination: None }
	}

	fn paged(message: impl Into<String>, data: T, pagination: Pagination) -> Self {
		Self { pagination: Some(pagination), ..Self::new(message, data) }
	}
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	success: bool,
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}

	fn from_json_rejection(err: JsonRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.body_text())
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
			ServiceError::AccessDenied { message } =>
				Self::new(StatusCode::FORBIDDEN, "ACCESS_DENIED", message),
			ServiceError::NotFound { message } =>
				Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message),
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Storage failure.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Internal error.")
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { success: false, error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
