//! Inserts for rows that reach the directory from elsewhere: user accounts, reviews, photo
//! uploads, ownership claims and bookmarks. Cadence only reads these tables, so tests seed them
//! here. Seeded activity starts in the `pending` moderation state unless a status is given.

use sqlx::{PgPool, types::Json};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::Result;

/// `role` is one of `user`, `businessMan` or `admin`. The email is unique per call.
pub async fn user(
	pool: &PgPool,
	name: &str,
	role: &str,
	status: &str,
	created_at: OffsetDateTime,
) -> Result<Uuid> {
	let user_id = Uuid::new_v4();

	sqlx::query(
		"\
INSERT INTO users (user_id, name, email, role, profile_photo, status, created_at)
VALUES ($1, $2, $3, $4, $5, $6, $7)",
	)
	.bind(user_id)
	.bind(name)
	.bind(format!("{}@example.test", user_id.simple()))
	.bind(role)
	.bind(format!("https://cdn.example.test/avatars/{}.jpg", user_id.simple()))
	.bind(status)
	.bind(created_at)
	.execute(pool)
	.await?;

	Ok(user_id)
}

/// A four-star review. Reviews with images count as photos on the businessman dashboard.
pub async fn review(
	pool: &PgPool,
	business_id: Uuid,
	user_id: Uuid,
	comment: &str,
	images: &[&str],
	created_at: OffsetDateTime,
) -> Result<Uuid> {
	let review_id = Uuid::new_v4();

	sqlx::query(
		"\
INSERT INTO reviews (review_id, business_id, user_id, rating, comment, images, status, created_at)
VALUES ($1, $2, $3, 4, $4, $5, 'pending', $6)",
	)
	.bind(review_id)
	.bind(business_id)
	.bind(user_id)
	.bind(comment)
	.bind(Json(images))
	.bind(created_at)
	.execute(pool)
	.await?;

	Ok(review_id)
}

pub async fn photo(
	pool: &PgPool,
	business_id: Uuid,
	user_id: Uuid,
	status: &str,
	created_at: OffsetDateTime,
) -> Result<Uuid> {
	let photo_id = Uuid::new_v4();

	sqlx::query(
		"\
INSERT INTO photos (photo_id, business_id, user_id, url, status, created_at)
VALUES ($1, $2, $3, $4, $5, $6)",
	)
	.bind(photo_id)
	.bind(business_id)
	.bind(user_id)
	.bind(format!("https://cdn.example.test/photos/{}.jpg", photo_id.simple()))
	.bind(status)
	.bind(created_at)
	.execute(pool)
	.await?;

	Ok(photo_id)
}

pub async fn claim(
	pool: &PgPool,
	business_id: Uuid,
	user_id: Uuid,
	status: &str,
	created_at: OffsetDateTime,
) -> Result<Uuid> {
	let claim_id = Uuid::new_v4();

	sqlx::query(
		"\
INSERT INTO claims (claim_id, business_id, user_id, status, created_at)
VALUES ($1, $2, $3, $4, $5)",
	)
	.bind(claim_id)
	.bind(business_id)
	.bind(user_id)
	.bind(status)
	.bind(created_at)
	.execute(pool)
	.await?;

	Ok(claim_id)
}

/// `user_id` bookmarks `business_id`.
pub async fn saved_business(
	pool: &PgPool,
	user_id: Uuid,
	business_id: Uuid,
	created_at: OffsetDateTime,
) -> Result<Uuid> {
	let saved_id = Uuid::new_v4();

	sqlx::query(
		"\
INSERT INTO saved_businesses (saved_id, user_id, business_id, created_at)
VALUES ($1, $2, $3, $4)",
	)
	.bind(saved_id)
	.bind(user_id)
	.bind(business_id)
	.bind(created_at)
	.execute(pool)
	.await?;

	Ok(saved_id)
}
