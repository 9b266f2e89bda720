//! Counting queries behind the admin dashboard and the businessman analytics.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, db::Db, models::ReviewFeedRow};

/// Entity types tracked by the admin dashboard. Each maps to a table with `created_at` and
/// `status` columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackedEntity {
	Businesses,
	Reviews,
	Photos,
	Claims,
	Users,
}
impl TrackedEntity {
	fn table(self) -> &'static str {
		match self {
			Self::Businesses => "businesses",
			Self::Reviews => "reviews",
			Self::Photos => "photos",
			Self::Claims => "claims",
			Self::Users => "users",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowCount {
	pub total: u64,
	pub recent: u64,
}

/// Counts every row of `entity` and the rows created at or after `since`. With `pending_only`
/// both counts are restricted to the moderation queue.
pub async fn count_window(
	db: &Db,
	entity: TrackedEntity,
	pending_only: bool,
	since: OffsetDateTime,
) -> Result<WindowCount> {
	let mut sql = format!(
		"SELECT count(*), count(*) FILTER (WHERE created_at >= $1) FROM {}",
		entity.table()
	);

	if pending_only {
		sql.push_str(" WHERE status = 'pending'");
	}

	let (total, recent): (i64, i64) =
		sqlx::query_as(sql.as_str()).bind(since).fetch_one(&db.pool).await?;

	Ok(WindowCount { total: to_count(total), recent: to_count(recent) })
}

pub async fn owned_business_ids(db: &Db, user_id: Uuid) -> Result<Vec<Uuid>> {
	let ids = sqlx::query_scalar::<_, Uuid>(
		"\
SELECT business_id
FROM businesses
WHERE owner_user_id = $1
ORDER BY created_at, business_id",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(ids)
}

/// Businesses the user has saved, not the ones they own.
pub async fn saved_business_ids(db: &Db, user_id: Uuid) -> Result<Vec<Uuid>> {
	let ids = sqlx::query_scalar::<_, Uuid>(
		"\
SELECT business_id
FROM saved_businesses
WHERE user_id = $1
ORDER BY created_at, saved_id",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(ids)
}

pub async fn count_reviews(
	db: &Db,
	business_ids: &[Uuid],
	since: OffsetDateTime,
	with_images_only: bool,
) -> Result<u64> {
	let mut sql = String::from(
		"\
SELECT count(*)
FROM reviews
WHERE business_id = ANY($1)
	AND created_at >= $2",
	);

	if with_images_only {
		sql.push_str("\n\tAND jsonb_array_length(images) > 0");
	}

	let count: i64 = sqlx::query_scalar(sql.as_str())
		.bind(business_ids)
		.bind(since)
		.fetch_one(&db.pool)
		.await?;

	Ok(to_count(count))
}

pub async fn count_saves(
	db: &Db,
	user_id: Uuid,
	business_ids: &[Uuid],
	since: OffsetDateTime,
) -> Result<u64> {
	let count: i64 = sqlx::query_scalar(
		"\
SELECT count(*)
FROM saved_businesses
WHERE business_id = ANY($1)
	AND user_id = $2
	AND created_at >= $3",
	)
	.bind(business_ids)
	.bind(user_id)
	.bind(since)
	.fetch_one(&db.pool)
	.await?;

	Ok(to_count(count))
}

/// Newest reviews first, joined with the reviewer and the reviewed business.
pub async fn latest_reviews(
	db: &Db,
	business_ids: &[Uuid],
	since: OffsetDateTime,
	limit: u32,
) -> Result<Vec<ReviewFeedRow>> {
	let rows = sqlx::query_as::<_, ReviewFeedRow>(
		"\
SELECT
	r.review_id,
	r.rating,
	r.comment,
	r.created_at,
	u.name AS user_name,
	u.profile_photo AS user_profile_photo,
	r.business_id,
	b.name AS business_name
FROM reviews r
LEFT JOIN users u ON u.user_id = r.user_id
LEFT JOIN businesses b ON b.business_id = r.business_id
WHERE r.business_id = ANY($1)
	AND r.created_at >= $2
ORDER BY r.created_at DESC, r.review_id DESC
LIMIT $3",
	)
	.bind(business_ids)
	.bind(since)
	.bind(i64::from(limit))
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

fn to_count(raw: i64) -> u64 {
	u64::try_from(raw).unwrap_or_default()
}
