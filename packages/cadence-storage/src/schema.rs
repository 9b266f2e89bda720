pub fn render_schema() -> String {
	let init = include_str!("../../../sql/init.sql");

	expand_includes(init)
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_collations.sql" => out.push_str(include_str!("../../../sql/00_collations.sql")),
				"tables/001_users.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_users.sql")),
				"tables/002_businesses.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_businesses.sql")),
				"tables/003_business_services.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_business_services.sql")),
				"tables/004_business_hours.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_business_hours.sql")),
				"tables/005_reviews.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_reviews.sql")),
				"tables/006_photos.sql" =>
					out.push_str(include_str!("../../../sql/tables/006_photos.sql")),
				"tables/007_claims.sql" =>
					out.push_str(include_str!("../../../sql/tables/007_claims.sql")),
				"tables/008_saved_businesses.sql" =>
					out.push_str(include_str!("../../../sql/tables/008_saved_businesses.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::render_schema;

	#[test]
	fn expands_every_include() {
		let sql = render_schema();

		assert!(!sql.contains("\\ir "));
		assert!(sql.contains("CREATE COLLATION IF NOT EXISTS business_name_base"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS saved_businesses"));
	}
}
