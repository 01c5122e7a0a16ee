//! SQL DDL for the demo user table.

/// `users` table:
/// - `id` INT PRIMARY KEY, the only enforced constraint
/// - `name` and `email` free text, nullable
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INT PRIMARY KEY,
    name VARCHAR(255),
    email VARCHAR(255)
);
"#;
