use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl DbUser {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Rows inserted by the seeder on every start.
pub const SEED_USERS: [(i64, &str, &str); 3] = [
    (1, "John Doe", "john.doe@example.com"),
    (2, "Jane Smith", "jane.smith@example.com"),
    (3, "Bob Johnson", "bob.johnson@example.com"),
];
