use crate::db::models::{DbUser, SEED_USERS};
use crate::db::sqlite::UsersStorage;
use crate::error::DemoError;
use tracing::{error, info};

/// Create the `users` table and insert the fixed demo rows.
///
/// Failures are logged and swallowed so the server starts either way. The
/// inserts are not guarded, so a second run stops at the first duplicate id.
pub async fn seed_users(storage: &UsersStorage) {
    match try_seed(storage).await {
        Ok(count) => info!(count, "seeded users table"),
        Err(e) => error!(error = %e, "Error initializing database"),
    }
}

async fn try_seed(storage: &UsersStorage) -> Result<usize, DemoError> {
    storage.init_schema().await?;

    let mut inserted = 0;
    for (id, name, email) in SEED_USERS {
        storage.insert_user(&DbUser::new(id, name, email)).await?;
        inserted += 1;
    }
    Ok(inserted)
}
