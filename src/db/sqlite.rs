use crate::db::models::DbUser;
use crate::db::schema::SQLITE_INIT;
use crate::error::DemoError;
use serde_json::{Map, Number, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Pool, Row, Sqlite, TypeInfo, ValueRef};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

/// One result row keyed by column name.
pub type FieldMap = Map<String, Value>;

#[derive(Clone)]
pub struct UsersStorage {
    pool: SqlitePool,
}

impl UsersStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`.
    ///
    /// An in-memory SQLite database lives only as long as one of its
    /// connections, so the pool never lets its last connection go.
    pub async fn connect(database_url: &str) -> Result<Self, DemoError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_opts)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), DemoError> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn insert_user(&self, user: &DbUser) -> Result<(), DemoError> {
        sqlx::query("INSERT INTO users (id, name, email) VALUES (?, ?, ?)")
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<DbUser>, DemoError> {
        let users = sqlx::query_as::<_, DbUser>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Run `sql` exactly as given and return every row as a field map.
    ///
    /// The text is not inspected; callers that splice request input into it
    /// get SQL injection (CWE-89).
    pub async fn query_rows(&self, sql: &str) -> Result<Vec<FieldMap>, DemoError> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        rows.iter().map(Self::row_to_map).collect()
    }

    fn row_to_map(row: &SqliteRow) -> Result<FieldMap, DemoError> {
        let mut fields = Map::with_capacity(row.columns().len());
        for column in row.columns() {
            let idx = column.ordinal();
            let raw = row.try_get_raw(idx)?;
            let value = if raw.is_null() {
                Value::Null
            } else {
                let type_name = raw.type_info().name().to_string();
                match type_name.as_str() {
                    "INTEGER" => Value::from(row.try_get::<i64, _>(idx)?),
                    "REAL" => Number::from_f64(row.try_get::<f64, _>(idx)?)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                    "BLOB" => Value::from(row.try_get::<Vec<u8>, _>(idx)?),
                    _ => Value::String(row.try_get::<String, _>(idx)?),
                }
            };
            fields.insert(column.name().to_string(), value);
        }
        Ok(fields)
    }
}
