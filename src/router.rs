use axum::{Router, routing::get};
use std::sync::Arc;

use crate::config::Config;
use crate::db::UsersStorage;
use crate::handlers::{get_user, ping_host, read_file, search_users, welcome_user};

#[derive(Clone)]
pub struct DemoState {
    pub storage: UsersStorage,
    pub data_dir: Arc<str>,
    pub ping_command: Arc<str>,
}

impl DemoState {
    pub fn new(
        storage: UsersStorage,
        data_dir: impl Into<Arc<str>>,
        ping_command: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            storage,
            data_dir: data_dir.into(),
            ping_command: ping_command.into(),
        }
    }

    pub fn from_config(storage: UsersStorage, cfg: &Config) -> Self {
        Self::new(storage, cfg.data_dir.as_str(), cfg.ping_command.as_str())
    }
}

pub fn demo_router(state: DemoState) -> Router {
    let api = Router::new()
        .route("/users/{user_id}", get(get_user))
        .route("/search", get(search_users))
        .route("/welcome", get(welcome_user))
        .route("/files/{filename}", get(read_file))
        .route("/ping", get(ping_host));

    Router::new().nest("/api", api).with_state(state)
}
