use axum::{extract::Query, response::Html};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct WelcomeQuery {
    pub username: String,
}

/// GET /api/welcome?username=... -> greeting page.
pub async fn welcome_user(Query(query): Query<WelcomeQuery>) -> Html<String> {
    debug!(username = %query.username, "rendering welcome page");
    let mut page = String::from("<html><body>\n");
    // CWE-79: username written into HTML without encoding.
    page.push_str(&format!("<h1>Welcome {}!</h1>\n", query.username));
    page.push_str("</body></html>\n");
    Html(page)
}
