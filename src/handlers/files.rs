use axum::extract::{Path, State};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::router::DemoState;

/// GET /api/files/{filename} -> file contents, or the read error as text.
pub async fn read_file(State(state): State<DemoState>, Path(filename): Path<String>) -> String {
    // CWE-22: no normalization or containment check on the joined path.
    let path = PathBuf::from(format!("{}{}", state.data_dir, filename));
    debug!(path = %path.display(), "reading file");

    match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "file read failed");
            format!("Error reading file: {e}")
        }
    }
}
